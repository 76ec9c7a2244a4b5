//! Planar floating-point image storage.
//!
//! Both types here store `channels` planes back to back. Within a plane the
//! *outer* axis is the slow one and the *inner* axis is contiguous. The
//! separable resizer reads along the inner axis and writes a buffer whose axes
//! are swapped, so two passes restore the original orientation without an
//! explicit transpose.

/// Errors produced when constructing image buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid buffer length (expected {expected} elements, got {got})")]
    BufferLength { expected: usize, got: usize },
    #[error("image shape has a zero extent (channels={channels}, outer={outer}, inner={inner})")]
    EmptyShape {
        channels: usize,
        outer: usize,
        inner: usize,
    },
}

fn checked_len(channels: usize, outer: usize, inner: usize) -> Result<usize, ImageError> {
    if channels == 0 || outer == 0 || inner == 0 {
        return Err(ImageError::EmptyShape {
            channels,
            outer,
            inner,
        });
    }
    Ok(channels * outer * inner)
}

/// Axis-agnostic planar buffer, element `(c, o, i)` lives at
/// `(c * outer + o) * inner + i`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarBuffer {
    channels: usize,
    outer: usize,
    inner: usize,
    data: Vec<f32>,
}

impl PlanarBuffer {
    /// Zero-filled buffer of the given shape.
    pub fn zeros(channels: usize, outer: usize, inner: usize) -> Result<Self, ImageError> {
        let len = checked_len(channels, outer, inner)?;
        Ok(Self {
            channels,
            outer,
            inner,
            data: vec![0.0; len],
        })
    }

    /// Wrap an existing vector, checking its length against the shape.
    pub fn from_vec(
        channels: usize,
        outer: usize,
        inner: usize,
        data: Vec<f32>,
    ) -> Result<Self, ImageError> {
        let expected = checked_len(channels, outer, inner)?;
        if data.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            channels,
            outer,
            inner,
            data,
        })
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn outer(&self) -> usize {
        self.outer
    }

    #[inline]
    pub fn inner(&self) -> usize {
        self.inner
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Contiguous inner-axis run for channel `c` at outer position `o`.
    #[inline]
    pub fn lane(&self, c: usize, o: usize) -> &[f32] {
        let start = (c * self.outer + o) * self.inner;
        &self.data[start..start + self.inner]
    }

    /// The whole `outer * inner` plane of channel `c`.
    #[inline]
    pub fn plane(&self, c: usize) -> &[f32] {
        let n = self.outer * self.inner;
        &self.data[c * n..(c + 1) * n]
    }

    #[inline]
    pub fn plane_mut(&mut self, c: usize) -> &mut [f32] {
        let n = self.outer * self.inner;
        &mut self.data[c * n..(c + 1) * n]
    }
}

/// Multi-channel `f32` image stored column-major per channel.
///
/// The outer axis is `x` and the inner axis is `y`, i.e. every column of every
/// channel is contiguous. This is the layout the two-pass resizer consumes and
/// produces.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarImage {
    height: usize,
    width: usize,
    buf: PlanarBuffer,
}

impl PlanarImage {
    pub fn zeros(height: usize, width: usize, channels: usize) -> Result<Self, ImageError> {
        Ok(Self {
            height,
            width,
            buf: PlanarBuffer::zeros(channels, width, height)?,
        })
    }

    /// Image where every pixel carries `values` (one entry per channel).
    pub fn filled(height: usize, width: usize, values: &[f32]) -> Result<Self, ImageError> {
        let mut img = Self::zeros(height, width, values.len())?;
        for (c, &v) in values.iter().enumerate() {
            img.buf.plane_mut(c).fill(v);
        }
        Ok(img)
    }

    /// Build from interleaved row-major samples (`[y][x][c]`), the layout of
    /// `image::Rgba32FImage` and most decoders.
    pub fn from_interleaved(
        height: usize,
        width: usize,
        channels: usize,
        samples: &[f32],
    ) -> Result<Self, ImageError> {
        let mut img = Self::zeros(height, width, channels)?;
        if samples.len() != channels * height * width {
            return Err(ImageError::BufferLength {
                expected: channels * height * width,
                got: samples.len(),
            });
        }
        for (idx, px) in samples.chunks_exact(channels).enumerate() {
            let (y, x) = (idx / width, idx % width);
            for (c, &v) in px.iter().enumerate() {
                img.set(c, y, x, v);
            }
        }
        Ok(img)
    }

    /// Wrap a planar buffer whose outer axis is `x` and inner axis is `y`.
    pub fn from_buffer(buf: PlanarBuffer) -> Self {
        Self {
            height: buf.inner(),
            width: buf.outer(),
            buf,
        }
    }

    /// Interleaved row-major copy (`[y][x][c]`).
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.buf.as_slice().len());
        for y in 0..self.height {
            for x in 0..self.width {
                for c in 0..self.channels() {
                    out.push(self.get(c, y, x));
                }
            }
        }
        out
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.buf.channels()
    }

    #[inline]
    fn index(&self, c: usize, y: usize, x: usize) -> usize {
        (c * self.width + x) * self.height + y
    }

    #[inline]
    pub fn get(&self, c: usize, y: usize, x: usize) -> f32 {
        self.buf.as_slice()[self.index(c, y, x)]
    }

    #[inline]
    pub fn set(&mut self, c: usize, y: usize, x: usize, v: f32) {
        let i = self.index(c, y, x);
        self.buf.as_mut_slice()[i] = v;
    }

    /// Contiguous column `x` of channel `c`.
    #[inline]
    pub fn channel_column(&self, c: usize, x: usize) -> &[f32] {
        self.buf.lane(c, x)
    }

    #[inline]
    pub fn as_buffer(&self) -> &PlanarBuffer {
        &self.buf
    }

    /// Mutable samples in place. The buffer shape cannot change through this.
    #[inline]
    pub fn as_mut_buffer(&mut self) -> &mut PlanarBuffer {
        &mut self.buf
    }

    pub fn into_buffer(self) -> PlanarBuffer {
        self.buf
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        self.buf.as_slice()
    }
}
