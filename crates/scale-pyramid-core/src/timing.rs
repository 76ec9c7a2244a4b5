//! Wall-clock accounting per pipeline stage.
//!
//! A [`StageTimer`] accumulates the time spent in named stages across many
//! calls (one `resample` per level, say) and turns into a serializable
//! [`TimingsMs`] when the run is over.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Accumulated time of one named stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub name: String,
    pub calls: usize,
    pub total_ms: f64,
}

/// Stage timings of a finished run, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingsMs {
    pub stages: Vec<StageTiming>,
    pub total: f64,
}

impl TimingsMs {
    pub fn stage(&self, name: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.name == name)
    }
}

#[derive(Debug)]
pub struct StageTimer {
    started: Instant,
    stages: Vec<(&'static str, usize, Duration)>,
}

impl Default for StageTimer {
    fn default() -> Self {
        Self::start()
    }
}

impl StageTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            stages: Vec::new(),
        }
    }

    /// Run `f`, charging its duration to `stage`.
    pub fn time<T>(&mut self, stage: &'static str, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let value = f();
        self.record(stage, t.elapsed());
        value
    }

    pub fn record(&mut self, stage: &'static str, elapsed: Duration) {
        match self.stages.iter_mut().find(|(name, _, _)| *name == stage) {
            Some((_, calls, total)) => {
                *calls += 1;
                *total += elapsed;
            }
            None => self.stages.push((stage, 1, elapsed)),
        }
    }

    pub fn finish(self) -> TimingsMs {
        TimingsMs {
            stages: self
                .stages
                .into_iter()
                .map(|(name, calls, total)| StageTiming {
                    name: name.to_owned(),
                    calls,
                    total_ms: as_ms(total),
                })
                .collect(),
            total: as_ms(self.started.elapsed()),
        }
    }
}

fn as_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}
