//! Logging setup for the pyramid tools.
//!
//! Without the `tracing` feature, [`init_with_level`] installs a small `log`
//! backend writing `[uptime LEVEL module] message` lines to stderr, where
//! `module` is the last path segment of the record's target. With it,
//! [`init_tracing`] installs a `tracing-subscriber` formatter; `RUST_LOG`
//! overrides the level passed in.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, fmt::format::FmtSpan, util::SubscriberInitExt, EnvFilter};

static STDERR_LOGGER: OnceLock<StderrLogger> = OnceLock::new();

struct StderrLogger {
    max: LevelFilter,
    since: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:8.3}s {:<5} {}] {}",
            self.since.elapsed().as_secs_f64(),
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Install the stderr logger. Later calls keep the first logger and level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if STDERR_LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = STDERR_LOGGER.get_or_init(|| StderrLogger {
        max: level,
        since: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Parse a level name (`"info"`, `"debug"`, ...) falling back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name).unwrap_or(LevelFilter::Info)
}

/// Filter directive for the tracing subscriber: a non-empty `RUST_LOG` wins,
/// otherwise the parsed `fallback` level.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn filter_directive(env: Option<&str>, fallback: &str) -> String {
    match env.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_owned(),
        _ => parse_level(fallback).to_string().to_ascii_lowercase(),
    }
}

/// Install a stderr `tracing` subscriber filtered at `level` unless `RUST_LOG`
/// says otherwise. `log` records are bridged into it.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::new(filter_directive(env.as_deref(), level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
