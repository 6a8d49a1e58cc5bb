//! Stderr logger for the navigation tools.
//!
//! Lines look like `[  1.204s  INFO marker_nav] message`: elapsed time since
//! installation, level, and the record's target crate. Install it once at
//! startup with [`init_with_level`]; with the `tracing` feature enabled use
//! [`init_tracing`] instead.

use std::io::Write;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct NavLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for NavLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let crate_name = record.target().split("::").next().unwrap_or_default();
        let mut out = std::io::stderr().lock();
        let _ = writeln!(
            out,
            "[{:7.3}s {:>5} {crate_name}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<NavLogger> = OnceLock::new();
/// Set only after `log::set_logger` accepted [`LOGGER`].
static INSTALLED: Mutex<bool> = Mutex::new(false);

/// Install the stderr logger with the provided level filter.
///
/// Once installed, later calls are no-ops and keep the first level. If
/// another logger already owns the `log` facade, every call reports the error.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
    if *installed {
        return Ok(());
    }

    let logger = LOGGER.get_or_init(|| NavLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    *installed = true;
    Ok(())
}

/// Map CLI verbosity flags onto a level filter.
///
/// `quiet` wins over any number of `-v`; zero `-v` means `Warn`.
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Filter used by [`init_tracing`]: `RUST_LOG` when set, else `default_level`.
#[cfg(feature = "tracing")]
fn env_filter(rust_log: Option<&str>, default_level: LevelFilter) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level.as_str().to_ascii_lowercase()))
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, falling back to
/// `default_level` when it is unset or invalid.
///
/// Span close events are emitted so per-frame stage timings show up.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default_level: LevelFilter) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(rust_log.as_deref(), default_level);
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_from_verbosity(0, false), LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1, false), LevelFilter::Info);
        assert_eq!(level_from_verbosity(2, false), LevelFilter::Debug);
        assert_eq!(level_from_verbosity(7, false), LevelFilter::Trace);
        assert_eq!(level_from_verbosity(3, true), LevelFilter::Error);
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        assert!(init_with_level(LevelFilter::Info).is_ok());
        assert!(init_with_level(LevelFilter::Debug).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Info);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_filter_follows_verbosity_without_rust_log() {
        let quiet = env_filter(None, level_from_verbosity(0, true));
        assert_eq!(quiet.max_level_hint(), Some(tracing::level_filters::LevelFilter::ERROR));

        let chatty = env_filter(None, level_from_verbosity(2, false));
        assert_eq!(chatty.max_level_hint(), Some(tracing::level_filters::LevelFilter::DEBUG));

        let env = env_filter(Some("trace"), LevelFilter::Warn);
        assert_eq!(env.max_level_hint(), Some(tracing::level_filters::LevelFilter::TRACE));
    }
}
