use notelookup_core::config::{LoggingConfig, ResolvedConfig};
use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> =
    Mutex::new(None);

/// Install logging for one `nlk` run.
///
/// Events go to stderr so `--json` and `--quiet` output on stdout stays
/// clean. With `[logging] file` set, runs are appended to that file at
/// `file_level` (falling back to `level`).
pub fn init(cfg: &ResolvedConfig) -> io::Result<()> {
    let logging = &cfg.logging;
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_filter(filter(&logging.level, LevelFilter::INFO));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let Some(path) = &logging.file else {
        registry.init();
        return Ok(());
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(open_log_file(path)?);
    if let Ok(mut g) = LOG_GUARD.lock() {
        *g = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter(file_level(logging), LevelFilter::DEBUG));

    registry.with(file_layer).init();
    Ok(())
}

/// Drop the file writer guard so buffered lines reach disk.
pub fn flush() {
    if let Ok(mut g) = LOG_GUARD.lock() {
        g.take();
    }
}

fn file_level(logging: &LoggingConfig) -> &str {
    logging.file_level.as_deref().unwrap_or(&logging.level)
}

/// `RUST_LOG` directives win over the configured level.
fn filter(level: &str, fallback: LevelFilter) -> EnvFilter {
    let level = parse_level(level).unwrap_or(fallback);
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}
