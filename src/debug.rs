//! Debug log bridge for glyph-atlas.
//!
//! Routes every `log::info!()` etc. from this crate and its workspace crates to
//! `<temp dir>/glyph_atlas_debug.log`. When `RUST_LOG` is set, records are
//! also mirrored to stderr.
//!
//! Level precedence: the `--log-level` CLI flag, then `RUST_LOG`, then the
//! `log_level` config setting. The file is only created once a record passes
//! the active level.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use glyph_atlas_config::LogLevel;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// File name of the debug log inside the temp directory
pub const LOG_FILE_NAME: &str = "glyph_atlas_debug.log";

/// Set when the CLI or RUST_LOG chose the level; config may not override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

struct LogBridge {
    mirror_stderr: bool,
    sink: Mutex<FileSink>,
}

#[derive(Default)]
struct FileSink {
    file: Option<File>,
    open_failed: bool,
}

impl FileSink {
    fn write_line(&mut self, line: &str) {
        if self.file.is_none() && !self.open_failed {
            match open_log_file() {
                Some(file) => self.file = Some(file),
                // Give up quietly; logging must never break rendering
                None => self.open_failed = true,
            }
        }
        if let Some(file) = self.file.as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &get_timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        if self.mirror_stderr {
            eprint!("{line}");
        }
        self.sink.lock().write_line(&line);
    }

    fn flush(&self) {
        if let Some(file) = self.sink.lock().file.as_mut() {
            let _ = file.flush();
        }
    }
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

fn open_log_file() -> Option<File> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(log_path())
        .ok()?;
    let rule = "=".repeat(80);
    let _ = writeln!(
        file,
        "{rule}\nglyph-atlas {} debug session started at {}\n{rule}",
        crate::VERSION,
        get_timestamp()
    );
    Some(file)
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    format!("[{timestamp}] [{level:<5}] [{target}] {msg}\n")
}

/// Install the log bridge as the global logger.
///
/// `cli_level` comes from `--log-level`. Without it, a `RUST_LOG` level is
/// used; otherwise logging stays off until `apply_config_log_level` runs.
/// Calling this more than once has no further effect.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let env_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| parse_env_level(&value));

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: env_level.is_some(),
        sink: Mutex::new(FileSink::default()),
    });
    if log::set_logger(bridge).is_err() {
        return;
    }

    match cli_level.or(env_level) {
        Some(level) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            log::set_max_level(level.to_level_filter());
        }
        None => log::set_max_level(LevelFilter::Off),
    }
}

/// Apply the level from the config file unless the CLI or `RUST_LOG` already
/// chose one.
pub fn apply_config_log_level(level: LogLevel) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level.to_level_filter());
    }
}

/// Extract the most verbose level named in a `RUST_LOG` value.
///
/// Accepts plain levels (`debug`) and directives (`glyph_atlas=trace,warn`).
/// Returns `None` when no directive names a level.
pub fn parse_env_level(value: &str) -> Option<LogLevel> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            match level.to_ascii_lowercase().as_str() {
                "off" => Some(LogLevel::Off),
                "error" => Some(LogLevel::Error),
                "warn" => Some(LogLevel::Warn),
                "info" => Some(LogLevel::Info),
                "debug" => Some(LogLevel::Debug),
                "trace" => Some(LogLevel::Trace),
                _ => None,
            }
        })
        .max_by_key(|level| level.to_level_filter())
}
