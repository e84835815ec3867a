//! `log` backend writing to the browser console.
//!
//! The core crate logs through the `log` facade. In the browser those records
//! go to `console.error`/`warn`/`info`/`debug` by level; on native targets
//! (tests) they go to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_console(record.level(), &format_record(record));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, message: &str) {
    let message = JsValue::from_str(message);
    match level {
        Level::Error => web_sys::console::error_1(&message),
        Level::Warn => web_sys::console::warn_1(&message),
        Level::Info => web_sys::console::info_1(&message),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(level: Level, message: &str) {
    eprintln!("{:<5} {}", level, message);
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn init_logging(level: LevelFilter) {
    // set_logger fails once a logger is installed; keep the existing one
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Set the log level: "off", "error", "warn", "info", "debug" or "trace".
///
/// # Errors
/// Returns an error for an unknown level name
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level).ok_or_else(|| {
        JsValue::from_str(&format!("Unknown log level: {}", level))
    })?;
    init_logging(filter);
    Ok(())
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    level.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_format_record() {
        let formatted = format_record(
            &Record::builder()
                .args(format_args!("placed corners"))
                .level(Level::Debug)
                .target("quadcrop_core::editor")
                .build(),
        );
        assert_eq!(formatted, "[quadcrop_core::editor] placed corners");
    }

    #[test]
    fn test_init_logging_sets_level() {
        init_logging(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        init_logging(LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
