//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/unistore-counter/ on Linux)
//!
//! stdout belongs to the counter's output, so nothing is logged there.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("unistore-counter-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        dirs::cache_dir()
            .map(|dir| dir.join("unistore-counter").join(&filename))
            .unwrap_or_else(|| PathBuf::from(filename))
    }
}

/// Level from a `RUST_LOG`-style value; unknown values fall back to info
fn parse_level(value: Option<&str>) -> LevelFilter {
    match value {
        Some(v) => v.trim().parse().unwrap_or(LevelFilter::Info),
        None => LevelFilter::Debug,
    }
}

/// Initialize file-based logging
///
/// Returns the path of the log file.
pub fn init() -> Result<PathBuf> {
    let log_file = log_file_path();
    if let Some(dir) = log_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let level = parse_level(std::env::var("RUST_LOG").ok().as_deref());

    // Configure simplelog with timestamps
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), LevelFilter::Debug);
        assert_eq!(parse_level(Some("warn")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("TRACE")), LevelFilter::Trace);
        assert_eq!(parse_level(Some("off")), LevelFilter::Off);
        assert_eq!(parse_level(Some("chatty")), LevelFilter::Info);
    }

    #[test]
    fn test_log_file_name_is_timestamped() {
        let path = log_file_path();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("unistore-counter-"));
        assert!(name.ends_with(".log"));
    }
}
