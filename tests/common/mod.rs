//! Common test utilities for integration tests
//!
//! Provides temporary log directories, settings fixtures and readers for
//! the files the sinks produce.

use std::fs;
use std::path::Path;

use logfan::LogSettings;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Settings writing into a fresh temporary log directory
#[allow(dead_code)]
pub fn temp_settings() -> (TempDir, LogSettings) {
    let dir = temp_dir();
    let settings = LogSettings::in_dir(dir.path());
    (dir, settings)
}

/// Lines of a log file, empty when the file does not exist
#[allow(dead_code)]
pub fn read_lines(path: impl AsRef<Path>) -> Vec<String> {
    fs::read_to_string(path)
        .map(|contents| contents.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Parse every line of a JSON lines file
#[allow(dead_code)]
pub fn read_json_lines(path: impl AsRef<Path>) -> Vec<serde_json::Value> {
    read_lines(path)
        .iter()
        .map(|line| serde_json::from_str(line).expect("log line should be valid JSON"))
        .collect()
}
