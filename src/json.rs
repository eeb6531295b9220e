//! JSON output for the text document and the run summary.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Serialize `value` as JSON with two-space indentation. Non-ASCII text is
/// written as-is.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `value` as JSON to `path`, creating parent directories.
///
/// No trailing newline is written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = to_json(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
