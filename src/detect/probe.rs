//! Probe trait and related utilities.

use std::path::Path;

use crate::Error;

use super::FileFormat;

/// A single probe in the format detection cascade.
///
/// Each probe examines the file and either:
/// - Returns `Some(format)` if it can confidently classify
/// - Returns `None` to pass to the next probe
///
/// # Implementation Notes
///
/// - Probes must be pure functions of the path and the file's current bytes
/// - Return `None` liberally - it's better to let the next probe try
/// - An `Err` is caught and logged by the cascade runner, never propagated
pub trait Probe: Send + Sync {
    /// The name of this probe (for debugging/logging).
    fn name(&self) -> &'static str;

    /// Try to classify the file.
    ///
    /// Returns:
    /// - `Ok(Some(format))` if classification is confident
    /// - `Ok(None)` to pass to the next probe
    /// - `Err(e)` on a read/decode failure (logged by the runner)
    fn probe(&self, path: &Path) -> Result<Option<FileFormat>, Error>;
}
