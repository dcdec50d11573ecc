//! Format detection cascade.
//!
//! The detector runs a series of probes in order, returning as soon as any
//! probe produces a classification. Probe order is part of the contract:
//! the extension table is consulted before content is read, and within the
//! content probe XML is tested before the bracket-based checks so SOAP
//! envelopes are not miscaptured.
//!
//! Detection never fails. Missing files, unreadable prefixes, and probe
//! errors all degrade to [`FileFormat::Unknown`] with a logged warning, so
//! one malformed file cannot abort a batch run.
//!
//! # Example
//!
//! ```no_run
//! use dossier::detect::{detect_format, FileFormat};
//!
//! let format = detect_format("exports/response_dump");
//! assert_eq!(format, FileFormat::Json);
//! ```

mod probe;
pub mod probes;
mod types;


pub use probe::Probe;
pub use probes::{ContentProbe, ExtensionProbe};
pub use types::FileFormat;

use std::path::Path;

use log::{debug, error, warn};

use crate::Error;

/// A format detector that runs probes in order until one matches.
pub struct Detector {
    probes: Vec<Box<dyn Probe>>,
}

impl Detector {
    /// Create an empty detector (no probes).
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    /// Create a detector with the given probes.
    pub fn with_probes(probes: Vec<Box<dyn Probe>>) -> Self {
        Self { probes }
    }

    /// Create a detector with the default probes.
    ///
    /// Probes: ExtensionProbe → ContentProbe → fallback
    pub fn default_probes() -> Self {
        let mut detector = Self::new();
        detector.add_probe(ExtensionProbe::new());
        detector.add_probe(ContentProbe::new());
        detector
    }

    /// Add a probe to the end of the cascade.
    pub fn add_probe<P: Probe + 'static>(&mut self, probe: P) {
        self.probes.push(Box::new(probe));
    }

    /// Classify a file by running probes in order.
    ///
    /// Returns the first match, or [`FileFormat::Unknown`] when the path is
    /// missing, is not a regular file, or no probe matched. Probe failures
    /// are logged and skipped rather than propagated.
    pub fn detect(&self, path: &Path) -> FileFormat {
        if let Err(e) = regular_file_guard(path) {
            error!("{}", e);
            return FileFormat::Unknown;
        }

        for probe in &self.probes {
            match probe.probe(path) {
                Ok(Some(format)) => {
                    debug!(
                        "detected {} by {} probe: {}",
                        format,
                        probe.name(),
                        path.display()
                    );
                    return format;
                }
                Ok(None) => {}
                Err(e) => {
                    error!(
                        "{} probe failed for {}: {}",
                        probe.name(),
                        path.display(),
                        e
                    );
                }
            }
        }

        warn!("could not detect format for: {}", path.display());
        FileFormat::Unknown
    }

    /// Get the number of probes in the cascade.
    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify one file with the default probe cascade.
pub fn detect_format<P: AsRef<Path>>(path: P) -> FileFormat {
    Detector::default_probes().detect(path.as_ref())
}

fn regular_file_guard(path: &Path) -> Result<(), Error> {
    if !path.exists() || !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    Ok(())
}
