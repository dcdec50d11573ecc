//! File extension lookup probe.
//!
//! Fast path of the cascade: a case-insensitive match against the fixed
//! table of extensions the ingest pipeline understands. A hit is final;
//! anything else falls through to content sniffing.

use std::path::Path;

use crate::detect::{FileFormat, Probe};
use crate::Error;

/// Probe that maps known file extensions directly to a format.
pub struct ExtensionProbe {
    _private: (),
}

impl ExtensionProbe {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for ExtensionProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for ExtensionProbe {
    fn name(&self) -> &'static str {
        "extension"
    }

    fn probe(&self, path: &Path) -> Result<Option<FileFormat>, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Ok(lookup_extension(&ext))
    }
}

/// Map a lowercase extension to its format, if it is in the table.
fn lookup_extension(ext: &str) -> Option<FileFormat> {
    match ext {
        "json" => Some(FileFormat::Json),
        "xml" => Some(FileFormat::Xml),
        "html" | "htm" => Some(FileFormat::Html),
        "xlsx" | "xls" => Some(FileFormat::Excel),
        "csv" => Some(FileFormat::Csv),
        "txt" => Some(FileFormat::Text),
        _ => None,
    }
}
