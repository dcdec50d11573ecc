//! Dossier - Case-file triage
//!
//! Classifies heterogeneous case-file exports (JSON, XML, HTML,
//! spreadsheets, CSV, plain text) before any semantic parsing happens.
//! For each file it determines three independent facts: the structural
//! format, the byte-level text encoding, and the metadata implied by the
//! filesystem path (case number, request code, request-vs-answer role).
//!
//! # Architecture
//!
//! Classification is a cascade:
//! 1. Fast extension lookup against a fixed table
//! 2. Content sniffing over the leading bytes (markup, container
//!    signatures, delimiter heuristics)
//!
//! Every component is a pure function of the path and the file's current
//! bytes, reads a bounded prefix only, and degrades to a safe default
//! instead of failing - a single malformed file must never abort a batch.
//!
//! # Example
//!
//! ```no_run
//! use dossier::get_file_info;
//!
//! let info = get_file_info("nabu_data/890-ТМ-Д/В-2025-1898-062-kye/answer.xml");
//!
//! println!("Format: {}", info.format);
//! if let Some(encoding) = &info.encoding {
//!     println!("Encoding: {}", encoding);
//! }
//! if let Some(case) = &info.metadata.case_number {
//!     println!("Case: {}", case);
//! }
//! ```

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use log::error;
use serde::Serialize;

pub use error::Error;

// Format detection cascade
pub mod detect;

// Statistical encoding detection
pub mod encoding;

// Path metadata extraction
pub mod metadata;

mod error {
    use std::fmt;
    use std::path::PathBuf;

    #[derive(Debug)]
    pub enum Error {
        /// Path is missing or is not a regular file.
        NotFound(PathBuf),
        /// I/O failure during a prefix read.
        Read(std::io::Error),
        /// Bytes could not be interpreted under any attempted encoding.
        Decode(String),
    }

    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Error::NotFound(path) => {
                    write!(f, "not found or not a regular file: {}", path.display())
                }
                Error::Read(e) => write!(f, "read error: {}", e),
                Error::Decode(e) => write!(f, "decode error: {}", e),
            }
        }
    }

    impl std::error::Error for Error {}

    impl From<std::io::Error> for Error {
        fn from(e: std::io::Error) -> Self {
            Error::Read(e)
        }
    }
}

use detect::FileFormat;
use metadata::PathMetadata;

/// Leading bytes inspected by the binary check.
const BINARY_SNIFF_LEN: usize = 1024;

/// Everything the ingest pipeline needs to know about one file before
/// parsing it: which parser to pick, how to decode the bytes, and where to
/// file the resulting records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDescriptor {
    /// The path as given.
    pub path: String,
    /// Just the filename.
    pub name: String,
    /// File size in bytes (0 when the path does not exist).
    pub size: u64,
    /// Structural format from the detection cascade.
    pub format: FileFormat,
    /// Detected encoding; present only for text-based formats.
    pub encoding: Option<String>,
    /// Whether the leading bytes look binary rather than text.
    pub is_binary: bool,
    /// Metadata recovered from the path components.
    pub metadata: PathMetadata,
}

/// Build the full descriptor for one file.
///
/// This is the single entry point batch ingestion calls per file. It never
/// fails: a missing or unreadable path yields a well-formed descriptor
/// with `Unknown` format, zero size, and absent encoding.
pub fn get_file_info<P: AsRef<Path>>(path: P) -> FileDescriptor {
    let path = path.as_ref();

    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let format = detect::detect_format(path);
    let is_binary = is_binary_file(path);
    let metadata = metadata::extract_metadata(path);

    // Encoding only means something for text-bearing formats; excel and
    // unknown content is opaque bytes.
    let encoding = if format.is_text_based() {
        Some(encoding::detect_encoding(path))
    } else {
        None
    };

    FileDescriptor {
        path: path.to_string_lossy().into_owned(),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size,
        format,
        encoding,
        is_binary,
        metadata,
    }
}

// =============================================================================
// BINARY CHECK
// =============================================================================

/// Check whether a file's leading bytes are binary rather than text.
///
/// A null byte in the first 1024 bytes, or a prefix that is not valid
/// UTF-8, counts as binary. Fails open: unreadable files are reported as
/// non-binary so they keep flowing through the pipeline.
pub fn is_binary_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();

    let chunk = match read_prefix(path, BINARY_SNIFF_LEN) {
        Ok(chunk) => chunk,
        Err(e) => {
            error!("error checking if file is binary {}: {}", path.display(), e);
            return false;
        }
    };

    if chunk.contains(&0) {
        return true;
    }

    std::str::from_utf8(&chunk).is_err()
}

/// Bounded prefix read shared by the classifiers.
pub(crate) fn read_prefix(path: &Path, limit: usize) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::new();
    file.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FileRole;
    use std::io::Write;

    fn fixture(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_binary_on_null_byte() {
        let file = fixture("", b"looks like text\x00but is not");
        assert!(is_binary_file(file.path()));
    }

    #[test]
    fn test_binary_on_invalid_utf8() {
        let file = fixture("", &[0xFF, 0xFE, 0x41, 0x42]);
        assert!(is_binary_file(file.path()));
    }

    #[test]
    fn test_text_is_not_binary() {
        let file = fixture("", "звичайний текст".as_bytes());
        assert!(!is_binary_file(file.path()));
    }

    #[test]
    fn test_missing_file_is_not_binary() {
        assert!(!is_binary_file("/no/such/file"));
    }

    #[test]
    fn test_descriptor_for_json_file() {
        let file = fixture(".json", "{\"справа\": \"890-ТМ-Д\"}".as_bytes());
        let info = get_file_info(file.path());

        assert_eq!(info.format, FileFormat::Json);
        assert_eq!(info.encoding.as_deref(), Some("utf-8"));
        assert!(!info.is_binary);
        assert!(info.size > 0);
    }

    #[test]
    fn test_descriptor_for_xlsx_has_no_encoding() {
        let mut content = b"PK\x03\x04".to_vec();
        content.extend_from_slice(&[0u8; 32]);
        let file = fixture(".xlsx", &content);
        let info = get_file_info(file.path());

        assert_eq!(info.format, FileFormat::Excel);
        assert_eq!(info.encoding, None);
    }

    #[test]
    fn test_descriptor_for_missing_path() {
        let info = get_file_info("/no/such/dir/answer.xml");

        assert_eq!(info.format, FileFormat::Unknown);
        assert_eq!(info.encoding, None);
        assert!(!info.is_binary);
        assert_eq!(info.size, 0);
        assert_eq!(info.name, "answer.xml");
        // Path metadata needs no file on disk.
        assert_eq!(info.metadata.file_type, Some(FileRole::Answer));
    }

    #[test]
    fn test_descriptor_is_idempotent() {
        let file = fixture(".csv", b"a;b;c\n1;2;3\n");
        let first = get_file_info(file.path());
        let second = get_file_info(file.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_null_byte_is_binary_regardless_of_format_tag() {
        let file = fixture(".txt", b"text\x00with a null");
        let info = get_file_info(file.path());

        assert_eq!(info.format, FileFormat::Text);
        assert!(info.is_binary);
    }

    #[test]
    fn test_descriptor_serializes_to_json() {
        let file = fixture(".json", b"{}");
        let info = get_file_info(file.path());
        let json = serde_json::to_string(&info).unwrap();

        assert!(json.contains("\"format\":\"json\""));
        assert!(json.contains("\"is_binary\":false"));
    }
}
