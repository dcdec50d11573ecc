//! Path metadata extraction.
//!
//! Case batches arrive as `<case>/<request>/<file>` trees where the
//! directory names carry the case number and request code, and the
//! filename tells request from answer. Extraction is purely lexical -
//! file content is never read, and unmatched fields stay absent.

use std::fmt;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Case directory names: three digits, one to three uppercase Cyrillic
/// letters, one uppercase Cyrillic letter (e.g. `890-ТМ-Д`).
static CASE_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-[А-ЯІЇЄҐ]{1,3}-[А-ЯІЇЄҐ]$").unwrap());

/// Request directory names (e.g. `В-2025-1898-062-kye`).
static REQUEST_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[А-ЯІЇЄҐ]-\d{4}-\d{4}-\d{3}-[a-zA-Z0-9]+$").unwrap());

/// Whether a file holds the outgoing request or the registry's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Request,
    Answer,
}

impl FileRole {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileRole::Request => "request",
            FileRole::Answer => "answer",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata recovered from a file's path components.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathMetadata {
    /// Case directory name, e.g. `890-ТМ-Д`.
    pub case_number: Option<String>,
    /// Request directory name, e.g. `В-2025-1898-062-kye`.
    pub request_code: Option<String>,
    /// Request-vs-answer role from the filename stem.
    pub file_type: Option<FileRole>,
    /// The filename itself.
    pub filename: String,
    /// Immediate parent directory name; absent only when the path has no
    /// parent (an empty component yields an empty string).
    pub parent_dir: Option<String>,
}

/// Extract metadata from a file path.
///
/// The three identifying fields are independent of each other: a path may
/// match any subset of them. Never fails - whatever does not match stays
/// `None`.
pub fn extract_metadata<P: AsRef<Path>>(path: P) -> PathMetadata {
    let path = path.as_ref();

    let mut metadata = PathMetadata {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        parent_dir: parent_dir_name(path),
        ..Default::default()
    };

    // Role from the filename stem. `request` is checked first and wins
    // when both substrings are present.
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if stem.contains("request") {
        metadata.file_type = Some(FileRole::Request);
    } else if stem.contains("answer") || stem.contains("response") {
        metadata.file_type = Some(FileRole::Answer);
    }

    // Case number: deepest matching component wins.
    for component in path.components().rev() {
        let part = component.as_os_str().to_string_lossy();
        if CASE_NUMBER_PATTERN.is_match(&part) {
            metadata.case_number = Some(part.into_owned());
            break;
        }
    }

    // Request code is only read off the immediate parent directory.
    if let Some(parent) = metadata.parent_dir.as_deref() {
        if REQUEST_CODE_PATTERN.is_match(parent) {
            metadata.request_code = Some(parent.to_string());
        }
    }

    debug!("extracted metadata from {}: {:?}", metadata.filename, metadata);

    metadata
}

fn parent_dir_name(path: &Path) -> Option<String> {
    path.parent().map(|parent| {
        parent
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
