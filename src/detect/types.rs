//! Core types for the format detection cascade.

use std::fmt;

use serde::Serialize;

/// The structural format of a case-file export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Json,
    Xml,
    Html,
    Excel,
    Csv,
    Text,
    Unknown,
}

impl FileFormat {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Xml => "xml",
            FileFormat::Html => "html",
            FileFormat::Excel => "excel",
            FileFormat::Csv => "csv",
            FileFormat::Text => "text",
            FileFormat::Unknown => "unknown",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "xml" => Some(FileFormat::Xml),
            "html" => Some(FileFormat::Html),
            "excel" => Some(FileFormat::Excel),
            "csv" => Some(FileFormat::Csv),
            "text" => Some(FileFormat::Text),
            "unknown" => Some(FileFormat::Unknown),
            _ => None,
        }
    }

    /// Whether file content under this format is text that carries an
    /// encoding. `Excel` and `Unknown` content is opaque bytes.
    pub fn is_text_based(&self) -> bool {
        matches!(
            self,
            FileFormat::Json
                | FileFormat::Xml
                | FileFormat::Html
                | FileFormat::Csv
                | FileFormat::Text
        )
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
