//! Statistical encoding detection.
//!
//! Case-file batches mix UTF-8 exports with legacy `windows-1251` and
//! `koi8-u` content, and filenames give no hint. Detection samples the
//! leading bytes and asks a byte-frequency detector for its best guess;
//! the guess is normalized into a small canonical set so downstream
//! decoders see stable names.
//!
//! Detection never fails: empty files, unreadable paths, and a silent
//! detector all come back as `utf-8`.

use std::path::Path;

use log::{debug, error, warn};

use crate::read_prefix;

/// Bytes sampled per file for detection.
const SAMPLE_LEN: usize = 10_000;

/// Detect the text encoding of a file.
///
/// Reads up to the first 10 KB and runs the statistical detector over it.
/// The detector's confidence is logged but does not gate the result; a
/// low-confidence guess is still returned. Defaults to `utf-8` on any
/// failure or empty content.
pub fn detect_encoding<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    let sample = match read_prefix(path, SAMPLE_LEN) {
        Ok(sample) => sample,
        Err(e) => {
            error!("error detecting encoding for {}: {}", path.display(), e);
            return "utf-8".to_string();
        }
    };

    if sample.is_empty() {
        warn!("empty file for encoding detection: {}", path.display());
        return "utf-8".to_string();
    }

    let (charset, confidence, _) = chardet::detect(&sample);

    if charset.is_empty() {
        debug!("defaulting to utf-8 encoding for: {}", path.display());
        return "utf-8".to_string();
    }

    debug!(
        "detected encoding: {} (confidence: {:.2}) for {}",
        charset,
        confidence,
        path.display()
    );

    normalize_encoding(&charset)
}

/// Map detector charset names onto the canonical set.
///
/// ASCII folds into `utf-8` (a strict subset); names outside the canonical
/// set pass through unchanged.
fn normalize_encoding(charset: &str) -> String {
    let lower = charset.to_lowercase();

    if lower.contains("utf-8") || lower.contains("utf8") {
        "utf-8".to_string()
    } else if lower.contains("windows-1251") || lower.contains("cp1251") {
        "windows-1251".to_string()
    } else if lower.contains("koi8") {
        "koi8-u".to_string()
    } else if lower.contains("ascii") {
        "utf-8".to_string()
    } else {
        charset.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_utf8_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("Запит про надання інформації у справі 890-ТМ-Д".as_bytes())
            .unwrap();
        assert_eq!(detect_encoding(file.path()), "utf-8");
    }

    #[test]
    fn test_empty_file_defaults_to_utf8() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(detect_encoding(file.path()), "utf-8");
    }

    #[test]
    fn test_missing_file_defaults_to_utf8() {
        assert_eq!(detect_encoding("/no/such/answer.xml"), "utf-8");
    }

    #[test]
    fn test_normalize_utf8_variants() {
        assert_eq!(normalize_encoding("UTF-8"), "utf-8");
        assert_eq!(normalize_encoding("utf8"), "utf-8");
        assert_eq!(normalize_encoding("UTF-8-SIG"), "utf-8");
    }

    #[test]
    fn test_normalize_cyrillic_charsets() {
        assert_eq!(normalize_encoding("windows-1251"), "windows-1251");
        assert_eq!(normalize_encoding("WINDOWS-1251"), "windows-1251");
        assert_eq!(normalize_encoding("cp1251"), "windows-1251");
        assert_eq!(normalize_encoding("KOI8-R"), "koi8-u");
        assert_eq!(normalize_encoding("koi8-u"), "koi8-u");
    }

    #[test]
    fn test_normalize_ascii_folds_into_utf8() {
        assert_eq!(normalize_encoding("ascii"), "utf-8");
        assert_eq!(normalize_encoding("US-ASCII"), "utf-8");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize_encoding("ISO-8859-5"), "ISO-8859-5");
        assert_eq!(normalize_encoding("TIS-620"), "TIS-620");
    }
}
