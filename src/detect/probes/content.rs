//! Content sniffing probe.
//!
//! Slow path of the cascade: reads the leading bytes of the file and walks
//! a fixed sequence of checks. The order is load-bearing - SOAP envelopes
//! start with text that the bracket checks would otherwise capture, so XML
//! is tested before JSON and HTML.

use std::path::Path;

use log::warn;

use crate::detect::{FileFormat, Probe};
use crate::{read_prefix, Error};

/// Leading bytes inspected per file.
const SNIFF_LEN: usize = 1024;

/// Lines sampled by the delimiter heuristic.
const CSV_SAMPLE_LINES: usize = 5;

/// ZIP local-file-header signature (xlsx container).
const XLSX_SIGNATURE: &[u8] = b"PK\x03\x04";

/// OLE compound-document signature (legacy xls).
const XLS_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Probe that classifies by leading content when the extension gave no
/// answer.
pub struct ContentProbe {
    _private: (),
}

impl ContentProbe {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for ContentProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for ContentProbe {
    fn name(&self) -> &'static str {
        "content"
    }

    fn probe(&self, path: &Path) -> Result<Option<FileFormat>, Error> {
        let header = read_prefix(path, SNIFF_LEN)?;

        let preview = match decode_preview(path, &header) {
            Ok(text) => text,
            Err(e) => {
                // Signature checks below still apply to the raw bytes.
                warn!("unreadable text preview for {}: {}", path.display(), e);
                String::new()
            }
        };
        let lead = preview.trim().to_lowercase();

        if lead.starts_with("<?xml")
            || lead.contains("<s:envelope")
            || lead.contains("<soap:envelope")
        {
            return Ok(Some(FileFormat::Xml));
        }

        if lead.starts_with('{') || lead.starts_with('[') {
            return Ok(Some(FileFormat::Json));
        }

        if lead.starts_with("<!doctype html") || lead.starts_with("<html") {
            return Ok(Some(FileFormat::Html));
        }

        if header.starts_with(XLSX_SIGNATURE) {
            return Ok(Some(FileFormat::Excel));
        }

        if header.starts_with(XLS_SIGNATURE) {
            return Ok(Some(FileFormat::Excel));
        }

        if has_consistent_delimiters(&preview) {
            return Ok(Some(FileFormat::Csv));
        }

        // Anything that decoded to non-whitespace text is at least text.
        if !lead.is_empty() {
            return Ok(Some(FileFormat::Text));
        }

        Ok(None)
    }
}

/// Decode the header permissively for the text checks.
///
/// Strict UTF-8 first; if that fails, the statistically detected encoding.
/// Bytes no attempted encoding can represent are dropped.
fn decode_preview(path: &Path, header: &[u8]) -> Result<String, Error> {
    match std::str::from_utf8(header) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let label = crate::encoding::detect_encoding(path);
            match encoding_rs::Encoding::for_label(label.as_bytes()) {
                Some(encoding) => {
                    let (text, _, _) = encoding.decode(header);
                    Ok(text.replace('\u{fffd}', ""))
                }
                None => Err(Error::Decode(format!(
                    "no decoder for detected encoding {:?}",
                    label
                ))),
            }
        }
    }
}

/// Delimiter-count heuristic for headerless CSV exports.
///
/// Takes the first few lines; if every non-blank line contains the same
/// nonzero number of one delimiter candidate, the file is separated values.
fn has_consistent_delimiters(preview: &str) -> bool {
    let lines: Vec<&str> = preview.split('\n').take(CSV_SAMPLE_LINES).collect();

    for delimiter in [',', ';', '\t'] {
        let counts: Vec<usize> = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.matches(delimiter).count())
            .collect();

        if let Some(&first) = counts.first() {
            if first > 0 && counts.iter().all(|&count| count == first) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sniff(content: &[u8]) -> Option<FileFormat> {
        let mut file = tempfile::Builder::new()
            .prefix("sniff")
            .tempfile()
            .unwrap();
        file.write_all(content).unwrap();
        ContentProbe::new().probe(file.path()).unwrap()
    }

    #[test]
    fn test_xml_declaration() {
        assert_eq!(sniff(b"<?xml version=\"1.0\"?><root/>"), Some(FileFormat::Xml));
    }

    #[test]
    fn test_soap_envelope_without_declaration() {
        let body = b"<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\"><s:Body/></s:Envelope>";
        assert_eq!(sniff(body), Some(FileFormat::Xml));

        let body = b"<soap:Envelope><soap:Body/></soap:Envelope>";
        assert_eq!(sniff(body), Some(FileFormat::Xml));
    }

    #[test]
    fn test_json_object_and_array() {
        assert_eq!(sniff(b"{\"case\": 890}"), Some(FileFormat::Json));
        assert_eq!(sniff(b"  [1, 2, 3]"), Some(FileFormat::Json));
    }

    #[test]
    fn test_html_doctype_and_tag() {
        assert_eq!(sniff(b"<!DOCTYPE html><html></html>"), Some(FileFormat::Html));
        assert_eq!(sniff(b"<HTML><body></body></HTML>"), Some(FileFormat::Html));
    }

    #[test]
    fn test_xml_wins_over_html_for_soap() {
        // A SOAP payload that also mentions html in the body must stay XML.
        let body = b"<?xml version=\"1.0\"?><s:Envelope><html></html></s:Envelope>";
        assert_eq!(sniff(body), Some(FileFormat::Xml));
    }

    #[test]
    fn test_zip_signature_is_excel() {
        let mut content = b"PK\x03\x04".to_vec();
        content.extend_from_slice(&[0u8; 64]);
        assert_eq!(sniff(&content), Some(FileFormat::Excel));
    }

    #[test]
    fn test_ole_signature_is_excel() {
        let mut content = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        content.extend_from_slice(&[0u8; 64]);
        assert_eq!(sniff(&content), Some(FileFormat::Excel));
    }

    #[test]
    fn test_csv_by_semicolons() {
        let content = b"name;code;year\nIvanenko;B-101;2025\nShevchenko;B-102;2024\n";
        assert_eq!(sniff(content), Some(FileFormat::Csv));
    }

    #[test]
    fn test_tsv_by_tabs() {
        let content = b"name\tcode\nIvanenko\tB-101\n";
        assert_eq!(sniff(content), Some(FileFormat::Csv));
    }

    #[test]
    fn test_plain_text_fallback() {
        assert_eq!(
            sniff("Протокол допиту свідка від 12.03.2025".as_bytes()),
            Some(FileFormat::Text)
        );
    }

    #[test]
    fn test_empty_file_passes() {
        assert_eq!(sniff(b""), None);
        assert_eq!(sniff(b"   \n\t  \n"), None);
    }

    #[test]
    fn test_delimiter_consistency() {
        assert!(has_consistent_delimiters("a,b,c\n1,2,3\n4,5,6"));
        assert!(has_consistent_delimiters("a;b\n1;2"));
        assert!(!has_consistent_delimiters("a,b,c\n1,2\n3"));
        assert!(!has_consistent_delimiters("no delimiters here\njust words"));
        assert!(!has_consistent_delimiters(""));
    }

    #[test]
    fn test_delimiter_heuristic_skips_blank_lines() {
        assert!(has_consistent_delimiters("a,b\n\n1,2\n"));
    }
}
