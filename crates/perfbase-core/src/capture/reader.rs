use super::CaptureDocument;
use crate::audit::AuditDocument;
use crate::har::Har;
use crate::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub struct CaptureReader;

impl CaptureReader {
    /// Read and parse a capture file from the given path
    ///
    /// Any failure is reported as [`Error::Parse`] naming the file.
    pub fn from_file(path: &Path) -> Result<CaptureDocument> {
        tracing::debug!("Reading capture file from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| Error::from(e).in_file(path))?;
        Self::from_str(&content).map_err(|e| e.in_file(path))
    }

    /// Parse a capture from a JSON string
    pub fn from_str(content: &str) -> Result<CaptureDocument> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Select the document shape once and decode it
    pub fn from_value(value: Value) -> Result<CaptureDocument> {
        if is_network_log(&value) {
            let har: Har = serde_json::from_value(value)?;
            tracing::info!(
                "Parsed network capture with {} entries",
                har.log.entries.len()
            );
            return Ok(CaptureDocument::Network(har));
        }

        if value.get("audits").is_some_and(Value::is_object) {
            let report: AuditDocument = serde_json::from_value(value)?;
            tracing::info!("Parsed audit report with {} audits", report.audits.len());
            return Ok(CaptureDocument::Audit(Box::new(report)));
        }

        Err(Error::InvalidStructure(
            "expected a HAR log with `log.entries` or an audit report with `audits`".to_string(),
        ))
    }
}

fn is_network_log(value: &Value) -> bool {
    value
        .get("log")
        .and_then(|log| log.get("entries"))
        .is_some_and(Value::is_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureKind;
    use crate::har::EntrySlot;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_har() {
        let har_json = r#"{
            "log": {
                "version": "1.2",
                "creator": {"name": "test", "version": "1.0"},
                "entries": []
            }
        }"#;

        let doc = CaptureReader::from_str(har_json).unwrap();
        assert_eq!(doc.kind(), CaptureKind::Network);
    }

    #[test]
    fn test_parse_minimal_audit_report() {
        let json = r#"{"audits": {}, "lighthouseVersion": "12.0.0"}"#;

        let doc = CaptureReader::from_str(json).unwrap();
        match doc {
            CaptureDocument::Audit(report) => {
                assert_eq!(report.lighthouse_version.as_deref(), Some("12.0.0"));
                assert!(report.categories.is_empty());
            }
            other => panic!("expected audit document, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_missing_shape_is_invalid_structure() {
        let result = CaptureReader::from_str(r#"{"log": {"pages": []}}"#);
        assert!(matches!(result, Err(Error::InvalidStructure(_))));

        let result = CaptureReader::from_str(r#"{"audits": []}"#);
        assert!(matches!(result, Err(Error::InvalidStructure(_))));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let result = CaptureReader::from_str("{not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_malformed_entry_kept_as_slot() {
        let har_json = r#"{
            "log": {
                "entries": [
                    {"request": {"method": "GET", "url": "https://a.test/"}},
                    {"request": {"method": "GET"}},
                    42
                ]
            }
        }"#;

        let CaptureDocument::Network(har) = CaptureReader::from_str(har_json).unwrap() else {
            panic!("expected network document");
        };
        assert_eq!(har.log.entries.len(), 3);
        assert!(matches!(har.log.entries[0], EntrySlot::Entry(_)));
        assert!(matches!(har.log.entries[1], EntrySlot::Malformed { .. }));
        assert!(matches!(har.log.entries[2], EntrySlot::Malformed { .. }));
    }

    #[test]
    fn test_null_optional_log_fields_do_not_fail_the_file() {
        let har_json = r#"{
            "log": {
                "version": null,
                "creator": {"name": null, "version": "1.0"},
                "pages": [{"id": null, "title": "Home", "pageTimings": null}],
                "entries": [
                    {"request": {"url": "https://a.test/"}, "timings": null}
                ]
            }
        }"#;

        let CaptureDocument::Network(har) = CaptureReader::from_str(har_json).unwrap() else {
            panic!("expected network document");
        };
        assert_eq!(har.log.pages[0].id, "");
        assert!(har.log.pages[0].page_timings.on_load.is_none());
        assert!(matches!(har.log.entries[0], EntrySlot::Entry(_)));
    }

    #[test]
    fn test_null_audit_fields_do_not_fail_the_file() {
        let json = r#"{
            "categories": null,
            "audits": {
                "bootup-time": {"id": null, "title": null, "details": {"items": null}}
            }
        }"#;

        let CaptureDocument::Audit(doc) = CaptureReader::from_str(json).unwrap() else {
            panic!("expected audit document");
        };
        assert!(doc.categories.is_empty());
        let audit = doc.audit("bootup-time").unwrap();
        assert_eq!(audit.title, "");
        assert!(audit.details.as_ref().unwrap().items.is_empty());
    }

    #[test]
    fn test_from_file_names_the_file_on_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.har");
        fs::write(&path, "[]").unwrap();

        let err = CaptureReader::from_file(&path).unwrap_err();
        match err {
            Error::Parse { file, .. } => assert_eq!(file, path),
            other => panic!("expected parse error, got {other}"),
        }
    }
}
