use crate::de::null_as_default;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Top-level HAR object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Har {
    pub log: Log,
}

/// Main HAR log object
///
/// Only `entries` is required. Everything else is optional so that captures
/// exported by different browsers and proxies load without complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pages: Vec<Page>,
    pub entries: Vec<EntrySlot>,
}

/// Creator/Browser information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

/// Page information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "startedDateTime", skip_serializing_if = "Option::is_none")]
    pub started_date_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "pageTimings", default, deserialize_with = "null_as_default")]
    pub page_timings: PageTimings,
}

/// Page timing information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTimings {
    #[serde(rename = "onContentLoad", skip_serializing_if = "Option::is_none")]
    pub on_content_load: Option<f64>,
    #[serde(rename = "onLoad", skip_serializing_if = "Option::is_none")]
    pub on_load: Option<f64>,
}

/// One slot of `log.entries`.
///
/// Entries that do not match the expected shape are kept as raw JSON, along
/// with the decoding error, so the extractor can report them individually
/// instead of rejecting the file.
#[derive(Debug, Clone)]
pub enum EntrySlot {
    Entry(Box<Entry>),
    Malformed {
        raw: serde_json::Value,
        reason: String,
    },
}

impl<'de> Deserialize<'de> for EntrySlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match Entry::deserialize(&raw) {
            Ok(entry) => EntrySlot::Entry(Box::new(entry)),
            Err(e) => EntrySlot::Malformed {
                reason: e.to_string(),
                raw,
            },
        })
    }
}

impl Serialize for EntrySlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EntrySlot::Entry(entry) => entry.serialize(serializer),
            EntrySlot::Malformed { raw, .. } => raw.serialize(serializer),
        }
    }
}

/// Individual HTTP transaction entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "pageref", skip_serializing_if = "Option::is_none")]
    pub page_ref: Option<String>,
    #[serde(rename = "startedDateTime", skip_serializing_if = "Option::is_none")]
    pub started_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    pub request: Request,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: Response,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timings: Timings,
}

/// HTTP request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    pub url: String,
    #[serde(rename = "httpVersion", default, deserialize_with = "null_as_default")]
    pub http_version: String,
}

/// HTTP response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(rename = "statusText", default, deserialize_with = "null_as_default")]
    pub status_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Content,
}

/// Response content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(rename = "mimeType", default, deserialize_with = "null_as_default")]
    pub mime_type: String,
}

/// Timing information
///
/// HAR uses `-1` for phases that do not apply; those and absent phases are
/// both treated as unknown by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive: Option<f64>,
}
