mod reader;

pub use reader::CaptureReader;

use crate::audit::AuditDocument;
use crate::har::Har;

/// A parsed capture, tagged by the kind of tool that produced it
#[derive(Debug, Clone)]
pub enum CaptureDocument {
    /// HAR network log (`{ log: { entries, pages } }`)
    Network(Har),
    /// Lighthouse-style audit report (`{ audits, categories, ... }`)
    Audit(Box<AuditDocument>),
}

/// Discriminant of a [`CaptureDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureKind {
    Network,
    Audit,
}

impl CaptureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureKind::Network => "network",
            CaptureKind::Audit => "audit",
        }
    }
}

impl CaptureDocument {
    pub fn kind(&self) -> CaptureKind {
        match self {
            CaptureDocument::Network(_) => CaptureKind::Network,
            CaptureDocument::Audit(_) => CaptureKind::Audit,
        }
    }
}
