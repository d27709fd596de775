use super::{Measure, non_negative_or_zero, round2};
use crate::categorize::categorize_url;
use crate::error::InvalidEntry;
use crate::har::{EntrySlot, Timings};
use serde::Serialize;
use url::Url;

/// One HAR entry, flattened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRow {
    /// 1-based position of the source entry in `log.entries`
    pub ordinal: usize,
    pub method: String,
    pub url: String,
    pub category: String,
    pub status: i64,
    pub response_ms: f64,
    pub size_kb: f64,
    #[serde(flatten)]
    pub timings: PhaseTimings,
}

/// Per-phase timing breakdown in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseTimings {
    pub blocked_ms: Measure,
    pub dns_ms: Measure,
    pub connect_ms: Measure,
    pub ssl_ms: Measure,
    pub send_ms: Measure,
    pub wait_ms: Measure,
    pub receive_ms: Measure,
}

impl From<&Timings> for PhaseTimings {
    fn from(t: &Timings) -> Self {
        Self {
            blocked_ms: Measure::timing(t.blocked),
            dns_ms: Measure::timing(t.dns),
            connect_ms: Measure::timing(t.connect),
            ssl_ms: Measure::timing(t.ssl),
            send_ms: Measure::timing(t.send),
            wait_ms: Measure::timing(t.wait),
            receive_ms: Measure::timing(t.receive),
        }
    }
}

/// Convert one `log.entries` slot into a row.
///
/// Fails only when the slot is not an entry at all or its URL does not
/// parse; every other missing field falls back to a default.
pub fn extract_network_row(slot: &EntrySlot, ordinal: usize) -> Result<NetworkRow, InvalidEntry> {
    let entry = match slot {
        EntrySlot::Entry(entry) => entry,
        EntrySlot::Malformed { reason, .. } => {
            return Err(InvalidEntry::new(ordinal, format!("malformed entry: {}", reason)));
        }
    };

    let url = Url::parse(&entry.request.url).map_err(|e| {
        InvalidEntry::new(
            ordinal,
            format!("unparseable URL '{}': {}", entry.request.url, e),
        )
    })?;

    let size_bytes = non_negative_or_zero(entry.response.content.size);

    Ok(NetworkRow {
        ordinal,
        method: entry.request.method.clone(),
        url: entry.request.url.clone(),
        category: categorize_url(&url),
        status: entry.response.status,
        response_ms: non_negative_or_zero(entry.time),
        size_kb: round2(size_bytes / 1024.0),
        timings: PhaseTimings::from(&entry.timings),
    })
}
