use super::Assembler;
use crate::error::InvalidEntry;
use crate::extract::{Measure, NetworkRow, extract_network_row};
use crate::har::{EntrySlot, Har, Page};
use crate::stats::StatBundle;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Report for a HAR network capture
#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    /// Valid rows in document order; ordinals keep gaps left by skipped entries
    pub rows: Vec<NetworkRow>,
    pub invalid_entries: Vec<InvalidEntry>,
    pub baseline: Baseline,
    pub page_timings: Vec<PageTiming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_window: Option<CaptureWindow>,
}

impl NetworkReport {
    pub fn is_empty(&self) -> bool {
        matches!(self.baseline, Baseline::Empty)
    }
}

/// Statistics over the rows, or an explicit marker that there were none
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Baseline {
    Empty,
    Observed(ObservedBaseline),
}

impl Baseline {
    pub fn observe(rows: &[NetworkRow]) -> Self {
        if rows.is_empty() {
            return Baseline::Empty;
        }

        let stats = StatColumn::ALL
            .iter()
            .filter_map(|&column| {
                let values: Vec<f64> = rows.iter().map(|row| column.value(row)).collect();
                StatBundle::from_values(&values).map(|stats| NamedStat { column, stats })
            })
            .collect();

        Baseline::Observed(ObservedBaseline {
            total_requests: rows.len(),
            stats,
        })
    }

    pub fn observed(&self) -> Option<&ObservedBaseline> {
        match self {
            Baseline::Observed(observed) => Some(observed),
            Baseline::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservedBaseline {
    pub total_requests: usize,
    pub stats: Vec<NamedStat>,
}

impl ObservedBaseline {
    pub fn get(&self, column: StatColumn) -> Option<&StatBundle> {
        self.stats
            .iter()
            .find(|named| named.column == column)
            .map(|named| &named.stats)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedStat {
    pub column: StatColumn,
    pub stats: StatBundle,
}

/// Numeric row columns that get a [`StatBundle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatColumn {
    ResponseTime,
    Size,
    Wait,
}

impl StatColumn {
    pub const ALL: [StatColumn; 3] = [StatColumn::ResponseTime, StatColumn::Size, StatColumn::Wait];

    pub fn label(&self) -> &'static str {
        match self {
            StatColumn::ResponseTime => "Response (ms)",
            StatColumn::Size => "Size (KB)",
            StatColumn::Wait => "Wait/TTFB (ms)",
        }
    }

    /// Column value for a row; an unknown wait counts as 0
    pub fn value(&self, row: &NetworkRow) -> f64 {
        match self {
            StatColumn::ResponseTime => row.response_ms,
            StatColumn::Size => row.size_kb,
            StatColumn::Wait => row.timings.wait_ms.or_zero(),
        }
    }
}

/// DOMContentLoaded / load timings for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTiming {
    pub title: String,
    pub content_loaded_ms: Measure,
    pub load_ms: Measure,
}

impl From<&Page> for PageTiming {
    fn from(page: &Page) -> Self {
        Self {
            title: page
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            content_loaded_ms: Measure::timing(page.page_timings.on_content_load),
            load_ms: Measure::timing(page.page_timings.on_load),
        }
    }
}

/// First and last request start times seen in the capture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureWindow {
    pub start: String,
    pub end: String,
    pub span_ms: i64,
}

impl CaptureWindow {
    fn from_entries(entries: &[EntrySlot]) -> Option<Self> {
        let mut first: Option<(DateTime<FixedOffset>, &str)> = None;
        let mut last: Option<(DateTime<FixedOffset>, &str)> = None;

        let stamps = entries.iter().filter_map(|slot| match slot {
            EntrySlot::Entry(entry) => entry.started_date_time.as_deref(),
            EntrySlot::Malformed { .. } => None,
        });

        for raw in stamps {
            let Ok(at) = DateTime::parse_from_rfc3339(raw) else {
                tracing::debug!("Ignoring unparseable startedDateTime: {}", raw);
                continue;
            };
            if first.is_none_or(|(earliest, _)| at < earliest) {
                first = Some((at, raw));
            }
            if last.is_none_or(|(latest, _)| at > latest) {
                last = Some((at, raw));
            }
        }

        let ((start_at, start), (end_at, end)) = (first?, last?);
        Some(Self {
            start: start.to_string(),
            end: end.to_string(),
            span_ms: (end_at - start_at).num_milliseconds(),
        })
    }
}

pub struct NetworkAssembler;

impl Assembler for NetworkAssembler {
    type Input = Har;
    type Output = NetworkReport;

    fn assemble(&self, har: &Har) -> NetworkReport {
        tracing::debug!("Extracting rows from {} entries", har.log.entries.len());

        let mut rows = Vec::with_capacity(har.log.entries.len());
        let mut invalid_entries = Vec::new();

        for (idx, slot) in har.log.entries.iter().enumerate() {
            match extract_network_row(slot, idx + 1) {
                Ok(row) => rows.push(row),
                Err(invalid) => {
                    tracing::warn!("{}", invalid);
                    invalid_entries.push(invalid);
                }
            }
        }

        let baseline = Baseline::observe(&rows);
        match baseline.observed() {
            Some(observed) => {
                let avg = observed
                    .get(StatColumn::ResponseTime)
                    .map(|s| s.mean)
                    .unwrap_or_default();
                tracing::info!(
                    "Network baseline complete: {} rows, {} skipped, avg={:.2}ms",
                    rows.len(),
                    invalid_entries.len(),
                    avg
                );
            }
            None => tracing::warn!(
                "No valid rows in capture ({} entries skipped); baseline left empty",
                invalid_entries.len()
            ),
        }

        NetworkReport {
            rows,
            invalid_entries,
            baseline,
            page_timings: har.log.pages.iter().map(PageTiming::from).collect(),
            capture_window: CaptureWindow::from_entries(&har.log.entries),
        }
    }
}
