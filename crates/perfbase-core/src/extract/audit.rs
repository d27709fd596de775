use super::{Measure, NOT_AVAILABLE, first_non_empty, non_negative_or_zero, round2};
use crate::audit::{Audit, BootupItem, MainThreadItem, ResourceSummaryItem};
use crate::rating::Rating;
use serde::Serialize;

/// A named performance metric taken from one audit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: String,
    pub audit_id: String,
    pub value: Measure,
    pub unit: String,
    pub score: Option<f64>,
    pub rating: Rating,
    /// Pre-formatted by the audit tool, passed through untouched
    pub display: String,
}

/// Main-thread time spent in one work category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainThreadRow {
    pub category: String,
    pub duration_ms: f64,
}

/// CPU cost of one script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptRow {
    pub url: String,
    pub total_ms: f64,
    pub scripting_ms: f64,
    pub parse_compile_ms: f64,
}

/// Request count and transfer size for one resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRow {
    pub resource_type: String,
    pub requests: u64,
    pub transfer_kb: f64,
}

/// An audit that left room for improvement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticRow {
    pub audit: String,
    pub audit_id: String,
    pub score: Option<f64>,
    pub rating: Rating,
    pub display: String,
    /// Estimated metric savings as compact JSON
    pub savings: String,
}

/// Build a metric row; a missing audit yields a row of "N/A" values.
///
/// When `per_kilobyte` is set the raw value is taken to be bytes and is
/// reported in KB.
pub fn extract_metric(
    audit: Option<&Audit>,
    audit_id: &str,
    metric: &str,
    unit: &str,
    per_kilobyte: bool,
) -> MetricRow {
    let raw = audit.and_then(|a| a.numeric_value);
    let score = audit.and_then(|a| a.score);

    let (value, unit) = if per_kilobyte {
        (Measure::reported(raw.map(|bytes| bytes / 1024.0)), "KB")
    } else {
        (Measure::reported(raw), unit)
    };

    MetricRow {
        metric: metric.to_string(),
        audit_id: audit_id.to_string(),
        value,
        unit: unit.to_string(),
        score,
        rating: Rating::from_score(score),
        display: audit
            .and_then(|a| a.display_value.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

pub fn extract_main_thread_item(item: &MainThreadItem) -> MainThreadRow {
    MainThreadRow {
        category: first_non_empty(&[item.group_label.as_deref(), item.group.as_deref()])
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        duration_ms: non_negative_or_zero(item.duration),
    }
}

pub fn extract_script(item: &BootupItem) -> ScriptRow {
    ScriptRow {
        url: first_non_empty(&[item.url.as_deref()])
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        total_ms: non_negative_or_zero(item.total),
        scripting_ms: non_negative_or_zero(item.scripting),
        parse_compile_ms: non_negative_or_zero(item.script_parse_compile),
    }
}

pub fn extract_resource(item: &ResourceSummaryItem) -> ResourceRow {
    ResourceRow {
        resource_type: first_non_empty(&[item.label.as_deref(), item.resource_type.as_deref()])
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        requests: item.request_count.unwrap_or(0),
        transfer_kb: round2(non_negative_or_zero(item.transfer_size) / 1024.0),
    }
}

pub fn extract_diagnostic(audit_id: &str, audit: &Audit) -> DiagnosticRow {
    let savings = match &audit.metric_savings {
        Some(value) if !value.is_null() => {
            serde_json::to_string(value).unwrap_or_else(|_| NOT_AVAILABLE.to_string())
        }
        _ => NOT_AVAILABLE.to_string(),
    };

    DiagnosticRow {
        audit: first_non_empty(&[Some(audit.title.as_str()), Some(audit_id)])
            .unwrap_or(audit_id)
            .to_string(),
        audit_id: audit_id.to_string(),
        score: audit.score,
        rating: Rating::from_score(audit.score),
        display: first_non_empty(&[audit.display_value.as_deref()])
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        savings,
    }
}
