use super::Assembler;
use crate::audit::{AuditDocument, BootupItem, MainThreadItem, ResourceSummaryItem};
use crate::extract::{
    DiagnosticRow, MainThreadRow, Measure, MetricRow, NOT_AVAILABLE, ResourceRow, ScriptRow,
    extract_diagnostic, extract_main_thread_item, extract_metric, extract_resource,
    extract_script, non_negative_or_zero,
};
use crate::rating::{Rating, score_percent};
use serde::Serialize;

/// Category ids reported, in display order
pub const CATEGORY_ORDER: &[&str] = &["performance", "accessibility", "best-practices", "seo"];

/// (audit id, metric label, unit)
pub const PERFORMANCE_METRICS: &[(&str, &str, &str)] = &[
    ("first-contentful-paint", "First Contentful Paint (FCP)", "ms"),
    ("largest-contentful-paint", "Largest Contentful Paint (LCP)", "ms"),
    ("total-blocking-time", "Total Blocking Time (TBT)", "ms"),
    ("cumulative-layout-shift", "Cumulative Layout Shift (CLS)", ""),
    ("speed-index", "Speed Index (SI)", "ms"),
    ("interactive", "Time to Interactive (TTI)", "ms"),
    ("max-potential-fid", "Max Potential FID", "ms"),
];

pub const SERVER_RESPONSE_TIME: &str = "server-response-time";
pub const TOTAL_BYTE_WEIGHT: &str = "total-byte-weight";
pub const MAIN_THREAD_BREAKDOWN: &str = "mainthread-work-breakdown";
pub const BOOTUP_TIME: &str = "bootup-time";
pub const RESOURCE_SUMMARY: &str = "resource-summary";

/// Audits surfaced as diagnostics when they score below 1
pub const DIAGNOSTIC_AUDITS: &[&str] = &[
    "unused-javascript",
    "unused-css-rules",
    "render-blocking-resources",
    "uses-text-compression",
    "uses-optimized-images",
    "uses-responsive-images",
    "modern-image-formats",
    "efficient-animated-content",
    "duplicated-javascript",
    "legacy-javascript",
    "unminified-css",
    "unminified-javascript",
];

/// Report for a Lighthouse-style audit document
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub meta: AuditMeta,
    pub category_scores: Vec<CategoryScore>,
    pub performance_metrics: Vec<MetricRow>,
    pub server_metrics: Vec<MetricRow>,
    pub main_thread: MainThreadBreakdown,
    pub js_execution: JsExecution,
    pub resource_summary: Vec<ResourceRow>,
    pub diagnostics: Vec<DiagnosticRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditMeta {
    pub url: String,
    pub fetch_time: String,
    pub tool_version: String,
    pub user_agent: String,
    pub gather_mode: String,
    pub benchmark_index: Measure,
}

impl From<&AuditDocument> for AuditMeta {
    fn from(doc: &AuditDocument) -> Self {
        let or_na = |value: Option<&String>| {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        Self {
            url: or_na(
                doc.final_displayed_url
                    .as_ref()
                    .filter(|u| !u.is_empty())
                    .or(doc.requested_url.as_ref()),
            ),
            fetch_time: or_na(doc.fetch_time.as_ref()),
            tool_version: or_na(doc.lighthouse_version.as_ref()),
            user_agent: or_na(doc.user_agent.as_ref()),
            gather_mode: or_na(doc.gather_mode.as_ref()),
            benchmark_index: Measure::reported(
                doc.environment
                    .as_ref()
                    .and_then(|env| env.benchmark_index)
                    .filter(|index| *index != 0.0),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    /// Score scaled to 0-100 and rounded; `None` serializes as "N/A"
    #[serde(serialize_with = "serialize_percent")]
    pub score: Option<i64>,
    pub rating: Rating,
}

fn serialize_percent<S: serde::Serializer>(
    score: &Option<i64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match score {
        Some(pct) => serializer.serialize_i64(*pct),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainThreadBreakdown {
    pub items: Vec<MainThreadRow>,
    pub total_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsExecution {
    /// First scripts in source order; the list is not re-sorted
    pub scripts: Vec<ScriptRow>,
    pub total_ms: f64,
}

pub struct AuditAssembler {
    top_scripts: usize,
}

impl AuditAssembler {
    pub fn new(top_scripts: usize) -> Self {
        Self { top_scripts }
    }

    fn category_scores(doc: &AuditDocument) -> Vec<CategoryScore> {
        CATEGORY_ORDER
            .iter()
            .filter_map(|id| doc.categories.get(*id).map(|cat| (id, cat)))
            .map(|(id, cat)| {
                let score = cat.score.filter(|s| s.is_finite()).map(score_percent);
                CategoryScore {
                    category: if cat.title.is_empty() {
                        id.to_string()
                    } else {
                        cat.title.clone()
                    },
                    score,
                    rating: Rating::from_score(score.map(|pct| pct as f64 / 100.0)),
                }
            })
            .collect()
    }

    fn performance_metrics(doc: &AuditDocument) -> Vec<MetricRow> {
        PERFORMANCE_METRICS
            .iter()
            .map(|(id, label, unit)| extract_metric(doc.audit(id), id, label, unit, false))
            .collect()
    }

    fn server_metrics(doc: &AuditDocument) -> Vec<MetricRow> {
        vec![
            extract_metric(
                doc.audit(SERVER_RESPONSE_TIME),
                SERVER_RESPONSE_TIME,
                "Server Response Time (TTFB)",
                "ms",
                false,
            ),
            extract_metric(
                doc.audit(TOTAL_BYTE_WEIGHT),
                TOTAL_BYTE_WEIGHT,
                "Total Byte Weight",
                "bytes",
                true,
            ),
        ]
    }

    fn main_thread(doc: &AuditDocument) -> MainThreadBreakdown {
        let audit = doc.audit(MAIN_THREAD_BREAKDOWN);
        MainThreadBreakdown {
            items: audit
                .map(|a| a.items::<MainThreadItem>())
                .unwrap_or_default()
                .iter()
                .map(extract_main_thread_item)
                .collect(),
            total_ms: non_negative_or_zero(audit.and_then(|a| a.numeric_value)),
        }
    }

    fn js_execution(&self, doc: &AuditDocument) -> JsExecution {
        let audit = doc.audit(BOOTUP_TIME);
        JsExecution {
            scripts: audit
                .map(|a| a.items::<BootupItem>())
                .unwrap_or_default()
                .iter()
                .take(self.top_scripts)
                .map(extract_script)
                .collect(),
            total_ms: non_negative_or_zero(audit.and_then(|a| a.numeric_value)),
        }
    }

    fn resource_summary(doc: &AuditDocument) -> Vec<ResourceRow> {
        doc.audit(RESOURCE_SUMMARY)
            .map(|a| a.items::<ResourceSummaryItem>())
            .unwrap_or_default()
            .iter()
            .map(extract_resource)
            .collect()
    }

    /// Allow-listed audits that are present, scored, and not perfect
    fn diagnostics(doc: &AuditDocument) -> Vec<DiagnosticRow> {
        DIAGNOSTIC_AUDITS
            .iter()
            .filter_map(|id| doc.audit(id).map(|audit| (id, audit)))
            .filter(|(_, audit)| audit.score.is_some_and(|score| score < 1.0))
            .map(|(id, audit)| extract_diagnostic(id, audit))
            .collect()
    }
}

impl Default for AuditAssembler {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Assembler for AuditAssembler {
    type Input = AuditDocument;
    type Output = AuditReport;

    fn assemble(&self, doc: &AuditDocument) -> AuditReport {
        tracing::debug!("Extracting audit sections from {} audits", doc.audits.len());

        let report = AuditReport {
            meta: AuditMeta::from(doc),
            category_scores: Self::category_scores(doc),
            performance_metrics: Self::performance_metrics(doc),
            server_metrics: Self::server_metrics(doc),
            main_thread: Self::main_thread(doc),
            js_execution: self.js_execution(doc),
            resource_summary: Self::resource_summary(doc),
            diagnostics: Self::diagnostics(doc),
        };

        tracing::info!(
            "Audit report complete for {}: {} categories, {} diagnostics",
            report.meta.url,
            report.category_scores.len(),
            report.diagnostics.len()
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> AuditDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_meta_defaults_to_not_available() {
        let meta = AuditMeta::from(&doc(r#"{"audits": {}, "requestedUrl": "https://a.test/"}"#));

        assert_eq!(meta.url, "https://a.test/");
        assert_eq!(meta.fetch_time, "N/A");
        assert_eq!(meta.tool_version, "N/A");
        assert_eq!(meta.benchmark_index, Measure::NotAvailable);
    }

    #[test]
    fn test_category_scores_follow_fixed_order() {
        let report = AuditAssembler::default().assemble(&doc(
            r#"{
                "audits": {},
                "categories": {
                    "seo": {"id": "seo", "title": "SEO", "score": 0.895},
                    "performance": {"id": "performance", "title": "Performance", "score": 0.42},
                    "pwa": {"id": "pwa", "title": "PWA", "score": 1},
                    "accessibility": {"id": "accessibility", "title": "Accessibility", "score": null}
                }
            }"#,
        ));

        let names: Vec<&str> = report
            .category_scores
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["Performance", "Accessibility", "SEO"]);

        assert_eq!(report.category_scores[0].score, Some(42));
        assert_eq!(report.category_scores[0].rating, Rating::Poor);
        assert_eq!(report.category_scores[1].score, None);
        assert_eq!(report.category_scores[1].rating, Rating::NotAvailable);
        // 0.895 rounds to 90, which rates as good
        assert_eq!(report.category_scores[2].score, Some(90));
        assert_eq!(report.category_scores[2].rating, Rating::Good);
    }

    #[test]
    fn test_top_scripts_truncate_in_source_order() {
        let items: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"url": "https://a.test/s{i}.js", "total": {}}}"#, (i % 4) * 10))
            .collect();
        let json = format!(
            r#"{{"audits": {{"bootup-time": {{"numericValue": 1234.567, "details": {{"items": [{}]}}}}}}}}"#,
            items.join(",")
        );

        let report = AuditAssembler::default().assemble(&doc(&json));

        assert_eq!(report.js_execution.scripts.len(), 10);
        assert_eq!(report.js_execution.scripts[0].url, "https://a.test/s0.js");
        assert_eq!(report.js_execution.scripts[9].url, "https://a.test/s9.js");
        assert_eq!(report.js_execution.total_ms, 1234.57);

        let narrow = AuditAssembler::new(2).assemble(&doc(&json));
        assert_eq!(narrow.js_execution.scripts.len(), 2);
    }

    #[test]
    fn test_diagnostics_filter() {
        let report = AuditAssembler::default().assemble(&doc(
            r#"{"audits": {
                "unused-javascript": {"title": "Reduce unused JavaScript", "score": 0.45},
                "unused-css-rules": {"title": "Reduce unused CSS", "score": 1},
                "render-blocking-resources": {"title": "Eliminate render-blocking resources", "score": null},
                "uses-text-compression": {"title": "Enable text compression", "score": 0.99},
                "font-display": {"title": "Not on the allow-list", "score": 0}
            }}"#,
        ));

        let ids: Vec<&str> = report
            .diagnostics
            .iter()
            .map(|d| d.audit_id.as_str())
            .collect();
        assert_eq!(ids, vec!["unused-javascript", "uses-text-compression"]);
    }

    #[test]
    fn test_missing_metrics_are_listed_as_not_available() {
        let report = AuditAssembler::default().assemble(&doc(r#"{"audits": {}}"#));

        assert_eq!(report.performance_metrics.len(), PERFORMANCE_METRICS.len());
        assert!(
            report
                .performance_metrics
                .iter()
                .all(|m| m.value == Measure::NotAvailable && m.display == "N/A")
        );
        assert_eq!(report.server_metrics[1].unit, "KB");
        assert!(report.main_thread.items.is_empty());
        assert_eq!(report.main_thread.total_ms, 0.0);
        assert!(report.resource_summary.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_category_score_serializes_marker() {
        let score = CategoryScore {
            category: "SEO".to_string(),
            score: None,
            rating: Rating::NotAvailable,
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["score"], "N/A");
        assert_eq!(json["rating"], "N/A");
    }
}
