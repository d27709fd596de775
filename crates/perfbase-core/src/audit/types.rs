use crate::de::null_as_default;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level Lighthouse report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditDocument {
    pub audits: HashMap<String, Audit>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: HashMap<String, AuditCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_displayed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gather_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

impl AuditDocument {
    pub fn audit(&self, id: &str) -> Option<&Audit> {
        self.audits.get(id)
    }
}

/// Host environment the audit ran on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_index: Option<f64>,
}

/// Category (performance, accessibility, ...) result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditCategory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// A single audit result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AuditDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_savings: Option<serde_json::Value>,
}

impl Audit {
    /// Detail items decoded as `T`, skipping any item of a different shape
    pub fn items<T: DeserializeOwned>(&self) -> Vec<T> {
        let Some(details) = &self.details else {
            return Vec::new();
        };

        details
            .items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match T::deserialize(item) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::debug!("Skipping detail item {} of audit {}: {}", idx, self.id, e);
                    None
                }
            })
            .collect()
    }
}

/// Audit details block; only the item table is read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditDetails {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<serde_json::Value>,
}

/// `mainthread-work-breakdown` item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainThreadItem {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// `bootup-time` item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootupItem {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub scripting: Option<f64>,
    #[serde(default)]
    pub script_parse_compile: Option<f64>,
}

/// `resource-summary` item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummaryItem {
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub request_count: Option<u64>,
    #[serde(default)]
    pub transfer_size: Option<f64>,
}
