use serde::{Serialize, Serializer};
use std::fmt;

/// Scores at or above this are rated good
pub const GOOD_THRESHOLD: f64 = 0.9;
/// Scores at or above this (and below [`GOOD_THRESHOLD`]) need work
pub const NEEDS_WORK_THRESHOLD: f64 = 0.5;

/// Rating bucket for a normalized score in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Good,
    NeedsWork,
    Poor,
    NotAvailable,
}

impl Rating {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s.is_nan() => Rating::NotAvailable,
            Some(s) if s >= GOOD_THRESHOLD => Rating::Good,
            Some(s) if s >= NEEDS_WORK_THRESHOLD => Rating::NeedsWork,
            Some(_) => Rating::Poor,
            None => Rating::NotAvailable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "Good",
            Rating::NeedsWork => "Needs Work",
            Rating::Poor => "Poor",
            Rating::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Normalized score as a whole percentage
pub fn score_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// `"72 (Needs Work)"`, or `"N/A"` when there is no score
pub fn score_label(score: Option<f64>) -> String {
    match (score, Rating::from_score(score)) {
        (Some(s), rating) if rating != Rating::NotAvailable => {
            format!("{} ({})", score_percent(s), rating)
        }
        _ => Rating::NotAvailable.as_str().to_string(),
    }
}
