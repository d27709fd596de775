//! Row extraction: one raw capture entry in, one flat row out.
//!
//! Numbers are rounded to two decimals here, once, so that every consumer
//! downstream (statistics included) sees exactly the same values.

mod audit;
mod network;

pub use audit::{
    DiagnosticRow, MainThreadRow, MetricRow, ResourceRow, ScriptRow, extract_diagnostic,
    extract_main_thread_item, extract_metric, extract_resource, extract_script,
};
pub use network::{NetworkRow, PhaseTimings, extract_network_row};

use serde::{Serialize, Serializer};
use std::fmt;

/// Marker shown wherever a value is unknown or was never measured
pub const NOT_AVAILABLE: &str = "N/A";

/// Round half away from zero at two decimal places.
///
/// The decision is made on the exact binary value of `value`, so 1.115
/// (stored as 1.11499...) becomes 1.11 even though `1.115 * 100.0` is
/// exactly 111.5 after the multiplication rounds.
pub fn round2(value: f64) -> f64 {
    let magnitude = value.abs();
    let scaled = magnitude * 100.0;
    if !scaled.is_finite() || scaled >= 2f64.powi(52) {
        return value;
    }

    // scaled + residual == magnitude * 100 exactly
    let residual = magnitude.mul_add(100.0, -scaled);
    let floor = scaled.floor();
    let hundredths = if scaled - floor == 0.5 {
        if residual < 0.0 { floor } else { floor + 1.0 }
    } else {
        scaled.round()
    };
    (hundredths / 100.0).copysign(value)
}

/// Rounded value, or 0 when absent, negative or not finite
pub fn non_negative_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => round2(v),
        _ => 0.0,
    }
}

/// A measured number, or an explicit "not available" marker.
///
/// Zero is a legitimate measurement and is never used to mean "unknown".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Known(f64),
    NotAvailable,
}

impl Measure {
    /// Timing-style value: absent, negative (HAR uses -1) and non-finite
    /// inputs are not available
    pub fn timing(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() && v >= 0.0 => Measure::Known(round2(v)),
            _ => Measure::NotAvailable,
        }
    }

    /// Any reported number; only absent or non-finite inputs are not available
    pub fn reported(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Measure::Known(round2(v)),
            _ => Measure::NotAvailable,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Measure::Known(v) => Some(*v),
            Measure::NotAvailable => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Measure::Known(_))
    }

    /// Display/aggregation value: unknown counts as 0
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Known(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Measure::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Measure::Known(v) => serializer.serialize_f64(*v),
            Measure::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// First non-empty string, mirroring "label, else fallback" lookups
pub(crate) fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(12.0), 12.0);
    }

    #[test]
    fn test_round2_uses_exact_binary_value() {
        // Each literal is stored just below its written midpoint
        assert_eq!(round2(1.115), 1.11);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(10.555), 10.55);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(-1.115), -1.11);
        // Stored just above
        assert_eq!(round2(8.345), 8.35);
        // Exactly representable midpoints go away from zero
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.375), -0.38);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_timing_sentinels() {
        assert_eq!(Measure::timing(Some(-1.0)), Measure::NotAvailable);
        assert_eq!(Measure::timing(None), Measure::NotAvailable);
        assert_eq!(Measure::timing(Some(f64::NAN)), Measure::NotAvailable);
        assert_eq!(Measure::timing(Some(0.0)), Measure::Known(0.0));
        assert_eq!(Measure::timing(Some(3.456)), Measure::Known(3.46));
    }

    #[test]
    fn test_reported_keeps_negative_values() {
        assert_eq!(Measure::reported(Some(-2.0)), Measure::Known(-2.0));
        assert_eq!(Measure::reported(None), Measure::NotAvailable);
    }

    #[test]
    fn test_non_negative_or_zero() {
        assert_eq!(non_negative_or_zero(Some(-1.0)), 0.0);
        assert_eq!(non_negative_or_zero(None), 0.0);
        assert_eq!(non_negative_or_zero(Some(10.556)), 10.56);
    }

    #[test]
    fn test_measure_display_and_serialize() {
        assert_eq!(format!("{:.2}", Measure::Known(1.5)), "1.50");
        assert_eq!(Measure::NotAvailable.to_string(), "N/A");
        assert_eq!(serde_json::to_string(&Measure::Known(0.0)).unwrap(), "0.0");
        assert_eq!(
            serde_json::to_string(&Measure::NotAvailable).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(&[Some(""), Some("b")]), Some("b"));
        assert_eq!(first_non_empty(&[None, Some("a")]), Some("a"));
        assert_eq!(first_non_empty(&[None, Some("")]), None);
    }
}
