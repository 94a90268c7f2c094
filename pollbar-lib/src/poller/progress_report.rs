use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::IntoAppError;
use serde::Deserialize;

/// Percentage at or beyond which a task counts as finished.
pub const COMPLETE_PERCENT: f64 = 100.0;

/// A single progress sample reported by the server.
///
/// The value is taken as-is: nothing clamps it to `0..=100`, and fractional
/// values are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProgressReport {
    pub progress: f64,
}

impl ProgressReport {
    #[must_use]
    pub const fn new(progress: f64) -> Self {
        Self { progress }
    }

    /// Parse a report from a raw JSON response body.
    ///
    /// Fails on a non-JSON body and on a missing or non-numeric `progress` field.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).into_app_err("parsing progress report")
    }

    /// Whether this report ends the polling loop.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= COMPLETE_PERCENT
    }

    /// Text shown next to the bar, e.g. `42% completed`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{self} completed")
    }
}

impl Display for ProgressReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.progress)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_progress() {
        let report = ProgressReport::from_json(br#"{"progress": 42}"#).unwrap();
        assert_eq!(report, ProgressReport::new(42.0));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let report = ProgressReport::from_json(br#"{"progress": 7, "stage": "slides"}"#).unwrap();
        assert_eq!(report.progress, 7.0);
    }

    #[test]
    fn test_parse_missing_field_fails() {
        assert!(ProgressReport::from_json(br#"{"percent": 42}"#).is_err());
    }

    #[test]
    fn test_parse_string_progress_fails() {
        assert!(ProgressReport::from_json(br#"{"progress": "42"}"#).is_err());
    }

    #[test]
    fn test_parse_non_json_fails() {
        assert!(ProgressReport::from_json(b"<html>Internal Server Error</html>").is_err());
    }

    #[test]
    fn test_label_formats_whole_numbers_without_fraction() {
        assert_eq!(ProgressReport::new(42.0).label(), "42% completed");
        assert_eq!(ProgressReport::new(0.0).label(), "0% completed");
        assert_eq!(ProgressReport::new(100.0).label(), "100% completed");
    }

    #[test]
    fn test_label_keeps_out_of_range_values() {
        assert_eq!(ProgressReport::new(99.5).label(), "99.5% completed");
        assert_eq!(ProgressReport::new(-3.0).label(), "-3% completed");
        assert_eq!(ProgressReport::new(120.0).label(), "120% completed");
    }

    #[test]
    fn test_completion_threshold() {
        assert!(!ProgressReport::new(0.0).is_complete());
        assert!(!ProgressReport::new(99.0).is_complete());
        assert!(!ProgressReport::new(99.999).is_complete());
        assert!(ProgressReport::new(100.0).is_complete());
        assert!(ProgressReport::new(100.5).is_complete());
        assert!(ProgressReport::new(101.0).is_complete());
        assert!(!ProgressReport::new(-1.0).is_complete());
    }
}
