//! Obfuscation indicators reported by the detection backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to an indicator or code snippet.
///
/// The detector emits `low`/`medium`/`high`; `Unknown` exists only for
/// classifier fallback records and unrecognized wire values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl Severity {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Unknown => "unknown",
        }
    }

    /// Uppercase form used in rendered severity badges
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One obfuscation indicator: a detector signal with an occurrence count.
///
/// The `severity` carried here is authoritative; the classifier's
/// per-type default is only a fallback for descriptor records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Indicator {
    /// Detector type code (e.g. `short_class_names`, `string_encryption`)
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub severity: Severity,
    /// Number of occurrences matched
    #[serde(default)]
    pub count: u64,
    /// Detector-provided display text, preferred over the catalog name
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_wire_shape() {
        let ind: Indicator = serde_json::from_str(
            r#"{"type": "reflection", "severity": "medium", "count": 42}"#,
        )
        .unwrap();
        assert_eq!(ind.kind, "reflection");
        assert_eq!(ind.severity, Severity::Medium);
        assert_eq!(ind.count, 42);
    }

    #[test]
    fn test_unrecognized_severity_maps_to_unknown() {
        let ind: Indicator =
            serde_json::from_str(r#"{"type": "reflection", "severity": "critical"}"#).unwrap();
        assert_eq!(ind.severity, Severity::Unknown);
        assert_eq!(ind.count, 0);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }
}
