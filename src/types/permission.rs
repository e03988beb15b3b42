//! Permission entries extracted from the application manifest

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protection level declared for a permission in the platform catalog.
///
/// Wire values are lowercase; anything unrecognized deserializes to
/// `Unknown` rather than failing the whole payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    Normal,
    Dangerous,
    Signature,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ProtectionLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionLevel::Normal => "normal",
            ProtectionLevel::Dangerous => "dangerous",
            ProtectionLevel::Signature => "signature",
            ProtectionLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One permission occurrence, in manifest declaration order.
///
/// Names are not required to be unique; summaries count each occurrence
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Permission {
    /// Full permission name as declared (e.g. `android.permission.CAMERA`)
    pub name: String,
    /// Protection level from the catalog, `unknown` when unrecognized
    #[serde(default)]
    pub protection_level: ProtectionLevel,
    /// Human-readable description when the catalog knows the permission
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl Permission {
    pub fn new<S: Into<String>>(name: S, protection_level: ProtectionLevel) -> Self {
        Self {
            name: name.into(),
            protection_level,
            description: None,
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protection_level_unknown_catchall() {
        let p: Permission =
            serde_json::from_str(r#"{"name": "android.permission.FOO", "protection_level": "dangerous|privileged"}"#)
                .unwrap();
        assert_eq!(p.protection_level, ProtectionLevel::Unknown);
    }

    #[test]
    fn test_protection_level_missing_defaults_unknown() {
        let p: Permission = serde_json::from_str(r#"{"name": "android.permission.CAMERA"}"#).unwrap();
        assert_eq!(p.protection_level, ProtectionLevel::Unknown);
        assert!(p.description.is_none());
    }

    #[test]
    fn test_protection_level_roundtrip() {
        let p = Permission::new("android.permission.INTERNET", ProtectionLevel::Normal)
            .with_description("Full network access");
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""protection_level":"normal""#));
        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
