//! The analysis result record owned by the live session

use serde::{Deserialize, Serialize};

use super::indicator::{Indicator, Severity};
use super::permission::Permission;

/// Obfuscation analysis for one package.
///
/// Replaced wholesale by `obfuscation` events; never merged field by field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ObfuscationReport {
    #[serde(default)]
    pub is_obfuscated: bool,
    /// Detector confidence, 0..=100
    #[serde(default)]
    pub confidence: u8,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub indicators: Vec<Indicator>,
    /// Matched source locations, in detector order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub code_snippets: Vec<CodeSnippet>,
}

/// One matched code location. Immutable once received; every field is
/// optional on the wire and rendering degrades to placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CodeSnippet {
    /// Pattern type that matched (e.g. `base64_strings`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub severity: Option<Severity>,
    /// Source file within the decompiled package
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line_start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line_end: Option<u64>,
    /// The exact text the detector matched
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub matched_text: Option<String>,
    /// The full line containing the match
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub matched_line: Option<String>,
    /// Surrounding code context
    #[serde(rename = "code_snippet", skip_serializing_if = "Option::is_none", default)]
    pub code_text: Option<String>,
}

impl CodeSnippet {
    /// Severity for display and scoring; absent defaults to medium
    #[must_use]
    pub fn severity_or_default(&self) -> Severity {
        self.severity.unwrap_or(Severity::Medium)
    }

    /// Best available code text: context first, then the matched line
    #[must_use]
    pub fn display_code(&self) -> Option<&str> {
        self.code_text
            .as_deref()
            .or(self.matched_line.as_deref())
    }
}

/// Basic package metadata extracted from the manifest. All fields stay
/// unset until the backend reports them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApkMeta {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version_code: Option<String>,
    /// Human-readable size string as reported (e.g. "4.2 MB")
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_sdk_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_sdk_version: Option<String>,
}

/// The single authoritative result record for one analysis session.
///
/// Exclusively owned by the live session; starting a new upload discards
/// the previous record together with any derived pagination state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Declaration/arrival order, duplicates allowed
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub obfuscation: ObfuscationReport,
    #[serde(rename = "apkInfo", default)]
    pub apk_meta: ApkMeta,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub manifest: Option<String>,
    #[serde(rename = "fileStructure", skip_serializing_if = "Vec::is_empty", default)]
    pub file_structure: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub apk_size_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub runtime_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub runtime_display: Option<String>,
}

impl AnalysisResult {
    /// Empty result for a freshly started session
    #[must_use]
    pub fn new<S: Into<String>>(file_name: S) -> Self {
        let file_name = file_name.into();
        Self {
            apk_meta: ApkMeta {
                name: Some(file_name.clone()),
                ..ApkMeta::default()
            },
            file_name,
            permissions: Vec::new(),
            obfuscation: ObfuscationReport::default(),
            manifest: None,
            file_structure: Vec::new(),
            apk_size_mb: None,
            runtime_seconds: None,
            runtime_display: None,
        }
    }

    /// Display name: file name, falling back to the manifest name
    #[must_use]
    pub fn display_name(&self) -> &str {
        if !self.file_name.is_empty() {
            return &self.file_name;
        }
        self.apk_meta.name.as_deref().unwrap_or("Unknown APK")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_is_empty() {
        let result = AnalysisResult::new("app.apk");
        assert_eq!(result.file_name, "app.apk");
        assert!(result.permissions.is_empty());
        assert!(!result.obfuscation.is_obfuscated);
        assert_eq!(result.obfuscation.confidence, 0);
        assert!(result.obfuscation.code_snippets.is_empty());
        assert_eq!(result.apk_meta.name.as_deref(), Some("app.apk"));
    }

    #[test]
    fn test_snippet_severity_defaults_medium() {
        let snippet: CodeSnippet = serde_json::from_str(r#"{"type": "hex_strings"}"#).unwrap();
        assert!(snippet.severity.is_none());
        assert_eq!(snippet.severity_or_default(), Severity::Medium);
    }

    #[test]
    fn test_snippet_display_code_prefers_context() {
        let snippet = CodeSnippet {
            matched_line: Some("const-string v0, \"aGVsbG8=\"".to_string()),
            code_text: Some(".method a()V\n    const-string v0, \"aGVsbG8=\"".to_string()),
            ..CodeSnippet::default()
        };
        assert!(snippet.display_code().unwrap().starts_with(".method"));
    }

    #[test]
    fn test_wire_field_names() {
        let result = AnalysisResult::new("app.apk");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""fileName":"app.apk""#));
        assert!(json.contains(r#""apkInfo""#));
        assert!(json.contains(r#""is_obfuscated":false"#));
    }

    #[test]
    fn test_obfuscation_report_from_partial_wire_payload() {
        let report: ObfuscationReport =
            serde_json::from_str(r#"{"is_obfuscated": true, "confidence": 85}"#).unwrap();
        assert!(report.is_obfuscated);
        assert_eq!(report.confidence, 85);
        assert!(report.indicators.is_empty());
        assert!(report.code_snippets.is_empty());
    }
}
