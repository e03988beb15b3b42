//! Obfuscation indicator classification.
//!
//! Maps detector type codes to fixed descriptor records used for
//! presentation, and buckets confidence percentages into risk levels.
//! The taxonomy is closed for known types; anything else degrades to a
//! synthesized fallback record, so classification is total over all
//! string inputs and never fails.

use serde::Serialize;

use crate::types::Severity;

/// Descriptive record for one indicator type
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndicatorDetails {
    pub name: String,
    /// Display glyph for the indicator card
    pub icon: String,
    /// Fallback severity; the indicator's own severity wins when present
    pub severity: Severity,
    /// What the technique affects (e.g. "Code Readability")
    pub impact: String,
    /// Why this pattern indicates obfuscation
    pub explanation: String,
    /// Never empty, even for unknown types
    pub security_risks: Vec<String>,
}

fn details(
    name: &str,
    icon: &str,
    severity: Severity,
    impact: &str,
    explanation: &str,
    risks: &[&str],
) -> IndicatorDetails {
    IndicatorDetails {
        name: name.to_string(),
        icon: icon.to_string(),
        severity,
        impact: impact.to_string(),
        explanation: explanation.to_string(),
        security_risks: risks.iter().map(|r| (*r).to_string()).collect(),
    }
}

/// Title-case a type code: underscores to spaces, each word capitalized
fn title_case(kind: &str) -> String {
    kind.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an indicator type code to its descriptor record.
///
/// Known codes return the hardcoded catalog entry; unknown codes get a
/// synthesized record with a title-cased name, a generic warning glyph,
/// and a single generic risk statement.
#[must_use]
pub fn indicator_details(kind: &str) -> IndicatorDetails {
    match kind {
        "short_class_names" => details(
            "Short Class Names",
            "\u{1f3f7}\u{fe0f}",
            Severity::High,
            "Code Readability",
            "Classes with extremely short names (1-2 characters) are a strong indicator of name obfuscation. Legitimate code typically uses descriptive class names that reflect their purpose.",
            &[
                "Makes reverse engineering analysis difficult",
                "Hides the actual purpose of classes",
                "Complicates security auditing processes",
                "May indicate attempt to hide malicious functionality",
            ],
        ),
        "short_method_names" => details(
            "Short Method Names",
            "\u{1f524}",
            Severity::High,
            "Code Readability",
            "Methods with extremely short names (1-2 characters) are a strong indicator of name obfuscation. Legitimate code typically uses descriptive method names.",
            &[
                "Makes reverse engineering analysis difficult",
                "Hides malicious function names and purposes",
                "Complicates security auditing processes",
                "May indicate attempt to hide suspicious behavior",
            ],
        ),
        "short_field_names" => details(
            "Short Field Names",
            "\u{1f4dd}",
            Severity::High,
            "Code Readability",
            "Fields with single character names are a strong indicator of name obfuscation. Legitimate code typically uses descriptive field names.",
            &[
                "Makes data structure analysis difficult",
                "Hides the purpose of stored data",
                "Complicates security auditing",
                "May conceal sensitive information storage",
            ],
        ),
        "synthetic_methods" => details(
            "Synthetic Methods",
            "\u{1f916}",
            Severity::Medium,
            "Code Structure",
            "Synthetic methods are compiler-generated methods that don't exist in the original source code. A high number of these can indicate obfuscation or complex code generation.",
            &[
                "Can hide actual program logic",
                "Makes static analysis more difficult",
                "May indicate code generation tools",
                "Can complicate debugging and analysis",
            ],
        ),
        "access_methods" => details(
            "Synthetic Access Methods",
            "\u{1f510}",
            Severity::Medium,
            "Access Control",
            "Synthetic access methods (access$XXX) are generated by the compiler to access private members from inner classes. Many of these can indicate obfuscation.",
            &[
                "Can bypass intended access restrictions",
                "Makes access control analysis difficult",
                "May indicate complex inner class structures",
                "Can hide actual data access patterns",
            ],
        ),
        "obfuscated_packages" => details(
            "Obfuscated Package Names",
            "\u{1f4e6}",
            Severity::High,
            "Code Organization",
            "Package names with single characters indicate package name obfuscation. Legitimate packages typically use meaningful, hierarchical names.",
            &[
                "Hides the actual organization of code",
                "Makes package-based security analysis difficult",
                "Can conceal malicious package structures",
                "Complicates dependency analysis",
            ],
        ),
        "dollar_classes" => details(
            "Inner Classes with Obfuscated Names",
            "\u{1f3ad}",
            Severity::Medium,
            "Class Structure",
            "Inner classes with dollar signs and short names often indicate obfuscated inner class structures used to hide implementation details.",
            &[
                "Can hide complex class relationships",
                "Makes inner class analysis difficult",
                "May conceal callback mechanisms",
                "Can hide event handling logic",
            ],
        ),
        "reflection" => details(
            "Dynamic Reflection Usage",
            "\u{1fa9e}",
            Severity::Medium,
            "Runtime Behavior",
            "Excessive use of Java reflection allows code to dynamically access classes and methods at runtime, making static analysis difficult and potentially hiding malicious behavior.",
            &[
                "Bypasses compile-time security checks",
                "Can access private methods and fields",
                "Makes malware detection more difficult",
                "Enables dynamic code loading and execution",
            ],
        ),
        "string_encryption" => details(
            "String Encryption/Encoding",
            "\u{1f510}",
            Severity::High,
            "Data Hiding",
            "Encrypted or encoded strings hide sensitive information like URLs, API keys, or malicious commands from static analysis tools.",
            &[
                "Hides malicious URLs and endpoints",
                "Conceals sensitive API keys and tokens",
                "Makes network traffic analysis difficult",
                "Can hide command and control communications",
            ],
        ),
        "base64_strings" => details(
            "Base64 Encoded Strings",
            "\u{1f4dd}",
            Severity::Medium,
            "Data Encoding",
            "Base64 encoded strings can hide sensitive data, URLs, or commands from simple text analysis.",
            &[
                "Hides sensitive configuration data",
                "Can conceal malicious URLs",
                "Makes static analysis more difficult",
                "May hide encrypted payloads",
            ],
        ),
        "hex_strings" => details(
            "Hexadecimal Encoded Strings",
            "\u{1f522}",
            Severity::Medium,
            "Data Encoding",
            "Hexadecimal encoded strings can hide binary data, encryption keys, or other sensitive information.",
            &[
                "Conceals binary payloads",
                "Hides encryption keys",
                "Makes pattern detection difficult",
                "Can hide shellcode or exploits",
            ],
        ),
        "proguard_signatures" => details(
            "ProGuard Compilation Signatures",
            "\u{2699}\u{fe0f}",
            Severity::Low,
            "Build Process",
            "ProGuard signatures indicate the code has been processed by ProGuard, a common obfuscation and optimization tool.",
            &[
                "Indicates intentional code obfuscation",
                "May hide original source structure",
                "Can make debugging more difficult",
                "Suggests commercial or protected code",
            ],
        ),
        unknown => details(
            &title_case(unknown),
            "\u{26a0}\u{fe0f}",
            Severity::Unknown,
            "Unknown",
            "This obfuscation technique was detected but detailed analysis is not available.",
            &["Unknown security implications"],
        ),
    }
}

/// Risk bucket for a confidence percentage
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a detector confidence percentage
    #[must_use]
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            80.. => RiskLevel::High,
            60..=79 => RiskLevel::Medium,
            40..=59 => RiskLevel::Low,
            _ => RiskLevel::Minimal,
        }
    }

    /// Style class used wherever the bucket is summarized
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::High => "high-risk",
            RiskLevel::Medium => "medium-risk",
            RiskLevel::Low => "low-risk",
            RiskLevel::Minimal => "minimal-risk",
        }
    }

    /// Banner text for the bucket
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH RISK",
            RiskLevel::Medium => "MEDIUM RISK",
            RiskLevel::Low => "LOW RISK",
            RiskLevel::Minimal => "MINIMAL RISK",
        }
    }
}
