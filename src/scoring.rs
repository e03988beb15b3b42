//! Security score and key-finding generation.
//!
//! Two deliberately distinct dangerous-permission predicates exist: the
//! score counts CAMERA/LOCATION/CONTACTS name matches, the findings count
//! only CAMERA/LOCATION. They are kept as separately named rules.

use serde::Serialize;

use crate::types::{AnalysisResult, Permission, ProtectionLevel};

/// Permission threshold above which a dangerous-count warning is raised
const DANGEROUS_FINDING_THRESHOLD: usize = 5;
/// Total-permission threshold for the "large number requested" warning
const TOTAL_PERMISSION_THRESHOLD: usize = 20;

/// Whether a permission counts as dangerous for the security score.
/// Substring matches are case-sensitive.
#[must_use]
pub fn counts_dangerous_for_score(permission: &Permission) -> bool {
    permission.protection_level == ProtectionLevel::Dangerous
        || permission.name.contains("CAMERA")
        || permission.name.contains("LOCATION")
        || permission.name.contains("CONTACTS")
}

/// Whether a permission counts as dangerous for key findings.
/// Narrower than the score predicate: no CONTACTS check.
#[must_use]
pub fn counts_dangerous_for_findings(permission: &Permission) -> bool {
    permission.protection_level == ProtectionLevel::Dangerous
        || permission.name.contains("CAMERA")
        || permission.name.contains("LOCATION")
}

/// Overall score level
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ScoreLevel {
    High,
    Medium,
    Low,
}

impl ScoreLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLevel::High => "High",
            ScoreLevel::Medium => "Medium",
            ScoreLevel::Low => "Low",
        }
    }
}

/// Security score with its display level
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SecurityScore {
    /// 0..=100
    pub score: u8,
    pub level: ScoreLevel,
}

/// Compute the security score for a result.
///
/// Starts at 100, subtracts 5 per dangerous permission and a flat 20 when
/// obfuscation was detected, clamped to 0..=100.
#[must_use]
pub fn security_score(result: &AnalysisResult) -> SecurityScore {
    let mut score: i64 = 100;

    let dangerous = result
        .permissions
        .iter()
        .filter(|p| counts_dangerous_for_score(p))
        .count() as i64;
    score -= dangerous * 5;

    if result.obfuscation.is_obfuscated {
        score -= 20;
    }

    let score = score.clamp(0, 100) as u8;
    let level = match score {
        80.. => ScoreLevel::High,
        60..=79 => ScoreLevel::Medium,
        _ => ScoreLevel::Low,
    };

    SecurityScore { score, level }
}

/// Per-protection-level permission counts; every occurrence counted
/// independently, duplicates included
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct PermissionSummary {
    pub total: usize,
    pub dangerous: usize,
    pub normal: usize,
    pub signature: usize,
    pub unknown: usize,
}

#[must_use]
pub fn permission_summary(permissions: &[Permission]) -> PermissionSummary {
    let mut summary = PermissionSummary {
        total: permissions.len(),
        ..PermissionSummary::default()
    };

    for permission in permissions {
        match permission.protection_level {
            ProtectionLevel::Dangerous => summary.dangerous += 1,
            ProtectionLevel::Normal => summary.normal += 1,
            ProtectionLevel::Signature => summary.signature += 1,
            ProtectionLevel::Unknown => summary.unknown += 1,
        }
    }

    summary
}

/// Category of a key finding, matching the message banner styles
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Info,
    Warning,
    Success,
}

/// One entry in the summary's key-findings list
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeyFinding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub message: String,
}

/// Generate the ordered key-findings list.
///
/// Findings are independent and can co-occur; the success entry appears
/// only when nothing else fired.
#[must_use]
pub fn key_findings(result: &AnalysisResult) -> Vec<KeyFinding> {
    let mut findings = Vec::new();

    let dangerous_count = result
        .permissions
        .iter()
        .filter(|p| counts_dangerous_for_findings(p))
        .count();

    if dangerous_count > DANGEROUS_FINDING_THRESHOLD {
        findings.push(KeyFinding {
            kind: FindingKind::Warning,
            message: format!("High number of dangerous permissions ({dangerous_count})"),
        });
    }

    if result.obfuscation.is_obfuscated {
        let confidence = result.obfuscation.confidence;
        let snippet_count = result.obfuscation.code_snippets.len();
        findings.push(KeyFinding {
            kind: FindingKind::Info,
            message: format!(
                "Code obfuscation detected ({confidence}% confidence, {snippet_count} code snippets found)"
            ),
        });
    }

    if result.permissions.len() > TOTAL_PERMISSION_THRESHOLD {
        findings.push(KeyFinding {
            kind: FindingKind::Warning,
            message: format!(
                "Large number of permissions requested ({})",
                result.permissions.len()
            ),
        });
    }

    if findings.is_empty() {
        findings.push(KeyFinding {
            kind: FindingKind::Success,
            message: "No significant security concerns detected".to_string(),
        });
    }

    findings
}
