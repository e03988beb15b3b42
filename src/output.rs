//! Rendering of analysis results for terminal consumption.
//!
//! Two modes: human-readable colored text (summary and detail views) and
//! pretty-printed JSON export. The export is the in-memory result
//! serialized as-is, with no schema transformation. Every display path
//! degrades to a named placeholder when data is missing.

use anyhow::Result;
use colored::Colorize;

use crate::classifier::{indicator_details, RiskLevel};
use crate::paginator::Paginator;
use crate::scoring::{key_findings, permission_summary, security_score, FindingKind, ScoreLevel};
use crate::types::{AnalysisResult, Severity};

/// Pretty-printed JSON export of the result, as-is
pub fn export_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("Unknown")
}

fn severity_colored(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::High => severity.label().red().bold(),
        Severity::Medium => severity.label().yellow(),
        Severity::Low => severity.label().green(),
        Severity::Unknown => severity.label().dimmed(),
    }
}

/// Render the summary view: score, package info, permission counts,
/// obfuscation status, and key findings.
#[must_use]
pub fn render_summary(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", result.display_name().bold()));
    out.push_str(&format!("{}\n\n", "=".repeat(result.display_name().len())));

    let score = security_score(result);
    let score_display = format!("{} - {} Security", score.score, score.level.as_str());
    let score_colored = match score.level {
        ScoreLevel::High => score_display.green().bold(),
        ScoreLevel::Medium => score_display.yellow().bold(),
        ScoreLevel::Low => score_display.red().bold(),
    };
    out.push_str(&format!("Security Score: {score_colored}\n\n"));

    let meta = &result.apk_meta;
    out.push_str("APK Information\n");
    out.push_str(&format!("  Name:    {}\n", or_unknown(meta.name.as_deref())));
    out.push_str(&format!(
        "  Package: {}\n",
        or_unknown(meta.package_name.as_deref())
    ));
    out.push_str(&format!(
        "  Version: {}\n",
        or_unknown(meta.version_name.as_deref())
    ));
    let size = match result.apk_size_mb {
        Some(mb) => format!("{mb} MB"),
        None => or_unknown(meta.size.as_deref()).to_string(),
    };
    out.push_str(&format!("  Size:    {size}\n"));
    out.push_str(&format!(
        "  Analysis Time: {}\n\n",
        result.runtime_display.as_deref().unwrap_or("N/A")
    ));

    let summary = permission_summary(&result.permissions);
    out.push_str("Permissions\n");
    out.push_str(&format!("  Dangerous: {}\n", summary.dangerous));
    out.push_str(&format!("  Normal:    {}\n", summary.normal));
    out.push_str(&format!("  Signature: {}\n", summary.signature));
    out.push_str(&format!("  Unknown:   {}\n\n", summary.unknown));

    let obf = &result.obfuscation;
    let status = if obf.is_obfuscated {
        "Obfuscated".red().bold()
    } else {
        "Not Obfuscated".green()
    };
    out.push_str(&format!(
        "Obfuscation: {status} (Confidence: {}%)\n",
        obf.confidence
    ));
    out.push_str(&format!(
        "Risk: {}\n\n",
        RiskLevel::from_confidence(obf.confidence).label()
    ));

    out.push_str("Key Findings\n");
    for finding in key_findings(result) {
        let marker = match finding.kind {
            FindingKind::Warning => "[!]".yellow(),
            FindingKind::Info => "[i]".cyan(),
            FindingKind::Success => "[ok]".green(),
        };
        out.push_str(&format!("  {marker} {}\n", finding.message));
    }

    out
}

/// Render the detail view: full permission list, indicator cards, one
/// page of code snippets, manifest, and file structure.
#[must_use]
pub fn render_detail(result: &AnalysisResult, paginator: &Paginator) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", result.display_name().bold()));

    out.push_str(&format!("{}\n", "Permissions".bold()));
    if result.permissions.is_empty() {
        out.push_str("  No permissions data available.\n");
    } else {
        for permission in &result.permissions {
            out.push_str(&format!(
                "  {} [{}]\n",
                permission.name,
                permission.protection_level.as_str()
            ));
            out.push_str(&format!(
                "    {}\n",
                permission
                    .description
                    .as_deref()
                    .unwrap_or("No description available")
            ));
        }
    }
    out.push('\n');

    out.push_str(&render_obfuscation_detail(result, paginator));

    out.push_str(&format!("{}\n", "Manifest".bold()));
    out.push_str(&format!(
        "  {}\n\n",
        result.manifest.as_deref().unwrap_or("Manifest data not available")
    ));

    out.push_str(&format!("{}\n", "File Structure".bold()));
    if result.file_structure.is_empty() {
        out.push_str("  File structure not available\n");
    } else {
        for entry in &result.file_structure {
            out.push_str(&format!("  {entry}\n"));
        }
    }

    out
}

fn render_obfuscation_detail(result: &AnalysisResult, paginator: &Paginator) -> String {
    let mut out = String::new();
    let obf = &result.obfuscation;

    out.push_str(&format!("{}\n", "Obfuscation Analysis".bold()));
    let headline = if obf.is_obfuscated {
        "Obfuscation Detected".red().bold()
    } else {
        "No Significant Obfuscation".green()
    };
    let risk = RiskLevel::from_confidence(obf.confidence);
    out.push_str(&format!(
        "  {headline} | Confidence: {}% | {}\n",
        obf.confidence,
        risk.label()
    ));
    if !obf.code_snippets.is_empty() {
        out.push_str(&format!(
            "  Found {} obfuscated code snippets\n",
            obf.code_snippets.len()
        ));
    }
    out.push('\n');

    if !obf.indicators.is_empty() {
        out.push_str("  Indicators:\n");
        for indicator in &obf.indicators {
            let details = indicator_details(&indicator.kind);
            let name = indicator.description.as_deref().unwrap_or(&details.name);
            out.push_str(&format!(
                "  - {} {} [{}]\n",
                details.icon,
                name,
                severity_colored(indicator.severity)
            ));
            out.push_str(&format!(
                "      Occurrences: {} | Impact: {}\n",
                indicator.count, details.impact
            ));
            out.push_str(&format!("      {}\n", details.explanation));
            for risk_item in &details.security_risks {
                out.push_str(&format!("      * {risk_item}\n"));
            }
        }
        out.push('\n');
    }

    if !obf.code_snippets.is_empty() {
        let total_pages = paginator.total_pages();
        out.push_str(&format!(
            "  Code Snippets (page {} of {total_pages}, {} total)\n",
            paginator.current_page(),
            obf.code_snippets.len()
        ));
        for entry in paginator.current_slice(&obf.code_snippets) {
            let snippet = entry.snippet;
            out.push_str(&format!(
                "  #{} {} [{}]\n",
                entry.number,
                snippet.kind.as_deref().unwrap_or("Code Pattern"),
                severity_colored(snippet.severity_or_default())
            ));
            let line_range = match (snippet.line_start, snippet.line_end) {
                (Some(start), Some(end)) => format!("Lines {start}-{end}"),
                (Some(start), None) => format!("Lines {start}-?"),
                (None, Some(end)) => format!("Lines ?-{end}"),
                (None, None) => "Lines ?-?".to_string(),
            };
            out.push_str(&format!(
                "      {} | {line_range}\n",
                snippet.file.as_deref().unwrap_or("Unknown file")
            ));
            out.push_str(&format!(
                "      Detected Pattern: {}\n",
                snippet.matched_text.as_deref().unwrap_or("Pattern match")
            ));
            out.push_str(&format!(
                "      {}\n",
                snippet.display_code().unwrap_or("Code not available")
            ));
        }
        out.push('\n');
    }

    out
}
