//! Data model for analysis results as produced by the backend contract

mod indicator;
mod permission;
mod report;

pub use indicator::{Indicator, Severity};
pub use permission::{Permission, ProtectionLevel};
pub use report::{AnalysisResult, ApkMeta, CodeSnippet, ObfuscationReport};
