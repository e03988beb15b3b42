//! APKSCOPE - Aggregation, classification, and pagination of APK
//! static-analysis results.
//!
//! The analysis engine itself is an external collaborator reached over an
//! upload endpoint and a realtime event channel; this crate owns the
//! client-side core: reconciling partial results into one authoritative
//! record, classifying obfuscation indicators, scoring, and paginating
//! code snippets.
//!
//! # Example
//!
//! ```
//! use apkscope::protocol::ServerEvent;
//! use apkscope::session::{Session, SessionState};
//! use serde_json::json;
//!
//! let mut session = Session::new();
//! session.start("suspicious.apk");
//!
//! let event = ServerEvent::parse(
//!     "obfuscation",
//!     json!({"is_obfuscated": true, "confidence": 85}),
//! )
//! .unwrap();
//! session.apply_event(event);
//!
//! assert_eq!(session.state(), SessionState::InProgress);
//! assert!(session.result().unwrap().obfuscation.is_obfuscated);
//! ```

pub mod admission;
pub mod classifier;
pub mod error;
pub mod output;
pub mod paginator;
pub mod permissions;
pub mod protocol;
pub mod scoring;
pub mod session;
pub mod types;

// Re-export commonly used types at crate root
pub use classifier::{indicator_details, IndicatorDetails, RiskLevel};
pub use error::{Result, ScopeError};
pub use paginator::{NumberedSnippet, Paginator, SNIPPETS_PER_PAGE};
pub use permissions::PermissionCatalog;
pub use scoring::{key_findings, permission_summary, security_score, KeyFinding, SecurityScore};
pub use session::{Directive, Session, SessionState};
pub use types::{
    AnalysisResult, ApkMeta, CodeSnippet, Indicator, ObfuscationReport, Permission,
    ProtectionLevel, Severity,
};
