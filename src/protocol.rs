//! Boundary normalization for the upload response and realtime channel.
//!
//! Every payload shape the backend can produce is resolved here, once,
//! into a typed event; the session never touches raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScopeError};
use crate::types::{ApkMeta, ObfuscationReport, Permission};

/// `status` / `analysis_status` payload
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StatusPayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// `analysis_progress` payload
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProgressPayload {
    /// Percentage complete, 0..=100
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct PermissionsPayload {
    #[serde(default)]
    permissions: Vec<Permission>,
}

/// Field-presence view of an `AnalysisResult`-shaped payload.
///
/// Completion payloads are shallow-merged: a field present here overwrites
/// the session's value, an absent field preserves it. Modeling presence as
/// `Option` keeps that rule explicit instead of scattering fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ResultFields {
    #[serde(rename = "fileName", skip_serializing_if = "Option::is_none", default)]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub permissions: Option<Vec<Permission>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub obfuscation: Option<ObfuscationReport>,
    #[serde(rename = "apkInfo", skip_serializing_if = "Option::is_none", default)]
    pub apk_meta: Option<ApkMeta>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub manifest: Option<String>,
    #[serde(rename = "fileStructure", skip_serializing_if = "Option::is_none", default)]
    pub file_structure: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub apk_size_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub runtime_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub runtime_display: Option<String>,
}

/// `analysis_complete` arrives either wrapped in a `results` field or as
/// the result object directly. Wrapped is tried first; the direct shape
/// accepts any object, so order matters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CompletionPayload {
    Wrapped { results: ResultFields },
    Direct(ResultFields),
}

impl CompletionPayload {
    /// Collapse both shapes into the merged-field view
    #[must_use]
    pub fn into_fields(self) -> ResultFields {
        match self {
            CompletionPayload::Wrapped { results } => results,
            CompletionPayload::Direct(fields) => fields,
        }
    }
}

/// Success-path JSON body of `POST /upload`. `complete_data` present means
/// synchronous completion; otherwise results follow over the realtime
/// channel. Non-2xx bodies carry `error`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub complete_data: Option<ResultFields>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A typed realtime event, one per channel the backend publishes on
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Free-form diagnostics; never drives state transitions
    Status(StatusPayload),
    /// Informational notice for the user
    AnalysisStatus(StatusPayload),
    /// Progress indicator update
    AnalysisProgress(ProgressPayload),
    Permissions(Vec<Permission>),
    Obfuscation(ObfuscationReport),
    AnalysisComplete(ResultFields),
}

impl ServerEvent {
    /// Parse a named realtime event into its typed form.
    ///
    /// Unknown event names are an error the caller may choose to ignore;
    /// a known name with a malformed body is reported with the event name
    /// attached.
    pub fn parse(name: &str, payload: Value) -> Result<Self> {
        fn typed<T: serde::de::DeserializeOwned>(name: &str, payload: Value) -> Result<T> {
            serde_json::from_value(payload).map_err(|e| ScopeError::malformed_payload(name, e))
        }

        match name {
            "status" => Ok(ServerEvent::Status(typed(name, payload)?)),
            "analysis_status" => Ok(ServerEvent::AnalysisStatus(typed(name, payload)?)),
            "analysis_progress" => Ok(ServerEvent::AnalysisProgress(typed(name, payload)?)),
            "permissions" => {
                let p: PermissionsPayload = typed(name, payload)?;
                Ok(ServerEvent::Permissions(p.permissions))
            }
            "obfuscation" => Ok(ServerEvent::Obfuscation(typed(name, payload)?)),
            "analysis_complete" => {
                let p: CompletionPayload = typed(name, payload)?;
                Ok(ServerEvent::AnalysisComplete(p.into_fields()))
            }
            other => Err(ScopeError::UnknownEvent(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completion_payload_wrapped() {
        let payload = json!({"results": {"fileName": "app.apk", "manifest": "<manifest/>"}});
        let fields = ServerEvent::parse("analysis_complete", payload).unwrap();
        match fields {
            ServerEvent::AnalysisComplete(f) => {
                assert_eq!(f.file_name.as_deref(), Some("app.apk"));
                assert_eq!(f.manifest.as_deref(), Some("<manifest/>"));
                assert!(f.permissions.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_completion_payload_direct() {
        let payload = json!({"fileName": "app.apk", "permissions": []});
        match ServerEvent::parse("analysis_complete", payload).unwrap() {
            ServerEvent::AnalysisComplete(f) => {
                assert_eq!(f.file_name.as_deref(), Some("app.apk"));
                assert_eq!(f.permissions.as_deref(), Some(&[][..]));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_permissions_event_missing_list_is_empty() {
        match ServerEvent::parse("permissions", json!({})).unwrap() {
            ServerEvent::Permissions(p) => assert!(p.is_empty()),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_name() {
        let err = ServerEvent::parse("heartbeat", json!({})).unwrap_err();
        assert!(err.to_string().contains("heartbeat"));
    }

    #[test]
    fn test_malformed_obfuscation_payload_names_event() {
        let err = ServerEvent::parse("obfuscation", json!({"confidence": "not a number"}))
            .unwrap_err();
        assert!(err.to_string().contains("obfuscation"));
    }

    #[test]
    fn test_upload_response_synchronous() {
        let resp: UploadResponse = serde_json::from_value(json!({
            "success": true,
            "session_id": "abc",
            "complete_data": {"fileName": "app.apk"}
        }))
        .unwrap();
        assert!(resp.error.is_none());
        assert_eq!(
            resp.complete_data.unwrap().file_name.as_deref(),
            Some("app.apk")
        );
    }

    #[test]
    fn test_upload_response_error_body() {
        let resp: UploadResponse =
            serde_json::from_value(json!({"error": "Decompilation failed"})).unwrap();
        assert_eq!(resp.error.as_deref(), Some("Decompilation failed"));
        assert!(resp.complete_data.is_none());
    }
}
