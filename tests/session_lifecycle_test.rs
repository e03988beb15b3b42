/// End-to-end session flows: upload response handling, realtime event
/// reconciliation, and timer fallbacks driving the machine to `Ready`.
use apkscope::protocol::{ResultFields, ServerEvent, UploadResponse};
use apkscope::session::{Directive, Session, SessionState, TimerKind, TimerToken};
use apkscope::types::{ObfuscationReport, Permission, ProtectionLevel};
use serde_json::json;

fn scheduled_tokens(directives: &[Directive], kind: TimerKind) -> Vec<TimerToken> {
    directives
        .iter()
        .filter_map(|d| match d {
            Directive::Schedule { token, .. } if token.kind == kind => Some(*token),
            _ => None,
        })
        .collect()
}

fn has_show_summary(directives: &[Directive]) -> bool {
    directives.iter().any(|d| matches!(d, Directive::ShowSummary))
}

#[test]
fn test_realtime_flow_settles_via_grace_window() {
    let mut session = Session::new();
    session.start("banking.apk");
    let directives = session.on_upload_response(UploadResponse::default());
    let deadlines = scheduled_tokens(&directives, TimerKind::CompletionDeadline);
    assert_eq!(deadlines.len(), 1, "realtime path must arm the deadline");

    let event = ServerEvent::parse(
        "permissions",
        json!({"permissions": [
            {"name": "android.permission.CAMERA", "protection_level": "dangerous"},
            {"name": "android.permission.INTERNET", "protection_level": "normal"},
        ]}),
    )
    .unwrap();
    let directives = session.apply_event(event);
    let grace = scheduled_tokens(&directives, TimerKind::GraceWindow);
    assert_eq!(grace.len(), 1);

    let event = ServerEvent::parse(
        "obfuscation",
        json!({
            "is_obfuscated": true,
            "confidence": 85,
            "indicators": [{"type": "reflection", "severity": "medium", "count": 12}],
            "code_snippets": [{"type": "Reflection", "file": "a.smali"}],
        }),
    )
    .unwrap();
    session.apply_event(event);
    assert_eq!(session.state(), SessionState::InProgress);

    let directives = session.on_timer(grace[0]);
    assert!(has_show_summary(&directives));
    assert_eq!(session.state(), SessionState::Ready);

    let result = session.result().unwrap();
    assert_eq!(result.file_name, "banking.apk");
    assert_eq!(result.permissions.len(), 2);
    assert!(result.obfuscation.is_obfuscated);
    assert_eq!(result.obfuscation.code_snippets.len(), 1);

    // The original deadline still fires later; it must be a no-op now.
    assert!(session.on_timer(deadlines[0]).is_empty());
}

#[test]
fn test_synchronous_completion_skips_the_deadline() {
    let mut session = Session::new();
    session.start("app.apk");
    let response: UploadResponse = serde_json::from_value(json!({
        "success": true,
        "complete_data": {
            "fileName": "app.apk",
            "permissions": [
                {"name": "android.permission.SEND_SMS", "protection_level": "dangerous"}
            ],
            "manifest": "<manifest/>",
        }
    }))
    .unwrap();
    let directives = session.on_upload_response(response);

    assert!(scheduled_tokens(&directives, TimerKind::CompletionDeadline).is_empty());
    assert!(has_show_summary(&directives));
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.result().unwrap().manifest.as_deref(), Some("<manifest/>"));

    // Late realtime events for the same session are dropped
    let late = ServerEvent::Permissions(vec![]);
    assert!(session.apply_event(late).is_empty());
    assert_eq!(session.result().unwrap().permissions.len(), 1);
}

#[test]
fn test_deadline_forces_ready_with_partial_data() {
    let mut session = Session::new();
    session.start("slow.apk");
    let directives = session.on_upload_response(UploadResponse::default());
    let deadline = scheduled_tokens(&directives, TimerKind::CompletionDeadline)[0];

    session.apply_event(ServerEvent::Obfuscation(ObfuscationReport {
        is_obfuscated: true,
        confidence: 60,
        ..ObfuscationReport::default()
    }));

    let directives = session.on_timer(deadline);
    assert_eq!(session.state(), SessionState::Ready);
    assert!(has_show_summary(&directives));
    // Partial data present, so no "displaying available results" fallback
    let notices: Vec<_> = directives
        .iter()
        .filter(|d| matches!(d, Directive::Notice { .. }))
        .collect();
    assert_eq!(notices.len(), 1);
}

#[test]
fn test_deadline_with_no_data_reports_fallback() {
    let mut session = Session::new();
    session.start("silent.apk");
    let directives = session.on_upload_response(UploadResponse::default());
    let deadline = scheduled_tokens(&directives, TimerKind::CompletionDeadline)[0];

    let directives = session.on_timer(deadline);
    assert_eq!(session.state(), SessionState::Ready);
    let notices: Vec<_> = directives
        .iter()
        .filter_map(|d| match d {
            Directive::Notice { message, .. } => Some(message.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        notices,
        vec![
            "Analysis is taking longer than expected. Checking results...",
            "Analysis completed. Displaying available results...",
        ]
    );
}

#[test]
fn test_completion_merge_preserves_earlier_fields() {
    let mut session = Session::new();
    session.start("app.apk");
    session.on_upload_response(UploadResponse::default());
    session.apply_event(ServerEvent::Permissions(vec![Permission::new(
        "android.permission.CAMERA",
        ProtectionLevel::Dangerous,
    )]));

    // Completion payload carries no permissions field; the earlier event
    // data must survive the merge.
    let event = ServerEvent::parse(
        "analysis_complete",
        json!({"results": {"manifest": "<manifest/>", "apk_size_mb": 4.2}}),
    )
    .unwrap();
    session.apply_event(event);

    assert_eq!(session.state(), SessionState::Ready);
    let result = session.result().unwrap();
    assert_eq!(result.permissions.len(), 1);
    assert_eq!(result.manifest.as_deref(), Some("<manifest/>"));
    assert_eq!(result.apk_size_mb, Some(4.2));
}

#[test]
fn test_repeated_obfuscation_event_is_idempotent() {
    let mut session = Session::new();
    session.start("app.apk");
    session.on_upload_response(UploadResponse::default());

    let report = ObfuscationReport {
        is_obfuscated: true,
        confidence: 90,
        indicators: vec![],
        code_snippets: vec![Default::default(); 12],
    };
    session.apply_event(ServerEvent::Obfuscation(report.clone()));
    session.apply_event(ServerEvent::Obfuscation(report.clone()));

    let result = session.result().unwrap();
    assert_eq!(result.obfuscation, report);
    assert_eq!(session.snippet_paginator().unwrap().total_pages(), 2);
}

#[test]
fn test_permissions_annotated_from_catalog() {
    let mut session = Session::new();
    session.start("app.apk");
    session.on_upload_response(UploadResponse::default());

    // Backend sent names only; levels and descriptions come from the
    // built-in catalog.
    let event = ServerEvent::parse(
        "permissions",
        json!({"permissions": [
            {"name": "android.permission.SEND_SMS"},
            {"name": "com.vendor.permission.SECRET_SAUCE"},
        ]}),
    )
    .unwrap();
    session.apply_event(event);

    let permissions = &session.result().unwrap().permissions;
    assert_eq!(permissions[0].protection_level, ProtectionLevel::Dangerous);
    assert!(permissions[0].description.is_some());
    assert_eq!(permissions[1].protection_level, ProtectionLevel::Unknown);
    assert_eq!(
        permissions[1].description.as_deref(),
        Some("No description available")
    );
}

#[test]
fn test_error_body_aborts_the_session() {
    let mut session = Session::new();
    session.start("broken.apk");
    let response: UploadResponse =
        serde_json::from_value(json!({"error": "Decompilation failed"})).unwrap();
    let directives = session.on_upload_response(response);

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.result().is_none());
    assert!(directives.iter().any(|d| matches!(
        d,
        Directive::Notice { message, .. } if message == "Error: Decompilation failed"
    )));
}

#[test]
fn test_pagination_through_session() {
    let mut session = Session::new();
    session.start("app.apk");
    session.on_upload_response(UploadResponse::default());
    session.apply_event(ServerEvent::Obfuscation(ObfuscationReport {
        is_obfuscated: true,
        confidence: 75,
        indicators: vec![],
        code_snippets: vec![Default::default(); 23],
    }));

    assert!(session.change_snippet_page(1));
    assert!(session.change_snippet_page(1));
    let page = session.current_snippet_page();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].number, 21);
    assert_eq!(page[2].number, 23);

    // Already on the last page
    assert!(!session.change_snippet_page(1));
}
