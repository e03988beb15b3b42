//! The analysis session: an explicit state machine reconciling the
//! synchronous upload response, realtime partial events, and timer
//! fallbacks into one authoritative [`AnalysisResult`].
//!
//! The session is a pure reducer over inputs. It performs no I/O and owns
//! no clock: side effects are returned as [`Directive`]s for the embedding
//! host to execute, and timers are generation-stamped tokens handed back
//! via [`Session::on_timer`]. A token minted by an earlier session
//! generation is a no-op when it fires, which is how starting a new upload
//! invalidates in-flight timers without cancelling them physically.
//!
//! Completion policy: the first authoritative signal wins. Once the
//! session is `Ready`, later realtime events are dropped (debug-logged)
//! so displayed state never regresses.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::paginator::{NumberedSnippet, Paginator};
use crate::permissions::PermissionCatalog;
use crate::protocol::{ResultFields, ServerEvent, UploadResponse};
use crate::types::AnalysisResult;

/// How long to wait for a completion signal before forcing progression
pub const COMPLETION_DEADLINE: Duration = Duration::from_millis(30_000);
/// Settling window after a partial event before declaring the session ready
pub const GRACE_WINDOW: Duration = Duration::from_millis(2_000);

/// Session lifecycle. `Ready` is terminal; a new `start` builds a fresh
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    InProgress,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    CompletionDeadline,
    GraceWindow,
}

/// Generation-stamped handle for a scheduled timer. Fired tokens from a
/// previous generation are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    pub kind: TimerKind,
    generation: u64,
}

/// Severity of a user-visible notice, matching the message banner styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Side effect requested from the embedding host
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Arm a timer and call [`Session::on_timer`] with the token when it fires
    Schedule { token: TimerToken, delay: Duration },
    /// Show a message banner
    Notice { level: NoticeLevel, message: String },
    /// Hide the message banner
    ClearNotice,
    /// Toggle the loading indicator
    SetLoading(bool),
    /// Update the progress indicator
    Progress { percent: u8, message: Option<String> },
    /// Present the summary view for the current result
    ShowSummary,
}

/// Single-owner aggregation state machine for one analysis at a time
#[derive(Debug, Default)]
pub struct Session {
    state: Option<SessionInner>,
    generation: u64,
    catalog: PermissionCatalog,
}

#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    result: AnalysisResult,
    paginator: Paginator,
    deadline_armed: bool,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
            .as_ref()
            .map_or(SessionState::Idle, |inner| inner.state)
    }

    /// The live result, if a session is active
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.state.as_ref().map(|inner| &inner.result)
    }

    /// Pagination cursor over the current snippet list
    #[must_use]
    pub fn snippet_paginator(&self) -> Option<&Paginator> {
        self.state.as_ref().map(|inner| &inner.paginator)
    }

    /// Begin a new session for `file_name`, discarding any prior result
    /// and logically invalidating its timers.
    pub fn start<S: Into<String>>(&mut self, file_name: S) -> Vec<Directive> {
        self.generation += 1;
        let result = AnalysisResult::new(file_name);
        info!(file = %result.file_name, "analysis session started");
        self.state = Some(SessionInner {
            state: SessionState::InProgress,
            paginator: Paginator::new(0),
            result,
            deadline_armed: false,
        });
        vec![
            Directive::SetLoading(true),
            Directive::Notice {
                level: NoticeLevel::Info,
                message: "Processing your APK file...".to_string(),
            },
        ]
    }

    /// Feed the parsed `POST /upload` response body.
    ///
    /// An error body aborts the session. A `complete_data` body is the
    /// synchronous shortcut: adopted verbatim, straight to `Ready`, and
    /// the completion deadline is never armed. Otherwise the realtime
    /// path is chosen and the deadline starts counting.
    pub fn on_upload_response(&mut self, response: UploadResponse) -> Vec<Directive> {
        if let Some(message) = response.error {
            return self.upload_failed(&message);
        }

        let Some(inner) = self.state.as_mut() else {
            debug!("upload response with no active session, ignoring");
            return Vec::new();
        };

        if let Some(fields) = response.complete_data {
            debug!("synchronous completion in upload response");
            fields.apply_to(&mut inner.result);
            self.catalog.annotate(&mut inner.result.permissions);
            inner.paginator = Paginator::new(inner.result.obfuscation.code_snippets.len());
            return self.finish();
        }

        inner.deadline_armed = true;
        vec![
            Directive::Notice {
                level: NoticeLevel::Info,
                message: "Analysis started. Please wait...".to_string(),
            },
            Directive::Schedule {
                token: TimerToken {
                    kind: TimerKind::CompletionDeadline,
                    generation: self.generation,
                },
                delay: COMPLETION_DEADLINE,
            },
        ]
    }

    /// Abort the session after a transport or server failure. The machine
    /// returns to `Idle`; no retry is attempted.
    pub fn upload_failed(&mut self, message: &str) -> Vec<Directive> {
        warn!(%message, "upload failed");
        self.state = None;
        self.generation += 1;
        vec![
            Directive::Notice {
                level: NoticeLevel::Error,
                message: format!("Error: {message}"),
            },
            Directive::SetLoading(false),
        ]
    }

    /// Apply one realtime event to the session
    pub fn apply_event(&mut self, event: ServerEvent) -> Vec<Directive> {
        let Some(inner) = self.state.as_mut() else {
            debug!("realtime event with no active session, ignoring");
            return Vec::new();
        };

        if inner.state == SessionState::Ready {
            // First authoritative signal won; late events must not regress
            // already-displayed state.
            debug!(?event, "event after ready, ignoring");
            return Vec::new();
        }

        match event {
            ServerEvent::Status(payload) => {
                debug!(message = ?payload.message, "status update");
                Vec::new()
            }
            ServerEvent::AnalysisStatus(payload) => match payload.message {
                Some(message) => vec![Directive::Notice {
                    level: NoticeLevel::Info,
                    message,
                }],
                None => Vec::new(),
            },
            ServerEvent::AnalysisProgress(payload) => match payload.progress {
                Some(percent) => vec![Directive::Progress {
                    percent,
                    message: payload.message,
                }],
                None => Vec::new(),
            },
            ServerEvent::Permissions(mut permissions) => {
                debug!(count = permissions.len(), "permissions received");
                self.catalog.annotate(&mut permissions);
                inner.result.permissions = permissions;
                self.maybe_schedule_grace()
            }
            ServerEvent::Obfuscation(report) => {
                debug!(
                    confidence = report.confidence,
                    snippets = report.code_snippets.len(),
                    "obfuscation report received"
                );
                // Wholesale replace; pagination is derived state and must
                // be rebuilt from the new snippet list.
                inner.result.obfuscation = report;
                inner.paginator = Paginator::new(inner.result.obfuscation.code_snippets.len());
                self.maybe_schedule_grace()
            }
            ServerEvent::AnalysisComplete(fields) => {
                info!("analysis complete");
                fields.apply_to(&mut inner.result);
                self.catalog.annotate(&mut inner.result.permissions);
                inner.paginator = Paginator::new(inner.result.obfuscation.code_snippets.len());
                self.finish()
            }
        }
    }

    /// Handle a fired timer. Tokens from an earlier generation, or timers
    /// whose condition no longer holds, are harmless no-ops.
    pub fn on_timer(&mut self, token: TimerToken) -> Vec<Directive> {
        if token.generation != self.generation {
            debug!(?token, "stale timer token, ignoring");
            return Vec::new();
        }

        let Some(inner) = self.state.as_mut() else {
            return Vec::new();
        };

        match token.kind {
            TimerKind::CompletionDeadline => {
                if inner.state != SessionState::InProgress || !inner.deadline_armed {
                    return Vec::new();
                }
                warn!("analysis deadline elapsed, forcing progression");
                let mut directives = vec![Directive::Notice {
                    level: NoticeLevel::Warning,
                    message: "Analysis is taking longer than expected. Checking results..."
                        .to_string(),
                }];
                if inner.result.permissions.is_empty()
                    && !inner.result.obfuscation.is_obfuscated
                {
                    directives.push(Directive::Notice {
                        level: NoticeLevel::Info,
                        message: "Analysis completed. Displaying available results...".to_string(),
                    });
                }
                directives.extend(self.finish());
                directives
            }
            TimerKind::GraceWindow => {
                // Only transition if the session is still in progress; the
                // user may have navigated away or a completion signal may
                // have already fired.
                if inner.state != SessionState::InProgress {
                    return Vec::new();
                }
                debug!("grace window elapsed, presenting partial results");
                self.finish()
            }
        }
    }

    /// Move one snippet page in `direction` (-1 or +1). Out-of-range
    /// moves are no-ops. Returns whether the page changed.
    pub fn change_snippet_page(&mut self, direction: i32) -> bool {
        self.state
            .as_mut()
            .is_some_and(|inner| inner.paginator.change_page(direction))
    }

    /// The current snippet page, annotated with global indices
    #[must_use]
    pub fn current_snippet_page(&self) -> Vec<NumberedSnippet<'_>> {
        match &self.state {
            Some(inner) => inner
                .paginator
                .current_slice(&inner.result.obfuscation.code_snippets),
            None => Vec::new(),
        }
    }

    /// Discard the session (returning to the upload view). Stale timer
    /// callbacks become no-ops from this point on.
    pub fn reset(&mut self) -> Vec<Directive> {
        debug!("session reset");
        self.state = None;
        self.generation += 1;
        vec![Directive::ClearNotice, Directive::SetLoading(false)]
    }

    /// After a partial event, wait a short settling window for trailing
    /// data before presenting results. The report field is always present
    /// once a session starts, so the effective condition is non-empty
    /// permissions.
    fn maybe_schedule_grace(&mut self) -> Vec<Directive> {
        let Some(inner) = self.state.as_ref() else {
            return Vec::new();
        };
        if inner.state != SessionState::InProgress || inner.result.permissions.is_empty() {
            return Vec::new();
        }
        vec![Directive::Schedule {
            token: TimerToken {
                kind: TimerKind::GraceWindow,
                generation: self.generation,
            },
            delay: GRACE_WINDOW,
        }]
    }

    /// Terminal transition: cancel the deadline, clear the loading state,
    /// and present the summary.
    fn finish(&mut self) -> Vec<Directive> {
        if let Some(inner) = self.state.as_mut() {
            inner.state = SessionState::Ready;
            inner.deadline_armed = false;
        }
        vec![
            Directive::SetLoading(false),
            Directive::ClearNotice,
            Directive::ShowSummary,
        ]
    }
}

/// Shallow merge of completion fields onto the session result: present
/// fields overwrite, absent fields are preserved.
impl ResultFields {
    pub fn apply_to(self, result: &mut AnalysisResult) {
        if let Some(file_name) = self.file_name {
            result.file_name = file_name;
        }
        if let Some(permissions) = self.permissions {
            result.permissions = permissions;
        }
        if let Some(obfuscation) = self.obfuscation {
            result.obfuscation = obfuscation;
        }
        if let Some(apk_meta) = self.apk_meta {
            result.apk_meta = apk_meta;
        }
        if let Some(manifest) = self.manifest {
            result.manifest = Some(manifest);
        }
        if let Some(file_structure) = self.file_structure {
            result.file_structure = file_structure;
        }
        if let Some(apk_size_mb) = self.apk_size_mb {
            result.apk_size_mb = Some(apk_size_mb);
        }
        if let Some(runtime_seconds) = self.runtime_seconds {
            result.runtime_seconds = Some(runtime_seconds);
        }
        if let Some(runtime_display) = self.runtime_display {
            result.runtime_display = Some(runtime_display);
        }
    }
}
