mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use apkscope::admission;
use apkscope::output;
use apkscope::protocol::{ResultFields, ServerEvent, UploadResponse};
use apkscope::session::{Directive, NoticeLevel, Session, SessionState, TimerToken};
use apkscope::ScopeError;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        cli::Command::Render {
            report,
            json,
            detail,
            page,
        } => render_report(&report, json, detail, page),
        cli::Command::Replay {
            transcript,
            file_name,
            json,
            detail,
        } => replay_transcript(&transcript, &file_name, json, detail),
        cli::Command::Check { file } => check_file(&file),
    }
}

/// One recorded realtime event
#[derive(Debug, serde::Deserialize)]
struct TranscriptLine {
    event: String,
    data: Value,
}

/// Print user-visible directives and collect scheduled timer tokens
fn run_directives(directives: Vec<Directive>, pending_timers: &mut Vec<TimerToken>) {
    for directive in directives {
        match directive {
            Directive::Notice { level, message } => {
                let tag = match level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Warning => "warning",
                    NoticeLevel::Error => "error",
                };
                eprintln!("[{tag}] {message}");
            }
            Directive::Progress { percent, message } => match message {
                Some(message) => eprintln!("[progress] {percent}% {message}"),
                None => eprintln!("[progress] {percent}%"),
            },
            Directive::Schedule { token, .. } => pending_timers.push(token),
            Directive::SetLoading(_) | Directive::ClearNotice | Directive::ShowSummary => {}
        }
    }
}

fn print_result(session: &mut Session, json: bool, detail: bool, page: usize) -> Result<()> {
    let result = session
        .result()
        .context("session finished without a result")?;

    if json {
        println!("{}", output::export_json(result)?);
        return Ok(());
    }

    if detail {
        for _ in 1..page {
            if !session.change_snippet_page(1) {
                break;
            }
        }
        let result = session.result().context("session lost its result")?;
        let paginator = session
            .snippet_paginator()
            .context("session has no pagination state")?;
        print!("{}", output::render_detail(result, paginator));
    } else {
        print!("{}", output::render_summary(result));
    }

    Ok(())
}

fn render_report(path: &str, json: bool, detail: bool, page: usize) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let fields: ResultFields =
        serde_json::from_str(&text).with_context(|| format!("invalid report JSON in {path}"))?;

    let file_name = fields
        .file_name
        .clone()
        .or_else(|| {
            Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "upload.apk".to_string());

    // Drive the session through the synchronous-completion shortcut so the
    // rendered state is exactly what the live flow would produce.
    let mut session = Session::new();
    let mut pending_timers = Vec::new();
    run_directives(session.start(file_name), &mut pending_timers);
    run_directives(
        session.on_upload_response(UploadResponse {
            complete_data: Some(fields),
            ..UploadResponse::default()
        }),
        &mut pending_timers,
    );
    debug_assert_eq!(session.state(), SessionState::Ready);

    print_result(&mut session, json, detail, page)
}

fn replay_transcript(path: &str, file_name: &str, json: bool, detail: bool) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;

    let mut session = Session::new();
    let mut pending_timers = Vec::new();
    run_directives(session.start(file_name), &mut pending_timers);
    // The transcript is the realtime path: the upload was accepted without
    // synchronous data.
    run_directives(
        session.on_upload_response(UploadResponse::default()),
        &mut pending_timers,
    );

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: TranscriptLine = serde_json::from_str(line)
            .with_context(|| format!("{path}:{}: invalid transcript line", line_no + 1))?;
        match ServerEvent::parse(&record.event, record.data) {
            Ok(event) => run_directives(session.apply_event(event), &mut pending_timers),
            Err(ScopeError::UnknownEvent(name)) => {
                warn!(%name, "skipping unknown event in transcript");
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("{path}:{}: bad event payload", line_no + 1));
            }
        }
    }

    // The transcript has no clock; fire whatever timers are still pending
    // so a partial recording settles the same way a stalled analysis does.
    while session.state() == SessionState::InProgress {
        let Some(token) = pending_timers.pop() else {
            break;
        };
        run_directives(session.on_timer(token), &mut pending_timers);
    }

    print_result(&mut session, json, detail, 1)
}

fn check_file(path: &str) -> Result<()> {
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    let size = fs::metadata(path)
        .with_context(|| format!("failed to stat {path}"))?
        .len();

    admission::validate_upload(name.as_deref(), size)?;
    println!("OK: {path} passes upload admission checks");
    Ok(())
}
