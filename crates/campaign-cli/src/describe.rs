//! Interactive description editing with autosave.
//!
//! `campaign describe` starts from the stored description and reads
//! additions line by line. Every line extends the draft; the autosave
//! session commits it to the campaign file once input goes quiet, exactly
//! as the editor dialog does. `:clear` starts over from an empty draft.
//!
//! Lines starting with `:` are directives:
//!
//! | Directive    | Effect                                        |
//! |--------------|-----------------------------------------------|
//! | `:save`      | Commit and close                              |
//! | `:dismiss`   | Close; the draft is still flushed             |
//! | `:cancel`    | Close and discard the draft                   |
//! | `:clear`     | Empty the draft                               |
//! | `:wait <ms>` | Pause reading input for `ms` milliseconds     |
//!
//! End of input tears the session down, which flushes any pending draft.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use campaign_model::CampaignStore;
use campaign_persistence::{
    AutoSaveConfig, AutosaveController, FileStore, SessionEnd, SessionHandle, SessionSummary,
    TokioClock, load_campaign_async, session,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::logging::redact_value;

/// Printed each time the "saved" flag rises.
pub const AUTOSAVED_MESSAGE: &str = "Autosaved";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine {
    Text(String),
    Save,
    Dismiss,
    Cancel,
    Clear,
    Wait(Duration),
}

impl ScriptLine {
    /// Parse one input line. Unknown directives are treated as text.
    pub fn parse(line: &str) -> Self {
        match line.trim_end() {
            ":save" => Self::Save,
            ":dismiss" => Self::Dismiss,
            ":cancel" => Self::Cancel,
            ":clear" => Self::Clear,
            other => other
                .strip_prefix(":wait ")
                .and_then(|ms| ms.trim().parse().ok())
                .map_or_else(|| Self::Text(line.to_string()), |ms| {
                    Self::Wait(Duration::from_millis(ms))
                }),
        }
    }
}

/// Run an editing session on the description stored at `path`.
///
/// The session future holds `Rc` state, so this must run on a
/// current-thread runtime.
pub async fn run_describe<R, W>(
    path: &Path,
    config: AutoSaveConfig,
    input: R,
    out: &mut W,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let file = load_campaign_async(path.to_path_buf())
        .await
        .with_context(|| format!("open {}", path.display()))?;
    let store = FileStore::new(CampaignStore::new(file.campaign), path);
    // The session opens on this same value, so input extends it.
    let committed = store.campaign().description();
    info!(
        path = %path.display(),
        description = redact_value(&committed),
        "editing description"
    );

    let controller = AutosaveController::with_clock(store, TokioClock, config);
    let (handle, run) = session(controller);
    let (summary, script) = tokio::join!(run, feed(handle, committed, input, out));
    script?;

    report(&summary, out)?;
    Ok(summary)
}

/// Forward input to the session and echo the "saved" flag until the
/// session has fully finished. `draft` mirrors the session's opening draft.
async fn feed<R, W>(
    handle: SessionHandle,
    mut draft: String,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut flag = handle.notifications();
    let mut lines = input.lines();
    let mut handle = Some(handle);
    let mut paused_until: Option<Instant> = None;

    loop {
        let reading = handle.is_some() && paused_until.is_none();
        tokio::select! {
            line = lines.next_line(), if reading => {
                let line = line.context("read input")?;
                let Some(active) = handle.as_ref() else { continue };
                let Some(line) = line else {
                    debug!("input closed");
                    handle = None;
                    continue;
                };
                match ScriptLine::parse(&line) {
                    ScriptLine::Wait(duration) => paused_until = Some(Instant::now() + duration),
                    line => {
                        if !forward(active, &mut draft, line) {
                            handle = None;
                        }
                    }
                }
            }
            () = sleep_until(paused_until) => paused_until = None,
            changed = flag.changed() => {
                if changed.is_err() {
                    break;
                }
                echo_flag(&mut flag, out)?;
            }
        }
    }
    Ok(())
}

/// Apply one line. Returns false once the session no longer accepts input.
///
/// Save and dismiss keep the handle: a rejected write leaves the session
/// open for more edits, and a closed session ends the echo loop anyway.
fn forward(handle: &SessionHandle, draft: &mut String, line: ScriptLine) -> bool {
    match line {
        ScriptLine::Text(text) => {
            if !draft.is_empty() {
                draft.push('\n');
            }
            draft.push_str(&text);
            handle.edit(draft.clone())
        }
        ScriptLine::Clear => {
            draft.clear();
            handle.edit(String::new())
        }
        ScriptLine::Save => handle.save(),
        ScriptLine::Dismiss => handle.dismiss(),
        ScriptLine::Cancel => handle.cancel(),
        ScriptLine::Wait(_) => true,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

fn echo_flag<W: Write>(flag: &mut tokio::sync::watch::Receiver<bool>, out: &mut W) -> Result<()> {
    if *flag.borrow_and_update() {
        writeln!(out, "{AUTOSAVED_MESSAGE}").context("write output")?;
    }
    Ok(())
}

fn report<W: Write>(summary: &SessionSummary, out: &mut W) -> Result<()> {
    let verb = match summary.end {
        SessionEnd::Saved => "saved",
        SessionEnd::Dismissed => "dismissed",
        SessionEnd::Cancelled => "cancelled",
        SessionEnd::TornDown => "closed",
    };
    writeln!(
        out,
        "Session {verb}: {} write(s), {} failed",
        summary.commits, summary.failures
    )
    .context("write output")
}
