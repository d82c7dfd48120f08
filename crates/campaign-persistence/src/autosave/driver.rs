//! Async host loop for an editing session.
//!
//! [`session`] pairs a controller with a command channel and returns a
//! future that plays the role of the UI event loop: it applies commands as
//! they arrive, sleeps until the controller's next timer deadline, and
//! publishes the "saved" flag on a watch channel for whatever renders it.
//! Dropping every [`SessionHandle`] is treated as the editing surface being
//! removed, which triggers the final flush.

use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use super::clock::Clock;
use super::controller::{AutosaveController, CommitOutcome};
use crate::store::CommittedStore;

/// Clock that follows tokio's (pausable) time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Input from the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// The user changed the text.
    Edit(String),
    /// The user pressed "Save".
    Save,
    /// The dialog was dismissed without "Save".
    Dismiss,
    /// The user pressed "Cancel".
    Cancel,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Saved,
    Dismissed,
    Cancelled,
    /// All handles were dropped.
    TornDown,
}

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    /// Writes that reached the store.
    pub commits: usize,
    /// Times the "saved" flag was raised.
    pub notifications: usize,
    /// Writes the store rejected.
    pub failures: usize,
}

/// Sender side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    notification: watch::Receiver<bool>,
}

impl SessionHandle {
    /// Send a command. Returns false once the session has ended.
    pub fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn edit(&self, text: impl Into<String>) -> bool {
        self.send(SessionCommand::Edit(text.into()))
    }

    pub fn save(&self) -> bool {
        self.send(SessionCommand::Save)
    }

    pub fn dismiss(&self) -> bool {
        self.send(SessionCommand::Dismiss)
    }

    pub fn cancel(&self) -> bool {
        self.send(SessionCommand::Cancel)
    }

    /// Whether the "saved" flag is currently up.
    pub fn notification_visible(&self) -> bool {
        *self.notification.borrow()
    }

    /// Subscribe to the "saved" flag.
    pub fn notifications(&self) -> watch::Receiver<bool> {
        self.notification.clone()
    }
}

/// Build a session around `controller`.
///
/// The returned future must be polled (awaited, joined or spawned on a
/// local set) for the session to make progress.
pub fn session<S: CommittedStore>(
    controller: AutosaveController<S, TokioClock>,
) -> (SessionHandle, impl Future<Output = SessionSummary>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (flag_tx, flag_rx) = watch::channel(false);
    let handle = SessionHandle {
        commands: command_tx,
        notification: flag_rx,
    };
    (handle, run_session(controller, command_rx, flag_tx))
}

/// Drive `controller` until the session ends and its notification resets
/// have run.
pub async fn run_session<S: CommittedStore>(
    mut controller: AutosaveController<S, TokioClock>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    notification: watch::Sender<bool>,
) -> SessionSummary {
    let mut tally = Tally::default();
    controller.open();

    let end = loop {
        let deadline = controller.next_deadline();
        let ended = tokio::select! {
            command = commands.recv() => apply(&mut controller, command, &mut tally),
            () = sleep_until(deadline) => {
                let tick = controller.tick();
                if let Some(outcome) = &tick.commit {
                    tally.record(outcome);
                }
                None
            }
        };
        publish(&notification, &controller);
        if let Some(end) = ended {
            break end;
        }
    };
    debug!(?end, commits = tally.commits, "editing session ended");

    // The flag outlives the session until its reset fires.
    while let Some(deadline) = controller.next_deadline() {
        sleep_until(Some(deadline)).await;
        controller.tick();
        publish(&notification, &controller);
    }

    SessionSummary {
        end,
        commits: tally.commits,
        notifications: tally.notifications,
        failures: tally.failures,
    }
}

fn apply<S: CommittedStore>(
    controller: &mut AutosaveController<S, TokioClock>,
    command: Option<SessionCommand>,
    tally: &mut Tally,
) -> Option<SessionEnd> {
    let Some(command) = command else {
        if let Some(outcome) = controller.teardown() {
            tally.record(&outcome);
        }
        return Some(SessionEnd::TornDown);
    };

    match command {
        SessionCommand::Edit(text) => {
            controller.edit(text);
            None
        }
        SessionCommand::Save => {
            tally.record(&controller.save());
            (!controller.is_open()).then_some(SessionEnd::Saved)
        }
        SessionCommand::Dismiss => {
            tally.record(&controller.dismiss());
            (!controller.is_open()).then_some(SessionEnd::Dismissed)
        }
        SessionCommand::Cancel => {
            controller.cancel();
            Some(SessionEnd::Cancelled)
        }
    }
}

fn publish<S: CommittedStore>(
    notification: &watch::Sender<bool>,
    controller: &AutosaveController<S, TokioClock>,
) {
    let visible = controller.notification_visible();
    notification.send_if_modified(|current| {
        if *current == visible {
            return false;
        }
        *current = visible;
        true
    });
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[derive(Debug, Default)]
struct Tally {
    commits: usize,
    notifications: usize,
    failures: usize,
}

impl Tally {
    fn record(&mut self, outcome: &CommitOutcome) {
        match outcome {
            CommitOutcome::Written { notified } => {
                self.commits += 1;
                if *notified {
                    self.notifications += 1;
                }
            }
            CommitOutcome::Failed(_) => self.failures += 1,
            CommitOutcome::Inactive | CommitOutcome::Unchanged => {}
        }
    }
}
