//! The autosave controller.
//!
//! Owns one editing session's draft and pushes it into a
//! [`CommittedStore`] after a quiet period, on save, on dismiss and on
//! teardown. A commit only writes when the draft differs from what was
//! last saved, and only timer-driven commits raise the "saved" flag.

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use super::clock::{Clock, SystemClock};
use super::config::AutoSaveConfig;
use super::draft::DraftBuffer;
use super::notification::NotificationFlag;
use super::timer::Debounce;
use crate::error::PersistenceError;
use crate::store::CommittedStore;

/// Where an editing session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No editing surface is open.
    Closed,
    /// Open, draft matches the last save, nothing scheduled.
    OpenClean,
    /// Open with an armed inactivity timer.
    OpenDirtyPending,
    /// Open, draft differs from the last save and nothing is scheduled.
    ///
    /// Only reached after a rejected write or with the inactivity timer
    /// disabled.
    OpenUnsaved,
}

/// Result of one commit attempt.
#[derive(Debug)]
pub enum CommitOutcome {
    /// No session is open.
    Inactive,
    /// The draft matches the last save; nothing was written.
    Unchanged,
    /// The draft was written.
    Written { notified: bool },
    /// The store rejected the write. The draft is kept for a retry.
    Failed(PersistenceError),
}

impl CommitOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What a [`tick`](AutosaveController::tick) did.
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Set when the inactivity timer fired.
    pub commit: Option<CommitOutcome>,
    /// The "saved" flag went down.
    pub notification_cleared: bool,
}

/// Debounced autosave for one committed value.
pub struct AutosaveController<S: CommittedStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: AutoSaveConfig,
    draft: DraftBuffer,
    /// Value of the most recent successful commit.
    last_saved: String,
    pending: Debounce,
    notification: NotificationFlag,
}

impl<S: CommittedStore> AutosaveController<S> {
    /// Create a controller on the wall clock.
    pub fn new(store: S, config: AutoSaveConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: CommittedStore, C: Clock> AutosaveController<S, C> {
    pub fn with_clock(store: S, clock: C, config: AutoSaveConfig) -> Self {
        Self {
            store,
            clock,
            config,
            draft: DraftBuffer::new(),
            last_saved: String::new(),
            pending: Debounce::new(),
            notification: NotificationFlag::new(),
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Open (or refresh) the editing session from the committed value.
    ///
    /// Returns whether the draft was reseeded. Reopening an open session
    /// whose committed value has not changed does nothing.
    pub fn open(&mut self) -> bool {
        let committed = self.store.read();
        let was_open = self.draft.is_open();
        if !self.draft.open(&committed) {
            return false;
        }
        if was_open {
            // The committed value moved underneath us; the old timer would
            // commit a draft that no longer exists.
            self.pending.cancel();
            debug!("committed value changed while editing, draft reseeded");
        } else {
            debug!(chars = committed.chars().count(), "editing session opened");
        }
        self.last_saved = committed;
        true
    }

    /// Replace the draft with `text` and restart the inactivity timer.
    ///
    /// Ignored while no session is open.
    pub fn edit(&mut self, text: impl Into<String>) {
        if !self.draft.is_open() {
            debug!("edit ignored, no open session");
            return;
        }
        self.draft.edit(text);
        self.on_draft_changed();
    }

    /// Restart the inactivity timer after a draft change.
    pub fn on_draft_changed(&mut self) {
        if !self.draft.is_open() || !self.config.enabled {
            return;
        }
        let deadline = self.clock.now() + self.config.debounce();
        let handle = self.pending.arm(deadline);
        trace!(timer = handle.generation(), "autosave timer armed");
    }

    /// Write the draft to the store if it changed since the last commit.
    ///
    /// `show_notification` raises the "saved" flag on a successful write;
    /// it has no effect when nothing is written.
    pub fn commit(&mut self, show_notification: bool) -> CommitOutcome {
        if !self.draft.is_open() {
            return CommitOutcome::Inactive;
        }
        self.pending.cancel();

        if self.draft.read() == self.last_saved {
            trace!("draft unchanged since last save");
            return CommitOutcome::Unchanged;
        }

        let draft = self.draft.read().to_string();
        if let Err(error) = self.store.write(&draft) {
            warn!(%error, "autosave write rejected, draft kept");
            return CommitOutcome::Failed(error);
        }

        self.draft.note_committed(&draft);
        self.last_saved = draft;
        if show_notification {
            self.notification
                .show(self.clock.now(), self.config.notification());
        }
        info!(
            chars = self.last_saved.chars().count(),
            notified = show_notification,
            "draft committed"
        );
        CommitOutcome::Written {
            notified: show_notification,
        }
    }

    /// Explicit save: commit silently, then close.
    ///
    /// If the store rejects the write the session stays open so the edit
    /// is not lost.
    pub fn save(&mut self) -> CommitOutcome {
        self.commit_and_close("save")
    }

    /// Dismiss without an explicit save: the draft is still flushed.
    ///
    /// Like [`save`](Self::save), a rejected write keeps the session open.
    pub fn dismiss(&mut self) -> CommitOutcome {
        self.commit_and_close("dismiss")
    }

    /// Close without committing, discarding the draft.
    pub fn cancel(&mut self) {
        if self.draft.is_open() {
            debug!(
                discarded = self.draft.read() != self.last_saved,
                "editing session cancelled"
            );
        }
        self.close();
    }

    /// Final flush when the editing surface goes away.
    ///
    /// Always closes the session, even if the write is rejected. Returns
    /// `None` when no session was open. Also run on drop.
    pub fn teardown(&mut self) -> Option<CommitOutcome> {
        if !self.draft.is_open() {
            return None;
        }
        let outcome = self.commit(false);
        if outcome.is_failed() {
            warn!("editing session torn down with unsaved changes");
        }
        self.close();
        Some(outcome)
    }

    fn commit_and_close(&mut self, trigger: &'static str) -> CommitOutcome {
        let outcome = self.commit(false);
        if outcome.is_failed() {
            debug!(trigger, "session kept open after rejected write");
            return outcome;
        }
        self.close();
        debug!(trigger, "editing session closed");
        outcome
    }

    fn close(&mut self) {
        self.pending.cancel();
        self.draft.close();
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Fire whatever timers are due on the controller's clock.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let mut outcome = TickOutcome::default();

        // Resets due now belong to earlier commits, not to one fired below.
        outcome.notification_cleared = self.notification.poll(now);
        if let Some(handle) = self.pending.fire(now) {
            trace!(timer = handle.generation(), "autosave timer fired");
            outcome.commit = Some(self.commit(true));
        }
        outcome
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pending.deadline(), self.notification.next_reset()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> SessionState {
        if !self.draft.is_open() {
            SessionState::Closed
        } else if self.pending.is_armed() {
            SessionState::OpenDirtyPending
        } else if self.draft.read() != self.last_saved {
            SessionState::OpenUnsaved
        } else {
            SessionState::OpenClean
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.draft.is_open()
    }

    /// Current draft (empty while closed).
    pub fn draft(&self) -> &str {
        self.draft.read()
    }

    pub fn last_saved(&self) -> &str {
        &self.last_saved
    }

    #[inline]
    pub fn notification_visible(&self) -> bool {
        self.notification.is_visible()
    }

    /// Deadline of the armed inactivity timer.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    pub fn config(&self) -> &AutoSaveConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S: CommittedStore, C: Clock> Drop for AutosaveController<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::ManualClock;
    use crate::error::Result;
    use campaign_model::{Campaign, CampaignStore};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller(
        committed: &str,
    ) -> (
        AutosaveController<CampaignStore, ManualClock>,
        CampaignStore,
        ManualClock,
    ) {
        let store = CampaignStore::new(Campaign::empty());
        store.set_description(committed);
        let clock = ManualClock::new();
        let controller =
            AutosaveController::with_clock(store.clone(), clock.clone(), AutoSaveConfig::default());
        (controller, store, clock)
    }

    /// Store whose writes can be switched off.
    struct FlakyStore {
        value: String,
        reject: bool,
        writes: usize,
    }

    impl CommittedStore for FlakyStore {
        fn read(&self) -> String {
            self.value.clone()
        }

        fn write(&mut self, value: &str) -> Result<()> {
            if self.reject {
                return Err(PersistenceError::StoreRejected {
                    reason: "offline".into(),
                });
            }
            self.writes += 1;
            self.value = value.to_string();
            Ok(())
        }
    }

    #[test]
    fn test_starts_closed() {
        let (controller, _, _) = controller("X");
        assert_eq!(controller.state(), SessionState::Closed);
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn test_open_seeds_from_store() {
        let (mut controller, _, _) = controller("X");
        assert!(controller.open());
        assert_eq!(controller.draft(), "X");
        assert_eq!(controller.last_saved(), "X");
        assert_eq!(controller.state(), SessionState::OpenClean);
    }

    #[test]
    fn test_edit_arms_timer() {
        let (mut controller, _, clock) = controller("X");
        controller.open();
        controller.edit("XY");

        assert_eq!(controller.state(), SessionState::OpenDirtyPending);
        assert_eq!(controller.pending_deadline(), Some(clock.now() + ms(2000)));
    }

    #[test]
    fn test_edit_while_closed_is_ignored() {
        let (mut controller, store, clock) = controller("X");
        controller.edit("nope");
        clock.advance(ms(5000));
        controller.tick();

        assert_eq!(controller.state(), SessionState::Closed);
        assert_eq!(store.description(), "X");
    }

    #[test]
    fn test_timer_commit_notifies() {
        let (mut controller, store, clock) = controller("X");
        controller.open();
        controller.edit("Y");

        clock.advance(ms(2000));
        let tick = controller.tick();

        assert!(matches!(
            tick.commit,
            Some(CommitOutcome::Written { notified: true })
        ));
        assert_eq!(store.description(), "Y");
        assert!(controller.notification_visible());
        assert_eq!(controller.state(), SessionState::OpenClean);
    }

    #[test]
    fn test_explicit_commit_cancels_timer() {
        let (mut controller, _, clock) = controller("X");
        controller.open();
        controller.edit("Y");

        assert!(controller.commit(false).is_written());
        assert_eq!(controller.state(), SessionState::OpenClean);

        clock.advance(ms(2000));
        assert!(controller.tick().commit.is_none());
        assert!(!controller.notification_visible());
    }

    #[test]
    fn test_edit_back_to_saved_value_commits_nothing() {
        let (mut controller, store, clock) = controller("X");
        controller.open();
        controller.edit("Y");
        controller.edit("X");

        clock.advance(ms(2000));
        let tick = controller.tick();
        assert!(matches!(tick.commit, Some(CommitOutcome::Unchanged)));
        assert_eq!(store.revision(), 1);
        assert!(!controller.notification_visible());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let (mut controller, store, clock) = controller("X");
        controller.open();
        controller.edit("typed then cancelled");
        controller.cancel();

        clock.advance(ms(5000));
        controller.tick();
        assert_eq!(store.description(), "X");
        assert!(controller.teardown().is_none());
        assert_eq!(store.description(), "X");
    }

    #[test]
    fn test_reopen_while_open_after_outside_change() {
        let (mut controller, store, _) = controller("X");
        controller.open();
        controller.edit("mine");

        store.set_description("theirs");
        assert!(controller.open());
        assert_eq!(controller.draft(), "theirs");
        assert_eq!(controller.state(), SessionState::OpenClean);
    }

    #[test]
    fn test_reopen_after_own_commit_keeps_draft() {
        let (mut controller, _, _) = controller("X");
        controller.open();
        controller.edit("Y");
        controller.commit(false);
        controller.edit("Y and more");

        assert!(!controller.open());
        assert_eq!(controller.draft(), "Y and more");
    }

    #[test]
    fn test_disabled_config_never_autosaves() {
        let store = CampaignStore::new(Campaign::empty());
        let clock = ManualClock::new();
        let mut controller = AutosaveController::with_clock(
            store.clone(),
            clock.clone(),
            AutoSaveConfig::disabled(),
        );
        controller.open();
        controller.edit("draft");
        assert_eq!(controller.state(), SessionState::OpenUnsaved);

        clock.advance(ms(10_000));
        assert!(controller.tick().commit.is_none());
        assert_eq!(store.description(), "");

        assert!(controller.save().is_written());
        assert_eq!(store.description(), "draft");
    }

    #[test]
    fn test_rejected_write_keeps_marker_and_retries() {
        let clock = ManualClock::new();
        let mut controller = AutosaveController::with_clock(
            FlakyStore {
                value: "X".into(),
                reject: true,
                writes: 0,
            },
            clock.clone(),
            AutoSaveConfig::default(),
        );
        controller.open();
        controller.edit("Y");

        clock.advance(ms(2000));
        let tick = controller.tick();
        assert!(matches!(tick.commit, Some(CommitOutcome::Failed(_))));
        assert_eq!(controller.last_saved(), "X");
        assert!(!controller.notification_visible());
        assert_eq!(controller.state(), SessionState::OpenUnsaved);

        // Save keeps the session open while the store refuses
        assert!(controller.save().is_failed());
        assert!(controller.is_open());

        controller.store.reject = false;
        assert!(controller.save().is_written());
        assert_eq!(controller.store().value, "Y");
        assert_eq!(controller.store().writes, 1);
        assert_eq!(controller.state(), SessionState::Closed);
    }

    #[test]
    fn test_commit_on_expiring_reset_keeps_new_flag() {
        let store = CampaignStore::new(Campaign::empty());
        let clock = ManualClock::new();
        let config = AutoSaveConfig {
            notification_ms: 2000,
            ..AutoSaveConfig::default()
        };
        let mut controller = AutosaveController::with_clock(store, clock.clone(), config);
        controller.open();
        controller.edit("first");
        clock.advance(ms(2000));
        assert!(matches!(
            controller.tick().commit,
            Some(CommitOutcome::Written { notified: true })
        ));

        // The new timer and the first flag's reset both fall at 4000
        controller.edit("second");
        clock.advance(ms(2000));
        let tick = controller.tick();
        assert!(tick.notification_cleared);
        assert!(matches!(
            tick.commit,
            Some(CommitOutcome::Written { notified: true })
        ));
        assert!(controller.notification_visible());
        assert_eq!(controller.next_deadline(), Some(clock.now() + ms(2000)));
    }

    #[test]
    fn test_drop_flushes_open_session() {
        let (mut controller, store, _) = controller("X");
        controller.open();
        controller.edit("dropped with edits");
        drop(controller);

        assert_eq!(store.description(), "dropped with edits");
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let (mut controller, _, clock) = controller("X");
        let start = clock.now();
        controller.open();
        controller.edit("Y");
        clock.advance(ms(2000));
        controller.tick();

        // Notification reset at 3400, new edit timer at 2500 + 2000
        clock.advance(ms(500));
        controller.edit("Z");
        assert_eq!(controller.next_deadline(), Some(start + ms(3400)));
    }
}
