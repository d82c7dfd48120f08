//! Shared campaign state.
//!
//! [`CampaignStore`] is the single state object the setup screen's sections
//! share. It is passed explicitly to whoever needs it; cloning the store
//! clones the handle, not the campaign.
//!
//! All access happens on one thread (the UI event loop), so the handle is
//! `Rc<RefCell<..>>` rather than a lock.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::campaign::Campaign;
use crate::participants::normalize_participant;
use crate::prompts::{PromptKind, starter_prompts};

#[derive(Debug)]
struct Inner {
    campaign: Campaign,
    revision: u64,
}

/// Cloneable handle to the campaign being edited.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    inner: Rc<RefCell<Inner>>,
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new(Campaign::default())
    }
}

impl CampaignStore {
    /// Wrap a campaign in a new store.
    pub fn new(campaign: Campaign) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                campaign,
                revision: 0,
            })),
        }
    }

    /// Copy of the current campaign.
    pub fn snapshot(&self) -> Campaign {
        self.inner.borrow().campaign.clone()
    }

    /// Run `f` against the current campaign without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&Campaign) -> R) -> R {
        f(&self.inner.borrow().campaign)
    }

    /// Replace the whole campaign.
    pub fn replace(&self, campaign: Campaign) {
        self.update(|c| {
            if *c == campaign {
                return false;
            }
            *c = campaign;
            true
        });
    }

    /// Counter bumped on every mutation that changed something.
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    /// Whether two handles point at the same campaign.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // -------------------------------------------------------------------------
    // Getters
    // -------------------------------------------------------------------------

    pub fn name(&self) -> String {
        self.with(|c| c.name.clone())
    }

    /// The committed description.
    pub fn description(&self) -> String {
        self.with(|c| c.description.clone())
    }

    pub fn dates(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        self.with(|c| (c.start_date, c.end_date))
    }

    pub fn participant_instructions(&self) -> String {
        self.with(|c| c.participant_instructions.clone())
    }

    pub fn interview_prompt(&self) -> String {
        self.with(|c| c.interview_prompt.clone())
    }

    pub fn outcome_prompt(&self) -> String {
        self.with(|c| c.outcome_prompt.clone())
    }

    pub fn participants(&self) -> Vec<String> {
        self.with(|c| c.participants.clone())
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.update(|c| replace_if_changed(&mut c.name, name));
    }

    /// Overwrite the committed description.
    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.update(|c| replace_if_changed(&mut c.description, description));
    }

    /// Set both ends of the date range. No ordering is enforced.
    pub fn set_dates(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.update(|c| {
            if c.start_date == start && c.end_date == end {
                return false;
            }
            c.start_date = start;
            c.end_date = end;
            true
        });
    }

    pub fn set_participant_instructions(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|c| replace_if_changed(&mut c.participant_instructions, value));
    }

    pub fn set_interview_prompt(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|c| replace_if_changed(&mut c.interview_prompt, value));
    }

    pub fn set_outcome_prompt(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|c| replace_if_changed(&mut c.outcome_prompt, value));
    }

    /// Copy starter prompt `index` for `kind` into its field.
    ///
    /// Returns false when there is no starter at `index`.
    pub fn use_starter_prompt(&self, kind: PromptKind, index: usize) -> bool {
        let Some(prompt) = starter_prompts(kind).get(index) else {
            return false;
        };
        match kind {
            PromptKind::Interview => self.set_interview_prompt(*prompt),
            PromptKind::Outcome => self.set_outcome_prompt(*prompt),
        }
        true
    }

    /// Append a participant after trimming it.
    ///
    /// Blank entries are ignored and return false.
    pub fn add_participant(&self, participant: &str) -> bool {
        let Some(name) = normalize_participant(participant) else {
            return false;
        };
        let name = name.to_string();
        self.update(|c| {
            c.participants.push(name);
            true
        });
        true
    }

    /// Remove the participant at `index`, returning it.
    pub fn remove_participant(&self, index: usize) -> Option<String> {
        let mut removed = None;
        self.update(|c| {
            if index < c.participants.len() {
                removed = Some(c.participants.remove(index));
            }
            removed.is_some()
        });
        removed
    }

    fn update(&self, f: impl FnOnce(&mut Campaign) -> bool) {
        let mut inner = self.inner.borrow_mut();
        if f(&mut inner.campaign) {
            inner.revision += 1;
            tracing::trace!(revision = inner.revision, "campaign updated");
        }
    }
}

fn replace_if_changed(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_state() {
        let store = CampaignStore::new(Campaign::empty());
        let other = store.clone();
        other.set_description("shared");
        assert_eq!(store.description(), "shared");
        assert!(store.ptr_eq(&other));
    }

    #[test]
    fn test_revision_counts_effective_changes() {
        let store = CampaignStore::new(Campaign::empty());
        assert_eq!(store.revision(), 0);

        store.set_name("Pilot");
        assert_eq!(store.revision(), 1);

        // Same value is not a change
        store.set_name("Pilot");
        assert_eq!(store.revision(), 1);

        store.set_outcome_prompt("Recap");
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_add_participant_trims_and_ignores_blank() {
        let store = CampaignStore::new(Campaign::empty());
        assert!(store.add_participant("  Meera Mohammad  "));
        assert!(!store.add_participant("   "));
        assert_eq!(store.participants(), vec!["Meera Mohammad".to_string()]);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_remove_participant() {
        let store = CampaignStore::default();
        assert_eq!(store.remove_participant(1).as_deref(), Some("Sarah Kirby Holt"));
        assert_eq!(store.participants().len(), 3);

        let before = store.revision();
        assert_eq!(store.remove_participant(10), None);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_set_dates() {
        let store = CampaignStore::new(Campaign::empty());
        let start = NaiveDate::from_ymd_opt(2026, 5, 1);
        store.set_dates(start, None);
        assert_eq!(store.dates(), (start, None));

        // Clearing the start keeps the end untouched
        let end = NaiveDate::from_ymd_opt(2026, 5, 31);
        store.set_dates(start, end);
        store.set_dates(None, end);
        assert_eq!(store.dates(), (None, end));
    }

    #[test]
    fn test_use_starter_prompt() {
        let store = CampaignStore::new(Campaign::empty());
        assert!(store.use_starter_prompt(PromptKind::Interview, 1));
        assert_eq!(store.interview_prompt(), "Sample Prompt 2...");
        assert!(!store.use_starter_prompt(PromptKind::Outcome, 5));
        assert!(store.outcome_prompt().is_empty());
    }

    #[test]
    fn test_replace() {
        let store = CampaignStore::new(Campaign::empty());
        store.replace(Campaign::default());
        assert_eq!(store.participants().len(), 4);
        assert_eq!(store.revision(), 1);
        store.replace(Campaign::default());
        assert_eq!(store.revision(), 1);
    }
}
