//! In-progress text held apart from the committed value.

/// Holds the draft while an editing surface is open.
#[derive(Debug, Default)]
pub struct DraftBuffer {
    text: String,
    /// Committed value the draft was last seeded from.
    seed: String,
    open: bool,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the draft from `committed`.
    ///
    /// Always reseeds on a closed-to-open transition. While already open it
    /// only reseeds if `committed` differs from the last seed, so reopening
    /// with the same value never disturbs in-progress typing. Returns
    /// whether the draft was reseeded.
    pub fn open(&mut self, committed: &str) -> bool {
        if self.open && self.seed == committed {
            return false;
        }
        self.open = true;
        self.seed = committed.to_string();
        self.text = committed.to_string();
        true
    }

    /// Replace the draft. No validation is applied.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn read(&self) -> &str {
        &self.text
    }

    /// Record that `committed` now matches the draft, so a later `open`
    /// with that value is not mistaken for an outside change.
    pub(crate) fn note_committed(&mut self, committed: &str) {
        self.seed = committed.to_string();
    }

    /// Discard the draft.
    pub fn close(&mut self) {
        self.open = false;
        self.text.clear();
        self.seed.clear();
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }
}
