//! Starter prompts for the agent instruction fields.

use std::fmt;

/// Which agent prompt a starter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// Interview questions and objectives.
    Interview,
    /// Desired output for the interview recap.
    Outcome,
}

const INTERVIEW_STARTERS: [&str; 2] = ["Sample Prompt 1...", "Sample Prompt 2..."];
const OUTCOME_STARTERS: [&str; 2] = ["Sample Outcome 1...", "Sample Outcome 2..."];

impl PromptKind {
    /// Field label as shown on the setup screen.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interview => "Interview Prompt",
            Self::Outcome => "Outcome Prompt",
        }
    }

    /// All prompt kinds.
    pub const ALL: [PromptKind; 2] = [Self::Interview, Self::Outcome];
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Starter prompts offered for `kind`.
pub fn starter_prompts(kind: PromptKind) -> &'static [&'static str] {
    match kind {
        PromptKind::Interview => &INTERVIEW_STARTERS,
        PromptKind::Outcome => &OUTCOME_STARTERS,
    }
}
