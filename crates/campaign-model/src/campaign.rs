//! The campaign record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Description a fresh campaign starts with.
pub const DEFAULT_DESCRIPTION: &str =
    "This campaign delves deep into the personal narratives of adventurers...";

/// Participants a fresh campaign starts with.
pub const DEFAULT_PARTICIPANTS: [&str; 4] = [
    "Ana Marin Scot",
    "Sarah Kirby Holt",
    "Abigail Dougherty",
    "Chris Martin",
];

/// A campaign being prepared for publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    /// Display name (e.g., "Journey Insights").
    pub name: String,

    /// Long-form description, edited through the expanded description dialog.
    pub description: String,

    /// First day of the campaign.
    pub start_date: Option<NaiveDate>,

    /// Last day of the campaign.
    pub end_date: Option<NaiveDate>,

    /// Notes participants read before the interview.
    pub participant_instructions: String,

    /// Interview questions and objectives for the agent.
    pub interview_prompt: String,

    /// Desired output for the interview recap.
    pub outcome_prompt: String,

    /// Invited participants, in invitation order.
    pub participants: Vec<String>,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            participants: DEFAULT_PARTICIPANTS.iter().map(ToString::to_string).collect(),
            ..Self::empty()
        }
    }
}

impl Campaign {
    /// A campaign with every field blank.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            participant_instructions: String::new(),
            interview_prompt: String::new(),
            outcome_prompt: String::new(),
            participants: Vec::new(),
        }
    }

    /// Number of days covered by the date range, inclusive.
    ///
    /// Returns `None` unless both ends are set and the end is not before the start.
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_days() + 1),
            _ => None,
        }
    }
}
