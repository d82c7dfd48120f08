//! Non-interactive campaign commands.
//!
//! Each command loads the campaign file, applies its change through a
//! [`CampaignStore`], and writes the file back only if something changed.

use std::path::Path;

use anyhow::{Context, Result, bail};
use campaign_model::{Campaign, CampaignStore, PromptKind, starter_prompts, suggestions_matching};
use campaign_persistence::{load_campaign, save_campaign};
use chrono::NaiveDate;
use clap::ValueEnum;
use tracing::info;

use crate::logging::redact_value;

/// Text fields settable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CampaignField {
    Name,
    Description,
    Instructions,
    InterviewPrompt,
    OutcomePrompt,
}

/// Requested change to the date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateChange {
    /// Leave the current value.
    #[default]
    Keep,
    Set(NaiveDate),
    Clear,
}

impl DateChange {
    fn apply(self, current: Option<NaiveDate>) -> Option<NaiveDate> {
        match self {
            Self::Keep => current,
            Self::Set(date) => Some(date),
            Self::Clear => None,
        }
    }
}

/// Write a new campaign file.
pub fn run_new(path: &Path, empty: bool, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let campaign = if empty {
        Campaign::empty()
    } else {
        Campaign::default()
    };
    save_campaign(&campaign, path).with_context(|| format!("create {}", path.display()))?;
    Ok(())
}

/// Load the campaign stored at `path`.
pub fn load(path: &Path) -> Result<Campaign> {
    let file = load_campaign(path).with_context(|| format!("open {}", path.display()))?;
    Ok(file.campaign)
}

pub fn run_set(path: &Path, field: CampaignField, value: &str) -> Result<bool> {
    edit_campaign(path, |store| {
        match field {
            CampaignField::Name => store.set_name(value),
            CampaignField::Description => store.set_description(value),
            CampaignField::Instructions => store.set_participant_instructions(value),
            CampaignField::InterviewPrompt => store.set_interview_prompt(value),
            CampaignField::OutcomePrompt => store.set_outcome_prompt(value),
        }
        info!(?field, value = redact_value(value), "field updated");
        Ok(())
    })
    .map(|((), changed)| changed)
}

pub fn run_dates(path: &Path, start: DateChange, end: DateChange) -> Result<bool> {
    edit_campaign(path, |store| {
        let (current_start, current_end) = store.dates();
        store.set_dates(start.apply(current_start), end.apply(current_end));
        Ok(())
    })
    .map(|((), changed)| changed)
}

/// Invite each of `names`; blank names are skipped. Returns how many were added.
pub fn run_participants_add(path: &Path, names: &[String]) -> Result<usize> {
    edit_campaign(path, |store| {
        Ok(names
            .iter()
            .filter(|name| store.add_participant(name))
            .count())
    })
    .map(|(added, _)| added)
}

/// Remove the participant at 1-based `position`, returning their name.
pub fn run_participants_remove(path: &Path, position: usize) -> Result<String> {
    edit_campaign(path, |store| {
        let count = store.participants().len();
        position
            .checked_sub(1)
            .and_then(|index| store.remove_participant(index))
            .with_context(|| format!("no participant #{position} (campaign has {count})"))
    })
    .map(|(name, _)| name)
}

pub fn run_participants_suggest(path: &Path, query: &str) -> Result<Vec<&'static str>> {
    let campaign = load(path)?;
    Ok(suggestions_matching(query, &campaign.participants))
}

/// Copy starter prompt `position` (1-based) into the matching field.
pub fn run_prompt(path: &Path, kind: PromptKind, position: usize) -> Result<String> {
    let starters = starter_prompts(kind);
    let Some(prompt) = position.checked_sub(1).and_then(|i| starters.get(i)) else {
        bail!(
            "no starter #{position} for {kind} ({} available)",
            starters.len()
        );
    };
    edit_campaign(path, |store| {
        store.use_starter_prompt(kind, position - 1);
        Ok(())
    })?;
    Ok((*prompt).to_string())
}

/// Load `path`, run `f` against a store holding it, and save if it changed.
fn edit_campaign<T>(
    path: &Path,
    f: impl FnOnce(&CampaignStore) -> Result<T>,
) -> Result<(T, bool)> {
    let store = CampaignStore::new(load(path)?);
    let before = store.revision();
    let value = f(&store)?;
    let changed = store.revision() != before;
    if changed {
        save_campaign(&store.snapshot(), path)
            .with_context(|| format!("save {}", path.display()))?;
    }
    Ok((value, changed))
}
