//! Table rendering for `campaign show`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use campaign_model::Campaign;
use campaign_persistence::PersistenceError;

const EMPTY: &str = "-";

/// Render `campaign` as a two-column field/value table.
pub fn campaign_table(campaign: &Campaign) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);

    table.add_row(vec![Cell::new("Name"), text_cell(&campaign.name)]);
    table.add_row(vec![
        Cell::new("Description"),
        text_cell(&campaign.description),
    ]);
    table.add_row(vec![Cell::new("Dates"), Cell::new(date_range(campaign))]);
    table.add_row(vec![
        Cell::new("Participants"),
        Cell::new(participant_list(&campaign.participants)),
    ]);
    table.add_row(vec![
        Cell::new("Instructions"),
        text_cell(&campaign.participant_instructions),
    ]);
    table.add_row(vec![
        Cell::new("Interview Prompt"),
        text_cell(&campaign.interview_prompt),
    ]);
    table.add_row(vec![
        Cell::new("Outcome Prompt"),
        text_cell(&campaign.outcome_prompt),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

/// "start → end (N days)", with "-" for unset ends.
pub fn date_range(campaign: &Campaign) -> String {
    let fmt = |date: Option<chrono::NaiveDate>| {
        date.map_or_else(|| EMPTY.to_string(), |d| d.format("%Y-%m-%d").to_string())
    };
    let range = format!(
        "{} → {}",
        fmt(campaign.start_date),
        fmt(campaign.end_date)
    );
    match campaign.duration_days() {
        Some(1) => format!("{range} (1 day)"),
        Some(days) => format!("{range} ({days} days)"),
        None => range,
    }
}

/// Numbered participant list, one per line.
pub fn participant_list(participants: &[String]) -> String {
    if participants.is_empty() {
        return EMPTY.to_string();
    }
    participants
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {name}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Error text for stderr.
///
/// Storage failures anywhere in the chain are shown with their
/// user-facing message and a hint; anything else prints its full chain.
pub fn error_report(error: &anyhow::Error) -> String {
    let Some(persistence) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<PersistenceError>())
    else {
        return format!("error: {error:#}");
    };
    let mut report = format!("error: {}", persistence.user_message());
    if let Some(suggestion) = persistence.suggestion() {
        report.push_str("\n  hint: ");
        report.push_str(&suggestion);
    }
    report
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn text_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        Cell::new(EMPTY)
    } else {
        Cell::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range() {
        let mut campaign = Campaign::empty();
        assert_eq!(date_range(&campaign), "- → -");

        campaign.start_date = NaiveDate::from_ymd_opt(2026, 1, 5);
        assert_eq!(date_range(&campaign), "2026-01-05 → -");

        campaign.end_date = NaiveDate::from_ymd_opt(2026, 1, 5);
        assert_eq!(date_range(&campaign), "2026-01-05 → 2026-01-05 (1 day)");
    }

    #[test]
    fn test_participant_list() {
        assert_eq!(participant_list(&[]), "-");
        let names = vec!["Ana".to_string(), "Chris".to_string()];
        assert_eq!(participant_list(&names), "1. Ana\n2. Chris");
    }

    #[test]
    fn test_error_report_uses_user_message() {
        let error = anyhow::Error::new(PersistenceError::UnsupportedVersion {
            found: 9,
            max_supported: 1,
            path: "journey.campaign.json".into(),
        })
        .context("open journey.campaign.json");

        let report = error_report(&error);
        assert!(report.starts_with("error: This campaign file was created with a newer version"));
        assert!(report.ends_with("\n  hint: Install the latest version of Campaign Studio."));
    }

    #[test]
    fn test_error_report_plain_error() {
        let error = anyhow::anyhow!("no participant #3").context("remove participant");
        assert_eq!(
            error_report(&error),
            "error: remove participant: no participant #3"
        );
    }

    #[test]
    fn test_table_lists_every_field() {
        let rendered = campaign_table(&Campaign::default()).to_string();
        for label in ["Name", "Description", "Dates", "Participants", "Outcome Prompt"] {
            assert!(rendered.contains(label), "missing {label}");
        }
        assert!(rendered.contains("Ana Marin Scot"));
    }
}
