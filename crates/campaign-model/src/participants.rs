//! Participant helpers for the invite dialog.

/// Names offered as quick picks in the invite dialog.
pub const SUGGESTED_PARTICIPANTS: [&str; 6] = [
    "Christin M Melton",
    "Meera Mohammad",
    "John Doe Allgar",
    "Olivia Johnson",
    "Alexander Brown",
    "Michael Garcia H",
];

/// Trim a participant entry, returning `None` when nothing is left.
pub fn normalize_participant(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Suggestions containing `query` (case-insensitive) that are not already invited.
///
/// An empty query matches every suggestion.
pub fn suggestions_matching(query: &str, invited: &[String]) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    SUGGESTED_PARTICIPANTS
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&needle))
        .filter(|name| !invited.iter().any(|p| p.eq_ignore_ascii_case(name)))
        .collect()
}
