//! Integration tests for `campaign describe` on paused tokio time.

use std::path::{Path, PathBuf};

use campaign_cli::commands::{load, run_new};
use campaign_cli::describe::run_describe;
use campaign_model::DEFAULT_DESCRIPTION;
use campaign_persistence::{AutoSaveConfig, SessionEnd};
use tempfile::{TempDir, tempdir};

fn blank_campaign() -> (TempDir, PathBuf) {
    campaign(true)
}

fn campaign(empty: bool) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("describe.campaign.json");
    run_new(&path, empty, false).unwrap();
    (dir, path)
}

async fn describe(path: &Path, script: &str, config: AutoSaveConfig) -> (SessionEnd, String) {
    let mut out = Vec::new();
    let summary = run_describe(path, config, script.as_bytes(), &mut out)
        .await
        .unwrap();
    (summary.end, String::from_utf8(out).unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_quiet_input_autosaves() {
    let (_dir, path) = blank_campaign();
    let (end, out) = describe(
        &path,
        "First journeys\nof adventurers\n:wait 2500\n:dismiss\n",
        AutoSaveConfig::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::Dismissed);
    assert!(out.starts_with("Autosaved\n"), "{out}");
    assert!(out.ends_with("Session dismissed: 1 write(s), 0 failed\n"), "{out}");
    assert_eq!(load(&path).unwrap().description, "First journeys\nof adventurers");
}

#[tokio::test(start_paused = true)]
async fn test_save_is_silent() {
    let (_dir, path) = blank_campaign();
    let (end, out) = describe(&path, "Quick note\n:save\n", AutoSaveConfig::default()).await;

    assert_eq!(end, SessionEnd::Saved);
    assert_eq!(out, "Session saved: 1 write(s), 0 failed\n");
    assert_eq!(load(&path).unwrap().description, "Quick note");
}

#[tokio::test(start_paused = true)]
async fn test_end_of_input_flushes() {
    let (_dir, path) = blank_campaign();
    let (end, out) = describe(&path, "Left mid-sentence", AutoSaveConfig::default()).await;

    assert_eq!(end, SessionEnd::TornDown);
    assert_eq!(out, "Session closed: 1 write(s), 0 failed\n");
    assert_eq!(load(&path).unwrap().description, "Left mid-sentence");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_discards_draft() {
    let (_dir, path) = blank_campaign();
    let (end, out) = describe(&path, "Never mind\n:cancel\n", AutoSaveConfig::default()).await;

    assert_eq!(end, SessionEnd::Cancelled);
    assert_eq!(out, "Session cancelled: 0 write(s), 0 failed\n");
    assert_eq!(load(&path).unwrap().description, "");
}

#[tokio::test(start_paused = true)]
async fn test_disabled_timer_waits_for_save() {
    let (_dir, path) = blank_campaign();
    let (_, out) = describe(
        &path,
        "Typed slowly\n:wait 10000\n:save\n",
        AutoSaveConfig::disabled(),
    )
    .await;

    assert!(!out.contains("Autosaved"), "{out}");
    assert_eq!(load(&path).unwrap().description, "Typed slowly");
}

#[tokio::test(start_paused = true)]
async fn test_clear_then_retype() {
    let (_dir, path) = blank_campaign();
    describe(
        &path,
        "draft one\n:clear\ndraft two\n:save\n",
        AutoSaveConfig::default(),
    )
    .await;

    assert_eq!(load(&path).unwrap().description, "draft two");
}

#[tokio::test(start_paused = true)]
async fn test_lines_extend_existing_description() {
    let (_dir, path) = campaign(false);
    let (end, _) = describe(&path, "More detail\n:save\n", AutoSaveConfig::default()).await;

    assert_eq!(end, SessionEnd::Saved);
    assert_eq!(
        load(&path).unwrap().description,
        format!("{DEFAULT_DESCRIPTION}\nMore detail")
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_replaces_existing_description() {
    let (_dir, path) = campaign(false);
    describe(&path, ":clear\nFresh start\n:save\n", AutoSaveConfig::default()).await;

    assert_eq!(load(&path).unwrap().description, "Fresh start");
}

#[tokio::test(start_paused = true)]
async fn test_untouched_description_is_not_rewritten() {
    let (_dir, path) = campaign(false);
    let (_, out) = describe(&path, ":dismiss\n", AutoSaveConfig::default()).await;

    assert_eq!(out, "Session dismissed: 0 write(s), 0 failed\n");
    assert_eq!(load(&path).unwrap().description, DEFAULT_DESCRIPTION);
}
