//! Campaign loading operations.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, CampaignFile, FORMAT_MARKER};

/// Load a campaign file from `path`.
pub fn load_campaign(path: &Path) -> Result<CampaignFile> {
    let text = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_campaign_text(&text, path)
}

/// Load a campaign asynchronously.
///
/// Spawns the load operation on a blocking thread pool to avoid
/// blocking the async runtime.
pub async fn load_campaign_async(path: PathBuf) -> Result<CampaignFile> {
    tokio::task::spawn_blocking(move || load_campaign(&path))
        .await
        .map_err(|e| PersistenceError::Deserialization {
            source: Box::new(e),
        })?
}

/// Validate the envelope, then decode the campaign.
fn parse_campaign_text(text: &str, path: &Path) -> Result<CampaignFile> {
    let value: Value = serde_json::from_str(text).map_err(|e| PersistenceError::InvalidFormat {
        path: path.to_path_buf(),
        reason: format!("not valid JSON ({e})"),
    })?;

    if value.get("format").and_then(Value::as_str) != Some(FORMAT_MARKER) {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Not a campaign file (missing format marker)".to_string(),
        });
    }

    let version = value
        .get("schema_version")
        .and_then(Value::as_u64)
        .ok_or_else(|| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Missing schema version".to_string(),
        })?;

    if version > u64::from(CURRENT_SCHEMA_VERSION) {
        return Err(PersistenceError::UnsupportedVersion {
            found: u32::try_from(version).unwrap_or(u32::MAX),
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let file: CampaignFile =
        serde_json::from_value(value).map_err(|e| PersistenceError::Deserialization {
            source: Box::new(e),
        })?;

    tracing::debug!(
        version,
        participants = file.campaign.participants.len(),
        "Loaded campaign from {}",
        path.display()
    );
    Ok(file)
}
