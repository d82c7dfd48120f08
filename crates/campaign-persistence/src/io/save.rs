//! Campaign saving operations.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use campaign_model::Campaign;

use crate::error::{PersistenceError, Result};
use crate::types::CampaignFile;

/// Save a campaign to `path`.
///
/// Uses atomic write (temp file + rename) to prevent data corruption
/// on crash or power loss.
pub fn save_campaign(campaign: &Campaign, path: &Path) -> Result<()> {
    let mut file = CampaignFile::new(campaign.clone());
    file.touch();

    let bytes = serde_json::to_vec_pretty(&file).map_err(|e| PersistenceError::Serialization {
        source: Box::new(e),
    })?;

    let temp_path = temp_path_for(path);

    // Create parent directory if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut out = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    out.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    out.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        }
    })?;

    tracing::info!("Saved campaign to {}", path.display());
    Ok(())
}

/// Save a campaign asynchronously.
///
/// Spawns the save operation on a blocking thread pool to avoid
/// blocking the async runtime.
pub async fn save_campaign_async(campaign: Campaign, path: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || save_campaign(&campaign, &path))
        .await
        .map_err(|e| PersistenceError::Serialization {
            source: Box::new(e),
        })?
}

/// `<file name>.tmp` next to `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("campaign"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FORMAT_MARKER;
    use tempfile::tempdir;

    #[test]
    fn test_save_campaign() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pilot.campaign.json");

        save_campaign(&Campaign::default(), &path).unwrap();

        assert!(path.exists());
        assert!(!temp_path_for(&path).exists());

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(FORMAT_MARKER));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/pilot.campaign.json");
        save_campaign(&Campaign::empty(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_temp_path_keeps_full_name() {
        let temp = temp_path_for(Path::new("/tmp/pilot.campaign.json"));
        assert_eq!(temp, PathBuf::from("/tmp/pilot.campaign.json.tmp"));
    }
}
