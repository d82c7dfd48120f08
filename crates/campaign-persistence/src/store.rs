//! Committed-value stores the autosave controller writes through.
//!
//! The controller never reaches for global state: it is handed one
//! [`CommittedStore`] that knows how to read and write the committed
//! description.

use std::path::{Path, PathBuf};

use campaign_model::CampaignStore;

use crate::error::Result;
use crate::io::save_campaign;

/// Read/write access to a committed text value.
pub trait CommittedStore {
    /// Current committed value.
    fn read(&self) -> String;

    /// Replace the committed value.
    ///
    /// On error the committed value must be left as it was.
    fn write(&mut self, value: &str) -> Result<()>;
}

/// The campaign description held in memory. Writes cannot fail.
impl CommittedStore for CampaignStore {
    fn read(&self) -> String {
        self.description()
    }

    fn write(&mut self, value: &str) -> Result<()> {
        self.set_description(value);
        Ok(())
    }
}

/// A store made of an explicit read callback and write callback.
pub struct FnStore<R, W> {
    read: R,
    write: W,
}

impl<R, W> FnStore<R, W>
where
    R: Fn() -> String,
    W: FnMut(&str) -> Result<()>,
{
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }
}

impl<R, W> CommittedStore for FnStore<R, W>
where
    R: Fn() -> String,
    W: FnMut(&str) -> Result<()>,
{
    fn read(&self) -> String {
        (self.read)()
    }

    fn write(&mut self, value: &str) -> Result<()> {
        (self.write)(value)
    }
}

/// Campaign description backed by a campaign file on disk.
///
/// Every write saves the whole campaign (with the new description) to
/// `path` first and only updates the in-memory store once the file is
/// safely replaced.
#[derive(Debug, Clone)]
pub struct FileStore {
    campaign: CampaignStore,
    path: PathBuf,
}

impl FileStore {
    pub fn new(campaign: CampaignStore, path: impl Into<PathBuf>) -> Self {
        Self {
            campaign,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn campaign(&self) -> &CampaignStore {
        &self.campaign
    }
}

impl CommittedStore for FileStore {
    fn read(&self) -> String {
        self.campaign.description()
    }

    fn write(&mut self, value: &str) -> Result<()> {
        let mut next = self.campaign.snapshot();
        next.description = value.to_string();
        save_campaign(&next, &self.path)?;
        self.campaign.set_description(value);
        Ok(())
    }
}
