//! On-disk campaign file envelope.

use campaign_model::Campaign;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker identifying a campaign file.
pub const FORMAT_MARKER: &str = "campaign-studio";

/// Current schema version written to new files.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Root structure of a `.campaign.json` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFile {
    /// Always [`FORMAT_MARKER`].
    pub format: String,

    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// When the file was last saved (RFC 3339).
    pub saved_at: String,

    /// The campaign itself.
    pub campaign: Campaign,
}

impl CampaignFile {
    /// Wrap `campaign` in a new envelope stamped with the current time.
    pub fn new(campaign: Campaign) -> Self {
        Self {
            format: FORMAT_MARKER.to_string(),
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            campaign,
        }
    }

    /// Update the saved timestamp.
    pub fn touch(&mut self) {
        self.saved_at = Utc::now().to_rfc3339();
    }

    /// Parse the saved_at timestamp.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
