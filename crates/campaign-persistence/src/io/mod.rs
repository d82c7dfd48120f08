//! File I/O operations for campaign persistence.
//!
//! This module handles:
//! - Saving campaigns with atomic writes
//! - Loading campaigns with format validation

mod load;
mod save;

pub use load::{load_campaign, load_campaign_async};
pub use save::{save_campaign, save_campaign_async};
