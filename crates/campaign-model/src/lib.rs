//! Campaign data model for Campaign Studio.
//!
//! This crate provides the record being composed on the campaign setup
//! screen and the shared state container every editing surface reads from
//! and writes to.
//!
//! # Module Organization
//!
//! - [`campaign`]: The [`Campaign`] record and its initial values
//! - [`store`]: [`CampaignStore`], the explicitly passed shared state handle
//! - [`participants`]: Participant name helpers and invite suggestions
//! - [`prompts`]: Starter prompts for the agent instruction fields
//!
//! # Example
//!
//! ```
//! use campaign_model::{Campaign, CampaignStore};
//!
//! let store = CampaignStore::new(Campaign::empty());
//! store.set_name("Journey Insights");
//! assert!(store.add_participant("  Olivia Johnson "));
//!
//! assert_eq!(store.name(), "Journey Insights");
//! assert_eq!(store.participants(), vec!["Olivia Johnson".to_string()]);
//! ```

pub mod campaign;
pub mod participants;
pub mod prompts;
pub mod store;

pub use campaign::{Campaign, DEFAULT_DESCRIPTION, DEFAULT_PARTICIPANTS};
pub use participants::{SUGGESTED_PARTICIPANTS, normalize_participant, suggestions_matching};
pub use prompts::{PromptKind, starter_prompts};
pub use store::CampaignStore;
