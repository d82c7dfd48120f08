//! Autosave and persistent storage for Campaign Studio.
//!
//! This crate keeps the campaign description editor's draft in sync with
//! the committed campaign, and saves campaigns to `.campaign.json` files.
//!
//! # Features
//!
//! - **Debounced autosave**: a draft is committed 2 s after the last edit
//! - **Flush on exit**: save, dismiss and teardown never drop a dirty draft
//! - **Duplicate suppression**: unchanged drafts are never rewritten
//! - **Atomic writes** to prevent data corruption
//!
//! # File Format
//!
//! Campaign files are JSON with a small envelope:
//!
//! ```text
//! {
//!   "format": "campaign-studio",   identifies the file
//!   "schema_version": 1,           rejected when newer than supported
//!   "saved_at": "<RFC 3339>",
//!   "campaign": { ... }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use campaign_model::{Campaign, CampaignStore};
//! use campaign_persistence::{AutoSaveConfig, AutosaveController, ManualClock};
//! use std::time::Duration;
//!
//! let store = CampaignStore::new(Campaign::empty());
//! let clock = ManualClock::new();
//! let mut editor =
//!     AutosaveController::with_clock(store.clone(), clock.clone(), AutoSaveConfig::default());
//!
//! editor.open();
//! editor.edit("A campaign about first journeys");
//! clock.advance(Duration::from_millis(2000));
//! editor.tick();
//!
//! assert_eq!(store.description(), "A campaign about first journeys");
//! assert!(editor.notification_visible());
//! ```
//!
//! # Architecture
//!
//! The crate is organized into:
//!
//! - `autosave/` - Draft buffer, controller, timers and the async session loop
//! - `store.rs` - The committed-value boundary and its adapters
//! - `io/` - File I/O operations (save, load)
//! - `types.rs` - The on-disk envelope
//! - `error.rs` - Error types with user-friendly messages

mod autosave;
mod error;
mod io;
mod store;
mod types;

pub use autosave::{
    AUTOSAVE_DELAY_MS, AutoSaveConfig, AutosaveController, Clock, CommitOutcome, Debounce,
    DraftBuffer, ManualClock, NOTIFICATION_DISPLAY_MS, NotificationFlag, SessionCommand,
    SessionEnd, SessionHandle, SessionState, SessionSummary, SystemClock, TickOutcome,
    TimerHandle, TokioClock, run_session, session,
};
pub use error::{PersistenceError, Result};
pub use io::{load_campaign, load_campaign_async, save_campaign, save_campaign_async};
pub use store::{CommittedStore, FileStore, FnStore};
pub use types::{CURRENT_SCHEMA_VERSION, CampaignFile, FORMAT_MARKER};
