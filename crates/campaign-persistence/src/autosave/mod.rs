//! Auto-save functionality for the description editor.
//!
//! Provides:
//! - `AutosaveController` - Debounced commit of a draft into a committed store
//! - `DraftBuffer` - The in-progress text, separate from the committed value
//! - `Debounce` - Single-slot timer with an explicit current handle
//! - `NotificationFlag` - The transient "saved" flag
//! - `AutoSaveConfig` - Timing settings
//! - `session` - Async host loop driving a controller from a command channel

mod clock;
mod config;
mod controller;
mod draft;
mod driver;
mod notification;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AUTOSAVE_DELAY_MS, AutoSaveConfig, NOTIFICATION_DISPLAY_MS};
pub use controller::{AutosaveController, CommitOutcome, SessionState, TickOutcome};
pub use draft::DraftBuffer;
pub use driver::{
    SessionCommand, SessionEnd, SessionHandle, SessionSummary, TokioClock, run_session, session,
};
pub use notification::NotificationFlag;
pub use timer::{Debounce, TimerHandle};
