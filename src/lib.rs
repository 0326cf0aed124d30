pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod payload;
pub mod screen;
pub mod storage;
pub mod tracker;
pub mod types;

// Application layer (use cases and the ports they depend on)
pub mod app;
// Adapters for the ports
pub mod infra;

pub use catalog::Catalog;
pub use error::{PicksError, Result};
pub use payload::{Assignment, SubmissionPayload, SubmissionReceipt};
pub use tracker::{ButtonState, SelectionTracker, ToggleOutcome};
pub use types::{Category, CategoryId, CategorySet, ItemId, Movie, Player, Selectable};
