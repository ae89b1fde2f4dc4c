//! ovaware-history
//!
//! Local assessment history: every scored assessment with its answers,
//! newest first, stored as a single JSON document.

pub mod error;
pub mod store;

pub use crate::error::HistoryError;
pub use crate::store::{HISTORY_FILE, HistoryStore};
