//! ovaware-cli library root.
//!
//! Re-exports the config, answers and report modules so integration tests
//! can exercise them without going through the binary.

pub mod answers;
pub mod config;
pub mod report;
