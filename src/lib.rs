//! dupfind - Duplicate Sentence Detection
//!
//! Ingests a list of text fragments and finds exact and near-duplicate
//! entries with independently selectable comparison strategies, producing
//! reviewable duplicate groups and a deduplicated remainder.

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;

pub use error::{DupfindError, Result};
