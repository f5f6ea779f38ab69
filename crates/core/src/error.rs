//! Error types for sleighpack round planning.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::item::ItemId;

/// Primary error type for loading items and planning rounds.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("invalid item {id}: {msg}")]
    InvalidItem { id: ItemId, msg: String },

    #[error("duplicate item id: {0}")]
    DuplicateId(ItemId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("allocation failed: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
