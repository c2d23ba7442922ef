//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Error types for the two layers that can fail: admission (malformed external input, rejected
// before it ever reaches the channel) and the book's internal preconditions (violations here are
// bugs in the matching loop itself, not recoverable user-facing conditions).
//--------------------------------------------------------------------------------------------------

use thiserror::Error;

/// Rejected before an order is ever constructed or pushed onto the channel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("malformed order line: {0:?}")]
    MalformedLine(String),

    #[error("unknown side token: {0:?}")]
    UnknownSide(String),

    #[error("price must be positive, got {0}")]
    NonPositivePrice(String),

    #[error("quantity must parse as a non-negative integer, got {0:?}")]
    InvalidQuantity(String),
}

/// Violations of the book's own preconditions. These never arise from externally supplied data —
/// only from a bug in the matching loop calling the book incorrectly — so callers are expected to
/// treat them as unrecoverable rather than retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderBookError {
    #[error("attempted to consume from an empty {0:?} side")]
    EmptySide(crate::types::Side),

    #[error("attempted to consume {requested} but the head order only has {available}")]
    InsufficientHeadQuantity { requested: u64, available: u64 },
}
