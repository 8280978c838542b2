//! Error types for the lending library

use thiserror::Error;

use crate::models::{ResourceId, UserId};

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(i32),

    #[error("Unsupported resource type: {0}")]
    UnsupportedType(String),

    #[error("Adding {added} cop(ies) to resource {id} would overflow its quantity of {held}")]
    QuantityOverflow {
        id: ResourceId,
        held: i32,
        added: i32,
    },

    #[error("No resource matches {0}")]
    NotFound(String),

    #[error("Insufficient quantity for resource {id}: requested {requested}, held {held}")]
    InsufficientQuantity {
        id: ResourceId,
        requested: i32,
        held: i32,
    },

    #[error("Member {0} has no borrowing capacity left")]
    BorrowingLimitExhausted(UserId),

    #[error("Too many resources requested: {requested}, remaining limit {limit}")]
    TooManyRequested { requested: usize, limit: i32 },

    #[error("None of the resources {0:?} exist in the catalog")]
    NothingFound(Vec<ResourceId>),

    #[error("No resource ids were given")]
    EmptyRequest,

    #[error("Resource {0} was requested more than once")]
    DuplicateRequest(ResourceId),

    #[error("Resource {0} is already borrowed by this member")]
    AlreadyBorrowed(ResourceId),

    #[error("Cannot return {returning} resources, only {borrowed} borrowed")]
    OverReturn { returning: usize, borrowed: usize },

    #[error("Resource {0} was not borrowed by this member")]
    NotBorrowed(ResourceId),

    #[error("Member {0} not found")]
    MemberNotFound(UserId),

    #[error("Malformed resource record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
