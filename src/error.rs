// Error type for collection operations. User-facing outcomes (not found,
// duplicate, bad year) and fatal write failures share one enum.

use thiserror::Error;

/// Errors returned by [`crate::collection::BookCollection`] operations.
///
/// `NotFound`, `Duplicate` and `InvalidYear` leave the collection untouched
/// and are meant to be reported to the user. `Io` and `Serialize` come from
/// writing the storage or export file and end the session.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book already exists: {0}")]
    Duplicate(String),

    #[error("Invalid year: {0:?}")]
    InvalidYear(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CollectionError {
    /// Whether the menu loop can report this and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CollectionError::NotFound(_)
                | CollectionError::Duplicate(_)
                | CollectionError::InvalidYear(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CollectionError>;
