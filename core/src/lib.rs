// Contact Book Core — contact records, the in-memory store, and persistence
//
// The interactive shell lives in the `contactbook-cli` crate; everything here
// is free of terminal I/O so it can be driven directly from tests.

pub mod contact;
pub mod store;

use std::path::PathBuf;
use thiserror::Error;

pub use contact::{Contact, ContactField, ContactId};
pub use store::backend::{ContactStorage, JsonFileStorage, MemoryStorage, DEFAULT_CONTACTS_FILE};
pub use store::{ContactStore, SearchResults, EMPTY_NOTICE, NO_MATCHES_NOTICE};

#[cfg(any(test, feature = "test-utils"))]
pub use store::backend::MockContactStorage;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Every failure a contact book operation can report.
///
/// The `Display` text is what the shell shows to the user; none of these are
/// fatal to the process.
#[derive(Debug, Error)]
pub enum ContactBookError {
    #[error("Name and phone are required")]
    MissingRequiredField,
    #[error("Invalid ID format: {0:?}")]
    InvalidId(String),
    #[error("Contact with ID {0} not found")]
    NotFound(i128),
    #[error("No contact IDs left to assign")]
    IdsExhausted,
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize contacts: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContactBookError {
    /// Validation errors abort a single operation; storage errors concern the
    /// backing file.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Parse { .. } | Self::Write { .. } | Self::Serialize(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ContactBookError>;
