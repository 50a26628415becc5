// Store module — the in-memory contact book and its persistence boundary

pub mod backend;
pub mod contacts;

pub use backend::{ContactStorage, JsonFileStorage, MemoryStorage};
pub use contacts::{ContactStore, SearchResults, EMPTY_NOTICE, NO_MATCHES_NOTICE};
