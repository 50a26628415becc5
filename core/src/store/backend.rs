// Storage abstraction for contact persistence
//
// A store is loaded once at session start and written back in full on save;
// there is no incremental access to the backing medium.

use crate::contact::Contact;
use crate::{ContactBookError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Relative file name used when no path is configured.
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";

const JSON_INDENT: &[u8] = b"    ";

/// Persistence boundary between the in-memory store and durable storage.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait ContactStorage {
    /// Read every persisted record. Absence of data is an empty list, not an error.
    fn load(&self) -> Result<Vec<Contact>>;

    /// Replace the persisted records with `contacts`.
    fn save(&self, contacts: &[Contact]) -> Result<()>;

    /// Human-readable location, used in log lines.
    fn location(&self) -> String;
}

/// A JSON array of contact objects in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACTS_FILE)
    }
}

impl ContactStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Contact>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No contacts file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ContactBookError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let contacts: Vec<Contact> =
            serde_json::from_str(&contents).map_err(|source| ContactBookError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Loaded {} contacts from {}",
            contacts.len(),
            self.path.display()
        );
        Ok(contacts)
    }

    fn save(&self, contacts: &[Contact]) -> Result<()> {
        let contents = to_json_pretty(contacts)?;
        std::fs::write(&self.path, contents).map_err(|source| ContactBookError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            "Saved {} contacts to {}",
            contacts.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serialize with 4-space indentation. Non-ASCII text is written literally.
fn to_json_pretty(contacts: &[Contact]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    contacts
        .serialize(&mut ser)
        .map_err(ContactBookError::Serialize)?;
    Ok(buf)
}

/// In-memory storage useful for testing. Clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<Vec<Contact>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            data: Arc::new(RwLock::new(contacts)),
        }
    }

    /// Snapshot of what is currently "on disk".
    pub fn snapshot(&self) -> Vec<Contact> {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ContactStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Contact>> {
        Ok(self.snapshot())
    }

    fn save(&self, contacts: &[Contact]) -> Result<()> {
        let mut data = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *data = contacts.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new(1, "Alice".into(), "555-1234".into(), "friend".into()),
            Contact::new(3, "Борис".into(), "+7 900".into(), String::new()),
        ]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("contacts.json"));

        storage.save(&sample()).unwrap();
        assert_eq!(storage.load().unwrap(), sample());
    }

    #[test]
    fn test_saved_file_is_indented_and_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        JsonFileStorage::new(&path).save(&sample()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Борис"));
        assert!(!raw.contains("\\u"));
        assert!(raw.contains("\n    {\n        \"id\": 1,"));
    }

    #[test]
    fn test_unparseable_file_is_an_error_and_left_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, ContactBookError::Parse { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_record_missing_key_rejects_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "A", "phone": "1", "comment": ""}, {"id": 2, "name": "B"}]"#,
        )
        .unwrap();

        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, ContactBookError::Parse { .. }));
    }

    #[test]
    fn test_zero_id_rejects_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, r#"[{"id": 0, "name": "A", "phone": "1", "comment": ""}]"#).unwrap();

        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, ContactBookError::Parse { .. }));
    }

    #[test]
    fn test_max_id_loads_but_cannot_be_followed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(
            &path,
            r#"[{"id": 18446744073709551615, "name": "A", "phone": "1", "comment": ""}]"#,
        )
        .unwrap();

        let contacts = JsonFileStorage::new(&path).load().unwrap();
        assert_eq!(contacts[0].id, u64::MAX);

        let mut store = crate::ContactStore::from_contacts(contacts);
        assert!(matches!(
            store.create("B", "2", ""),
            Err(ContactBookError::IdsExhausted)
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("missing-dir").join("contacts.json"));

        let err = storage.save(&sample()).unwrap_err();
        assert!(matches!(err, ContactBookError::Write { .. }));
    }

    #[test]
    fn test_memory_storage_clones_share_data() {
        let storage = MemoryStorage::new();
        let observer = storage.clone();

        storage.save(&sample()).unwrap();
        assert_eq!(observer.snapshot(), sample());
        assert_eq!(observer.load().unwrap().len(), 2);
    }
}
