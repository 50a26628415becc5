use contactbook_core::{Contact, ContactStorage, ContactStore, JsonFileStorage};
use proptest::prelude::*;

#[test]
fn test_contacts_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    // First session: create and save
    {
        let storage = JsonFileStorage::new(&path);
        let mut store = ContactStore::from_contacts(storage.load().unwrap());
        store.create("Alice", "555-1234", "friend").unwrap();
        store.create("Åsa Öberg", "+46 8 123", "коллега").unwrap();
        storage.save(store.contacts()).unwrap();
    }

    // Second session: data is back, ids continue from the max
    {
        let storage = JsonFileStorage::new(&path);
        let mut store = ContactStore::from_contacts(storage.load().unwrap());
        assert_eq!(store.len(), 2);
        assert_eq!(store.contacts()[1].name, "Åsa Öberg");
        assert_eq!(store.contacts()[1].comment, "коллега");
        assert_eq!(store.create("Bob", "1", "").unwrap().id, 3);
    }
}

#[test]
fn test_loads_hand_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    std::fs::write(
        &path,
        r#"[
    {"phone": "555", "id": 10, "comment": "moved", "name": "Zed"},
    {"id": 2, "name": "Amy", "phone": "444", "comment": ""}
]"#,
    )
    .unwrap();

    let contacts = JsonFileStorage::new(&path).load().unwrap();
    let store = ContactStore::from_contacts(contacts);
    assert_eq!(store.contacts()[0].id, 10);
    assert_eq!(store.contacts()[1].name, "Amy");
    assert_eq!(store.next_id().unwrap(), 11);
}

fn contact_strategy() -> impl Strategy<Value = Contact> {
    (
        1u64..10_000,
        "\\PC{1,20}",
        "[0-9+() -]{1,15}",
        "\\PC{0,30}",
    )
        .prop_map(|(id, name, phone, comment)| Contact::new(id, name, phone, comment))
}

proptest! {
    /// Property: whatever is saved is loaded back unchanged and in order.
    #[test]
    fn prop_save_load_roundtrip(contacts in prop::collection::vec(contact_strategy(), 0..20)) {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("contacts.json"));

        storage.save(&contacts).unwrap();
        let loaded = storage.load().unwrap();

        prop_assert_eq!(loaded, contacts);
    }

    /// Property: a new contact gets one past the highest existing id.
    #[test]
    fn prop_new_id_is_max_plus_one(contacts in prop::collection::vec(contact_strategy(), 0..20)) {
        let expected = contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let existing: Vec<_> = contacts.iter().map(|c| c.id).collect();

        let mut store = ContactStore::from_contacts(contacts);
        let created = store.create("New", "000", "").unwrap().id;

        prop_assert_eq!(created, expected);
        let after: Vec<_> = store.contacts().iter().map(|c| c.id).collect();
        prop_assert_eq!(&after[..existing.len()], &existing[..]);
    }
}
