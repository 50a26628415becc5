// Contact store
//
// Ordered by insertion. Edits never reorder; deletes remove in place.
// Ids are not enforced unique: lookups by id take the first match.

use crate::contact::{Contact, ContactField, ContactId};
use crate::{ContactBookError, Result};

pub const EMPTY_NOTICE: &str = "The contact book is empty.";
pub const NO_MATCHES_NOTICE: &str = "No contacts found.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// First contact carrying `id`, in store order.
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// One past the highest id present, or 1 for an empty store.
    pub fn next_id(&self) -> Result<ContactId> {
        self.contacts
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(ContactBookError::IdsExhausted)
    }

    /// One line per contact, or the empty notice.
    pub fn list_all(&self) -> Vec<String> {
        if self.contacts.is_empty() {
            return vec![EMPTY_NOTICE.to_string()];
        }
        self.contacts.iter().map(ToString::to_string).collect()
    }

    /// Add a contact. All inputs are trimmed; name and phone must remain non-empty.
    pub fn create(&mut self, name: &str, phone: &str, comment: &str) -> Result<&Contact> {
        let name = name.trim();
        let phone = phone.trim();
        let comment = comment.trim();

        if name.is_empty() || phone.is_empty() {
            return Err(ContactBookError::MissingRequiredField);
        }

        let contact = Contact::new(
            self.next_id()?,
            name.to_string(),
            phone.to_string(),
            comment.to_string(),
        );
        tracing::debug!("Created contact {}", contact.id);

        self.contacts.push(contact);
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    /// Case-insensitive substring search over name, phone, and comment.
    pub fn find(&self, query: &str) -> SearchResults<'_> {
        let needle = query.trim().to_lowercase();
        let matches = self
            .contacts
            .iter()
            .filter(|c| c.matches(&needle))
            .collect();
        SearchResults { matches }
    }

    /// Edit the contact whose id is `id_input`.
    ///
    /// `prompt` is asked once per field, in [`ContactField::ALL`] order, with the
    /// contact as it stood before the edit. An empty answer keeps the field;
    /// anything else replaces it verbatim. Nothing is written until all three
    /// answers are in, so a failing prompt leaves the contact untouched.
    pub fn edit<F>(&mut self, id_input: &str, mut prompt: F) -> Result<&Contact>
    where
        F: FnMut(&Contact, ContactField) -> std::io::Result<String>,
    {
        let index = self.position(id_input)?;

        let current = &self.contacts[index];
        let mut answers = Vec::with_capacity(ContactField::ALL.len());
        for field in ContactField::ALL {
            answers.push((field, prompt(current, field)?));
        }

        let contact = &mut self.contacts[index];
        for (field, value) in answers {
            contact.update_field(field, value);
        }
        tracing::debug!("Edited contact {}", contact.id);

        Ok(&self.contacts[index])
    }

    /// Remove the contact whose id is `id_input`, returning it.
    pub fn delete(&mut self, id_input: &str) -> Result<Contact> {
        let index = self.position(id_input)?;
        let removed = self.contacts.remove(index);
        tracing::debug!("Deleted contact {}", removed.id);
        Ok(removed)
    }

    fn position(&self, id_input: &str) -> Result<usize> {
        let id = parse_id(id_input)?;
        self.contacts
            .iter()
            .position(|c| i128::from(c.id) == id)
            .ok_or(ContactBookError::NotFound(id))
    }
}

/// Parse a user-typed id. Surrounding whitespace and a sign are accepted;
/// out-of-range values parse and then simply match nothing.
pub fn parse_id(input: &str) -> Result<i128> {
    input
        .trim()
        .parse::<i128>()
        .map_err(|_| ContactBookError::InvalidId(input.to_string()))
}

/// Matches from [`ContactStore::find`], in store order.
#[derive(Debug)]
pub struct SearchResults<'a> {
    matches: Vec<&'a Contact>,
}

impl<'a> SearchResults<'a> {
    pub fn matches(&self) -> &[&'a Contact] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// A count header followed by one line per match, or the no-match notice.
    pub fn lines(&self) -> Vec<String> {
        if self.matches.is_empty() {
            return vec![NO_MATCHES_NOTICE.to_string()];
        }
        let mut lines = Vec::with_capacity(self.matches.len() + 1);
        lines.push(format!("Matches found: {}", self.matches.len()));
        lines.extend(self.matches.iter().map(ToString::to_string));
        lines
    }
}
