// Contact record

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type ContactId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Assigned by the store: one past the highest id present
    #[serde(deserialize_with = "deserialize_positive_id")]
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    /// Free text; older files may omit it
    #[serde(default)]
    pub comment: String,
}

impl Contact {
    pub fn new(id: ContactId, name: String, phone: String, comment: String) -> Self {
        Self {
            id,
            name,
            phone,
            comment,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Phone => &self.phone,
            ContactField::Comment => &self.comment,
        }
    }

    fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Phone => &mut self.phone,
            ContactField::Comment => &mut self.comment,
        }
    }

    /// Replace `field` unless `value` is empty. The value is taken verbatim.
    pub fn update_field(&mut self, field: ContactField, value: String) -> bool {
        if value.is_empty() {
            return false;
        }
        *self.field_mut(field) = value;
        true
    }

    /// Case-insensitive substring match against name, phone, or comment.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        ContactField::ALL
            .iter()
            .any(|&f| self.field(f).to_lowercase().contains(needle))
    }
}

fn deserialize_positive_id<'de, D>(deserializer: D) -> Result<ContactId, D::Error>
where
    D: Deserializer<'de>,
{
    let id = ContactId::deserialize(deserializer)?;
    if id == 0 {
        return Err(<D::Error as de::Error>::invalid_value(
            Unexpected::Unsigned(0),
            &"a positive contact id",
        ));
    }
    Ok(id)
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ID: {}] {} - {} ({})",
            self.id, self.name, self.phone, self.comment
        )
    }
}

/// The user-editable fields of a contact, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Phone,
    Comment,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::Name, Self::Phone, Self::Comment];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Comment => "Comment",
        }
    }
}
