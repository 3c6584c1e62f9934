//! A single credential record stored inside a group.
//!
//! The `secret` field is wiped when an `Account` is dropped and never
//! shows up in `Debug` output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A username/secret pair owned by exactly one group.
///
/// `(name, tag)` is the identity of an account within its group.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Account {
    pub name: String,

    /// Free-form label; an empty tag is a valid value.
    #[serde(default)]
    pub tag: String,

    pub secret: String,

    /// Set once at creation.
    #[zeroize(skip)]
    pub created_on: DateTime<Utc>,
}

/// Exactly one field change applied by `Account::update`.
pub enum AccountField {
    Secret(Zeroizing<String>),
    Name(String),
    Tag(String),
}

impl Account {
    /// Create an account stamped with the current time.
    pub fn new(name: impl Into<String>, tag: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            secret: secret.into(),
            created_on: Utc::now(),
        }
    }

    /// Apply a single field change in place.
    ///
    /// Collision checks against sibling accounts belong to the group.
    pub fn update(&mut self, field: AccountField) {
        match field {
            AccountField::Secret(secret) => {
                self.secret.zeroize();
                self.secret = secret.as_str().to_owned();
            }
            AccountField::Name(name) => self.name = name,
            AccountField::Tag(tag) => self.tag = tag,
        }
    }

    /// Returns `true` if both `name` and `tag` match.
    pub fn same_identity(&self, other: &Account) -> bool {
        self.name == other.name && self.tag == other.tag
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("secret", &"<redacted>")
            .field("created_on", &self.created_on)
            .finish()
    }
}
