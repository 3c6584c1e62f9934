//! Groups: ordered collections of accounts sealed under one group key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::account::Account;
use super::query::QUERY_SEPARATOR;
use crate::errors::{Result, SherlockError};

/// Id of the group created by `sherlock setup`.
pub const DEFAULT_GROUP: &str = "default";

/// Longest accepted group name.
const MAX_GROUP_NAME_LEN: usize = 64;

/// A named partition of accounts sharing one encryption key.
///
/// Accounts keep their insertion order; no two share both name and tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "name")]
    gid: String,
    accounts: Vec<Account>,
}

/// Display row for an account, without its secret.
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub gid: String,
    pub name: String,
    pub tag: String,
    pub created_on: DateTime<Utc>,
}

impl Group {
    /// Create an empty group.
    pub fn new(gid: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            accounts: Vec::new(),
        }
    }

    pub fn gid(&self) -> &str {
        &self.gid
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Append `account` unless an account with the same name and tag exists.
    pub fn append(&mut self, account: Account) -> Result<()> {
        if self.exists(&account) {
            return Err(SherlockError::AccountExists);
        }
        self.accounts.push(account);
        Ok(())
    }

    /// First account called `name`. Tags are ignored here.
    pub fn lookup(&self, name: &str) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name == name)
            .ok_or(SherlockError::NoSuchAccount)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or(SherlockError::NoSuchAccount)
    }

    /// Position of the first account called `name`.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.accounts
            .iter()
            .position(|a| a.name == name)
            .ok_or(SherlockError::NoSuchAccount)
    }

    /// Remove the first account called `name`, keeping the others in order.
    pub fn delete(&mut self, name: &str) -> Result<Account> {
        let index = self.position(name)?;
        Ok(self.accounts.remove(index))
    }

    /// Returns `true` if some account shares both name and tag with `candidate`.
    pub fn exists(&self, candidate: &Account) -> bool {
        self.accounts.iter().any(|a| a.same_identity(candidate))
    }

    /// Returns `true` if an account other than the one at `skip` is
    /// identified by `name` and, when given, `tag`.
    pub(crate) fn collides(&self, skip: usize, name: &str, tag: Option<&str>) -> bool {
        self.accounts.iter().enumerate().any(|(i, a)| {
            i != skip && a.name == name && tag.map_or(true, |t| a.tag == t)
        })
    }

    /// Deterministic JSON encoding used as the vault plaintext.
    ///
    /// Field order is fixed by the struct definitions.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec(self)
            .map(Zeroizing::new)
            .map_err(|e| SherlockError::SerializationError(format!("group: {e}")))
    }

    /// Inverse of `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| SherlockError::InvalidVaultFormat(format!("group JSON: {e}")))
    }

    /// Metadata rows for listing, in insertion order.
    pub fn summaries(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|a| AccountSummary {
                gid: self.gid.clone(),
                name: a.name.clone(),
                tag: a.tag.clone(),
                created_on: a.created_on,
            })
            .collect()
    }
}

/// Validate an account name before it is stored or renamed to.
///
/// The name must stay addressable as `group@name`: non-empty and free
/// of the `@` separator.
pub fn validate_account_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SherlockError::InvalidAccountName(
            "account name cannot be empty".into(),
        ));
    }
    if name.contains(QUERY_SEPARATOR) {
        return Err(SherlockError::InvalidAccountName(format!(
            "'{name}' may not contain '{QUERY_SEPARATOR}'"
        )));
    }
    Ok(())
}

/// Validate a name for a new group.
///
/// Allowed: lowercase ASCII letters, digits, hyphens, underscores.
/// The `@` query separator can therefore never appear in a group id.
pub fn validate_group_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SherlockError::InvalidGroupName(
            "group name cannot be empty".into(),
        ));
    }
    if name.len() > MAX_GROUP_NAME_LEN {
        return Err(SherlockError::InvalidGroupName(format!(
            "group name cannot exceed {MAX_GROUP_NAME_LEN} characters"
        )));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    {
        return Err(SherlockError::InvalidGroupName(format!(
            "'{name}' may only contain lowercase letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}
