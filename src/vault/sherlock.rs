//! High-level vault operations used by CLI commands.
//!
//! `Sherlock` ties the file store, the vault codec and the mutation
//! protocol together. Every operation loads its own short-lived copy of
//! a group, so decrypted accounts never outlive the call that needed
//! them.

use tracing::{debug, info, warn};

use super::account::Account;
use super::format::VaultCodec;
use super::group::{validate_group_name, Group, DEFAULT_GROUP};
use super::mutation::StateMutation;
use super::policy::{PasswordPolicy, StrengthPolicy};
use super::query::Query;
use crate::errors::{Result, SherlockError};
use crate::store::FileSystem;

/// The vault façade. Create one with `Sherlock::new`, then call the
/// operations below with a group key per call.
pub struct Sherlock<F: FileSystem> {
    file_system: F,
    codec: VaultCodec,
    policy: Box<dyn PasswordPolicy>,
}

impl<F: FileSystem> Sherlock<F> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Build a `Sherlock` with the default password policy.
    pub fn new(file_system: F, codec: VaultCodec) -> Self {
        Self {
            file_system,
            codec,
            policy: Box::new(StrengthPolicy::default()),
        }
    }

    /// Replace the password policy used for group keys and secrets.
    pub fn with_policy(mut self, policy: impl PasswordPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn policy(&self) -> &dyn PasswordPolicy {
        self.policy.as_ref()
    }

    pub fn file_system(&self) -> &F {
        &self.file_system
    }

    // ------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------

    /// Fails with `NotSetUp` unless the `default` group and its vault exist.
    pub fn is_set_up(&self) -> Result<()> {
        if !self.file_system.group_exists(DEFAULT_GROUP) {
            return Err(SherlockError::NotSetUp);
        }
        if !self.file_system.vault_exists(DEFAULT_GROUP) {
            return Err(SherlockError::NotSetUp);
        }
        Ok(())
    }

    /// Create the `default` group sealed under `group_key`.
    pub fn setup(&self, group_key: &str) -> Result<()> {
        let vault = self
            .codec
            .init_with_default(group_key, &Group::new(DEFAULT_GROUP))?;
        self.file_system.init_root(&vault)?;
        info!(gid = DEFAULT_GROUP, "vault initialized");
        Ok(())
    }

    /// Create an empty group `name` sealed under `group_key`.
    ///
    /// The key must satisfy the password policy unless `insecure` is set.
    pub fn setup_group(&self, name: &str, group_key: &str, insecure: bool) -> Result<()> {
        validate_group_name(name)?;
        if self.file_system.group_exists(name) {
            return Err(SherlockError::GroupExists(name.to_string()));
        }
        if !insecure {
            self.policy.check(group_key)?;
        }

        let vault = self.codec.init_with_default(group_key, &Group::new(name))?;
        self.file_system.create_group(name, &vault)?;
        info!(gid = name, "group created");
        Ok(())
    }

    /// Irreversibly delete a group and its vault.
    pub fn delete_group(&self, gid: &str) -> Result<()> {
        let _lock = self.file_system.lock(gid)?;
        self.file_system.delete(gid)?;
        info!(gid, "group deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Verify `group_key` against the group named in `query`.
    pub fn check_group_key(&self, query: &str, group_key: &str) -> Result<()> {
        let query = Query::parse(query)?;
        self.load_group(query.gid, group_key).map(drop)
    }

    /// Look up the account addressed by `query`.
    pub fn get_account(&self, query: &str, group_key: &str) -> Result<Account> {
        let query = Query::parse(query)?;
        let group = self.load_group(query.gid, group_key)?;
        group.lookup(query.account).cloned()
    }

    /// Load and decrypt a whole group.
    ///
    /// Any decryption failure is reported as `WrongKey`.
    pub fn load_group(&self, gid: &str, group_key: &str) -> Result<Group> {
        let blob = self.file_system.read_group_vault(gid)?;
        let group = self.codec.decrypt_vault(&blob, group_key).map_err(|_| {
            warn!(gid, "group key rejected");
            SherlockError::WrongKey
        })?;
        debug!(gid, accounts = group.len(), "group loaded");
        Ok(group)
    }

    /// Registered group ids, sorted.
    pub fn read_registered_groups(&self) -> Result<Vec<String>> {
        self.file_system.read_registered_groups()
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Apply `mutation` to the account addressed by `query`.
    ///
    /// The group is locked, loaded, mutated and re-sealed under the same
    /// key. If the mutation fails nothing is written.
    pub fn update_state(&self, query: &str, group_key: &str, mutation: StateMutation) -> Result<()> {
        let query = Query::parse(query)?;
        let kind = mutation.kind();

        let _lock = self.file_system.lock(query.gid)?;
        let mut group = self.load_group(query.gid, group_key)?;

        if let Err(e) = mutation.apply(&mut group, query.account, self.policy.as_ref()) {
            debug!(gid = query.gid, mutation = kind, error = %e, "mutation rejected");
            return Err(e);
        }

        self.write_group(query.gid, group_key, &group)?;
        debug!(gid = query.gid, mutation = kind, "group persisted");
        Ok(())
    }

    /// Seal and persist `group` under `group_key`.
    fn write_group(&self, gid: &str, group_key: &str, group: &Group) -> Result<()> {
        let plaintext = group.to_bytes()?;
        let vault = self.codec.encrypt_vault(&plaintext, group_key)?;
        self.file_system.write(gid, &vault)
    }
}
