//! Persistence of sealed group vaults.
//!
//! The orchestrator only ever sees opaque blobs through the `FileSystem`
//! trait; `LocalFileSystem` is the on-disk implementation.

pub mod local;
pub mod lock;

pub use local::LocalFileSystem;
pub use lock::VaultLock;

use crate::errors::Result;

/// What Sherlock needs from the place vaults are kept.
pub trait FileSystem {
    /// Guard returned by `lock`; the lock is released when it is dropped.
    type Lock;

    /// Create the store and the `default` group with its first vault.
    fn init_root(&self, initial_vault: &[u8]) -> Result<()>;

    /// Register a new group with its first vault. Fails if it already exists.
    fn create_group(&self, gid: &str, initial_vault: &[u8]) -> Result<()>;

    /// Returns `true` if the group is registered.
    fn group_exists(&self, gid: &str) -> bool;

    /// Returns `true` if the group has a vault blob.
    fn vault_exists(&self, gid: &str) -> bool;

    /// Read the sealed vault of a group.
    fn read_group_vault(&self, gid: &str) -> Result<Vec<u8>>;

    /// Replace the sealed vault of a group.
    fn write(&self, gid: &str, data: &[u8]) -> Result<()>;

    /// Remove a group and its vault.
    fn delete(&self, gid: &str) -> Result<()>;

    /// Registered group ids, sorted.
    fn read_registered_groups(&self) -> Result<Vec<String>>;

    /// Take the exclusive lock of a group.
    fn lock(&self, gid: &str) -> Result<Self::Lock>;
}
