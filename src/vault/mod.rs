//! Vault module: groups, accounts, and the operations that change them.
//!
//! This module provides:
//! - `Account` and `Group` types (`account`, `group`)
//! - `group@account` query parsing (`query`)
//! - The `StateMutation` protocol for writes (`mutation`)
//! - Password strength checks (`policy`)
//! - The sealed binary vault format (`format`)
//! - The `Sherlock` orchestrator tying them to a file store (`sherlock`)

pub mod account;
pub mod format;
pub mod group;
pub mod mutation;
pub mod policy;
pub mod query;
pub mod sherlock;

pub use account::{Account, AccountField};
pub use format::VaultCodec;
pub use group::{validate_account_name, validate_group_name, AccountSummary, Group, DEFAULT_GROUP};
pub use mutation::StateMutation;
pub use policy::{PasswordPolicy, StrengthPolicy};
pub use query::{split_query, Query};
pub use sherlock::Sherlock;
