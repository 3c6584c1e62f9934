//! Cryptographic primitives for Sherlock.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id group-key derivation (`kdf`)

pub mod encryption;
pub mod kdf;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, generate_salt, Argon2Params, DerivedKey};
