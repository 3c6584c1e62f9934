//! Group-key derivation using Argon2id.
//!
//! A group key is a human password; the AES key that actually seals a
//! group vault is derived from it with Argon2id and a per-vault salt.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Result, SherlockError};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Largest memory cost in KiB a vault may ask for (1 GB).
pub const MAX_MEMORY_KIB: u32 = 1_048_576;

/// Largest iteration count a vault may ask for.
pub const MAX_ITERATIONS: u32 = 64;

/// Largest number of lanes a vault may ask for.
pub const MAX_PARALLELISM: u32 = 64;

/// Argon2id cost parameters.
///
/// Stored in every vault header so a vault always opens with the
/// parameters it was sealed with, whatever the current settings say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Argon2Params {
    /// Returns `true` if every cost stays at or below the upper limits.
    ///
    /// Params read back from a vault header are untrusted until this holds.
    pub fn within_limits(&self) -> bool {
        self.memory_kib <= MAX_MEMORY_KIB
            && self.iterations <= MAX_ITERATIONS
            && self.parallelism <= MAX_PARALLELISM
    }
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// A derived 32-byte vault key, wiped from memory on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a vault key from a group key and salt.
///
/// The same password + salt + params always produce the same key.
/// Dangerously weak parameters are refused.
pub fn derive_key(password: &[u8], salt: &[u8], argon2_params: &Argon2Params) -> Result<DerivedKey> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(SherlockError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(SherlockError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(SherlockError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    if !argon2_params.within_limits() {
        return Err(SherlockError::KeyDerivationFailed(format!(
            "Argon2 params exceed the limits ({MAX_MEMORY_KIB} KiB, {MAX_ITERATIONS} iterations, {MAX_PARALLELISM} lanes)"
        )));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| SherlockError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = DerivedKey {
        bytes: [0u8; KEY_LEN],
    };
    argon2
        .hash_password_into(password, salt, &mut key.bytes)
        .map_err(|e| SherlockError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: Argon2Params = Argon2Params {
        memory_kib: MIN_MEMORY_KIB,
        iterations: 1,
        parallelism: 1,
    };

    #[test]
    fn same_inputs_derive_same_key() {
        let salt = [7u8; SALT_LEN];
        let a = derive_key(b"hunter22", &salt, &FAST).unwrap();
        let b = derive_key(b"hunter22", &salt, &FAST).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_salt_derives_different_key() {
        let a = derive_key(b"hunter22", &[1u8; SALT_LEN], &FAST).unwrap();
        let b = derive_key(b"hunter22", &[2u8; SALT_LEN], &FAST).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn rejects_weak_memory_cost() {
        let params = Argon2Params {
            memory_kib: 1024,
            ..FAST
        };
        assert!(matches!(
            derive_key(b"pw", &[0u8; SALT_LEN], &params),
            Err(SherlockError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn rejects_zero_iterations() {
        let params = Argon2Params {
            iterations: 0,
            ..FAST
        };
        assert!(derive_key(b"pw", &[0u8; SALT_LEN], &params).is_err());
    }

    #[test]
    fn rejects_costs_above_limits() {
        for params in [
            Argon2Params {
                memory_kib: MAX_MEMORY_KIB + 1,
                ..FAST
            },
            Argon2Params {
                iterations: 4_000_000,
                ..FAST
            },
            Argon2Params {
                parallelism: MAX_PARALLELISM + 1,
                ..FAST
            },
        ] {
            assert!(!params.within_limits());
            assert!(matches!(
                derive_key(b"pw", &[0u8; SALT_LEN], &params),
                Err(SherlockError::KeyDerivationFailed(_))
            ));
        }
    }

    #[test]
    fn defaults_are_within_limits() {
        assert!(Argon2Params::default().within_limits());
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
