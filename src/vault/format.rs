//! Binary vault format: the sealed form of a group.
//!
//! A group vault has this layout:
//!
//! ```text
//! [SHLK: 4 bytes][version: 1 byte][header_len: 4 bytes LE][header JSON][nonce + ciphertext]
//! ```
//!
//! - **Magic** (`SHLK`): identifies the blob as a Sherlock vault.
//! - **Version**: format version (currently `1`).
//! - **Header length**: little-endian u32 telling us where the header
//!   JSON ends and the ciphertext begins.
//! - **Header JSON**: serialized `VaultHeader` (salt, Argon2 params).
//! - **Ciphertext**: AES-256-GCM over the group JSON, with the header
//!   bytes bound as associated data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::group::Group;
use crate::crypto::{decrypt, derive_key, encrypt, generate_salt, Argon2Params};
use crate::errors::{Result, SherlockError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault.
const MAGIC: &[u8; 4] = b"SHLK";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 4 (header_len).
const PREFIX_LEN: usize = 9;

// ---------------------------------------------------------------------------
// VaultHeader
// ---------------------------------------------------------------------------

/// Cleartext metadata stored in front of the ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultHeader {
    pub version: u8,

    /// Argon2id salt, base64 in JSON. Fresh for every seal.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// KDF parameters used for this seal.
    pub argon2_params: Argon2Params,

    /// When this blob was written.
    pub sealed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// VaultCodec
// ---------------------------------------------------------------------------

/// Encrypts and decrypts group vaults under a group key.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultCodec {
    params: Argon2Params,
}

impl VaultCodec {
    /// Build a codec that seals new vaults with `params`.
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    /// Seal a freshly created group.
    pub fn init_with_default(&self, group_key: &str, group: &Group) -> Result<Vec<u8>> {
        let plaintext = group.to_bytes()?;
        self.encrypt_vault(&plaintext, group_key)
    }

    /// Seal serialized group bytes under `group_key`.
    ///
    /// 1. Generate a fresh salt and derive the vault key.
    /// 2. Serialize the header.
    /// 3. Encrypt with the header as associated data.
    /// 4. Assemble prefix + header + ciphertext.
    pub fn encrypt_vault(&self, plaintext: &[u8], group_key: &str) -> Result<Vec<u8>> {
        let salt = generate_salt();
        let key = derive_key(group_key.as_bytes(), &salt, &self.params)?;

        let header = VaultHeader {
            version: CURRENT_VERSION,
            salt: salt.to_vec(),
            argon2_params: self.params,
            sealed_at: Utc::now(),
        };
        let header_bytes = serde_json::to_vec(&header)
            .map_err(|e| SherlockError::SerializationError(format!("header: {e}")))?;
        let header_len = u32::try_from(header_bytes.len()).map_err(|_| {
            SherlockError::SerializationError(format!(
                "header length {} exceeds u32::MAX",
                header_bytes.len()
            ))
        })?;

        let ciphertext = encrypt(key.as_bytes(), plaintext, &header_bytes)?;

        let mut buf = Vec::with_capacity(PREFIX_LEN + header_bytes.len() + ciphertext.len());
        buf.extend_from_slice(MAGIC); // 4 bytes
        buf.push(CURRENT_VERSION); // 1 byte
        buf.extend_from_slice(&header_len.to_le_bytes()); // 4 bytes LE
        buf.extend_from_slice(&header_bytes);
        buf.extend_from_slice(&ciphertext);
        Ok(buf)
    }

    /// Open a vault and decode the group inside.
    ///
    /// Fails on a wrong key, tampered bytes or a malformed blob. Callers
    /// should not try to tell these apart.
    pub fn decrypt_vault(&self, blob: &[u8], group_key: &str) -> Result<Group> {
        let (header, header_bytes, ciphertext) = split_vault(blob)?;

        let key = derive_key(group_key.as_bytes(), &header.salt, &header.argon2_params)?;
        let plaintext = zeroize::Zeroizing::new(decrypt(key.as_bytes(), ciphertext, header_bytes)?);

        Group::from_bytes(&plaintext)
    }
}

/// Parse the cleartext prefix and header of a vault blob.
///
/// Returns the header, its raw bytes (the associated data) and the
/// remaining ciphertext.
pub fn split_vault(blob: &[u8]) -> Result<(VaultHeader, &[u8], &[u8])> {
    if blob.len() < PREFIX_LEN {
        return Err(SherlockError::InvalidVaultFormat(
            "blob too small to be a valid vault".into(),
        ));
    }

    if &blob[0..4] != MAGIC {
        return Err(SherlockError::InvalidVaultFormat(
            "missing SHLK magic bytes".into(),
        ));
    }

    let version = blob[4];
    if version != CURRENT_VERSION {
        return Err(SherlockError::InvalidVaultFormat(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let header_len_u32 = u32::from_le_bytes(
        blob[5..9]
            .try_into()
            .map_err(|_| SherlockError::InvalidVaultFormat("bad header length".into()))?,
    );
    let header_len = usize::try_from(header_len_u32).map_err(|_| {
        SherlockError::InvalidVaultFormat(format!(
            "header length {header_len_u32} exceeds platform address space"
        ))
    })?;

    let header_end = PREFIX_LEN
        .checked_add(header_len)
        .filter(|&end| end <= blob.len())
        .ok_or_else(|| SherlockError::InvalidVaultFormat("header length exceeds blob size".into()))?;

    let header_bytes = &blob[PREFIX_LEN..header_end];
    let header: VaultHeader = serde_json::from_slice(header_bytes)
        .map_err(|e| SherlockError::InvalidVaultFormat(format!("header JSON: {e}")))?;

    if !header.argon2_params.within_limits() {
        return Err(SherlockError::InvalidVaultFormat(
            "Argon2 params in header exceed the limits".into(),
        ));
    }

    Ok((header, header_bytes, &blob[header_end..]))
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Account;

    fn codec() -> VaultCodec {
        VaultCodec::new(Argon2Params {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        })
    }

    fn sample() -> Group {
        let mut g = Group::new("detective");
        g.append(Account::new("bakerstreet", "221b", "s3cret")).unwrap();
        g
    }

    #[test]
    fn seal_and_open() {
        let blob = codec().init_with_default("K2", &sample()).unwrap();
        assert_eq!(&blob[0..4], MAGIC);
        assert_eq!(codec().decrypt_vault(&blob, "K2").unwrap(), sample());
    }

    #[test]
    fn wrong_key_fails() {
        let blob = codec().init_with_default("K2", &sample()).unwrap();
        assert!(codec().decrypt_vault(&blob, "K3").is_err());
    }

    #[test]
    fn each_seal_uses_fresh_salt() {
        let a = codec().init_with_default("K", &sample()).unwrap();
        let b = codec().init_with_default("K", &sample()).unwrap();
        let (ha, _, _) = split_vault(&a).unwrap();
        let (hb, _, _) = split_vault(&b).unwrap();
        assert_ne!(ha.salt, hb.salt);
    }

    #[test]
    fn tampered_header_fails_decryption() {
        let mut blob = codec().init_with_default("K", &sample()).unwrap();
        // Flip a byte inside the sealed_at timestamp digits of the header.
        let (_, header_bytes, _) = split_vault(&blob).unwrap();
        let text = String::from_utf8(header_bytes.to_vec()).unwrap();
        let at = PREFIX_LEN + text.find("sealed_at").unwrap() + "sealed_at\":\"".len();
        blob[at] = if blob[at] == b'1' { b'2' } else { b'1' };
        assert!(matches!(
            codec().decrypt_vault(&blob, "K"),
            Err(SherlockError::DecryptionFailed)
        ));
    }

    /// Rebuild `blob` with `from` replaced by `to` in its header JSON.
    fn rewrite_header(blob: &[u8], from: &str, to: &str) -> Vec<u8> {
        let (_, header_bytes, ciphertext) = split_vault(blob).unwrap();
        let header = String::from_utf8(header_bytes.to_vec())
            .unwrap()
            .replace(from, to);

        let mut out = blob[..5].to_vec();
        out.extend_from_slice(&(header.len() as u32).to_le_bytes());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(ciphertext);
        out
    }

    #[test]
    fn inflated_header_params_are_rejected_before_derivation() {
        let blob = codec().init_with_default("K", &sample()).unwrap();
        for (from, to) in [
            ("\"iterations\":1", "\"iterations\":4000000"),
            ("\"memory_kib\":8192", "\"memory_kib\":4294967295"),
            ("\"parallelism\":1", "\"parallelism\":16777215"),
        ] {
            let tampered = rewrite_header(&blob, from, to);
            assert_ne!(tampered, blob, "{from} not found in header");
            assert!(matches!(
                codec().decrypt_vault(&tampered, "K"),
                Err(SherlockError::InvalidVaultFormat(_))
            ));
        }
    }

    #[test]
    fn opens_with_stored_params_not_current_ones() {
        let blob = codec().init_with_default("K", &sample()).unwrap();
        let other = VaultCodec::new(Argon2Params {
            memory_kib: 16_384,
            iterations: 2,
            parallelism: 1,
        });
        assert_eq!(other.decrypt_vault(&blob, "K").unwrap(), sample());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            split_vault(b"nope"),
            Err(SherlockError::InvalidVaultFormat(_))
        ));
        assert!(split_vault(b"XXXX\x01\x00\x00\x00\x00").is_err());
        assert!(split_vault(b"SHLK\x01\xff\xff\x00\x00{}").is_err());
    }
}
