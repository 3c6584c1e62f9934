use thiserror::Error;

/// All errors that can occur in Sherlock.
#[derive(Debug, Error)]
pub enum SherlockError {
    // --- Domain errors ---
    #[error("sherlock needs to be set up first (use `sherlock setup`)")]
    NotSetUp,

    #[error("group cannot be found (use `sherlock add group`)")]
    NoSuchGroup,

    #[error("group '{0}' already exists")]
    GroupExists(String),

    #[error("account for group already exists")]
    AccountExists,

    #[error("account not found")]
    NoSuchAccount,

    #[error("wrong group key")]
    WrongKey,

    #[error("invalid query, expected \"group@account\"")]
    InvalidQuery,

    #[error("insecure password: {0} (use --insecure to skip this check)")]
    WeakPassword(String),

    #[error("invalid group name: {0}")]
    InvalidGroupName(String),

    #[error("invalid account name: {0}")]
    InvalidAccountName(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Store errors ---
    #[error("could not lock group vault: {0}")]
    LockFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Sherlock results.
pub type Result<T> = std::result::Result<T, SherlockError>;
