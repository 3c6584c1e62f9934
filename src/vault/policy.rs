//! Password-strength policy for group keys and account secrets.

use crate::errors::{Result, SherlockError};

/// Minimum password length accepted by the default policy.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Number of character classes a strong password must mix.
const REQUIRED_CLASSES: usize = 3;

/// Decides whether a password is strong enough to be stored.
pub trait PasswordPolicy {
    fn check(&self, password: &str) -> Result<()>;
}

/// Length plus character-class mix.
///
/// Classes are lowercase, uppercase, digits and everything else.
#[derive(Debug, Clone, Copy)]
pub struct StrengthPolicy {
    pub min_len: usize,
}

impl Default for StrengthPolicy {
    fn default() -> Self {
        Self {
            min_len: MIN_PASSWORD_LEN,
        }
    }
}

impl PasswordPolicy for StrengthPolicy {
    fn check(&self, password: &str) -> Result<()> {
        if password.chars().count() < self.min_len {
            return Err(SherlockError::WeakPassword(format!(
                "must be at least {} characters",
                self.min_len
            )));
        }

        let classes = [
            password.chars().any(|c| c.is_lowercase()),
            password.chars().any(|c| c.is_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_alphanumeric()),
        ];
        if classes.iter().filter(|&&present| present).count() < REQUIRED_CLASSES {
            return Err(SherlockError::WeakPassword(format!(
                "must mix at least {REQUIRED_CLASSES} of lowercase, uppercase, digits and symbols"
            )));
        }
        Ok(())
    }
}
