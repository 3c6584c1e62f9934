//! State mutations applied to a freshly decrypted group.
//!
//! Every write in Sherlock is one `StateMutation` run against a private
//! copy of a group. A failed mutation leaves nothing to roll back: the
//! copy is simply dropped without being persisted.

use zeroize::Zeroizing;

use super::account::{Account, AccountField};
use super::group::{validate_account_name, Group};
use super::policy::PasswordPolicy;
use crate::errors::{Result, SherlockError};

/// One named change to a group, addressed at an account name.
pub enum StateMutation {
    /// Insert a new account; the target name is not consulted.
    AddAccount(Account),

    /// Replace the target's secret, checking strength unless `insecure`.
    SetPassword {
        secret: Zeroizing<String>,
        insecure: bool,
    },

    /// Rename the target; fails if another account already has the name
    /// or the name could not be addressed by a query.
    SetName(String),

    /// Retag the target; fails if another account already has the
    /// target's name with the new tag.
    SetTag(String),

    /// Remove the target.
    DeleteAccount,
}

impl StateMutation {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddAccount(_) => "add-account",
            Self::SetPassword { .. } => "set-password",
            Self::SetName(_) => "set-name",
            Self::SetTag(_) => "set-tag",
            Self::DeleteAccount => "delete-account",
        }
    }

    /// Run the mutation against `group` for the account called `target`.
    pub fn apply(self, group: &mut Group, target: &str, policy: &dyn PasswordPolicy) -> Result<()> {
        match self {
            Self::AddAccount(account) => {
                validate_account_name(&account.name)?;
                group.append(account)
            }

            Self::SetPassword { secret, insecure } => {
                let account = group.lookup_mut(target)?;
                if !insecure {
                    policy.check(&secret)?;
                }
                account.update(AccountField::Secret(secret));
                Ok(())
            }

            Self::SetName(name) => {
                validate_account_name(&name)?;
                let index = group.position(target)?;
                if group.collides(index, &name, None) {
                    return Err(SherlockError::AccountExists);
                }
                group.lookup_mut(target)?.update(AccountField::Name(name));
                Ok(())
            }

            Self::SetTag(tag) => {
                let index = group.position(target)?;
                if group.collides(index, target, Some(&tag)) {
                    return Err(SherlockError::AccountExists);
                }
                group.lookup_mut(target)?.update(AccountField::Tag(tag));
                Ok(())
            }

            Self::DeleteAccount => group.delete(target).map(drop),
        }
    }
}
