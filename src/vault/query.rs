//! `group@account` addresses.

use crate::errors::{Result, SherlockError};

/// Separator between the group id and the account name.
pub const QUERY_SEPARATOR: char = '@';

/// A parsed `group@account` address, borrowed from the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query<'a> {
    pub gid: &'a str,
    pub account: &'a str,
}

impl<'a> Query<'a> {
    /// Split `raw` on its single `@`.
    ///
    /// Empty halves are accepted; they surface later as a missing
    /// group or account.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let (gid, account) = split_query(raw)?;
        Ok(Self { gid, account })
    }
}

/// Split a query into `(gid, account_name)`. Exactly one `@` is required.
pub fn split_query(raw: &str) -> Result<(&str, &str)> {
    let mut parts = raw.split(QUERY_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(gid), Some(account), None) => Ok((gid, account)),
        _ => Err(SherlockError::InvalidQuery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_group_and_account() {
        assert_eq!(
            split_query("detective@bakerstreet").unwrap(),
            ("detective", "bakerstreet")
        );
    }

    #[test]
    fn missing_separator_is_invalid() {
        assert!(matches!(
            split_query("detective"),
            Err(SherlockError::InvalidQuery)
        ));
    }

    #[test]
    fn repeated_separator_is_invalid() {
        assert!(matches!(split_query("a@b@c"), Err(SherlockError::InvalidQuery)));
    }

    #[test]
    fn empty_halves_are_accepted() {
        assert_eq!(split_query("@").unwrap(), ("", ""));
        assert_eq!(split_query("@acc").unwrap(), ("", "acc"));
        assert_eq!(split_query("grp@").unwrap(), ("grp", ""));
    }

    #[test]
    fn parse_borrows_both_halves() {
        let q = Query::parse("work@mail").unwrap();
        assert_eq!(q.gid, "work");
        assert_eq!(q.account, "mail");
    }
}
