//! `sherlock update`: change an account's password, name or tag.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, prompt_group_key, read_secret, Cli};
use crate::errors::Result;
use crate::store::LocalFileSystem;
use crate::vault::{Query, Sherlock, StateMutation};

/// Execute `sherlock update password <group@account>`.
pub fn execute_password(cli: &Cli, query: &str, insecure: bool) -> Result<()> {
    let sherlock = open_vault(cli)?;
    let group_key = verified_group_key(&sherlock, query)?;

    let secret = read_secret(&format!("({query}) new password"))?;
    sherlock.update_state(
        query,
        &group_key,
        StateMutation::SetPassword { secret, insecure },
    )?;

    output::success("Account password updated");
    Ok(())
}

/// Execute `sherlock update name <group@account> <new-name>`.
pub fn execute_name(cli: &Cli, query: &str, new_name: &str) -> Result<()> {
    let sherlock = open_vault(cli)?;
    let group_key = verified_group_key(&sherlock, query)?;

    sherlock.update_state(
        query,
        &group_key,
        StateMutation::SetName(new_name.to_string()),
    )?;

    output::success(&format!("Account renamed to '{new_name}'"));
    Ok(())
}

/// Execute `sherlock update tag <group@account> <new-tag>`.
pub fn execute_tag(cli: &Cli, query: &str, new_tag: &str) -> Result<()> {
    let sherlock = open_vault(cli)?;
    let group_key = verified_group_key(&sherlock, query)?;

    sherlock.update_state(query, &group_key, StateMutation::SetTag(new_tag.to_string()))?;

    output::success(&format!("Account tag set to '#{new_tag}'"));
    Ok(())
}

/// Prompt for the group key of `query` and make sure it opens the group
/// before the user is asked for anything else.
fn verified_group_key(
    sherlock: &Sherlock<LocalFileSystem>,
    query: &str,
) -> Result<Zeroizing<String>> {
    let gid = Query::parse(query)?.gid;

    let group_key = prompt_group_key(gid)?;
    sherlock.check_group_key(query, &group_key)?;
    Ok(group_key)
}
