//! `sherlock delete`: remove an account or a whole group.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, prompt_group_key, Cli};
use crate::errors::{Result, SherlockError};
use crate::store::FileSystem;
use crate::vault::{Query, StateMutation, DEFAULT_GROUP};

/// Execute `sherlock delete account <group@account>`.
pub fn execute_account(cli: &Cli, query: &str, force: bool) -> Result<()> {
    let sherlock = open_vault(cli)?;
    let gid = Query::parse(query)?.gid;

    let group_key = prompt_group_key(gid)?;
    sherlock.check_group_key(query, &group_key)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm(&format!("Delete account '{query}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    sherlock.update_state(query, &group_key, StateMutation::DeleteAccount)?;
    output::success(&format!("Deleted account '{query}'"));

    Ok(())
}

/// Execute `sherlock delete group <gid>`.
pub fn execute_group(cli: &Cli, gid: &str, force: bool) -> Result<()> {
    let sherlock = open_vault(cli)?;

    if !sherlock.file_system().group_exists(gid) {
        return Err(SherlockError::NoSuchGroup);
    }

    // Deleting the default group un-initializes the vault.
    if gid == DEFAULT_GROUP && !force {
        output::warning("'default' is required by every other command. Use --force to confirm.");
        return Ok(());
    }

    if !force
        && !confirm(&format!(
            "Delete group '{gid}' and all of its accounts? This cannot be undone"
        ))?
    {
        output::info("Cancelled.");
        return Ok(());
    }

    sherlock.delete_group(gid)?;
    output::success(&format!("Deleted group '{gid}'"));

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SherlockError::CommandFailed(format!("confirm prompt: {e}")))
}
