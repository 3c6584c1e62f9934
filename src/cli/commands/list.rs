//! `sherlock list`: list groups, or the accounts of one group.

use crate::cli::output;
use crate::cli::{open_vault, prompt_group_key, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, group: Option<&str>) -> Result<()> {
    let sherlock = open_vault(cli)?;

    let Some(gid) = group else {
        let groups = sherlock.read_registered_groups()?;
        output::print_groups(&groups);
        return Ok(());
    };

    let group_key = prompt_group_key(gid)?;
    let group = sherlock.load_group(gid, &group_key)?;

    if group.is_empty() {
        output::info(&format!("No accounts in '{gid}' yet."));
        output::tip(&format!("Run `sherlock add account {gid}@<account>` to add one."));
        return Ok(());
    }

    output::info(&format!("{gid}: {} account(s)", group.len()));
    output::print_accounts_table(&group.summaries());

    Ok(())
}
