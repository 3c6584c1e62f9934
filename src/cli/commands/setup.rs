//! `sherlock setup`: create the vault root and its `default` group.

use crate::cli::output;
use crate::cli::{open_sherlock, prompt_new_group_key, Cli};
use crate::errors::{Result, SherlockError};
use crate::vault::DEFAULT_GROUP;

/// Execute the `setup` command.
pub fn execute(cli: &Cli, insecure: bool) -> Result<()> {
    let sherlock = open_sherlock(cli)?;

    // 1. Refuse to overwrite an existing vault.
    if sherlock.is_set_up().is_ok() {
        output::tip("Use `sherlock add group <name>` to add another group.");
        return Err(SherlockError::GroupExists(DEFAULT_GROUP.to_string()));
    }

    // 2. Choose the key of the default group.
    let group_key = prompt_new_group_key(DEFAULT_GROUP)?;
    if !insecure {
        sherlock.policy().check(&group_key)?;
    }

    // 3. Seal the empty default group and write it.
    sherlock.setup(&group_key)?;
    output::success(&format!(
        "Vault created at {}",
        sherlock.file_system().root().display()
    ));

    output::tip("Run `sherlock add account default@<name>` to store a first account.");
    output::tip("Run `sherlock add group <name>` to create a group with its own key.");

    Ok(())
}
