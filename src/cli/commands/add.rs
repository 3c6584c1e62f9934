//! `sherlock add`: create a group or add an account to one.

use crate::cli::output;
use crate::cli::{open_vault, prompt_group_key, prompt_new_group_key, read_secret, Cli};
use crate::errors::Result;
use crate::vault::{validate_account_name, Account, Query, StateMutation};

/// Execute `sherlock add group <name>`.
pub fn execute_group(cli: &Cli, name: &str, insecure: bool) -> Result<()> {
    let sherlock = open_vault(cli)?;

    let group_key = prompt_new_group_key(name)?;
    sherlock.setup_group(name, &group_key, insecure)?;

    output::success(&format!("Group '{name}' created"));
    output::tip(&format!("Run `sherlock add account {name}@<account>` to fill it."));

    Ok(())
}

/// Execute `sherlock add account <group@account>`.
pub fn execute_account(cli: &Cli, query: &str, tag: &str, insecure: bool) -> Result<()> {
    let sherlock = open_vault(cli)?;
    let parsed = Query::parse(query)?;
    validate_account_name(parsed.account)?;

    // Check the group key before asking for anything else.
    let group_key = prompt_group_key(parsed.gid)?;
    sherlock.check_group_key(query, &group_key)?;

    let secret = read_secret(&format!("({query}) password"))?;
    if !insecure {
        sherlock.policy().check(&secret)?;
    }

    let account = Account::new(parsed.account, tag, secret.as_str());
    sherlock.update_state(query, &group_key, StateMutation::AddAccount(account))?;

    output::success(&format!("Account '{}' added to '{}'", parsed.account, parsed.gid));

    Ok(())
}
