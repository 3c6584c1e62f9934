//! `sherlock get`: print the password of one account.

use crate::cli::{open_vault, prompt_group_key, Cli};
use crate::errors::Result;
use crate::vault::Query;

/// Execute the `get` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    let sherlock = open_vault(cli)?;
    let gid = Query::parse(query)?.gid;

    let group_key = prompt_group_key(gid)?;
    let account = sherlock.get_account(query, &group_key)?;

    println!("{}", account.secret);

    Ok(())
}
