//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{resolve_root, Settings};
use crate::errors::{Result, SherlockError};
use crate::store::LocalFileSystem;
use crate::vault::{Sherlock, VaultCodec};

/// Environment variable consulted for the group key before prompting.
pub const GROUP_KEY_ENV: &str = "SHERLOCK_GROUP_KEY";

/// Sherlock CLI: credential vault with one key per group.
#[derive(Parser)]
#[command(
    name = "sherlock",
    about = "Credential vault with per-group encryption keys",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory (default: ~/.sherlock)
    #[arg(long, env = "SHERLOCK_ROOT", global = true)]
    pub root: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the vault and its `default` group
    Setup {
        /// Allow a weak key for the default group
        #[arg(short, long)]
        insecure: bool,
    },

    /// Add a group or an account
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },

    /// Print an account's password
    Get {
        /// Account address (group@account)
        query: String,
    },

    /// List groups, or the accounts of one group
    List {
        /// Group to list (omit to list all groups)
        group: Option<String>,
    },

    /// Change an account's password, name or tag
    Update {
        #[command(subcommand)]
        field: UpdateField,
    },

    /// Delete an account or a whole group
    Delete {
        #[command(subcommand)]
        target: DeleteTarget,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Things that can be added.
#[derive(clap::Subcommand)]
pub enum AddTarget {
    /// Create a new group with its own key
    Group {
        /// Group name (lowercase letters, digits, '-', '_')
        name: String,
        /// Allow a weak group key
        #[arg(short, long)]
        insecure: bool,
    },

    /// Add an account to a group
    Account {
        /// Account address (group@account)
        query: String,
        /// Optional tag for the account
        #[arg(short, long, default_value = "")]
        tag: String,
        /// Allow a weak account password
        #[arg(short, long)]
        insecure: bool,
    },
}

/// Account fields that can be updated.
#[derive(clap::Subcommand)]
pub enum UpdateField {
    /// Change an account's password
    Password {
        /// Account address (group@account)
        query: String,
        /// Allow a weak account password
        #[arg(short, long)]
        insecure: bool,
    },

    /// Rename an account
    Name {
        /// Account address (group@account)
        query: String,
        /// New account name
        new_name: String,
    },

    /// Change an account's tag
    Tag {
        /// Account address (group@account)
        query: String,
        /// New tag (may be empty)
        new_tag: String,
    },
}

/// Things that can be deleted.
#[derive(clap::Subcommand)]
pub enum DeleteTarget {
    /// Delete an account
    Account {
        /// Account address (group@account)
        query: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a group and all of its accounts
    Group {
        /// Group name
        gid: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build a `Sherlock` for the configured root without checking setup.
pub fn open_sherlock(cli: &Cli) -> Result<Sherlock<LocalFileSystem>> {
    let root = resolve_root(cli.root.as_deref())?;
    let settings = Settings::load(&root)?;
    tracing::debug!(root = %root.display(), "using vault root");

    let codec = VaultCodec::new(settings.argon2_params());
    Ok(Sherlock::new(LocalFileSystem::new(root), codec).with_policy(settings.password_policy()))
}

/// Build a `Sherlock` and fail with `NotSetUp` if `sherlock setup` never ran.
pub fn open_vault(cli: &Cli) -> Result<Sherlock<LocalFileSystem>> {
    let sherlock = open_sherlock(cli)?;
    sherlock.is_set_up()?;
    Ok(sherlock)
}

/// Get the key of group `gid`, trying in order:
/// 1. `SHERLOCK_GROUP_KEY` env var (scripts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the key is wiped from memory on drop.
pub fn prompt_group_key(gid: &str) -> Result<Zeroizing<String>> {
    if let Some(key) = group_key_from_env() {
        return Ok(key);
    }

    let key = dialoguer::Password::new()
        .with_prompt(format!("({gid}) group key"))
        .interact()
        .map_err(|e| SherlockError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(key))
}

/// Prompt for a new group key with confirmation.
///
/// Also respects `SHERLOCK_GROUP_KEY` for scripted usage.
pub fn prompt_new_group_key(gid: &str) -> Result<Zeroizing<String>> {
    if let Some(key) = group_key_from_env() {
        return Ok(key);
    }

    let key = dialoguer::Password::new()
        .with_prompt(format!("({gid}) choose group key"))
        .with_confirmation(
            format!("({gid}) confirm group key"),
            "Keys do not match, try again",
        )
        .interact()
        .map_err(|e| SherlockError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(key))
}

/// Read an account password from piped stdin, or prompt for it.
pub fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
        if trimmed.is_empty() {
            return Err(SherlockError::CommandFailed(
                "no password received on stdin".into(),
            ));
        }
        return Ok(trimmed);
    }

    let secret = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| SherlockError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

fn group_key_from_env() -> Option<Zeroizing<String>> {
    std::env::var(GROUP_KEY_ENV)
        .ok()
        .filter(|key| !key.is_empty())
        .map(Zeroizing::new)
}
