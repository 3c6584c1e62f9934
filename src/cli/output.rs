//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::AccountSummary;

/// Date format used in account tables.
const DATE_LAYOUT: &str = "%A, %d. %B %Y";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of accounts (Group, Account, Tag, Created).
pub fn print_accounts_table(accounts: &[AccountSummary]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Group", "Account", "Tag", "Created"]);

    for a in accounts {
        table.add_row(vec![
            a.gid.clone(),
            a.name.clone(),
            format!("#{}", a.tag),
            a.created_on.format(DATE_LAYOUT).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print registered group names, one per line.
pub fn print_groups(groups: &[String]) {
    if groups.is_empty() {
        info("No groups registered.");
        tip("Run `sherlock add group <name>` to create one.");
        return;
    }

    info(&format!("{} group(s):", groups.len()));
    for gid in groups {
        println!("  {gid}");
    }
}
