use clap::Parser;
use sherlock::cli::{AddTarget, Cli, Commands, DeleteTarget, UpdateField};
use sherlock::cli::commands::{add, completions, delete, get, list, setup, update};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr and never include keys or secrets.
    // RUST_LOG=sherlock=debug for the full load/mutate/persist trace.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sherlock=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Setup { insecure } => setup::execute(&cli, insecure),
        Commands::Add { ref target } => match target {
            AddTarget::Group { ref name, insecure } => add::execute_group(&cli, name, *insecure),
            AddTarget::Account {
                ref query,
                ref tag,
                insecure,
            } => add::execute_account(&cli, query, tag, *insecure),
        },
        Commands::Get { ref query } => get::execute(&cli, query),
        Commands::List { ref group } => list::execute(&cli, group.as_deref()),
        Commands::Update { ref field } => match field {
            UpdateField::Password { ref query, insecure } => {
                update::execute_password(&cli, query, *insecure)
            }
            UpdateField::Name {
                ref query,
                ref new_name,
            } => update::execute_name(&cli, query, new_name),
            UpdateField::Tag {
                ref query,
                ref new_tag,
            } => update::execute_tag(&cli, query, new_tag),
        },
        Commands::Delete { ref target } => match target {
            DeleteTarget::Account { ref query, force } => {
                delete::execute_account(&cli, query, *force)
            }
            DeleteTarget::Group { ref gid, force } => delete::execute_group(&cli, gid, *force),
        },
        Commands::Completions { shell } => completions::execute(shell),
    };

    if let Err(e) = result {
        sherlock::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
