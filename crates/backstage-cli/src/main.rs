use anyhow::{Context, Result};
use backstage_core::model::{
    Analytics, Contact, ContentPost, Expense, Gig, Goal, Income, Release, Task, Track,
};
use backstage_store::{Config, NoteStore, RecordStore};
use clap::Parser;
use std::path::PathBuf;

mod commands;

use commands::collection::{self, RecordAction};

#[derive(Debug, Parser)]
#[command(name = "backstage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (default: ~/.config/backstage/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a throwaway in-memory store instead of the hosted datastore
    #[arg(long, global = true)]
    memory: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// To-do items across studio, marketing, admin and the rest
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Live performance bookings
    Gigs {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Planned and past releases
    Releases {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Song catalog
    Catalog {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Industry contacts
    Contacts {
        #[command(subcommand)]
        action: ContactAction,
    },
    /// Income entries
    Income {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Expense entries
    Expenses {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Monthly audience and revenue snapshots
    Analytics {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Career goals
    Goals {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Content calendar
    Posts {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Notes kept in the datastore, addressed by key
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Local notepad drafts (never leave this machine)
    Pad {
        #[command(subcommand)]
        action: PadAction,
    },
    /// Summary across every collection
    ///
    /// Loads all collections at once and prints booking, task, release,
    /// catalog and money totals plus the month-over-month change of each
    /// analytics metric.
    Dashboard,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum TaskAction {
    #[command(flatten)]
    Record(RecordAction),
    /// Show tasks matching a board filter: "All", a status or a category
    Board { filter: String },
    /// Flip a task between Done and To Do
    Toggle { id: String },
}

#[derive(Debug, clap::Subcommand)]
enum ContactAction {
    #[command(flatten)]
    Record(RecordAction),
    /// Search contacts by name, role or company
    Search { needle: String },
}

#[derive(Debug, clap::Subcommand)]
enum NoteAction {
    /// List every note
    List,
    /// Print the note under a key
    Get { key: String },
    /// Create or replace the note under a key
    Set { key: String, content: String },
}

#[derive(Debug, clap::Subcommand)]
enum PadAction {
    /// List stored keys, then the well-known ones not yet written
    List,
    /// Print the text under a key
    Get { key: String },
    /// Store text under a key
    Set { key: String, text: String },
    /// Remove a key
    Rm { key: String },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show current effective configuration
    Show,
    /// Show config file path
    Path,
    /// Show example configuration
    Example,
    /// Create the config file with defaults
    Init,
    /// Set a config value
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(backstage_store::config::config_file_path);
    let config = Config::load_from(&config_path)?;

    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))?;

    // Commands that never touch the datastore.
    match &cli.command {
        Commands::Config { action } => {
            return match action {
                ConfigAction::Show => commands::config::show_config(&config, &config_path),
                ConfigAction::Path => commands::config::show_path(&config_path),
                ConfigAction::Example => commands::config::show_example(),
                ConfigAction::Init => commands::config::init_config(&config_path),
                ConfigAction::Set { key, value } => {
                    commands::config::set_config(&config_path, key, value)
                }
            };
        }
        Commands::Pad { action } => {
            let pad = backstage_store::Notepad::load(&config.notepad_path)
                .context("Failed to open notepad")?;
            return match action {
                PadAction::List => commands::pad::list(&pad),
                PadAction::Get { key } => commands::pad::get(&pad, key),
                PadAction::Set { key, text } => commands::pad::set(pad, key, text),
                PadAction::Rm { key } => commands::pad::remove(pad, key),
            };
        }
        _ => {}
    }

    let backend = commands::open_backend(&config, cli.memory)?;

    match cli.command {
        Commands::Tasks { action } => {
            let store = RecordStore::<Task>::new(backend);
            match action {
                TaskAction::Record(action) => collection::run(&store, action).await?,
                TaskAction::Board { filter } => collection::board(&store, &filter).await?,
                TaskAction::Toggle { id } => collection::toggle(&store, &id).await?,
            }
        }
        Commands::Gigs { action } => {
            collection::run(&RecordStore::<Gig>::new(backend), action).await?;
        }
        Commands::Releases { action } => {
            collection::run(&RecordStore::<Release>::new(backend), action).await?;
        }
        Commands::Catalog { action } => {
            collection::run(&RecordStore::<Track>::new(backend), action).await?;
        }
        Commands::Contacts { action } => {
            let store = RecordStore::<Contact>::new(backend);
            match action {
                ContactAction::Record(action) => collection::run(&store, action).await?,
                ContactAction::Search { needle } => collection::search(&store, &needle).await?,
            }
        }
        Commands::Income { action } => {
            collection::run(&RecordStore::<Income>::new(backend), action).await?;
        }
        Commands::Expenses { action } => {
            collection::run(&RecordStore::<Expense>::new(backend), action).await?;
        }
        Commands::Analytics { action } => {
            collection::run(&RecordStore::<Analytics>::new(backend), action).await?;
        }
        Commands::Goals { action } => {
            collection::run(&RecordStore::<Goal>::new(backend), action).await?;
        }
        Commands::Posts { action } => {
            collection::run(&RecordStore::<ContentPost>::new(backend), action).await?;
        }
        Commands::Note { action } => {
            let notes = NoteStore::new(backend);
            match action {
                NoteAction::List => commands::note::list(&notes).await?,
                NoteAction::Get { key } => commands::note::get(&notes, &key).await?,
                NoteAction::Set { key, content } => {
                    commands::note::set(&notes, &key, content).await?;
                }
            }
        }
        Commands::Dashboard => commands::dashboard::show_dashboard(backend).await?,
        Commands::Config { .. } | Commands::Pad { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_collection_commands() {
        let cli = Cli::parse_from([
            "backstage",
            "--memory",
            "gigs",
            "list",
            "--order",
            "pay",
            "--desc",
        ]);
        assert!(cli.memory);
        assert!(matches!(
            cli.command,
            Commands::Gigs {
                action: RecordAction::List { desc: true, .. }
            }
        ));

        let cli = Cli::parse_from(["backstage", "tasks", "toggle", "42"]);
        assert!(matches!(
            cli.command,
            Commands::Tasks {
                action: TaskAction::Toggle { .. }
            }
        ));

        let cli = Cli::parse_from(["backstage", "tasks", "rm", "42"]);
        assert!(matches!(
            cli.command,
            Commands::Tasks {
                action: TaskAction::Record(RecordAction::Rm { .. })
            }
        ));
    }

    #[test]
    fn test_desc_requires_order() {
        assert!(Cli::try_parse_from(["backstage", "gigs", "list", "--desc"]).is_err());
    }
}
