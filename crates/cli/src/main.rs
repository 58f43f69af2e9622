//! noievoi CLI - seeding and management tools for the content store.
//!
//! # Usage
//!
//! ```bash
//! # Write the seed dataset into a fresh data directory
//! noievoi-cli seed
//!
//! # Overwrite existing data with the seed dataset
//! noievoi-cli seed --force
//!
//! # List content shown on the services page
//! noievoi-cli content list --page services
//!
//! # Manage admin users
//! noievoi-cli admin list
//! noievoi-cli admin create -e ops@noievoi.com -p s3cret -n "Ops"
//! noievoi-cli admin delete -e ops@noievoi.com
//!
//! # Try the chatbot against the configured questions
//! noievoi-cli chatbot ask "where are you based"
//! ```
//!
//! Every command works on the directory given by `--data-dir`
//! (or `NOIEVOI_DATA_DIR`), the same one the site reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use noievoi_core::Page;
use secrecy::SecretString;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "noievoi-cli")]
#[command(author, version, about = "noievoi CLI tools")]
struct Cli {
    /// Directory holding the JSON data files
    #[arg(long, global = true, env = "NOIEVOI_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the seed dataset
    Seed {
        /// Replace data that already exists
        #[arg(long)]
        force: bool,
    },
    /// Inspect page content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Exercise the chatbot
    Chatbot {
        #[command(subcommand)]
        action: ChatbotAction,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// List content items
    List {
        /// Only items shown on this page (home, services, team, global)
        #[arg(short, long)]
        page: Option<Page>,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List admin users
    List,
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Login password
        #[arg(short, long)]
        password: String,

        /// Admin display name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete an admin user
    Delete {
        /// Admin email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum ChatbotAction {
    /// Print the reply to a message
    Ask {
        /// Message as a visitor would type it
        query: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "noievoi_cli=info,noievoi_site=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(lines) => print_lines(&lines),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Vec<String>, CliError> {
    if let Commands::Seed { force } = cli.command {
        commands::seed::run(&cli.data_dir, force)?;
        return Ok(Vec::new());
    }

    let mut store = commands::open_store(&cli.data_dir)?;
    let lines = match cli.command {
        Commands::Seed { .. } => Vec::new(),
        Commands::Content { action } => match action {
            ContentAction::List { page } => commands::content::list(&store, page),
        },
        Commands::Admin { action } => match action {
            AdminAction::List => commands::admin::list(&store),
            AdminAction::Create {
                email,
                password,
                name,
            } => {
                let password = SecretString::from(password);
                commands::admin::create_user(&mut store, &email, &password, name.as_deref())?;
                Vec::new()
            }
            AdminAction::Delete { email } => {
                commands::admin::delete_user(&mut store, &email)?;
                Vec::new()
            }
        },
        Commands::Chatbot { action } => match action {
            ChatbotAction::Ask { query } => vec![commands::chatbot::ask(&store, &query)],
        },
    };
    Ok(lines)
}

#[allow(clippy::print_stdout)]
fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
