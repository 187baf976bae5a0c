//! flashquiz CLI — flashcards and quizzes from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flashquiz", version, about = "Flashcard and quiz client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a quiz over your cards
    Quiz {
        /// Only cards with these label ids (comma-separated)
        #[arg(long)]
        labels: Option<String>,

        /// Include cards without labels
        #[arg(long)]
        include_unlabeled: bool,

        /// Seed for reproducible question selection
        #[arg(long)]
        seed: Option<u64>,

        /// Quiz over a local JSON deck instead of the server
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List your cards
    Cards {
        /// Only cards with these label ids (comma-separated)
        #[arg(long)]
        labels: Option<String>,

        /// Include cards without labels
        #[arg(long)]
        include_unlabeled: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List your labels, including ones shared with you
    Labels {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the logged-in user
    Whoami {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List question types
    Types,

    /// Print the theme as CSS custom properties
    Theme {
        /// Output format: css, json
        #[arg(long, default_value = "css")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available card icons
    Icons,

    /// List app routes and their access rules
    Routes,

    /// Create starter config and example deck
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            labels,
            include_unlabeled,
            seed,
            deck,
            format,
            config,
        } => commands::quiz::execute(labels, include_unlabeled, seed, deck, format, config).await,
        Commands::Cards {
            labels,
            include_unlabeled,
            config,
        } => commands::cards::execute(labels, include_unlabeled, config).await,
        Commands::Labels { config } => commands::labels::execute(config).await,
        Commands::Whoami { config } => commands::whoami::execute(config).await,
        Commands::Types => commands::types::execute(),
        Commands::Theme { format, config } => commands::theme::execute(format, config),
        Commands::Icons => commands::icons::execute(),
        Commands::Routes => commands::routes::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
