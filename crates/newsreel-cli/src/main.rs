use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newsreel_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "newsreel")]
#[command(author, version, about = "A terminal news reader with a breaking news carousel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        /// Category for the headline list (e.g., sports, science)
        #[arg(short = 'c', long)]
        category: Option<String>,
    },
    /// Print the latest headlines
    Headlines {
        /// Category filter, repeatable
        #[arg(short = 'c', long = "category")]
        categories: Vec<String>,
        /// Country code filter, repeatable
        #[arg(short = 'C', long = "country")]
        countries: Vec<String>,
        /// Free-text search
        #[arg(short = 'q', long)]
        query: Option<String>,
        /// Number of articles to request
        #[arg(short = 'n', long)]
        size: Option<u32>,
    },
    /// List bookmarked articles
    Saved,
    /// Toggle a bookmark by article id
    Bookmark {
        /// Article id as reported by `headlines`
        id: String,
    },
    /// Write the current configuration to the config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // The TUI owns the terminal, so it logs to a file instead
    let tui = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, tui)?;

    // Initialize database
    let db = Arc::new(Database::new(&config).await?);

    match cli.command {
        Some(Commands::Run { category }) => commands::run::run(config, db, category).await,
        None => commands::run::run(config, db, None).await,
        Some(Commands::Headlines {
            categories,
            countries,
            query,
            size,
        }) => {
            let filters = commands::headlines::Filters {
                categories,
                countries,
                query,
                size,
            };
            commands::headlines::run(&db, &config, filters).await
        }
        Some(Commands::Saved) => commands::saved::run(&db, &config).await,
        Some(Commands::Bookmark { id }) => commands::bookmark::run(&db, &id).await,
        Some(Commands::Init) => {
            config.save()?;
            println!("Wrote {}", AppConfig::config_path().display());
            Ok(())
        }
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
