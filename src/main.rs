use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use msgboard::{logging, server, storage, Config};

#[derive(Parser)]
#[command(name = "msgboard")]
#[command(about = "Minimal message board: shows the latest message and accepts new ones", version)]
struct Cli {
    /// Config file (defaults to ./msgboard.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8000
        #[arg(short, long)]
        bind: Option<String>,

        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Create the database and schema
    Init {
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Store a message
    Post { content: String },

    /// Show the latest message
    Latest,

    /// List recent messages, newest first
    Log {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "❌ Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Serve {
        bind: None,
        database: None,
    });

    match command {
        Commands::Serve { bind, database } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(database) = database {
                config.database = database;
            }

            let _guard = logging::init(&config)?;
            println!(
                "{}",
                format!("🌐 Starting board on {}...", config.bind).cyan().bold()
            );
            server::start(&config).await?;
        }

        Commands::Init { database } => {
            if let Some(database) = database {
                config.database = database;
            }

            storage::init(&config.database).await?;
            println!(
                "{} Database ready at {}",
                "✓".green(),
                config.database.display().to_string().bright_white()
            );
        }

        Commands::Post { content } => {
            let id = storage::post(&config.database, &content).await?;
            println!("{} Stored message {}", "✓".green(), id.to_string().bright_yellow());
        }

        Commands::Latest => {
            storage::show_latest(&config.database).await?;
        }

        Commands::Log { limit } => {
            storage::show_log(&config.database, limit).await?;
        }
    }

    Ok(())
}
