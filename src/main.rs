//! Warren CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "warren")]
#[command(about = "Track your reference rabbit holes as a browsable page forest", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the history (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the JSON API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "7878")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },
    /// Record a page, optionally under a parent
    Add {
        /// Page title (unique within the history)
        title: String,

        /// Title of the page this one was reached from
        #[arg(short, long)]
        parent: Option<String>,

        /// Explicit address; derived from the title when omitted
        #[arg(short, long)]
        url: Option<String>,
    },
    /// List all recorded pages in insertion order
    List,
    /// Show the details of one page
    Show {
        /// Page title
        title: String,
    },
    /// Print the exploration forest with its layout coordinates
    Tree,
    /// Open a page's URL in the browser
    Open {
        /// Page title
        title: String,
    },
    /// Delete the recorded history
    Clear,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("warren={}", log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Warren v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("History root: {}", cli.root.display());

    match cli.command {
        Commands::Serve { port, host, open } => {
            commands::serve(cli.root, host, port, open).await
        }
        Commands::Add { title, parent, url } => {
            commands::add(cli.root, &title, parent.as_deref(), url.as_deref())
        }
        Commands::List => {
            commands::list(cli.root)
        }
        Commands::Show { title } => {
            commands::show(cli.root, &title)
        }
        Commands::Tree => {
            commands::tree(cli.root)
        }
        Commands::Open { title } => {
            commands::open_page(cli.root, &title)
        }
        Commands::Clear => {
            commands::clear(cli.root)
        }
        Commands::Version => {
            println!("Warren v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
