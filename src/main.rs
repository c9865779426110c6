//! Bare Git Viewer - browse and create bare repositories under one root
//!
//! # Usage
//! ```bash
//! bare-git-viewer serve --root /srv/git            # Start the API server
//! bare-git-viewer create demo --description "Demo" # Create /srv/git/demo.git
//! bare-git-viewer list                             # List bare repositories
//! bare-git-viewer info demo --branch main          # Print metadata as JSON
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bare_git_viewer::git::{CreateOptions, RepoStore};
use bare_git_viewer::models::RemoteSpec;
use bare_git_viewer::routes;

/// Bare Git Viewer - Browse bare repositories over HTTP
#[derive(Parser)]
#[command(name = "bare-git-viewer")]
#[command(about = "Browse and create bare git repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the `<name>.git` repositories
    #[arg(short, long, global = true, env = "BARE_GIT_VIEWER_ROOT", default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Create a new bare repository
    Create {
        /// Repository name, stored as `<root>/<name>.git`
        name: String,

        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,

        /// Remote to register, as NAME=URL
        #[arg(long, value_parser = parse_remote)]
        remote: Option<RemoteSpec>,

        /// Record an empty initial commit on HEAD
        #[arg(long)]
        initial_commit: bool,
    },
    /// List bare repositories under the root
    List,
    /// Print repository metadata as JSON
    Info {
        name: String,

        /// Branch to count commits from
        #[arg(short, long, default_value = "HEAD")]
        branch: String,
    },
}

fn parse_remote(value: &str) -> Result<RemoteSpec, String> {
    match value.split_once('=') {
        Some((name, url)) if !name.is_empty() && !url.is_empty() => Ok(RemoteSpec {
            name: name.to_string(),
            url: url.to_string(),
        }),
        _ => Err(format!("expected NAME=URL, got '{}'", value)),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(store: RepoStore, host: &str, port: u16) -> anyhow::Result<()> {
    let canonical_root = std::fs::canonicalize(store.root())
        .unwrap_or_else(|_| store.root().to_path_buf())
        .to_string_lossy()
        .to_string();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(Arc::new(store)))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Bare Git Viewer");
    println!();
    println!("  Root:   {}", canonical_root);
    println!("  Server: http://{}", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let store = RepoStore::new(&cli.root);

    match cli.command {
        Commands::Serve { port, host } => serve(store, &host, port).await?,
        Commands::Create {
            name,
            description,
            remote,
            initial_commit,
        } => {
            let options = CreateOptions {
                description,
                remote,
                initial_commit,
            };
            let repo = store.create(&name, &options)?;
            println!("✓ Created {}", repo.path().display());
        }
        Commands::List => {
            for name in store.list()? {
                println!("{}", name);
            }
        }
        Commands::Info { name, branch } => {
            let repo = store.open(&name)?;
            match repo.info(&branch)? {
                Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
                None => {
                    eprintln!("✗ {} is not a bare repository", name);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
