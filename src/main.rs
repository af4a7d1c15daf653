//! CLI entry point for vellum

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "vellum")]
#[command(version)]
#[command(about = "A small personal blog server", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List discovered posts
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "vellum=debug,info"
    } else {
        "vellum=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(cwd) => cwd,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = vellum::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            vellum::server::start(&blog, &ip, port).await?;
        }

        Commands::List => {
            let blog = vellum::Blog::new(&base_dir)?;
            let posts = blog.repository().list_posts()?;
            if posts.is_empty() {
                println!("No posts found in {:?}", blog.posts_dir);
            }
            for post in posts {
                println!(
                    "{}  {:24}  {}",
                    post.date.format("%Y-%m-%d %H:%M"),
                    post.slug,
                    post.title
                );
            }
        }
    }

    Ok(())
}
