//! CLI entry point for blogfront

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogfront")]
#[command(version)]
#[command(about = "Browse the blog's posts and routes from the command line", long_about = None)]
struct Cli {
    /// Directory holding _config.yml (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Site config file (defaults to _config.yml in the base directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the base path the site is served under, e.g. /blog/
    #[arg(long, global = true)]
    root: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, tags or routes
    List {
        /// Type of content to list (post, tag, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Resolve a path and print the page it shows
    #[command(alias = "s")]
    Show {
        /// URL path, e.g. /posts/hello-world
        path: String,

        /// Print the navigation event and page view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a markdown file ("-" for stdin)
    #[command(alias = "r")]
    Render {
        file: PathBuf,

        /// Print the plain-text excerpt instead of HTML
        #[arg(short, long)]
        excerpt: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogfront=debug,info"
    } else {
        "blogfront=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut blog = match cli.config {
        Some(path) => blogfront::Blog::load_config_file(&path)?,
        None => blogfront::Blog::load(&base_dir)?,
    };
    if let Some(root) = cli.root {
        blog.config.root = root;
    }

    match cli.command {
        Commands::List { r#type } => {
            blogfront::commands::list::run(&blog, &r#type)?;
        }

        Commands::Show { path, json } => {
            tracing::debug!("Showing {}", path);
            blogfront::commands::show::run(&blog, &path, json)?;
        }

        Commands::Render { file, excerpt } => {
            blogfront::commands::render::run(&blog, &file, excerpt)?;
        }

        Commands::Version => {
            println!("blogfront version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
