//! folio CLI
//!
//! Builds and serves a personal bookshelf and course portfolio.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use folio_core::ContentKind;

/// Command-line interface for folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Build and serve a personal bookshelf and course portfolio"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Override site base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Serve pages straight from the loaded content
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Scaffold a new book or course
    New {
        /// Title of the new item
        title: String,
        /// What to create
        #[arg(short, long, value_enum, default_value_t = NewKind::Book)]
        kind: NewKind,
    },
}

/// Kind of item the `new` command scaffolds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum NewKind {
    Book,
    Course,
}

impl From<NewKind> for ContentKind {
    fn from(kind: NewKind) -> Self {
        match kind {
            NewKind::Book => ContentKind::Book,
            NewKind::Course => ContentKind::Course,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, base_url } => {
            folio::cmd::build::run(&cli.config, output.as_deref(), base_url.as_deref())?;
        }
        Commands::Serve { port } => {
            folio::cmd::serve::run(&cli.config, port).await?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::New { title, kind } => {
            folio::cmd::new::run(&cli.config, &title, kind.into())?;
        }
    }

    Ok(())
}
