//! routemap CLI
//!
//! Generates sitemap.xml from a declarative route configuration.
//!
//! This is the binary entry point. The command implementations are in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for routemap.
#[derive(Parser)]
#[command(
    name = "routemap",
    version,
    about = "Generate sitemap.xml from route configuration"
)]
struct Cli {
    /// Path to route configuration file
    #[arg(short, long, default_value = "sitemap.toml")]
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
    /// Generate sitemap.xml
    Build {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        output: std::path::PathBuf,
        /// Override the base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Validate the route configuration
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    routemap::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, base_url } => {
            routemap::cmd::build::run(&cli.config, &output, base_url.as_deref()).await?;
        }
        Commands::Check { strict } => {
            routemap::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
