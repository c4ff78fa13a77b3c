//! routemap CLI Library
//!
//! Command implementations for the `routemap` binary. The binary loads a
//! TOML route configuration, generates the sitemap and persists it.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # async fn run() -> color_eyre::eyre::Result<()> {
//! routemap::cmd::build::run(Path::new("sitemap.toml"), Path::new("public"), None).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;

pub use routemap_core::{SitemapConfig, SitemapFile};
pub use routemap_generator::{generate_sitemap, write_sitemap};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
