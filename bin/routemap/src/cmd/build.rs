//! Build command - generates sitemap.xml

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use routemap_core::SitemapFile;
use routemap_generator::{SitemapOutput, write_sitemap};

/// Run the build command.
///
/// Generates the sitemap from the route configuration and writes it to
/// `<output>/sitemap.xml`.
pub async fn run(
    config_path: &Path,
    output: &Path,
    base_url: Option<&str>,
) -> Result<SitemapOutput> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?base_url, "Starting sitemap build");

    let mut file = SitemapFile::load(config_path).wrap_err("Failed to load configuration")?;

    // Override base URL if specified via CLI
    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding base URL from CLI");
        file.defaults.base_url = url.to_string();
    }

    tracing::debug!(?file, "Loaded configuration");

    let config = file.into_config();
    let written = write_sitemap(&config, output)
        .await
        .wrap_err("Sitemap generation failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Sitemap generated successfully!");
    println!();
    println!("  URLs:       {}", written.urls);
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", written.path.display());
    println!();

    tracing::info!(urls = written.urls, ?duration, "Sitemap build completed");

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[defaults]
base_url = "https://example.com"

[routes."/"]
priority = 1.0

[routes."/docs/$page"]
params = [{ page = "intro" }, { page = "install" }]
"#;

    #[tokio::test]
    async fn test_build_writes_sitemap() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitemap.toml");
        std::fs::write(&config_path, CONFIG).expect("write config");
        let output = dir.path().join("public");

        let written = run(&config_path, &output, None).await.expect("build");

        assert_eq!(written.urls, 3);
        let xml = std::fs::read_to_string(output.join("sitemap.xml")).expect("read");
        assert!(xml.contains("<loc>https://example.com/docs/install</loc>"));
    }

    #[tokio::test]
    async fn test_build_base_url_override() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitemap.toml");
        std::fs::write(&config_path, CONFIG).expect("write config");
        let output = dir.path().join("dist");

        run(&config_path, &output, Some("https://staging.example.com/"))
            .await
            .expect("build");

        let xml = std::fs::read_to_string(output.join("sitemap.xml")).expect("read");
        assert!(xml.contains("<loc>https://staging.example.com/</loc>"));
        assert!(xml.contains("<loc>https://staging.example.com/docs/intro</loc>"));
    }

    #[tokio::test]
    async fn test_build_missing_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = run(&dir.path().join("missing.toml"), dir.path(), None).await;
        assert!(result.is_err());
    }
}
