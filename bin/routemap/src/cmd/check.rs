//! Check command - validate the route configuration

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use routemap_core::SitemapFile;
use routemap_generator::template::{is_dynamic, placeholders};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
    static_routes: usize,
    dynamic_routes: usize,
    bindings: usize,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads the configuration and reports routes that would produce no URLs or
/// malformed URLs.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking route configuration");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match SitemapFile::load(config_path) {
        Ok(file) => {
            println!("  ✓ Configuration valid");
            println!("\nChecking routes...");
            check_routes(&file, &mut result);
            println!(
                "  {} static, {} dynamic ({} bindings)",
                result.static_routes, result.dynamic_routes, result.bindings
            );
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    println!();
    if result.has_warnings() {
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
        println!();
    }
    if result.has_errors() {
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
        println!();
    }

    if result.has_errors() {
        bail!("Check failed with {} error(s)", result.errors.len());
    }
    if strict && result.has_warnings() {
        bail!(
            "Check failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!("All checks passed!");
    Ok(())
}

fn check_routes(file: &SitemapFile, result: &mut ValidationResult) {
    for (pattern, route) in &file.routes {
        if let Some(priority) = route
            .options
            .priority
            .filter(|p| !(0.0..=1.0).contains(p))
        {
            result.add_warning(format!("{pattern}: priority {priority} is outside 0.0-1.0"));
        }

        if !is_dynamic(pattern) {
            result.static_routes += 1;
            if route.params.is_some() {
                result.add_warning(format!("{pattern}: params are ignored on a static route"));
            }
            continue;
        }

        result.dynamic_routes += 1;
        let Some(bindings) = &route.params else {
            result.add_warning(format!("{pattern}: dynamic route has no params and is skipped"));
            continue;
        };

        let declared = placeholders(pattern);
        for (index, binding) in bindings.iter().enumerate() {
            result.bindings += 1;
            for name in &declared {
                if !binding.contains_key(*name) {
                    result.add_warning(format!(
                        "{pattern}: binding #{index} has no value for ${name}, the URL keeps the placeholder"
                    ));
                }
            }
            for key in binding.keys() {
                if !declared.contains(&key.as_str()) {
                    result.add_warning(format!(
                        "{pattern}: binding #{index} sets unused parameter {key}"
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> SitemapFile {
        toml::from_str(content).expect("parse config")
    }

    #[test]
    fn test_check_clean_config() {
        let file = load(
            r#"
[defaults]
base_url = "https://example.com"

[routes."/about"]
priority = 0.6

[routes."/posts/$id"]
params = [{ id = "1" }]
"#,
        );
        let mut result = ValidationResult::default();
        check_routes(&file, &mut result);

        assert!(!result.has_warnings(), "{:?}", result.warnings);
        assert_eq!(result.static_routes, 1);
        assert_eq!(result.dynamic_routes, 1);
        assert_eq!(result.bindings, 1);
    }

    #[test]
    fn test_check_reports_missing_placeholder() {
        let file = load(
            r#"
[defaults]
base_url = "https://example.com"

[routes."/user/$userId/profile/$section"]
params = [{ userId = "42", extra = "x" }]
"#,
        );
        let mut result = ValidationResult::default();
        check_routes(&file, &mut result);

        assert!(result.warnings.iter().any(|w| w.contains("$section")));
        assert!(result.warnings.iter().any(|w| w.contains("unused parameter extra")));
    }

    #[test]
    fn test_check_reports_route_shape_problems() {
        let file = load(
            r#"
[defaults]
base_url = "https://example.com"

[routes."/posts/$id"]
priority = 2.0

[routes."/about"]
params = [{ id = "1" }]
"#,
        );
        let mut result = ValidationResult::default();
        check_routes(&file, &mut result);

        assert!(result.warnings.iter().any(|w| w.contains("has no params")));
        assert!(result.warnings.iter().any(|w| w.contains("outside 0.0-1.0")));
        assert!(result.warnings.iter().any(|w| w.contains("ignored on a static route")));
    }

    #[test]
    fn test_run_strict_fails_on_warnings() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("sitemap.toml");
        std::fs::write(
            &config_path,
            "[defaults]\nbase_url = \"https://example.com\"\n\n[routes.\"/posts/$id\"]\n",
        )
        .expect("write config");

        assert!(run(&config_path, false).is_ok());
        assert!(run(&config_path, true).is_err());
    }

    #[test]
    fn test_run_missing_config_fails() {
        assert!(run(Path::new("/nonexistent/sitemap.toml"), false).is_err());
    }
}
