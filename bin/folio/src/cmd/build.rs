//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{BuildStats, Builder};

use super::site_root;

/// Run the build command.
///
/// Builds the static site from the content next to `config_path`.
pub fn run(config_path: &Path, output: Option<&Path>, base_url: Option<&str>) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?base_url, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base_url from CLI");
        config.site.base_url = url.to_string();
    }

    tracing::debug!(?config, "Loaded configuration");

    let root = site_root(config_path);
    let output = match output {
        Some(dir) => dir.to_path_buf(),
        None => root.join(&config.build.output_dir),
    };

    let stats = Builder::new(config, &root, &output)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:      {}", stats.pages);
    println!("  Redirects:  {}", stats.redirects);
    println!("  Not found:  {}", stats.not_found_pages);
    println!("  Assets:     {}", stats.assets);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[site]\ntitle = \"Shelf\"\nbase_url = \"https://shelf.dev\"\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("content/books")).unwrap();
        fs::write(
            dir.path().join("content/books/dune.md"),
            "---\ntitle: Dune\n---\nSpice.",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_build_into_configured_output() {
        let dir = site();

        let stats = run(&dir.path().join("config.toml"), None, None).unwrap();

        assert_eq!(stats.pages, 3);
        assert!(dir.path().join("public/books/dune/index.html").exists());
    }

    #[test]
    fn test_build_overrides() {
        let dir = site();
        let output = TempDir::new().unwrap();

        run(
            &dir.path().join("config.toml"),
            Some(output.path()),
            Some("https://other.dev"),
        )
        .unwrap();

        let page = fs::read_to_string(output.path().join("books/dune/index.html")).unwrap();
        assert!(page.contains(r#"href="https://other.dev/books/dune""#));
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_build_missing_config() {
        let dir = TempDir::new().unwrap();
        assert!(run(&dir.path().join("config.toml"), None, None).is_err());
    }
}
