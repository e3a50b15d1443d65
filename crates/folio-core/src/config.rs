//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content source locations.
    #[serde(default)]
    pub content: ContentConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Related-content settings.
    #[serde(default)]
    pub related: RelatedConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site owner's name.
    #[serde(default)]
    pub author: Option<String>,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Where content is read from, relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory of book Markdown files.
    #[serde(default = "default_books_dir")]
    pub books_dir: String,

    /// TOML file listing courses.
    #[serde(default = "default_courses_file")]
    pub courses_file: String,

    /// Directory of static files copied or served as-is.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Related-content configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedConfig {
    /// Maximum related items shown on a detail page.
    #[serde(default = "default_related_limit")]
    pub limit: usize,
}

fn default_books_dir() -> String {
    "content/books".to_string()
}

fn default_courses_file() -> String {
    "content/courses.toml".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_related_limit() -> usize {
    3
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            books_dir: default_books_dir(),
            courses_file: default_courses_file(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: default_related_limit(),
        }
    }
}

impl Config {
    /// Create a configuration with defaults for everything but the site.
    pub fn new(title: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                base_url: base_url.into(),
                author: None,
                description: None,
            },
            content: ContentConfig::default(),
            build: BuildConfig::default(),
            related: RelatedConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, letting `FOLIO__SECTION__KEY` variables override the file.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(path, None)
    }

    /// Layer `env` (or the process environment when `None`) over the file.
    fn load_layered(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
