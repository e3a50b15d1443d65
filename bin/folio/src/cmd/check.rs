//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_core::{Config, ContentItem, ContentRepository};
use folio_generator::ContentLoader;

use super::site_root;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Problems that stop the site from building.
    pub errors: Vec<String>,
    /// Content that builds but is incomplete.
    pub warnings: Vec<String>,
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
/// Validates configuration and all content files.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate the configuration and content of the site at `config_path`.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };
    check_config_values(&config, &mut result);

    let loader = ContentLoader::new(config, site_root(config_path));

    println!("\nChecking books...");
    let books = check_books(&loader, &mut result);

    println!("\nChecking courses...");
    let courses = match loader.load_courses() {
        Ok(items) => {
            println!("  ✓ {} course(s) parsed", items.len());
            check_collection("course", items, &mut result)
        }
        Err(e) => {
            println!("  ✗ Course list invalid");
            result.add_error(format!("{}: {e}", loader.courses_file().display()));
            Vec::new()
        }
    };

    check_completeness(&books, &courses, &mut result);
    result
}

/// Parse every book file separately, recording one error per bad file.
fn check_books(loader: &ContentLoader, result: &mut ValidationResult) -> Vec<ContentItem> {
    let files = match loader.book_files() {
        Ok(files) => files,
        Err(e) => {
            result.add_error(e.to_string());
            return Vec::new();
        }
    };

    let mut items = Vec::with_capacity(files.len());
    let mut failed = 0;
    for path in &files {
        match loader.load_book(path) {
            Ok(item) => items.push(item),
            Err(e) => {
                result.add_error(format!("{}: {e}", path.display()));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        println!("  ✓ All {} book file(s) valid", files.len());
    } else {
        println!("  ✗ {failed}/{} book file(s) have errors", files.len());
    }

    check_collection("book", items, result)
}

/// Reject slug collisions within one collection.
fn check_collection(
    label: &str,
    items: Vec<ContentItem>,
    result: &mut ValidationResult,
) -> Vec<ContentItem> {
    if let Err(e) = ContentRepository::new(items.clone()) {
        result.add_error(format!("{label}s: {e}"));
    }
    items
}

/// Warn about items that render with gaps.
fn check_completeness(books: &[ContentItem], courses: &[ContentItem], result: &mut ValidationResult) {
    for book in books {
        if book.metadata.tags.is_empty() {
            result.add_warning(format!(
                "Book \"{}\" has no genres and will never appear as related",
                book.title
            ));
        }
        if book.metadata.image.is_none() {
            result.add_warning(format!("Book \"{}\" has no cover image", book.title));
        }
    }

    for course in courses {
        if course.metadata.image.is_none() {
            result.add_warning(format!("Course \"{}\" has no cover image", course.title));
        }
        if course.metadata.href.is_none() {
            result.add_warning(format!("Course \"{}\" has no course link", course.title));
        }
    }
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.related.limit == 0 {
        result.add_warning("related.limit is 0, related books are never shown");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const CONFIG: &str = "[site]\ntitle = \"Shelf\"\nbase_url = \"https://shelf.dev\"\n";

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_clean_site_passes() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.toml", CONFIG);
        write(
            dir.path(),
            "content/books/dune.md",
            "---\ntitle: Dune\ngenre: [sci-fi]\nimage: /dune.jpg\n---\n",
        );
        write(
            dir.path(),
            "content/courses.toml",
            "[[courses]]\ntitle = \"ML\"\nhref = \"https://ml.dev\"\ncoverImage = \"/ml.png\"\n",
        );

        let config_path = dir.path().join("config.toml");
        let result = validate(&config_path);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert!(run(&config_path, true).is_ok());
    }

    #[test]
    fn test_missing_config_is_error() {
        let dir = TempDir::new().unwrap();
        let result = validate(&dir.path().join("config.toml"));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Configuration error"));
    }

    #[test]
    fn test_reports_every_bad_book() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.toml", CONFIG);
        write(dir.path(), "content/books/a.md", "---\nrating: 3\n---\n");
        write(dir.path(), "content/books/b.md", "---\ntitle: B\nrating: 9\n---\n");
        write(dir.path(), "content/books/c.md", "no frontmatter");

        let result = validate(&dir.path().join("config.toml"));
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors.iter().any(|e| e.contains("Invalid rating")));
    }

    #[test]
    fn test_duplicate_slugs_are_errors() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.toml", CONFIG);
        write(dir.path(), "content/books/a.md", "---\ntitle: Dune\n---\n");
        write(dir.path(), "content/books/b.md", "---\ntitle: \"Dune!\"\n---\n");

        let result = validate(&dir.path().join("config.toml"));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("books:"));
        assert!(run(&dir.path().join("config.toml"), false).is_err());
    }

    #[test]
    fn test_title_without_slug_is_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.toml", CONFIG);
        write(dir.path(), "content/books/aliens.md", "---\ntitle: 三体\n---\n");
        write(dir.path(), "content/books/dune.md", "---\ntitle: Dune\n---\n");

        let result = validate(&dir.path().join("config.toml"));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("books:"));
        assert!(result.errors[0].contains("no letters or digits"));
    }

    #[test]
    fn test_warnings_fail_only_in_strict_mode() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.toml", CONFIG);
        write(dir.path(), "content/books/dune.md", "---\ntitle: Dune\n---\n");
        write(
            dir.path(),
            "content/courses.toml",
            "[[courses]]\ntitle = \"ML\"\n",
        );

        let config_path = dir.path().join("config.toml");
        let result = validate(&config_path);
        assert!(result.errors.is_empty());
        // No genres, no cover, then no cover, no link.
        assert_eq!(result.warnings.len(), 4);

        assert!(run(&config_path, false).is_ok());
        assert!(run(&config_path, true).is_err());
    }
}
