//! Content loading.
//!
//! Reads book files and the course list from disk and builds the immutable
//! [`SiteContent`] snapshot the rest of the site works from.

use std::{
    fs,
    path::{Path, PathBuf},
};

use folio_core::{
    Config, ContentItem, ContentRepository, CoreError, CourseRecord, SiteContent,
    frontmatter::parse_book,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::markdown::MarkdownRenderer;

/// Content loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("failed to read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Invalid content or duplicate slugs.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Course list could not be parsed.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Shape of the course list file.
#[derive(Debug, Default, Deserialize)]
struct CourseList {
    #[serde(default)]
    courses: Vec<CourseRecord>,
}

/// Loads books and courses relative to a site root.
#[derive(Debug)]
pub struct ContentLoader {
    config: Config,
    root: PathBuf,
    markdown: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a loader for the site rooted at `root`.
    #[must_use]
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Load the full site snapshot.
    pub fn load(&self) -> Result<SiteContent> {
        let books = ContentRepository::new(self.load_books()?)?;
        let courses = ContentRepository::new(self.load_courses()?)?;

        info!(
            books = books.len(),
            courses = courses.len(),
            "content loaded"
        );

        Ok(SiteContent::new(books, courses))
    }

    /// Directory holding book files.
    pub fn books_dir(&self) -> PathBuf {
        self.root.join(&self.config.content.books_dir)
    }

    /// Path of the course list file.
    pub fn courses_file(&self) -> PathBuf {
        self.root.join(&self.config.content.courses_file)
    }

    /// Load every book file, in path order.
    pub fn load_books(&self) -> Result<Vec<ContentItem>> {
        let dir = self.books_dir();
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "books directory not found, bookshelf is empty");
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for path in find_book_files(&dir)? {
            items.push(self.load_book(&path)?);
        }
        Ok(items)
    }

    /// Book files that [`load_books`](Self::load_books) would read, in load order.
    pub fn book_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.books_dir();
        if dir.is_dir() {
            find_book_files(&dir)
        } else {
            Ok(Vec::new())
        }
    }

    /// Load a single book file.
    pub fn load_book(&self, path: &Path) -> Result<ContentItem> {
        debug!(path = %path.display(), "loading book");

        let source = fs::read_to_string(path)?;
        let (record, body) = parse_book(&source, path)?;
        let html = self.markdown.render(&body);

        Ok(record.into_item(html))
    }

    /// Load the course list.
    pub fn load_courses(&self) -> Result<Vec<ContentItem>> {
        let path = self.courses_file();
        if !path.is_file() {
            warn!(path = %path.display(), "course list not found, no courses loaded");
            return Ok(Vec::new());
        }

        let source = fs::read_to_string(&path)?;
        let list: CourseList = toml::from_str(&source).map_err(|e| LoadError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let mut items = Vec::with_capacity(list.courses.len());
        for record in list.courses {
            if record.title.trim().is_empty() {
                return Err(LoadError::Parse {
                    path,
                    message: "course title is required".to_string(),
                });
            }
            let html = self.markdown.render(&record.description);
            items.push(record.into_item(html));
        }

        debug!(count = items.len(), path = %path.display(), "loaded courses");
        Ok(items)
    }
}

/// Markdown files directly inside `dir`, sorted by file name.
fn find_book_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'));
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));

        if entry.file_type().is_file() && is_markdown && !hidden {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn config() -> Config {
        Config::new("Test Shelf", "https://example.com")
    }

    #[test]
    fn test_load_empty_site() {
        let root = TempDir::new().unwrap();
        let site = ContentLoader::new(config(), root.path()).load().unwrap();
        assert!(site.books.is_empty());
        assert!(site.courses.is_empty());
    }

    #[test]
    fn test_load_books_in_file_name_order() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "content/books/b-dune.md",
            "---\ntitle: Dune\ngenre: [sci-fi]\n---\nThe *spice*.",
        );
        write(
            root.path(),
            "content/books/a-emma.md",
            "---\ntitle: Emma\n---\nMatchmaking.",
        );
        write(root.path(), "content/books/notes.txt", "ignored");
        write(
            root.path(),
            "content/books/.hidden.md",
            "---\ntitle: Hidden\n---\n",
        );

        let loader = ContentLoader::new(config(), root.path());
        let books = loader.load_books().unwrap();

        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Emma", "Dune"]);
        assert_eq!(books[1].slug, "dune");
        assert!(books[1].body.contains("<em>spice</em>"));
    }

    #[test]
    fn test_book_files() {
        let root = TempDir::new().unwrap();
        let loader = ContentLoader::new(config(), root.path());
        assert!(loader.book_files().unwrap().is_empty());

        write(root.path(), "content/books/z.md", "");
        write(root.path(), "content/books/a.md", "");
        let files = loader.book_files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.md"));
    }

    #[test]
    fn test_load_courses() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "content/courses.toml",
            r#"
[[courses]]
title = "CS50: Introduction to Computer Science"
provider = "Harvard"
href = "https://cs50.harvard.edu"
description = "Problem sets in **C**."
status = "Completed"
tags = ["cs"]

[[courses]]
title = "Rust in Action"
provider = "Manning"
status = "In Progress"
"#,
        );

        let loader = ContentLoader::new(config(), root.path());
        let courses = loader.load_courses().unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].slug, "cs50-introduction-to-computer-science");
        assert!(courses[0].body.contains("<strong>C</strong>"));
        assert_eq!(courses[0].metadata.summary, "Problem sets in **C**.");
        assert_eq!(courses[1].metadata.status.as_deref(), Some("In Progress"));
    }

    #[test]
    fn test_duplicate_book_slugs_fail_load() {
        let root = TempDir::new().unwrap();
        write(root.path(), "content/books/one.md", "---\ntitle: Dune\n---\n");
        write(root.path(), "content/books/two.md", "---\ntitle: \"DUNE!\"\n---\n");

        let err = ContentLoader::new(config(), root.path()).load().unwrap_err();
        assert!(matches!(
            err,
            LoadError::Core(CoreError::DuplicateSlug { .. })
        ));
    }

    #[test]
    fn test_same_title_in_books_and_courses_is_allowed() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "content/books/rust.md",
            "---\ntitle: Programming Rust\n---\n",
        );
        write(
            root.path(),
            "content/courses.toml",
            "[[courses]]\ntitle = \"Programming Rust\"\n",
        );

        let site = ContentLoader::new(config(), root.path()).load().unwrap();
        assert_eq!(site.total(), 2);
    }

    #[test]
    fn test_invalid_course_list() {
        let root = TempDir::new().unwrap();
        write(root.path(), "content/courses.toml", "[[courses]\ntitle = ");

        let err = ContentLoader::new(config(), root.path())
            .load_courses()
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_invalid_book_rating() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "content/books/bad.md",
            "---\ntitle: Bad\nrating: 7\n---\n",
        );

        let err = ContentLoader::new(config(), root.path())
            .load_books()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid rating"));
    }
}
