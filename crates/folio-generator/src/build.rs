//! Build orchestration.
//!
//! Coordinates the full site build process.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{Config, ContentItem, ContentKind, SiteContent};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    html::{HtmlError, HtmlGenerator},
    loader::{ContentLoader, LoadError},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content loading error.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Static directory walk error.
    #[error("failed to copy static files from {path}: {source}")]
    Static {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of list and detail pages generated.
    pub pages: usize,

    /// Number of redirect pages generated.
    pub redirects: usize,

    /// Number of not-found pages generated.
    pub not_found_pages: usize,

    /// Number of static files copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// A page to render, borrowed from the snapshot.
#[derive(Debug, Clone, Copy)]
enum PageJob<'a> {
    BookList,
    Book(&'a ContentItem),
    CourseList,
    Course(&'a ContentItem),
}

impl PageJob<'_> {
    fn url(&self) -> String {
        match self {
            Self::BookList => "/books".to_string(),
            Self::CourseList => "/courses".to_string(),
            Self::Book(item) | Self::Course(item) => item.url_path(),
        }
    }
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    root: PathBuf,
    output_dir: PathBuf,
}

impl Builder {
    /// Create a new builder for the site rooted at `root`.
    #[must_use]
    pub fn new(config: Config, root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            root = %self.root.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // A failed load leaves the previous output untouched.
        let content = ContentLoader::new(self.config.clone(), &self.root).load()?;
        let generator = HtmlGenerator::new(self.config.clone());

        self.clean_output()?;

        stats.pages = self.generate_pages(&generator, &content)?;
        stats.redirects = self.generate_redirects(&generator, &content)?;
        stats.not_found_pages = self.generate_not_found_pages(&generator)?;
        stats.assets = self.copy_static()?;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            redirects = stats.redirects,
            not_found_pages = stats.not_found_pages,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Generate list and detail pages in parallel.
    fn generate_pages(&self, generator: &HtmlGenerator, content: &SiteContent) -> Result<usize> {
        let mut jobs = vec![PageJob::BookList, PageJob::CourseList];
        jobs.extend(content.books.list_all().iter().map(PageJob::Book));
        jobs.extend(content.courses.list_all().iter().map(PageJob::Course));

        info!(count = jobs.len(), "generating HTML pages");

        jobs.par_iter()
            .map(|job| {
                let html = match job {
                    PageJob::BookList => generator.generate_book_list(content)?,
                    PageJob::CourseList => generator.generate_course_list(content)?,
                    PageJob::Book(book) => {
                        let related = content.books.related(book, self.config.related.limit);
                        generator.generate_book(book, &related)?
                    }
                    PageJob::Course(course) => generator.generate_course(course)?,
                };
                let output_path = generator.output_path(&job.url(), &self.output_dir);
                write_file(&output_path, &html)?;

                debug!(path = %output_path.display(), "wrote page");
                Ok::<_, BuildError>(())
            })
            .collect::<Result<Vec<()>>>()
            .map(|written| written.len())
    }

    /// Redirect the site root and the legacy `/blog` URLs to the bookshelf.
    fn generate_redirects(&self, generator: &HtmlGenerator, content: &SiteContent) -> Result<usize> {
        let mut redirects = vec![
            ("/".to_string(), "/books".to_string()),
            ("/blog".to_string(), "/books".to_string()),
        ];
        redirects.extend(
            content
                .books
                .list_all()
                .iter()
                .map(|book| (format!("/blog/{}", book.slug), book.url_path())),
        );

        for (from, to) in &redirects {
            let html = generator.generate_redirect(to)?;
            write_file(&generator.output_path(from, &self.output_dir), &html)?;
            debug!(from = %from, to = %to, "generated redirect");
        }

        Ok(redirects.len())
    }

    /// Write the site-wide and course not-found pages.
    fn generate_not_found_pages(&self, generator: &HtmlGenerator) -> Result<usize> {
        let pages = [
            (None, self.output_dir.join("404.html")),
            (
                Some(ContentKind::Course),
                self.output_dir
                    .join(ContentKind::Course.section())
                    .join("404.html"),
            ),
        ];

        for (kind, path) in &pages {
            write_file(path, &generator.generate_not_found(*kind)?)?;
        }

        Ok(pages.len())
    }

    /// Copy the static directory into the output, if it exists.
    fn copy_static(&self) -> Result<usize> {
        let static_dir = self.root.join(&self.config.content.static_dir);
        if !static_dir.is_dir() {
            debug!(dir = %static_dir.display(), "no static directory");
            return Ok(0);
        }

        let mut count = 0;
        for entry in WalkDir::new(&static_dir) {
            let entry = entry.map_err(|source| BuildError::Static {
                path: static_dir.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&static_dir) else {
                continue;
            };
            let dest = self.output_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
            count += 1;
        }

        info!(count, dir = %static_dir.display(), "copied static files");
        Ok(count)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
