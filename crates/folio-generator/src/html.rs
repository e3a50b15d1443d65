//! HTML generation for list, detail and not-found pages.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, Utc};
use folio_core::{Config, ContentItem, ContentKind, SiteContent};
use thiserror::Error;
use tracing::debug;

use crate::template::{Template, TemplateContext, TemplateError, TemplateRegistry};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// An item was handed to the renderer for the wrong kind of page.
    #[error("cannot render {actual:?} \"{title}\" as a {expected:?} page")]
    WrongKind {
        title: String,
        expected: ContentKind,
        actual: ContentKind,
    },
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Description length used for course meta descriptions.
const DESCRIPTION_LIMIT: usize = 160;

/// HTML page generator.
#[derive(Debug, Clone)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: Config,
}

impl HtmlGenerator {
    /// Create a new HTML generator with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            config,
        }
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        Self { templates, config }
    }

    /// Register a custom template.
    pub fn register_template(&mut self, template: Template) {
        self.templates.register(template);
    }

    /// The configuration this generator renders with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render the bookshelf, newest books first.
    pub fn generate_book_list(&self, site: &SiteContent) -> Result<String> {
        let items: String = site
            .books
            .newest_first()
            .into_iter()
            .map(book_card_html)
            .collect::<Vec<_>>()
            .join("\n");

        let ctx = TemplateContext::new().with_var("items", items);
        let inner = self.templates.render("book_list", &ctx)?;

        self.wrap(
            "Books",
            "/books",
            Some("A collection of books I've read, loved, and recommend."),
            &inner,
        )
    }

    /// Render the detail page for the book with `slug`, or `None` if there is no such book.
    pub fn render_book(&self, site: &SiteContent, slug: &str) -> Result<Option<String>> {
        let Some(book) = site.books.get_by_slug(slug) else {
            return Ok(None);
        };
        let related = site.books.related(book, self.config.related.limit);
        self.generate_book(book, &related).map(Some)
    }

    /// Render a book detail page.
    pub fn generate_book(&self, book: &ContentItem, related: &[&ContentItem]) -> Result<String> {
        expect_kind(book, ContentKind::Book)?;
        debug!(slug = %book.slug, related = related.len(), "generating book page");

        let meta = &book.metadata;
        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(&book.title))
            .with_var("author", escape_html(&meta.author))
            .with_var("content", &book.body);

        if let Some(image) = &meta.image {
            ctx.insert(
                "cover_html",
                format!(
                    r#"<img src="{}" alt="Cover of {}">"#,
                    escape_html(image),
                    escape_html(&book.title)
                ),
            );
        }
        if let Some(rating) = meta.rating {
            ctx.insert("rating_html", stars_html(rating));
        }
        if !meta.tags.is_empty() {
            ctx.insert("tags_html", tags_html(&meta.tags));
        }
        if let Some(date) = meta.published_at {
            ctx.insert(
                "published_html",
                format!(
                    r#"<p class="muted">Published: <time datetime="{}">{}</time></p>"#,
                    date.format("%Y-%m-%d"),
                    format_date(date)
                ),
            );
        }
        if !meta.summary.is_empty() {
            ctx.insert("summary", escape_html(&meta.summary));
        }
        if !related.is_empty() {
            ctx.insert("related_html", related_html(related));
        }

        let inner = self.templates.render("book", &ctx)?;
        let title = if meta.author.is_empty() {
            book.title.clone()
        } else {
            format!("{} by {}", book.title, meta.author)
        };

        self.wrap(&title, &book.url_path(), non_empty(&meta.summary), &inner)
    }

    /// Render the learning journey in source order.
    pub fn generate_course_list(&self, site: &SiteContent) -> Result<String> {
        let items: String = site
            .courses
            .list_all()
            .iter()
            .map(course_card_html)
            .collect::<Vec<_>>()
            .join("\n");

        let ctx = TemplateContext::new().with_var("items", items);
        let inner = self.templates.render("course_list", &ctx)?;

        self.wrap(
            "Courses",
            "/courses",
            Some("A collection of courses I'm taking or have completed."),
            &inner,
        )
    }

    /// Render the detail page for the course with `slug`, or `None` if there is no such course.
    pub fn render_course(&self, site: &SiteContent, slug: &str) -> Result<Option<String>> {
        site.courses
            .get_by_slug(slug)
            .map(|course| self.generate_course(course))
            .transpose()
    }

    /// Render a course detail page.
    pub fn generate_course(&self, course: &ContentItem) -> Result<String> {
        expect_kind(course, ContentKind::Course)?;
        debug!(slug = %course.slug, "generating course page");

        let meta = &course.metadata;
        let provider_line = match &meta.dates {
            Some(dates) if !dates.is_empty() => format!(
                "{} &bull; {}",
                escape_html(&meta.author),
                escape_html(dates)
            ),
            _ => escape_html(&meta.author),
        };

        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(&course.title))
            .with_var("provider_line", provider_line)
            .with_var("content", &course.body);

        if let Some(image) = &meta.image {
            ctx.insert(
                "cover_html",
                format!(
                    r#"<img src="{}" alt="{}">"#,
                    escape_html(image),
                    escape_html(&course.title)
                ),
            );
        }
        if let Some(status) = &meta.status {
            ctx.insert("status_html", status_badge_html(status));
        }
        if let Some(href) = &meta.href {
            ctx.insert(
                "view_course_html",
                format!(
                    r#"<a href="{}" class="button" target="_blank" rel="noopener">View Course</a>"#,
                    escape_html(href)
                ),
            );
        }

        let inner = self.templates.render("course", &ctx)?;
        let description: String = meta.summary.chars().take(DESCRIPTION_LIMIT).collect();

        self.wrap(
            &course.title,
            &course.url_path(),
            non_empty(&description),
            &inner,
        )
    }

    /// Render a not-found page.
    ///
    /// Courses get their own wording; every other lookup uses the site-wide page.
    pub fn generate_not_found(&self, kind: Option<ContentKind>) -> Result<String> {
        let (heading, message, return_url, return_label) = match kind {
            Some(ContentKind::Course) => (
                "Course Not Found",
                "Sorry, the course you're looking for doesn't exist or has been removed.",
                "/courses",
                "Return to Courses",
            ),
            _ => (
                "Page Not Found",
                "Sorry, the page you're looking for doesn't exist or has been removed.",
                "/books",
                "Return to Bookshelf",
            ),
        };

        let ctx = TemplateContext::new()
            .with_var("heading", heading)
            .with_var("message", escape_html(message))
            .with_var("return_url", return_url)
            .with_var("return_label", return_label);
        let inner = self.templates.render("not_found", &ctx)?;

        self.wrap(heading, return_url, None, &inner)
    }

    /// Generate redirect HTML pointing at `redirect_url`.
    pub fn generate_redirect(&self, redirect_url: &str) -> Result<String> {
        let ctx = TemplateContext::new().with_var("redirect_url", escape_html(redirect_url));
        Ok(self.templates.render("redirect", &ctx)?)
    }

    /// Wrap page content in the base layout.
    fn wrap(
        &self,
        title: &str,
        path: &str,
        description: Option<&str>,
        inner_html: &str,
    ) -> Result<String> {
        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(title))
            .with_var(
                "site_title_suffix",
                format!(" | {}", escape_html(&self.config.site.title)),
            )
            .with_var("canonical_url", escape_html(&self.config.url_for(path)))
            .with_var("content", inner_html)
            .with_var("site_title", escape_html(&self.config.site.title))
            .with_var("year", Utc::now().year().to_string());

        if let Some(desc) = description.or(self.config.site.description.as_deref()) {
            ctx.insert("description", escape_html(desc));
        }
        if let Some(author) = &self.config.site.author {
            ctx.insert("author", escape_html(author));
        }

        Ok(self.templates.render("base", &ctx)?)
    }

    /// Get the output file for a URL path.
    #[must_use]
    pub fn output_path(&self, url: &str, output_dir: &Path) -> PathBuf {
        let relative = url.trim_matches('/');

        if relative.is_empty() {
            output_dir.join("index.html")
        } else {
            output_dir.join(relative).join("index.html")
        }
    }
}

/// A star rating split into full, half and empty stars out of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    /// Number of full stars.
    pub full: u8,
    /// Whether a half star follows the full stars.
    pub half: bool,
    /// Number of empty stars.
    pub empty: u8,
}

impl StarRating {
    /// Split a rating, capping it at five stars.
    pub fn from_rating(rating: f32) -> Self {
        let normalized = rating.clamp(0.0, 5.0);
        let full = normalized.floor() as u8;
        let half = normalized.fract() >= 0.5;
        let empty = 5 - full - u8::from(half);
        Self { full, half, empty }
    }
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a publication date as e.g. "January 5, 2016".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Star rating HTML followed by the rating to one decimal.
pub fn stars_html(rating: f32) -> String {
    let stars = StarRating::from_rating(rating);
    let mut html = String::from(r#"<div class="stars" aria-label="Rating">"#);

    for _ in 0..stars.full {
        html.push_str(r#"<span class="star star-full">&#9733;</span>"#);
    }
    if stars.half {
        html.push_str(r#"<span class="star star-half">&#11242;</span>"#);
    }
    for _ in 0..stars.empty {
        html.push_str(r#"<span class="star star-empty">&#9734;</span>"#);
    }

    html.push_str(&format!(
        r#"<span class="rating-value">{rating:.1} / 5</span></div>"#
    ));
    html
}

/// Genre/tag chips.
fn tags_html(tags: &[String]) -> String {
    let chips = tags
        .iter()
        .map(|tag| format!(r#"<li class="chip">{}</li>"#, escape_html(tag)))
        .collect::<Vec<_>>()
        .join("");
    format!(r#"<ul class="chips">{chips}</ul>"#)
}

fn status_badge_html(status: &str) -> String {
    let class = if status == "Completed" {
        "badge badge-primary"
    } else {
        "badge"
    };
    format!(r#"<span class="{class}">{}</span>"#, escape_html(status))
}

/// Card used on the bookshelf page.
pub fn book_card_html(book: &ContentItem) -> String {
    let meta = &book.metadata;
    let title = escape_html(&book.title);

    let cover = meta
        .image
        .as_ref()
        .map(|src| format!(r#"<img src="{}" alt="Cover of {title}">"#, escape_html(src)))
        .unwrap_or_default();
    let rating = meta
        .rating
        .map(|r| format!(r#"<span class="badge">{r} &#9733;</span>"#))
        .unwrap_or_default();
    let tags = if meta.tags.is_empty() {
        String::new()
    } else {
        tags_html(&meta.tags)
    };

    format!(
        r#"<a class="card" href="{url}">
    <div class="card-cover">{cover}{rating}</div>
    <div class="card-body">
        <h2>{title}</h2>
        <p class="muted">by {author}</p>
        {tags}
        <p class="summary">{summary}</p>
    </div>
</a>"#,
        url = book.url_path(),
        author = escape_html(&meta.author),
        summary = escape_html(&meta.summary),
    )
}

/// Card used on the courses page.
pub fn course_card_html(course: &ContentItem) -> String {
    let meta = &course.metadata;
    let title = escape_html(&course.title);
    let url = course.url_path();

    let cover = meta
        .image
        .as_ref()
        .map(|src| format!(r#"<img src="{}" alt="{title}">"#, escape_html(src)))
        .unwrap_or_default();
    let status = meta
        .status
        .as_deref()
        .map(status_badge_html)
        .unwrap_or_default();
    let logo = meta
        .provider_logo
        .as_ref()
        .map(|src| {
            format!(
                r#"<img class="provider-logo" src="{}" alt="{}" width="32" height="32">"#,
                escape_html(src),
                escape_html(&meta.author)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="card">
    <a href="{url}" class="card-cover">{cover}{status}</a>
    <div class="card-body">
        <h2><a href="{url}">{title}</a></h2>
        <p class="muted">{logo}{provider}</p>
        <div class="summary">{body}</div>
    </div>
</div>"#,
        provider = escape_html(&meta.author),
        body = course.body,
    )
}

/// "You might also enjoy" section.
fn related_html(related: &[&ContentItem]) -> String {
    let links = related
        .iter()
        .map(|item| {
            let title = escape_html(&item.title);
            let cover = item
                .metadata
                .image
                .as_ref()
                .map(|src| {
                    format!(
                        r#"<img src="{}" alt="{title}" width="64" height="80">"#,
                        escape_html(src)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<a class="card" href="{}">{cover}<div class="card-body"><h3>{title}</h3><p class="muted">by {}</p></div></a>"#,
                item.url_path(),
                escape_html(&item.metadata.author)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div class="related">
    <h2>You might also enjoy</h2>
    <div class="grid">{links}</div>
</div>"#
    )
}

fn expect_kind(item: &ContentItem, expected: ContentKind) -> Result<()> {
    if item.kind == expected {
        Ok(())
    } else {
        Err(HtmlError::WrongKind {
            title: item.title.clone(),
            expected,
            actual: item.kind,
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
