//! HTML template system for page generation.
//!
//! A small string-interpolation template system; values are inserted verbatim,
//! so callers escape text before putting it into a context.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A simple template that supports variable interpolation.
///
/// Variables are written as `{{ name }}`; `{{ name? }}` renders as an empty
/// string when the variable is missing.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped, true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            // Skip past the inserted value so its contents are never re-parsed.
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with default templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        self.register(Template::new("book_list", DEFAULT_BOOK_LIST_TEMPLATE));
        self.register(Template::new("book", DEFAULT_BOOK_TEMPLATE));
        self.register(Template::new("course_list", DEFAULT_COURSE_LIST_TEMPLATE));
        self.register(Template::new("course", DEFAULT_COURSE_TEMPLATE));
        self.register(Template::new("not_found", DEFAULT_NOT_FOUND_TEMPLATE));
        self.register(Template::new("redirect", DEFAULT_REDIRECT_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default base HTML template.
pub const DEFAULT_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}{{ site_title_suffix? }}</title>
    <meta name="description" content="{{ description? }}">
    <meta name="author" content="{{ author? }}">
    <link rel="canonical" href="{{ canonical_url }}">
    <style>
        :root {
            --color-primary: #3B82F6;
            --color-bg: #F8FAFC;
            --color-card: #FFFFFF;
            --color-text: #1E293B;
            --color-muted: #64748B;
            --color-border: #E2E8F0;
            --color-chip: #F1F5F9;
            --color-star: #FACC15;
        }

        @media (prefers-color-scheme: dark) {
            :root {
                --color-primary: #60A5FA;
                --color-bg: #0F172A;
                --color-card: #1E293B;
                --color-text: #F1F5F9;
                --color-muted: #94A3B8;
                --color-border: #334155;
                --color-chip: #334155;
            }
        }

        *, *::before, *::after { box-sizing: border-box; }
        * { margin: 0; padding: 0; }

        body {
            font-family: system-ui, -apple-system, sans-serif;
            line-height: 1.7;
            color: var(--color-text);
            background-color: var(--color-bg);
            min-height: 100vh;
            display: flex;
            flex-direction: column;
        }

        .container { width: 100%; max-width: 960px; margin: 0 auto; padding: 0 1.5rem; }
        header nav { display: flex; justify-content: space-between; align-items: center; padding: 1rem 0; }
        header { border-bottom: 1px solid var(--color-border); }
        .site-title { font-weight: 600; color: var(--color-text); text-decoration: none; }
        .nav-links { display: flex; gap: 1.5rem; }
        .nav-links a { color: var(--color-muted); text-decoration: none; font-size: 0.875rem; }
        main { flex: 1; padding: 3rem 0; }
        footer { border-top: 1px solid var(--color-border); padding: 2rem 0; text-align: center; color: var(--color-muted); font-size: 0.875rem; }

        a { color: var(--color-primary); }
        h1 { font-size: 2rem; margin-bottom: 1rem; letter-spacing: -0.025em; }
        h2 { font-size: 1.5rem; margin: 2rem 0 1rem; }
        p { margin-bottom: 1rem; }
        img { max-width: 100%; border-radius: 0.5rem; }
        .muted { color: var(--color-muted); }

        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 2rem; }
        .card { display: flex; flex-direction: column; border: 1px solid var(--color-border); border-radius: 0.5rem; overflow: hidden; background: var(--color-card); color: inherit; text-decoration: none; }
        .card-cover { position: relative; height: 16rem; background: var(--color-chip); }
        .card-cover img { width: 100%; height: 100%; object-fit: cover; border-radius: 0; }
        .card-body { padding: 1rem; flex-grow: 1; }
        .card-body h2 { font-size: 1.25rem; margin: 0 0 0.25rem; }
        .badge { position: absolute; top: 0.5rem; right: 0.5rem; padding: 0.125rem 0.5rem; border-radius: 9999px; font-size: 0.75rem; font-weight: 500; background: var(--color-card); }
        .badge-primary { background: var(--color-primary); color: #fff; }
        .chips { display: flex; flex-wrap: wrap; gap: 0.25rem; margin: 0.5rem 0; list-style: none; }
        .chip { padding: 0.125rem 0.75rem; border-radius: 9999px; font-size: 0.75rem; background: var(--color-chip); }
        .summary { font-size: 0.875rem; color: var(--color-muted); }

        .detail { display: flex; gap: 2rem; flex-wrap: wrap; margin-bottom: 2.5rem; }
        .detail-cover { width: 240px; }
        .detail-info { flex: 1; min-width: 260px; }
        .stars { display: flex; align-items: center; gap: 0.125rem; color: var(--color-star); }
        .stars .rating-value { margin-left: 0.5rem; color: var(--color-muted); font-size: 0.875rem; }
        .prose { max-width: 70ch; }
        .related { margin-top: 3rem; border-top: 1px solid var(--color-border); padding-top: 2rem; }
        .button { display: inline-block; padding: 0.5rem 1rem; border-radius: 0.375rem; background: var(--color-primary); color: #fff; text-decoration: none; font-size: 0.875rem; }
        .not-found { display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 50vh; text-align: center; }
    </style>
</head>
<body>
    <header>
        <div class="container">
            <nav>
                <a href="/" class="site-title">{{ site_title }}</a>
                <div class="nav-links">
                    <a href="/books">Books</a>
                    <a href="/courses">Courses</a>
                </div>
            </nav>
        </div>
    </header>
    <main>
        <div class="container">
            {{ content }}
        </div>
    </main>
    <footer>
        <div class="container">
            <p>&copy; {{ year }} {{ site_title }}</p>
        </div>
    </footer>
    {{ extra_body? }}
</body>
</html>"##;

/// Bookshelf listing.
pub const DEFAULT_BOOK_LIST_TEMPLATE: &str = r#"<section class="book-list">
    <h1>My Bookshelf</h1>
    <p class="muted">These are books that have influenced my thinking, sparked my curiosity,
    or simply provided an enjoyable escape. I hope you find something new to read!</p>
    <div class="grid">
        {{ items }}
    </div>
</section>"#;

/// Book detail page.
pub const DEFAULT_BOOK_TEMPLATE: &str = r#"<section id="book">
    <div class="detail">
        <div class="detail-cover">{{ cover_html? }}</div>
        <div class="detail-info">
            <h1>{{ title }}</h1>
            <p class="muted">by {{ author }}</p>
            {{ rating_html? }}
            {{ tags_html? }}
            {{ published_html? }}
            <p class="lead">{{ summary? }}</p>
        </div>
    </div>
    <article class="prose">
        {{ content }}
    </article>
    {{ related_html? }}
</section>"#;

/// Learning journey listing.
pub const DEFAULT_COURSE_LIST_TEMPLATE: &str = r#"<section class="course-list">
    <h1>My Learning Journey</h1>
    <p class="muted">These are courses that have helped me develop new skills, deepen my knowledge,
    or explore new areas of technology. I'm constantly learning and adding to this list!</p>
    <div class="grid">
        {{ items }}
    </div>
</section>"#;

/// Course detail page.
pub const DEFAULT_COURSE_TEMPLATE: &str = r#"<section id="course">
    <a href="/courses" class="back-link">&larr; Back to Courses</a>
    <div class="card-cover">
        {{ cover_html? }}
        {{ status_html? }}
    </div>
    <div class="course-header">
        <h1>{{ title }}</h1>
        <p class="muted">{{ provider_line }}</p>
        {{ view_course_html? }}
    </div>
    <article class="prose">
        {{ content }}
    </article>
</section>"#;

/// Not-found page body.
pub const DEFAULT_NOT_FOUND_TEMPLATE: &str = r#"<section class="not-found">
    <h2>{{ heading }}</h2>
    <p class="muted">{{ message }}</p>
    <a href="{{ return_url }}" class="button">{{ return_label }}</a>
</section>"#;

/// Redirect page for moved URLs.
pub const DEFAULT_REDIRECT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta http-equiv="refresh" content="0; url={{ redirect_url }}">
    <link rel="canonical" href="{{ redirect_url }}">
    <title>Redirecting...</title>
</head>
<body>
    <p>Redirecting to <a href="{{ redirect_url }}">{{ redirect_url }}</a></p>
</body>
</html>"#;
