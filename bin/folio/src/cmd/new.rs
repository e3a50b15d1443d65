//! New command - scaffold a book file or a course entry

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::{Config, ContentKind, generate_slug};
use folio_generator::ContentLoader;

use super::site_root;

/// Run the new command.
///
/// Books get their own Markdown file named after the slug of the title;
/// courses are appended to the course list. Returns the file written.
pub fn run(config_path: &Path, title: &str, kind: ContentKind) -> Result<PathBuf> {
    tracing::info!(?config_path, title, ?kind, "Creating new content");

    let slug = generate_slug(title);
    if slug.trim_matches('-').is_empty() {
        bail!("Title \"{title}\" has no letters or digits to build a URL from");
    }

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let loader = ContentLoader::new(config, site_root(config_path));

    let existing = match kind {
        ContentKind::Book => loader.load_books(),
        ContentKind::Course => loader.load_courses(),
    }
    .wrap_err("Failed to load existing content")?;

    if let Some(item) = existing.iter().find(|item| item.slug == slug) {
        bail!(
            "{} \"{}\" already uses the slug '{slug}'",
            kind.label(),
            item.title
        );
    }

    let file_path = match kind {
        ContentKind::Book => {
            let path = loader.books_dir().join(format!("{slug}.md"));
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
            }
            fs::write(&path, book_template(title)).wrap_err("Failed to write file")?;
            path
        }
        ContentKind::Course => {
            let path = loader.courses_file();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
            }
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .wrap_err("Failed to open course list")?;
            file.write_all(course_template(title).as_bytes())
                .wrap_err("Failed to write course")?;
            path
        }
    };

    tracing::info!(?file_path, %slug, "Created new content");
    println!("Created: {} (/{}/{slug})", file_path.display(), kind.section());

    Ok(file_path)
}

/// Escape a value for a double-quoted YAML or TOML string.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn book_template(title: &str) -> String {
    let title = quote(title);
    let date = Utc::now().format("%Y-%m-%d");

    format!(
        r#"---
title: {title}
author: ""
publishedAt: {date}
genre: []
summary: ""
---

Write your notes here.
"#
    )
}

fn course_template(title: &str) -> String {
    let title = quote(title);

    format!(
        r#"
[[courses]]
title = {title}
provider = ""
description = ""
dates = ""
tags = []
status = "In Progress"
"#
    )
}

#[cfg(test)]
mod tests {
    use folio_core::frontmatter::parse_book;
    use tempfile::TempDir;

    use super::*;

    fn site() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"Shelf\"\nbase_url = \"https://shelf.dev\"\n",
        )
        .unwrap();
        (dir, config_path)
    }

    #[test]
    fn test_new_book() {
        let (dir, config_path) = site();

        let path = run(&config_path, "The \"Great\" Gatsby", ContentKind::Book).unwrap();

        assert_eq!(path, dir.path().join("content/books/the-great-gatsby.md"));
        let source = fs::read_to_string(&path).unwrap();
        let (record, body) = parse_book(&source, &path).unwrap();
        assert_eq!(record.title, "The \"Great\" Gatsby");
        assert!(record.published_at.is_some());
        assert!(body.contains("Write your notes here."));
    }

    #[test]
    fn test_new_book_rejects_slug_collision() {
        let (_dir, config_path) = site();

        run(&config_path, "Dune", ContentKind::Book).unwrap();
        let err = run(&config_path, "DUNE!", ContentKind::Book).unwrap_err();
        assert!(err.to_string().contains("already uses the slug 'dune'"));
    }

    #[test]
    fn test_new_course_appends() {
        let (dir, config_path) = site();

        run(&config_path, "Machine Learning", ContentKind::Course).unwrap();
        run(&config_path, "Rust in Action", ContentKind::Course).unwrap();

        let config = Config::load(&config_path).unwrap();
        let courses = ContentLoader::new(config, dir.path()).load_courses().unwrap();
        let slugs: Vec<_> = courses.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["machine-learning", "rust-in-action"]);
        assert_eq!(courses[0].metadata.status.as_deref(), Some("In Progress"));
    }

    #[test]
    fn test_new_rejects_title_without_slug() {
        let (_dir, config_path) = site();
        assert!(run(&config_path, "!!!", ContentKind::Book).is_err());
    }
}
