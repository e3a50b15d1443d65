//! Frontmatter parsing for book files.

use std::path::Path;

use crate::{
    content::BookRecord,
    error::{CoreError, Result},
};

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = closing_delimiter(after_first, delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + 1 + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Byte offset of the newline that starts the closing delimiter line.
///
/// The delimiter only closes the block when it fills its own line, so a
/// `---` inside a value is left alone.
fn closing_delimiter(text: &str, delimiter: &str) -> Option<usize> {
    let needle = format!("\n{delimiter}");
    text.match_indices(&needle).map(|(pos, _)| pos).find(|&pos| {
        let rest = &text[pos + needle.len()..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        rest[..line_end].trim().is_empty()
    })
}

/// Parse a book file into its record and Markdown body.
///
/// The record is validated, so a missing title or an out-of-range rating is
/// reported as an error for `path`.
pub fn parse_book(content: &str, path: &Path) -> Result<(BookRecord, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Err(CoreError::frontmatter(path, "missing frontmatter"));
    };

    let record: BookRecord = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    record.validate(path)?;
    Ok((record, body.to_string()))
}
