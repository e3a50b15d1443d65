//! Content types and structures.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    slug::generate_slug,
};

/// Kind of content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A book on the bookshelf.
    Book,
    /// A course from the learning journey.
    Course,
}

impl ContentKind {
    /// URL section for this kind of content.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Book => "books",
            Self::Course => "courses",
        }
    }

    /// Human-readable singular label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Book => "Book",
            Self::Course => "Course",
        }
    }
}

/// Metadata attached to a content item.
///
/// Books and courses share one shape; fields that only make sense for one
/// kind are optional and left empty for the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Book author or course provider.
    #[serde(default)]
    pub author: String,

    /// Rating on a 0 to 5 scale.
    #[serde(default)]
    pub rating: Option<f32>,

    /// Publication date.
    #[serde(default)]
    pub published_at: Option<NaiveDate>,

    /// Free-form date range (courses).
    #[serde(default)]
    pub dates: Option<String>,

    /// Genres or tags, in source order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Cover image path.
    #[serde(default)]
    pub image: Option<String>,

    /// Short description for cards and listings.
    #[serde(default)]
    pub summary: String,

    /// Progress status such as "Completed".
    #[serde(default)]
    pub status: Option<String>,

    /// External link.
    #[serde(default)]
    pub href: Option<String>,

    /// Provider logo path.
    #[serde(default)]
    pub provider_logo: Option<String>,
}

/// A book or course, ready to be listed, looked up and rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// URL slug derived from the title.
    pub slug: String,

    /// Display title.
    pub title: String,

    /// What kind of item this is.
    pub kind: ContentKind,

    /// Item metadata.
    pub metadata: Metadata,

    /// Rendered HTML body.
    pub body: String,
}

impl ContentItem {
    /// Create an item, deriving the slug from the title.
    pub fn new(
        kind: ContentKind,
        title: impl Into<String>,
        metadata: Metadata,
        body: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            slug: generate_slug(&title),
            title,
            kind,
            metadata,
            body: body.into(),
        }
    }

    /// URL path for this item's detail page.
    pub fn url_path(&self) -> String {
        format!("/{}/{}", self.kind.section(), self.slug)
    }

    /// Whether this item shares at least one tag with `other`.
    pub fn shares_tag_with(&self, other: &ContentItem) -> bool {
        other
            .metadata
            .tags
            .iter()
            .any(|tag| self.metadata.tags.contains(tag))
    }
}

/// Frontmatter of a book file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book title (required).
    #[serde(default)]
    pub title: String,

    /// Author name.
    #[serde(default)]
    pub author: String,

    /// Rating from 0 to 5.
    #[serde(default)]
    pub rating: Option<f32>,

    /// Publication date.
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<NaiveDate>,

    /// Genres.
    #[serde(default, alias = "tags")]
    pub genre: Vec<String>,

    /// Cover image path.
    #[serde(default)]
    pub image: Option<String>,

    /// Short summary.
    #[serde(default)]
    pub summary: String,
}

impl BookRecord {
    /// Validate required fields.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::frontmatter(path, "title is required"));
        }
        if let Some(rating) = self.rating {
            validate_rating(&self.title, rating)?;
        }
        Ok(())
    }

    /// Convert into a content item with the given rendered body.
    pub fn into_item(self, body: impl Into<String>) -> ContentItem {
        let metadata = Metadata {
            author: self.author,
            rating: self.rating,
            published_at: self.published_at,
            tags: self.genre,
            image: self.image,
            summary: self.summary,
            ..Default::default()
        };
        ContentItem::new(ContentKind::Book, self.title, metadata, body)
    }
}

/// One entry of the course list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course title.
    pub title: String,

    /// Course provider.
    #[serde(default)]
    pub provider: String,

    /// Provider logo path.
    #[serde(default, alias = "providerLogo")]
    pub provider_logo: Option<String>,

    /// Cover image path.
    #[serde(default, alias = "coverImage")]
    pub cover_image: Option<String>,

    /// External course URL.
    #[serde(default)]
    pub href: Option<String>,

    /// Markdown description.
    #[serde(default)]
    pub description: String,

    /// Date range text, e.g. "Jan 2024 - Mar 2024".
    #[serde(default)]
    pub dates: Option<String>,

    /// Topic tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Progress status.
    #[serde(default)]
    pub status: Option<String>,
}

impl CourseRecord {
    /// Convert into a content item with the given rendered description.
    pub fn into_item(self, body: impl Into<String>) -> ContentItem {
        let metadata = Metadata {
            author: self.provider,
            dates: self.dates,
            tags: self.tags,
            image: self.cover_image,
            summary: self.description,
            status: self.status,
            href: self.href,
            provider_logo: self.provider_logo,
            ..Default::default()
        };
        ContentItem::new(ContentKind::Course, self.title, metadata, body)
    }
}

fn validate_rating(title: &str, rating: f32) -> Result<()> {
    if rating.is_finite() && (0.0..=5.0).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::InvalidRating {
            title: title.to_string(),
            rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, tags: &[&str]) -> ContentItem {
        let metadata = Metadata {
            tags: tags.iter().map(ToString::to_string).collect(),
            ..Default::default()
        };
        ContentItem::new(ContentKind::Book, title, metadata, "")
    }

    #[test]
    fn test_item_slug_and_url() {
        let item = book("The Great Gatsby", &[]);
        assert_eq!(item.slug, "the-great-gatsby");
        assert_eq!(item.url_path(), "/books/the-great-gatsby");
    }

    #[test]
    fn test_course_url() {
        let record = CourseRecord {
            title: "Rust for Rustaceans".to_string(),
            ..Default::default()
        };
        let item = record.into_item("");
        assert_eq!(item.kind, ContentKind::Course);
        assert_eq!(item.url_path(), "/courses/rust-for-rustaceans");
    }

    #[test]
    fn test_shares_tag_with() {
        let a = book("A", &["fiction", "classic"]);
        let b = book("B", &["classic"]);
        let c = book("C", &["science"]);
        let untagged = book("D", &[]);

        assert!(a.shares_tag_with(&b));
        assert!(b.shares_tag_with(&a));
        assert!(!a.shares_tag_with(&c));
        assert!(!a.shares_tag_with(&untagged));
    }

    #[test]
    fn test_book_record_into_item() {
        let record = BookRecord {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            rating: Some(4.5),
            published_at: NaiveDate::from_ymd_opt(1965, 8, 1),
            genre: vec!["science fiction".to_string()],
            image: Some("/books/dune.jpg".to_string()),
            summary: "Spice.".to_string(),
        };
        let item = record.into_item("<p>body</p>");

        assert_eq!(item.kind, ContentKind::Book);
        assert_eq!(item.slug, "dune");
        assert_eq!(item.metadata.author, "Frank Herbert");
        assert_eq!(item.metadata.tags, vec!["science fiction"]);
        assert_eq!(item.body, "<p>body</p>");
        assert!(item.metadata.status.is_none());
    }

    #[test]
    fn test_course_record_into_item() {
        let record = CourseRecord {
            title: "Machine Learning".to_string(),
            provider: "Coursera".to_string(),
            cover_image: Some("/courses/ml.png".to_string()),
            description: "Intro to **ML**".to_string(),
            status: Some("Completed".to_string()),
            tags: vec!["ai".to_string()],
            ..Default::default()
        };
        let item = record.into_item("<p>Intro to <strong>ML</strong></p>");

        assert_eq!(item.metadata.author, "Coursera");
        assert_eq!(item.metadata.image.as_deref(), Some("/courses/ml.png"));
        assert_eq!(item.metadata.summary, "Intro to **ML**");
        assert_eq!(item.metadata.status.as_deref(), Some("Completed"));
        assert!(item.metadata.rating.is_none());
    }

    #[test]
    fn test_validate_missing_title() {
        let record = BookRecord::default();
        let err = record.validate(Path::new("books/x.md")).unwrap_err();
        assert!(err.to_string().contains("title is required"));
    }

    #[test]
    fn test_validate_rating_range() {
        let mut record = BookRecord {
            title: "Dune".to_string(),
            rating: Some(5.0),
            ..Default::default()
        };
        assert!(record.validate(Path::new("dune.md")).is_ok());

        record.rating = Some(0.0);
        assert!(record.validate(Path::new("dune.md")).is_ok());

        record.rating = Some(5.5);
        assert!(matches!(
            record.validate(Path::new("dune.md")),
            Err(CoreError::InvalidRating { .. })
        ));

        record.rating = Some(f32::NAN);
        assert!(record.validate(Path::new("dune.md")).is_err());
    }

    #[test]
    fn test_course_record_camel_case_aliases() {
        let toml_src = r#"
title = "Web Dev"
provider = "Udemy"
providerLogo = "/logos/udemy.svg"
coverImage = "/courses/web.png"
"#;
        let record: CourseRecord = toml::from_str(toml_src).expect("parse");
        assert_eq!(record.provider_logo.as_deref(), Some("/logos/udemy.svg"));
        assert_eq!(record.cover_image.as_deref(), Some("/courses/web.png"));
    }
}
