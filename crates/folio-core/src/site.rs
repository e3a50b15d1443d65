//! The loaded site snapshot.

use crate::{
    content::{ContentItem, ContentKind},
    repository::ContentRepository,
};

/// Everything the site renders, loaded once and then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteContent {
    /// The bookshelf.
    pub books: ContentRepository,

    /// The learning journey.
    pub courses: ContentRepository,
}

impl SiteContent {
    /// Create a snapshot from both collections.
    pub fn new(books: ContentRepository, courses: ContentRepository) -> Self {
        Self { books, courses }
    }

    /// The collection holding items of `kind`.
    pub fn repository(&self, kind: ContentKind) -> &ContentRepository {
        match kind {
            ContentKind::Book => &self.books,
            ContentKind::Course => &self.courses,
        }
    }

    /// Look up an item of `kind` by slug.
    pub fn get(&self, kind: ContentKind, slug: &str) -> Option<&ContentItem> {
        self.repository(kind).get_by_slug(slug)
    }

    /// Total number of items across collections.
    pub fn total(&self) -> usize {
        self.books.len() + self.courses.len()
    }
}
