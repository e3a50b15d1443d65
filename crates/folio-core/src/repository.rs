//! In-memory content repository.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    content::ContentItem,
    error::{CoreError, Result},
    related::related_to,
};

/// Immutable collection of content items of one kind.
///
/// Items keep their insertion order and every slug is unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentRepository {
    items: Vec<ContentItem>,
}

impl ContentRepository {
    /// Create a repository, rejecting items whose slugs are empty or collide.
    ///
    /// A slug made only of hyphens counts as empty: its URL would be the
    /// collection page itself.
    pub fn new(items: Vec<ContentItem>) -> Result<Self> {
        let mut seen: HashMap<&str, &str> = HashMap::with_capacity(items.len());
        for item in &items {
            if item.slug.trim_matches('-').is_empty() {
                return Err(CoreError::EmptySlug {
                    title: item.title.clone(),
                });
            }
            if let Some(first) = seen.insert(&item.slug, &item.title) {
                return Err(CoreError::duplicate_slug(&item.slug, first, &item.title));
            }
        }

        debug!(count = items.len(), "content repository ready");
        Ok(Self { items })
    }

    /// All items in insertion order.
    pub fn list_all(&self) -> &[ContentItem] {
        &self.items
    }

    /// Find the item with the given slug.
    pub fn get_by_slug(&self, slug: &str) -> Option<&ContentItem> {
        self.list_all().iter().find(|item| item.slug == slug)
    }

    /// Items ordered by publication date, newest first.
    ///
    /// Undated items come last and keep their insertion order.
    pub fn newest_first(&self) -> Vec<&ContentItem> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| {
            match (&b.metadata.published_at, &a.metadata.published_at) {
                (Some(b_date), Some(a_date)) => b_date.cmp(a_date),
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, Some(_)) => std::cmp::Ordering::Less,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        items
    }

    /// Items sharing a tag with `item`, up to `limit`.
    pub fn related(&self, item: &ContentItem, limit: usize) -> Vec<&ContentItem> {
        related_to(item, &self.items, limit)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
