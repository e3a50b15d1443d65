//! Related-content lookup by shared tags.

use crate::content::ContentItem;

/// Find items sharing at least one tag with `item`.
///
/// `item` itself (matched by slug) is never included. Results keep the order
/// of `all` and stop after `limit` matches; they are not ranked by overlap.
pub fn related_to<'a>(
    item: &ContentItem,
    all: &'a [ContentItem],
    limit: usize,
) -> Vec<&'a ContentItem> {
    all.iter()
        .filter(|other| other.slug != item.slug && other.shares_tag_with(item))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, Metadata};

    fn book(title: &str, tags: &[&str]) -> ContentItem {
        let metadata = Metadata {
            tags: tags.iter().map(ToString::to_string).collect(),
            ..Default::default()
        };
        ContentItem::new(ContentKind::Book, title, metadata, "")
    }

    fn shelf() -> Vec<ContentItem> {
        vec![
            book("Dune", &["sci-fi", "classic"]),
            book("Foundation", &["sci-fi"]),
            book("Emma", &["classic", "romance"]),
            book("Hyperion", &["sci-fi"]),
            book("Neuromancer", &["sci-fi", "cyberpunk"]),
            book("Cosmos", &["science"]),
        ]
    }

    fn slugs(items: &[&ContentItem]) -> Vec<String> {
        items.iter().map(|i| i.slug.clone()).collect()
    }

    #[test]
    fn test_related_in_source_order() {
        let all = shelf();
        let related = related_to(&all[0], &all, 10);
        assert_eq!(
            slugs(&related),
            vec!["foundation", "emma", "hyperion", "neuromancer"]
        );
    }

    #[test]
    fn test_related_respects_limit_and_excludes_self() {
        let all = shelf();
        for item in &all {
            let related = related_to(item, &all, 3);
            assert!(related.len() <= 3);
            assert!(related.iter().all(|r| r.slug != item.slug));
        }
        let related = related_to(&all[0], &all, 3);
        assert_eq!(slugs(&related), vec!["foundation", "emma", "hyperion"]);
    }

    #[test]
    fn test_related_not_ranked_by_overlap() {
        let all = vec![
            book("Target", &["a", "b"]),
            book("One Shared", &["a"]),
            book("Two Shared", &["a", "b"]),
        ];
        let related = related_to(&all[0], &all, 1);
        assert_eq!(slugs(&related), vec!["one-shared"]);
    }

    #[test]
    fn test_no_shared_tags() {
        let all = shelf();
        let cosmos = &all[5];
        assert!(related_to(cosmos, &all, 3).is_empty());
    }

    #[test]
    fn test_untagged_item_has_no_related() {
        let mut all = shelf();
        all.push(book("Untagged", &[]));
        let untagged = all.last().expect("pushed").clone();
        assert!(related_to(&untagged, &all, 3).is_empty());
    }

    #[test]
    fn test_zero_limit() {
        let all = shelf();
        assert!(related_to(&all[0], &all, 0).is_empty());
    }

    #[test]
    fn test_item_outside_collection() {
        let all = shelf();
        let outsider = book("Snow Crash", &["cyberpunk"]);
        let related = related_to(&outsider, &all, 3);
        assert_eq!(slugs(&related), vec!["neuromancer"]);
    }
}
