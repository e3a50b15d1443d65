//! Title to slug conversion.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not an ASCII word character, whitespace or a hyphen.
static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_\s-]").expect("valid strip pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Generate a URL-safe slug from a title.
///
/// Lowercases the title, drops every character that is not a word character,
/// whitespace or `-`, then turns each whitespace run into a single `-`.
/// Leading and trailing whitespace is not trimmed, so `" a "` becomes `"-a-"`.
///
/// ```
/// use folio_core::generate_slug;
///
/// assert_eq!(generate_slug("The Great Gatsby"), "the-great-gatsby");
/// assert_eq!(generate_slug("C++: A Guide!"), "c-a-guide");
/// ```
pub fn generate_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = STRIP.replace_all(&lower, "");
    WHITESPACE.replace_all(&stripped, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(generate_slug("The Great Gatsby"), "the-great-gatsby");
    }

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(generate_slug("C++: A Guide!"), "c-a-guide");
        assert_eq!(generate_slug("Don't Make Me Think"), "dont-make-me-think");
        assert_eq!(generate_slug("Rust & Go"), "rust-go");
    }

    #[test]
    fn test_hyphens_and_underscores_survive() {
        assert_eq!(generate_slug("Self-Help_101"), "self-help_101");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(generate_slug("Deep   Work\t\tNow"), "deep-work-now");
        assert_eq!(generate_slug(" padded "), "-padded-");
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        assert_eq!(generate_slug("Café Society"), "caf-society");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn test_deterministic() {
        let titles = ["Atomic Habits", "C++: A Guide!", "  Mixed   CASE 42 "];
        for title in titles {
            assert_eq!(generate_slug(title), generate_slug(title));
        }
    }

    #[test]
    fn test_alphanumeric_titles_are_lowercase_without_spaces() {
        let titles = ["Zero To One", "SICP 2nd Edition", "a b c 1 2 3"];
        for title in titles {
            let slug = generate_slug(title);
            assert!(!slug.chars().any(char::is_uppercase), "{slug}");
            assert!(!slug.contains(' '), "{slug}");
        }
    }
}
