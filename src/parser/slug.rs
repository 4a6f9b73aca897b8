//! Anchor slug generation for outline headings.
//!
//! Slugs double as DOM ids and as keys into the expand state, so they must be
//! unique within one extraction pass. [`SlugCounter`] takes care of that.

use std::collections::{HashMap, HashSet};

use unicode_normalization::UnicodeNormalization;

/// Characters kept verbatim besides letters and numbers.
const ALLOWED_PUNCTUATION: [char; 3] = ['-', '_', '~'];

/// Generate a URL-friendly slug from heading text.
///
/// The text is NFKC-normalised first, so compatibility forms such as
/// ligatures and full-width letters fold to their plain spelling. Keeps
/// Unicode letters and numbers plus `-`, `_` and `~`. Control characters
/// (tabs included) are dropped, other whitespace is trimmed, every run of
/// whitespace and hyphens collapses into a single `-`, and the result is
/// lowercased as a whole string. Everything else is dropped.
///
/// # Examples
///
/// ```
/// use tocmd::parser::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("API Reference!"), "api-reference");
/// assert_eq!(slugify("Über Größe"), "über-größe");
/// assert_eq!(slugify("ﬁle Ｎａｍｅ"), "file-name");
/// ```
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .nfkc()
        .filter_map(|c| {
            if c.is_control() {
                None
            } else if c.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(&c) {
                Some(c)
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                None
            }
        })
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.trim().chars() {
        if c == ' ' || c == '-' {
            in_separator = true;
            continue;
        }
        if in_separator {
            slug.push('-');
            in_separator = false;
        }
        slug.push(c);
    }
    if in_separator {
        slug.push('-');
    }

    // Whole-string lowercasing applies context rules such as final sigma.
    slug.to_lowercase()
}

/// Per-pass occurrence counter used to disambiguate repeated slugs.
///
/// The first occurrence of a base slug is returned unchanged, later ones get
/// `-2`, `-3`, … appended in document order. A suffixed slug that collides
/// with one already handed out (a heading literally titled `a-2`) skips to
/// the next free number.
#[derive(Debug, Default)]
pub struct SlugCounter {
    seen: HashMap<String, usize>,
    assigned: HashSet<String>,
}

impl SlugCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `base` and return the unique slug for this occurrence.
    pub fn assign(&mut self, base: String) -> String {
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;

        let mut slug = if *count > 1 {
            format!("{}-{}", base, count)
        } else {
            base.clone()
        };
        while self.assigned.contains(&slug) {
            *count += 1;
            slug = format!("{}-{}", base, count);
        }

        self.assigned.insert(slug.clone());
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("1. Getting Started"), "1-getting-started");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("snake_case ~tilde"), "snake_case-~tilde");
        assert_eq!(slugify("<b>Tags</b> & \"quotes\""), "btagsb-quotes");
    }

    #[test]
    fn test_slugify_keeps_leading_hyphen() {
        assert_eq!(slugify("-flag"), "-flag");
        assert_eq!(slugify("trailing -"), "trailing-");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_normalises_compatibility_forms() {
        assert_eq!(slugify("ﬁle"), "file");
        assert_eq!(slugify("Ｆｕｌｌ Ｗｉｄｔｈ"), "full-width");
        assert_eq!(slugify("Ⅻ"), "xii");
        assert_eq!(slugify("x²"), "x2");
    }

    #[test]
    fn test_slugify_drops_control_characters() {
        assert_eq!(slugify("a\tb"), "ab");
        assert_eq!(slugify("tab\there too"), "tabhere-too");
        assert_eq!(slugify("bell\u{7}"), "bell");
    }

    #[test]
    fn test_slugify_lowercases_in_context() {
        assert_eq!(slugify("ΟΔΟΣ"), "οδος");
        assert_eq!(slugify("ΣΟΦΟΣ ΑΝΘΡΩΠΟΣ"), "σοφος-ανθρωπος");
    }

    #[test]
    fn test_slug_counter_numbers_duplicates() {
        let mut counter = SlugCounter::new();
        assert_eq!(counter.assign("intro".to_string()), "intro");
        assert_eq!(counter.assign("usage".to_string()), "usage");
        assert_eq!(counter.assign("intro".to_string()), "intro-2");
        assert_eq!(counter.assign("intro".to_string()), "intro-3");
    }

    #[test]
    fn test_slug_counter_skips_literal_collisions() {
        let mut counter = SlugCounter::new();
        assert_eq!(counter.assign("a".to_string()), "a");
        assert_eq!(counter.assign("a-2".to_string()), "a-2");
        assert_eq!(counter.assign("a".to_string()), "a-3");
        assert_eq!(counter.assign("a-2".to_string()), "a-2-2");
    }
}
