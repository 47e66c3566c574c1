//! Pluralization heuristic.
//!
//! Collection members expose per-item accessors (`addItem`, `removeItem`)
//! whose names need a singular form of the member name. When the metadata
//! does not spell one out (`singularName`), this heuristic derives it.

use std::borrow::Cow;

/// Ordered suffix table: (suffix, chars to drop, replacement).
///
/// Longest applicable suffix wins, so the order is longest-first. All
/// suffixes are ASCII; the drop counts are therefore byte counts.
const SUFFIX_RULES: &[(&str, usize, &str)] = &[
    ("children", 3, ""),
    ("ches", 2, ""),
    ("shes", 2, ""),
    ("ies", 3, "y"),
    ("ves", 3, "f"),
    ("oes", 2, ""),
    ("ses", 2, ""),
    ("xes", 2, ""),
    ("s", 1, ""),
];

/// Derives a singular form for a collection name.
///
/// Matching is case-insensitive on the suffix; the unmatched prefix keeps
/// its original case. Inputs with no matching suffix are returned
/// unchanged. This is an approximation (it will happily "singularize"
/// non-plural words ending in `s`, such as `status`); callers that care
/// provide an explicit singular name instead.
pub fn singular_of(plural: &str) -> Cow<'_, str> {
    let lower = plural.to_ascii_lowercase();
    for &(suffix, drop, replacement) in SUFFIX_RULES {
        if lower.ends_with(suffix) {
            let stem = &plural[..plural.len() - drop];
            return if replacement.is_empty() {
                Cow::Borrowed(stem)
            } else {
                Cow::Owned(format!("{stem}{replacement}"))
            };
        }
    }
    Cow::Borrowed(plural)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_table() {
        assert_eq!(singular_of("buttons"), "button");
        assert_eq!(singular_of("categories"), "category");
        assert_eq!(singular_of("leaves"), "leaf");
        assert_eq!(singular_of("heroes"), "hero");
        assert_eq!(singular_of("classes"), "class");
        assert_eq!(singular_of("children"), "child");
        assert_eq!(singular_of("boxes"), "box");
        assert_eq!(singular_of("branches"), "branch");
        assert_eq!(singular_of("dashes"), "dash");
    }

    #[test]
    fn suffix_match_is_case_insensitive_and_prefix_preserving() {
        assert_eq!(singular_of("ITEMS"), "ITEM");
        assert_eq!(singular_of("subCategories"), "subCategory");
    }

    #[test]
    fn no_matching_suffix_returns_input_unchanged() {
        assert_eq!(singular_of("content"), "content");
        assert_eq!(singular_of(""), "");
    }

    #[test]
    fn idempotent_when_no_suffix_matches() {
        for word in ["content", "child", "footer", "x"] {
            let once = singular_of(word).into_owned();
            let twice = singular_of(&once).into_owned();
            assert_eq!(once, twice, "{word}");
        }
    }
}
