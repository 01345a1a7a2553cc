//! Label Normalization
//!
//! Maps raw classifier labels ("Granny Smith apple", "hot dog, frankfurter")
//! to canonical pantry terms, discarding non-food objects such as cookware,
//! packaging, and appliances that the classifier picks up from the scene.
//!
//! The mapping is a fixed, ordered rule table rather than branching logic so
//! the rule set stays data-driven and independently testable.

/// Maximum number of tokens in a canonical label.
pub const MAX_LABEL_TOKENS: usize = 2;

/// How a rewrite rule locates its needle inside a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Needle must appear as a whole word (a trailing "s"/"es" plural is
    /// tolerated). Used for terms like "egg" that are prefixes of unrelated
    /// foods ("eggplant").
    Word(&'static str),
    /// Needle must start at a word boundary; the rest of the word and any
    /// trailing descriptors are ignored ("tomatoes", "cherry tomato souffle").
    Stem(&'static str),
}

impl Matcher {
    /// Check whether this matcher fires on an already-lowercased label.
    pub fn matches(&self, label: &str) -> bool {
        match *self {
            Matcher::Word(needle) => find_at_word_start(label, needle, false),
            Matcher::Stem(needle) => find_at_word_start(label, needle, true),
        }
    }
}

/// A single canonicalization rule: if the matcher fires, the whole label
/// collapses to the canonical term.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    pub matcher: Matcher,
    pub canonical: &'static str,
}

/// Non-food object terms, matched as substrings of the lowercased label.
/// Covers cookware, dishware, flatware, packaging, fixtures, and electronics
/// that commonly appear in kitchen photos.
const NON_FOOD_TERMS: &[&str] = &[
    "pan",
    "dish",
    "spatula",
    "packet",
    "bottle",
    "box",
    "carton",
    "plate",
    "bowl",
    "jar",
    "mug",
    "cup",
    "spoon",
    "fork",
    "napkin",
    "bag",
    "stove",
    "microwave",
    "sink",
    "refrigerator",
    "laptop",
    "phone",
    "keyboard",
];

/// Canonicalization rules in priority order; the first match wins.
/// "cheeseburger" must precede the "cheese" stem, and the pepper variants
/// must precede any generic produce stems.
const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule { matcher: Matcher::Word("bell pepper"), canonical: "bell pepper" },
    RewriteRule { matcher: Matcher::Word("red pepper"), canonical: "bell pepper" },
    RewriteRule { matcher: Matcher::Word("green pepper"), canonical: "bell pepper" },
    RewriteRule { matcher: Matcher::Word("hotdog"), canonical: "sausage" },
    RewriteRule { matcher: Matcher::Word("hot dog"), canonical: "sausage" },
    RewriteRule { matcher: Matcher::Word("hamburger"), canonical: "ground beef" },
    RewriteRule { matcher: Matcher::Word("cheeseburger"), canonical: "ground beef" },
    RewriteRule { matcher: Matcher::Word("loaf"), canonical: "bread" },
    RewriteRule { matcher: Matcher::Word("spaghetti"), canonical: "pasta" },
    RewriteRule { matcher: Matcher::Stem("tomato"), canonical: "tomato" },
    RewriteRule { matcher: Matcher::Stem("broccoli"), canonical: "broccoli" },
    RewriteRule { matcher: Matcher::Stem("carrot"), canonical: "carrot" },
    RewriteRule { matcher: Matcher::Stem("cucumber"), canonical: "cucumber" },
    RewriteRule { matcher: Matcher::Stem("lemon"), canonical: "lemon" },
    RewriteRule { matcher: Matcher::Stem("lime"), canonical: "lime" },
    RewriteRule { matcher: Matcher::Word("egg"), canonical: "eggs" },
    RewriteRule { matcher: Matcher::Stem("cheese"), canonical: "cheese" },
    RewriteRule { matcher: Matcher::Stem("milk"), canonical: "milk" },
];

/// Normalize one raw classifier label to a canonical pantry term.
///
/// Returns `None` when the label is empty or names a non-food object.
/// Pure and deterministic: the same input always yields the same output.
pub fn normalize(raw_label: &str) -> Option<String> {
    let label = raw_label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }

    if NON_FOOD_TERMS.iter().any(|term| label.contains(term)) {
        return None;
    }

    let canonical = REWRITE_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&label))
        .map(|rule| rule.canonical.to_string())
        .unwrap_or(label);

    Some(truncate_tokens(&canonical))
}

/// Keep at most [`MAX_LABEL_TOKENS`] whitespace-separated tokens, rejoined
/// with a single space.
fn truncate_tokens(label: &str) -> String {
    label
        .split_whitespace()
        .take(MAX_LABEL_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find `needle` starting at a word boundary in `label`. With `allow_tail`
/// the rest of the word may be anything; without it only an exact word or a
/// trailing "s"/"es" plural counts.
fn find_at_word_start(label: &str, needle: &str, allow_tail: bool) -> bool {
    let mut search_from = 0;
    while let Some(pos) = label[search_from..].find(needle) {
        let start = search_from + pos;
        let end = start + needle.len();

        let boundary_before = start == 0
            || !label.as_bytes()[start - 1].is_ascii_alphanumeric();

        let tail: String = label[end..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        let boundary_after = allow_tail || tail.is_empty() || tail == "s" || tail == "es";

        if boundary_before && boundary_after {
            return true;
        }
        search_from = start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_food_labels_discarded() {
        assert_eq!(normalize("frying pan"), None);
        assert_eq!(normalize("plastic bottle"), None);
        assert_eq!(normalize("dinner plate"), None);
        assert_eq!(normalize("coffee mug"), None);
        assert_eq!(normalize("refrigerator"), None);
        assert_eq!(normalize("laptop"), None);
    }

    #[test]
    fn test_empty_label_discarded() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn test_pepper_variants_collapse() {
        assert_eq!(normalize("red bell pepper"), Some("bell pepper".to_string()));
        assert_eq!(normalize("Green Pepper"), Some("bell pepper".to_string()));
        assert_eq!(normalize("bell pepper"), Some("bell pepper".to_string()));
    }

    #[test]
    fn test_rewrite_rules() {
        assert_eq!(normalize("hot dog"), Some("sausage".to_string()));
        assert_eq!(normalize("hot dog, frankfurter"), Some("sausage".to_string()));
        assert_eq!(normalize("hotdog"), Some("sausage".to_string()));
        assert_eq!(normalize("cheeseburger"), Some("ground beef".to_string()));
        assert_eq!(normalize("hamburger"), Some("ground beef".to_string()));
        assert_eq!(normalize("meat loaf"), Some("bread".to_string()));
        assert_eq!(normalize("spaghetti squash"), Some("pasta".to_string()));
    }

    #[test]
    fn test_produce_descriptors_stripped() {
        assert_eq!(normalize("grape tomato"), Some("tomato".to_string()));
        assert_eq!(normalize("tomatoes"), Some("tomato".to_string()));
        assert_eq!(normalize("baby carrots"), Some("carrot".to_string()));
        assert_eq!(normalize("English cucumber"), Some("cucumber".to_string()));
        assert_eq!(normalize("cheddar cheese wedge"), Some("cheese".to_string()));
        assert_eq!(normalize("whole milk"), Some("milk".to_string()));
    }

    #[test]
    fn test_egg_matches_whole_word_only() {
        assert_eq!(normalize("egg"), Some("eggs".to_string()));
        assert_eq!(normalize("eggs"), Some("eggs".to_string()));
        // "eggplant" is its own food, not eggs
        assert_eq!(normalize("eggplant"), Some("eggplant".to_string()));
    }

    #[test]
    fn test_canonical_labels_are_fixed_points() {
        for label in ["tomato", "bell pepper", "sausage", "ground beef", "bread", "pasta"] {
            assert_eq!(normalize(label), Some(label.to_string()));
        }
    }

    #[test]
    fn test_output_capped_at_two_tokens() {
        let cases = [
            "Granny Smith apple",
            "extra virgin olive oil",
            "red bell pepper",
            "basil",
        ];
        for raw in cases {
            let normalized = normalize(raw).unwrap();
            assert!(
                normalized.split_whitespace().count() <= MAX_LABEL_TOKENS,
                "'{}' normalized to '{}'",
                raw,
                normalized
            );
        }
    }

    #[test]
    fn test_unrecognized_labels_lowercased_and_truncated() {
        assert_eq!(normalize("Granny Smith apple"), Some("granny smith".to_string()));
        assert_eq!(normalize("Basil"), Some("basil".to_string()));
    }

    #[test]
    fn test_deterministic() {
        for _ in 0..3 {
            assert_eq!(normalize("grape tomato"), Some("tomato".to_string()));
        }
    }
}
