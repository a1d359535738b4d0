use crate::record::{StyleTag, Sweetness};
use std::collections::BTreeSet;

const DRY_WORDS: &[&str] = &[
    "bone-dry",
    "bone dry",
    "very dry",
    "crisp",
    "taut",
    "zesty",
    "racy acidity",
    "high acidity",
    "bracing acidity",
    "lean",
    "minerally",
    "chalky",
    "steely",
];

const MEDIUM_WORDS: &[&str] = &[
    "off-dry",
    "off dry",
    "hint of sweetness",
    "touch of sweetness",
    "slightly sweet",
    "trace of sweetness",
    "kiss of sweetness",
    "ripe fruit",
    "lush",
    "round and fruity",
];

const SWEET_WORDS: &[&str] = &[
    "dessert wine",
    "dessert-style",
    "late harvest",
    "ice wine",
    "port",
    "sauternes",
    "moscato",
    "sticky",
    "honeyed",
    "very sweet",
    "syrupy",
    "unctuous",
];

const FRUITY_WORDS: &[&str] = &[
    "fruit", "berries", "berry", "plum", "peach", "apple", "pear", "cherry", "citrus", "orange",
    "lemon", "lime", "grapefruit", "tropical", "mango", "pineapple",
];
const SPICY_WORDS: &[&str] = &["spice", "spicy", "pepper", "clove", "cinnamon", "nutmeg", "anise"];
const FLORAL_WORDS: &[&str] = &["floral", "flower", "violet", "rose", "jasmine", "honeysuckle"];
const EARTHY_WORDS: &[&str] = &["earthy", "earth", "mushroom", "forest floor", "leather", "tobacco"];

fn any_match(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Infer a sweetness category from free-text description.
/// Conflicting signals (sweet plus dry/medium) resolve toward Medium.
/// Total over all inputs; empty text is Medium.
pub fn sweetness_of(text: &str) -> Sweetness {
    if text.is_empty() {
        return Sweetness::Medium;
    }
    let t = text.to_lowercase();

    let has_dry = any_match(&t, DRY_WORDS);
    let has_med = any_match(&t, MEDIUM_WORDS);
    let has_sweet = any_match(&t, SWEET_WORDS);

    if has_sweet {
        if has_dry || has_med {
            return Sweetness::Medium;
        }
        return Sweetness::Sweet;
    }
    if has_dry && !has_med {
        return Sweetness::Dry;
    }
    if has_med {
        return Sweetness::Medium;
    }
    // Bare-substring fallback. Fires on unrelated context too ("dry-farmed");
    // inherited behavior, kept.
    if t.contains("dry") {
        return Sweetness::Dry;
    }
    Sweetness::Medium
}

/// Collect style tags from free-text description. Groups are tested
/// independently; zero to four tags may apply.
pub fn style_tags_of(text: &str) -> BTreeSet<StyleTag> {
    let mut tags = BTreeSet::new();
    if text.is_empty() {
        return tags;
    }
    let t = text.to_lowercase();

    if any_match(&t, FRUITY_WORDS) {
        tags.insert(StyleTag::Fruity);
    }
    if any_match(&t, SPICY_WORDS) {
        tags.insert(StyleTag::Spicy);
    }
    if any_match(&t, FLORAL_WORDS) {
        tags.insert(StyleTag::Floral);
    }
    if any_match(&t, EARTHY_WORDS) {
        tags.insert(StyleTag::Earthy);
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_medium() {
        assert_eq!(sweetness_of(""), Sweetness::Medium);
    }

    #[test]
    fn dry_indicator_alone_is_dry() {
        assert_eq!(sweetness_of("A bone-dry white with lift."), Sweetness::Dry);
        assert_eq!(sweetness_of("Crisp and refreshing."), Sweetness::Dry);
    }

    #[test]
    fn sweet_indicator_alone_is_sweet() {
        assert_eq!(sweetness_of("Classic late harvest riesling."), Sweetness::Sweet);
    }

    #[test]
    fn conflicting_signals_resolve_to_medium() {
        assert_eq!(
            sweetness_of("A late harvest style, yet crisp on the finish."),
            Sweetness::Medium
        );
        assert_eq!(
            sweetness_of("Honeyed nose with a hint of sweetness."),
            Sweetness::Medium
        );
    }

    #[test]
    fn medium_indicator_beats_dry() {
        assert_eq!(sweetness_of("Crisp but off-dry."), Sweetness::Medium);
    }

    #[test]
    fn bare_dry_substring_falls_back_to_dry() {
        assert_eq!(sweetness_of("Notably dry tannins."), Sweetness::Dry);
        // Known imprecision: unrelated "dry" context still classifies Dry.
        assert_eq!(sweetness_of("From dry-farmed vines."), Sweetness::Dry);
    }

    #[test]
    fn no_indicators_default_to_medium() {
        assert_eq!(sweetness_of("An unremarkable wine."), Sweetness::Medium);
    }

    #[test]
    fn uppercase_input_matches() {
        assert_eq!(sweetness_of("VERY SWEET and SYRUPY"), Sweetness::Sweet);
    }

    #[test]
    fn style_tags_empty_text() {
        assert!(style_tags_of("").is_empty());
    }

    #[test]
    fn style_tags_are_independent() {
        let tags = style_tags_of("Black cherry and white pepper over forest floor.");
        assert!(tags.contains(&StyleTag::Fruity));
        assert!(tags.contains(&StyleTag::Spicy));
        assert!(tags.contains(&StyleTag::Earthy));
        assert!(!tags.contains(&StyleTag::Floral));
    }

    #[test]
    fn style_tags_subset_of_known_set() {
        for text in ["plum jasmine leather clove", "nothing relevant", ""] {
            let tags = style_tags_of(text);
            assert!(tags.iter().all(|t| StyleTag::ALL.contains(t)));
        }
    }
}
