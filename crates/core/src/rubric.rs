//! Rubric score extraction from free-text model output.
//!
//! The scoring prompt asks the model to answer with one `Criterion: score`
//! line per rubric dimension, but nothing guarantees it does. Extraction is
//! therefore best-effort: every requested criterion is present in the result,
//! and a criterion the text does not mention is recorded as unscored (`None`)
//! rather than zero or an error.
//!
//! Scores are passed through as written. A model answering `Plot: 100`
//! yields 100; no clamping to the 0-10 range is applied.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Criterion constants
// ---------------------------------------------------------------------------

pub const PLOT: &str = "Plot";
pub const CHARACTER_DEVELOPMENT: &str = "Character Development";
pub const DIALOGUE: &str = "Dialogue";
pub const ORIGINALITY: &str = "Originality";
pub const THEME: &str = "Theme";

/// The five rubric dimensions, in the order they are requested and reported.
pub const DEFAULT_CRITERIA: &[&str] = &[PLOT, CHARACTER_DEVELOPMENT, DIALOGUE, ORIGINALITY, THEME];

/// Upper bound of the score range the prompt asks for.
///
/// Informational only: extracted values are not checked against it.
pub const MAX_SCORE: u32 = 10;

// ---------------------------------------------------------------------------
// RubricScore
// ---------------------------------------------------------------------------

/// Ordered mapping from criterion name to score.
///
/// `None` is the absence marker: the criterion was requested but the source
/// text held no parseable score for it. Serializes as a JSON object whose
/// keys follow the requested criterion order, with `null` for absent scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RubricScore(IndexMap<String, Option<u32>>);

impl RubricScore {
    /// Score for `criterion`, or `None` if it is unscored or was never requested.
    pub fn score(&self, criterion: &str) -> Option<u32> {
        self.0.get(criterion).copied().flatten()
    }

    /// Whether `criterion` was part of the requested key set.
    pub fn contains(&self, criterion: &str) -> bool {
        self.0.contains_key(criterion)
    }

    /// Criterion names in requested order.
    pub fn criteria(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(criterion, score)` pairs in requested order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u32>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of criteria that received a score.
    pub fn scored_count(&self) -> usize {
        self.0.values().filter(|v| v.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract one score per criterion from `text`.
///
/// For each criterion the first occurrence of `<criterion>:` followed by
/// optional whitespace and a run of ASCII digits is used. Anything after the
/// digit run is ignored, so `Theme:9something` yields 9.
///
/// Scores are `u32`. A digit run above `u32::MAX` (4294967295) is recorded
/// as unscored rather than saturated or truncated.
///
/// The result always contains exactly the (deduplicated) criteria passed in,
/// in the same order, regardless of what the text contains.
pub fn extract_scores(text: &str, criteria: &[&str]) -> RubricScore {
    let scores = criteria
        .iter()
        .map(|criterion| (criterion.to_string(), find_score(text, criterion)))
        .collect();
    RubricScore(scores)
}

/// [`extract_scores`] over [`DEFAULT_CRITERIA`].
pub fn extract_default_scores(text: &str) -> RubricScore {
    extract_scores(text, DEFAULT_CRITERIA)
}

/// Compiled `<criterion>:\s*<digits>` patterns for [`DEFAULT_CRITERIA`].
static DEFAULT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    DEFAULT_CRITERIA
        .iter()
        .map(|criterion| {
            let re = Regex::new(&score_pattern(criterion)).expect("escaped criterion is a valid regex");
            (*criterion, re)
        })
        .collect()
});

fn score_pattern(criterion: &str) -> String {
    format!(r"{}:\s*([0-9]+)", regex::escape(criterion))
}

fn find_score(text: &str, criterion: &str) -> Option<u32> {
    if let Some((_, re)) = DEFAULT_PATTERNS.iter().find(|(name, _)| *name == criterion) {
        return capture_score(re, text);
    }
    let re = Regex::new(&score_pattern(criterion)).ok()?;
    capture_score(&re, text)
}

fn capture_score(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_is_parsed_in_order() {
        let text = "Plot: 8\nCharacter Development: 7\nDialogue: 6\nOriginality: 9\nTheme: 5";
        let scores = extract_default_scores(text);

        let pairs: Vec<_> = scores.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (PLOT, Some(8)),
                (CHARACTER_DEVELOPMENT, Some(7)),
                (DIALOGUE, Some(6)),
                (ORIGINALITY, Some(9)),
                (THEME, Some(5)),
            ]
        );
        assert_eq!(scores.scored_count(), 5);
    }

    #[test]
    fn single_criterion_leaves_others_absent() {
        let scores = extract_default_scores("Dialogue: 7");

        assert_eq!(scores.len(), 5);
        assert_eq!(scores.score(DIALOGUE), Some(7));
        for criterion in [PLOT, CHARACTER_DEVELOPMENT, ORIGINALITY, THEME] {
            assert!(scores.contains(criterion));
            assert_eq!(scores.score(criterion), None, "{criterion} should be unscored");
        }
    }

    #[test]
    fn digits_directly_after_colon_are_parsed() {
        let scores = extract_default_scores("Theme:9something");
        assert_eq!(scores.score(THEME), Some(9));
    }

    #[test]
    fn zero_is_distinct_from_absent() {
        let scores = extract_default_scores("Plot: 0");
        assert_eq!(scores.score(PLOT), Some(0));
        assert_eq!(scores.score(THEME), None);
        assert_eq!(scores.scored_count(), 1);
    }

    #[test]
    fn out_of_range_scores_pass_through() {
        let scores = extract_default_scores("Originality: 100");
        assert_eq!(scores.score(ORIGINALITY), Some(100));
    }

    #[test]
    fn first_match_wins() {
        let scores = extract_default_scores("Plot: 3\nRevised Plot: 9");
        assert_eq!(scores.score(PLOT), Some(3));
    }

    #[test]
    fn non_numeric_score_is_absent() {
        let scores = extract_default_scores("Plot: excellent\nTheme: N/A");
        assert_eq!(scores.score(PLOT), None);
        assert_eq!(scores.score(THEME), None);
    }

    #[test]
    fn overflowing_digit_run_is_absent() {
        let scores = extract_default_scores("Plot: 99999999999999999999");
        assert_eq!(scores.score(PLOT), None);
    }

    #[test]
    fn u32_boundary_is_the_score_limit() {
        let scores = extract_default_scores("Plot: 4294967295\nTheme: 4294967296");
        assert_eq!(scores.score(PLOT), Some(u32::MAX));
        assert_eq!(scores.score(THEME), None);
    }

    #[test]
    fn default_patterns_cover_every_default_criterion() {
        let names: Vec<&str> = DEFAULT_PATTERNS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, DEFAULT_CRITERIA);
        for (name, re) in DEFAULT_PATTERNS.iter() {
            assert!(re.is_match(&format!("{name}: 4")), "{name} pattern does not match");
        }
    }

    #[test]
    fn cached_and_custom_criteria_agree() {
        let text = "Character Development: 7\nPacing: 3";
        let mixed = extract_scores(text, &[CHARACTER_DEVELOPMENT, "Pacing"]);
        assert_eq!(mixed.score(CHARACTER_DEVELOPMENT), Some(7));
        assert_eq!(mixed.score("Pacing"), Some(3));
        assert_eq!(
            mixed.score(CHARACTER_DEVELOPMENT),
            extract_default_scores(text).score(CHARACTER_DEVELOPMENT)
        );
    }

    #[test]
    fn empty_text_yields_full_key_set() {
        let scores = extract_default_scores("");
        assert_eq!(scores.criteria().collect::<Vec<_>>(), DEFAULT_CRITERIA);
        assert_eq!(scores.scored_count(), 0);
    }

    #[test]
    fn custom_criteria_control_the_key_set() {
        let scores = extract_scores("Pacing: 4\nPlot: 8", &["Pacing", "Tone"]);
        assert_eq!(scores.criteria().collect::<Vec<_>>(), vec!["Pacing", "Tone"]);
        assert_eq!(scores.score("Pacing"), Some(4));
        assert_eq!(scores.score("Tone"), None);
        assert!(!scores.contains(PLOT));
    }

    #[test]
    fn regex_metacharacters_in_criterion_are_literal() {
        let scores = extract_scores("Plot (A+B): 6\nPlot AAB: 2", &["Plot (A+B)"]);
        assert_eq!(scores.score("Plot (A+B)"), Some(6));
    }

    #[test]
    fn serializes_absent_scores_as_null_in_order() {
        let scores = extract_default_scores("Dialogue: 7");
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(
            json,
            r#"{"Plot":null,"Character Development":null,"Dialogue":7,"Originality":null,"Theme":null}"#
        );
    }
}
