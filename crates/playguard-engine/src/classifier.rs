use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

/// Outcome of screening a piece of text. `flagged` is always equal to
/// "`terms` is non-empty"; it exists as a convenience for callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub flagged: bool,
    pub terms: BTreeSet<String>,
}

/// Deterministic lexical screen over a fixed term list. Matching is
/// case-insensitive and word-bounded, so a term never fires inside a longer
/// unrelated word ("class" does not contain the term "ass"). Multi-word
/// phrases match literally. No I/O, no state beyond the compiled patterns.
#[derive(Debug, Clone)]
pub struct TextClassifier {
    patterns: Vec<(String, Regex)>,
}

impl TextClassifier {
    pub fn new<I, S>(terms: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut patterns = Vec::new();

        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || !seen.insert(term.clone()) {
                continue;
            }

            let pattern = format!(r"\b{}\b", regex::escape(&term));
            let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
            patterns.push((term, regex));
        }

        Ok(Self { patterns })
    }

    /// Screens a single text. Absent or blank input is never flagged.
    pub fn classify(&self, text: Option<&str>) -> Classification {
        let Some(text) = text else {
            return Classification::default();
        };

        let normalized = text.trim();
        if normalized.is_empty() {
            return Classification::default();
        }

        let mut terms = BTreeSet::new();
        for (term, regex) in &self.patterns {
            if regex.is_match(normalized) {
                terms.insert(term.clone());
            }
        }

        Classification { flagged: !terms.is_empty(), terms }
    }

    /// Screens two fields independently and unions the results.
    pub fn classify_pair(&self, title: Option<&str>, content: Option<&str>) -> Classification {
        let mut combined = self.classify(title);
        combined.terms.extend(self.classify(content).terms);
        combined.flagged = !combined.terms.is_empty();
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TextClassifier {
        TextClassifier::new(["hate", "loser", "ass", "shut up"]).unwrap()
    }

    #[test]
    fn test_whole_word_matches() {
        let result = classifier().classify(Some("I hate homework"));
        assert!(result.flagged);
        assert!(result.terms.contains("hate"));
    }

    #[test]
    fn test_substring_inside_word_does_not_match() {
        let result = classifier().classify(Some("my favorite class and classic assignments"));
        assert!(!result.flagged);
        assert!(result.terms.is_empty());
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let result = classifier().classify(Some("  you LOSER  "));
        assert!(result.flagged);
        assert!(result.terms.contains("loser"));
    }

    #[test]
    fn test_multi_word_phrase_matches_literally() {
        assert!(classifier().classify(Some("please shut up now")).flagged);
        assert!(!classifier().classify(Some("the shutters went up")).flagged);
    }

    #[test]
    fn test_absent_and_empty_input() {
        assert!(!classifier().classify(None).flagged);
        assert!(!classifier().classify(Some("")).flagged);
        assert!(!classifier().classify(Some("   ")).flagged);
    }

    #[test]
    fn test_terms_are_deduplicated() {
        let result = classifier().classify(Some("hate hate hate"));
        assert_eq!(result.terms.len(), 1);
    }

    #[test]
    fn test_pair_unions_terms_and_ors_flags() {
        let c = classifier();

        let both = c.classify_pair(Some("a loser title"), Some("full of hate"));
        assert!(both.flagged);
        assert_eq!(both.terms.len(), 2);

        let title_only = c.classify_pair(Some("loser"), Some("a kind story"));
        assert!(title_only.flagged);

        let neither = c.classify_pair(Some("a nice title"), Some("a kind story"));
        assert!(!neither.flagged);
        assert!(neither.terms.is_empty());
    }

    #[test]
    fn test_duplicate_config_terms_collapse() {
        let c = TextClassifier::new(["hate", "HATE", " hate "]).unwrap();
        let result = c.classify(Some("hate"));
        assert_eq!(result.terms.len(), 1);
    }
}
