use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::core::candidate::Candidate;

/// Character offsets of the matched run inside a row's display text.
///
/// The span anchors at the first occurrence of the query but is sized by the
/// query's character count, not the matched text. When case folding changes
/// effective length the two can disagree; that is shipped behavior, kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

/// One row of the dropdown: a candidate plus where the query matched it.
/// The placeholder row carries the no-match message and is never selectable.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub candidate: Candidate,
    pub span: Option<HighlightSpan>,
    pub placeholder: bool,
}

impl MatchResult {
    fn row(candidate: Candidate, span: Option<HighlightSpan>) -> Self {
        Self {
            candidate,
            span,
            placeholder: false,
        }
    }
}

/// Rows currently shown, in input-candidate order. Derived only from
/// (candidates, query); never independently mutated.
pub type ResultSet = Vec<MatchResult>;

/// Static-mode filtering: case-insensitive substring match against each
/// candidate's display text, original order preserved. An empty query yields
/// an empty set (dropdown stays closed); zero matches yield exactly one
/// placeholder row.
pub fn filter(
    candidates: &[Candidate],
    query: &str,
    lookup_key: Option<&str>,
    no_match_message: &str,
) -> ResultSet {
    if query.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    if let Some(pattern) = query_pattern(query) {
        for candidate in candidates {
            let Some(display) = candidate.display_text(lookup_key) else {
                continue;
            };
            if let Some(span) = first_match(&pattern, display, query) {
                results.push(MatchResult::row(candidate.clone(), Some(span)));
            }
        }
    }

    if results.is_empty() {
        results.push(placeholder_row(no_match_message, lookup_key));
    }
    results
}

/// Dynamic-mode application of a fetched list. Filtering is the retrieval
/// function's responsibility, so rows are taken as-is; spans are computed
/// where the query happens to occur, purely for display. An empty fetched
/// list yields the placeholder row.
pub fn accept(
    candidates: &[Candidate],
    query: &str,
    lookup_key: Option<&str>,
    no_match_message: &str,
) -> ResultSet {
    let pattern = query_pattern(query);
    let mut results: ResultSet = candidates
        .iter()
        .map(|candidate| {
            let span = pattern.as_ref().and_then(|pattern| {
                let display = candidate.display_text(lookup_key)?;
                first_match(pattern, display, query)
            });
            MatchResult::row(candidate.clone(), span)
        })
        .collect();

    if results.is_empty() {
        results.push(placeholder_row(no_match_message, lookup_key));
    }
    results
}

fn query_pattern(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

fn first_match(pattern: &Regex, display: &str, query: &str) -> Option<HighlightSpan> {
    let found = pattern.find(display)?;
    let start = display[..found.start()].chars().count();
    Some(HighlightSpan {
        start,
        end: start + query.chars().count(),
    })
}

fn placeholder_row(message: &str, lookup_key: Option<&str>) -> MatchResult {
    let candidate = match lookup_key {
        Some(key) => {
            let mut fields = IndexMap::new();
            fields.insert(key.to_string(), Value::String(message.to_string()));
            Candidate::Record(fields)
        }
        None => Candidate::Text(message.to_string()),
    };
    MatchResult {
        candidate,
        span: None,
        placeholder: true,
    }
}

#[cfg(test)]
mod tests {
    use super::{HighlightSpan, accept, filter};
    use crate::core::candidate::Candidate;
    use crate::core::config::NO_MATCH_DEFAULT;
    use serde_json::Value;

    fn compass() -> Vec<Candidate> {
        ["north", "south", "east", "west"]
            .into_iter()
            .map(Candidate::from)
            .collect()
    }

    #[test]
    fn empty_query_yields_empty_set() {
        assert!(filter(&compass(), "", None, NO_MATCH_DEFAULT).is_empty());
        assert!(filter(&[], "", None, NO_MATCH_DEFAULT).is_empty());
    }

    #[test]
    fn exact_query_matches_one_row_with_full_span() {
        let results = filter(&compass(), "south", None, NO_MATCH_DEFAULT);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate, Candidate::text("south"));
        assert_eq!(results[0].span, Some(HighlightSpan { start: 0, end: 5 }));
        assert!(!results[0].placeholder);
    }

    #[test]
    fn matching_is_case_insensitive_and_order_preserving() {
        let results = filter(&compass(), "S", None, NO_MATCH_DEFAULT);
        let texts: Vec<&str> = results
            .iter()
            .filter_map(|row| row.candidate.display_text(None))
            .collect();
        // "north" has no s; the rest keep input order.
        assert_eq!(texts, ["south", "east", "west"]);
    }

    #[test]
    fn no_match_yields_single_placeholder_row() {
        let results = filter(&compass(), "no-match-x", None, NO_MATCH_DEFAULT);
        assert_eq!(results.len(), 1);
        assert!(results[0].placeholder);
        assert_eq!(results[0].span, None);
        assert_eq!(
            results[0].candidate,
            Candidate::text("No records found....")
        );
    }

    #[test]
    fn placeholder_row_takes_the_record_shape_under_a_lookup_key() {
        let candidates = [Candidate::record([(
            "name".to_string(),
            Value::String("Harvard University".to_string()),
        )])];
        let results = filter(&candidates, "zzz", Some("name"), "nothing here");
        assert_eq!(results.len(), 1);
        assert!(results[0].placeholder);
        assert_eq!(
            results[0].candidate.display_text(Some("name")),
            Some("nothing here")
        );
    }

    #[test]
    fn span_anchors_at_first_occurrence_sized_by_query() {
        let candidates = [Candidate::record([(
            "name".to_string(),
            Value::String("Harvard University".to_string()),
        )])];
        let results = filter(&candidates, "harv", Some("name"), NO_MATCH_DEFAULT);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].span, Some(HighlightSpan { start: 0, end: 4 }));
    }

    #[test]
    fn span_anchors_mid_string() {
        let candidates = [Candidate::text("southwest wind")];
        let results = filter(&candidates, "WEST", None, NO_MATCH_DEFAULT);
        assert_eq!(results[0].span, Some(HighlightSpan { start: 5, end: 9 }));
    }

    #[test]
    fn regex_metacharacters_in_the_query_are_literal() {
        let candidates = [Candidate::text("a.b"), Candidate::text("axb")];
        let results = filter(&candidates, ".", None, NO_MATCH_DEFAULT);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate, Candidate::text("a.b"));
    }

    #[test]
    fn accept_keeps_rows_the_query_does_not_match() {
        let fetched = [Candidate::text("south"), Candidate::text("unrelated")];
        let results = accept(&fetched, "south", None, NO_MATCH_DEFAULT);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].span, Some(HighlightSpan { start: 0, end: 5 }));
        assert_eq!(results[1].span, None);
        assert!(!results[1].placeholder);
    }

    #[test]
    fn accept_of_empty_list_yields_placeholder() {
        let results = accept(&[], "south", None, NO_MATCH_DEFAULT);
        assert_eq!(results.len(), 1);
        assert!(results[0].placeholder);
    }
}
