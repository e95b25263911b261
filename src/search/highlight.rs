use crate::search::matcher::HighlightSpan;

/// A run of display text, either plain or part of the matched substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: String) -> Self {
        Self {
            text,
            highlighted: false,
        }
    }

    fn highlighted(text: String) -> Self {
        Self {
            text,
            highlighted: true,
        }
    }
}

/// Splits display text into prefix, matched run and suffix by character
/// offsets. Out-of-range spans clamp to the text; empty runs are dropped.
pub fn segments(text: &str, span: Option<HighlightSpan>) -> Vec<Segment> {
    let Some(span) = span else {
        return vec![Segment::plain(text.to_string())];
    };

    let chars: Vec<char> = text.chars().collect();
    let start = span.start.min(chars.len());
    let end = span.end.min(chars.len()).max(start);

    let mut out = Vec::new();
    if start > 0 {
        out.push(Segment::plain(chars[..start].iter().collect()));
    }
    if end > start {
        out.push(Segment::highlighted(chars[start..end].iter().collect()));
    }
    if end < chars.len() {
        out.push(Segment::plain(chars[end..].iter().collect()));
    }
    if out.is_empty() {
        out.push(Segment::plain(text.to_string()));
    }
    out
}
