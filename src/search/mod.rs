pub mod highlight;
pub mod matcher;

pub use highlight::{Segment, segments};
pub use matcher::{HighlightSpan, MatchResult, ResultSet, accept, filter};
