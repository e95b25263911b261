pub mod core;
pub mod runtime;
pub mod search;
pub mod terminal;

pub use core::candidate::Candidate;
pub use core::config::{AutocompleteConfig, SourceMode};
pub use core::error::ConfigError;

pub use runtime::dismiss::{DismissHub, DismissSubscription};
pub use runtime::event::{Effect, WidgetEvent};
pub use runtime::fetch::{CandidateFetcher, FetchCompletion, FetchError, FetchExecutor, FetchState};
pub use runtime::navigation::NavigationState;
pub use runtime::scheduler::DebounceScheduler;
pub use runtime::widget::Autocomplete;

pub use search::highlight::{Segment, segments};
pub use search::matcher::{HighlightSpan, MatchResult, ResultSet};

pub use terminal::{KeyCode, KeyEvent, KeyModifiers};
