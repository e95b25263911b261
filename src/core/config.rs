use std::sync::Arc;
use std::time::Duration;

use crate::core::candidate::{Candidate, validate_shape};
use crate::core::error::ConfigError;
use crate::runtime::dismiss::DismissSubscription;
use crate::runtime::fetch::CandidateFetcher;

pub const NO_MATCH_DEFAULT: &str = "No records found....";
pub const DEBOUNCE_WINDOW_DEFAULT: Duration = Duration::from_millis(500);

/// Whether the widget filters a host-owned list locally or defers every
/// query to a caller-supplied retrieval function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    #[default]
    Static,
    Dynamic,
}

/// Construction-time configuration for [`Autocomplete`](crate::Autocomplete).
/// Validation runs once in `Autocomplete::new`; after that the engine never
/// revisits configuration validity.
pub struct AutocompleteConfig {
    pub(crate) mode: SourceMode,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) fetcher: Option<Arc<dyn CandidateFetcher>>,
    pub(crate) lookup_key: Option<String>,
    pub(crate) placeholder: Option<String>,
    pub(crate) no_match_message: String,
    pub(crate) debounce_window: Duration,
    pub(crate) discard_stale_responses: bool,
    pub(crate) dismiss: Option<DismissSubscription>,
}

impl AutocompleteConfig {
    pub fn new() -> Self {
        Self {
            mode: SourceMode::Static,
            candidates: Vec::new(),
            fetcher: None,
            lookup_key: None,
            placeholder: None,
            no_match_message: NO_MATCH_DEFAULT.to_string(),
            debounce_window: DEBOUNCE_WINDOW_DEFAULT,
            discard_stale_responses: false,
            dismiss: None,
        }
    }

    /// The host-owned candidate collection, filtered locally in static mode.
    pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = Candidate>) -> Self {
        self.candidates = candidates.into_iter().collect();
        self
    }

    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// The retrieval capability consulted per query in dynamic mode.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn CandidateFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Field name holding the display text of record-shaped candidates.
    pub fn with_lookup_key(mut self, key: impl Into<String>) -> Self {
        self.lookup_key = Some(key.into());
        self
    }

    /// Input placeholder text, carried for the presentation layer.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_no_match_message(mut self, message: impl Into<String>) -> Self {
        self.no_match_message = message.into();
        self
    }

    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    /// Drop fetch responses whose request id is not the latest issued. Off by
    /// default: shipped behavior applies responses in arrival order, so a slow
    /// early response may overwrite a fast later one.
    pub fn with_discard_stale_responses(mut self, discard: bool) -> Self {
        self.discard_stale_responses = discard;
        self
    }

    /// Registers this widget on a process-wide dismiss broadcast; a signal
    /// closes the dropdown just like an outside click.
    pub fn with_dismiss(mut self, subscription: DismissSubscription) -> Self {
        self.dismiss = Some(subscription);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        validate_shape(&self.candidates, self.lookup_key.as_deref())?;
        if self.mode == SourceMode::Dynamic && self.fetcher.is_none() {
            return Err(ConfigError::FetcherRequired);
        }
        Ok(())
    }
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{AutocompleteConfig, NO_MATCH_DEFAULT, SourceMode};
    use crate::core::candidate::Candidate;
    use crate::core::error::ConfigError;
    use serde_json::Value;

    #[test]
    fn defaults_match_shipped_widget() {
        let config = AutocompleteConfig::new();
        assert_eq!(config.mode, SourceMode::Static);
        assert_eq!(config.no_match_message, NO_MATCH_DEFAULT);
        assert_eq!(config.debounce_window.as_millis(), 500);
        assert!(!config.discard_stale_responses);
    }

    #[test]
    fn dynamic_mode_without_fetcher_is_rejected() {
        let config = AutocompleteConfig::new().with_mode(SourceMode::Dynamic);
        assert_eq!(config.validate(), Err(ConfigError::FetcherRequired));
    }

    #[test]
    fn record_candidates_without_lookup_key_are_rejected() {
        let config = AutocompleteConfig::new().with_candidates([Candidate::record([(
            "name".to_string(),
            Value::String("Harvard University".to_string()),
        )])]);
        assert_eq!(config.validate(), Err(ConfigError::LookupKeyRequired));
    }

    #[test]
    fn string_candidates_with_lookup_key_are_rejected() {
        let config = AutocompleteConfig::new()
            .with_candidates([Candidate::text("north")])
            .with_lookup_key("name");
        assert_eq!(config.validate(), Err(ConfigError::LookupKeyNotAllowed));
    }
}
