pub mod candidate;
pub mod config;
pub mod error;

pub use candidate::Candidate;
pub use config::{AutocompleteConfig, SourceMode};
pub use error::ConfigError;
