use std::error::Error;
use std::fmt;

/// Host-integration mistakes caught before the widget does any work.
/// These are contract violations, not runtime conditions, so construction
/// refuses to proceed instead of degrading silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Record-shaped candidates were supplied without a lookup key.
    LookupKeyRequired,
    /// A lookup key was supplied for string-shaped candidates.
    LookupKeyNotAllowed,
    /// One collection mixes string and record candidates.
    MixedCandidateShapes,
    /// Dynamic mode was requested without a retrieval function.
    FetcherRequired,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LookupKeyRequired => {
                f.write_str("a lookup key is mandatory for record candidates")
            }
            Self::LookupKeyNotAllowed => {
                f.write_str("a lookup key is not allowed for string candidates")
            }
            Self::MixedCandidateShapes => {
                f.write_str("all candidates in one widget must share the same shape")
            }
            Self::FetcherRequired => {
                f.write_str("a fetcher is required when the candidate source is dynamic")
            }
        }
    }
}

impl Error for ConfigError {}
