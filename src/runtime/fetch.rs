use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::core::candidate::Candidate;

/// Lifecycle of one keystroke-triggered retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    /// A retrieval is registered but the quiet period has not elapsed.
    Debouncing,
    /// The retrieval function has been dispatched.
    Loading,
    /// A response (including an empty one) was applied to the result set.
    Settled,
}

impl FetchState {
    /// Loading is surfaced from the first keystroke of a burst and holds
    /// until the deferred call resolves.
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Debouncing | Self::Loading)
    }
}

/// Retrieval failure reported by a fetcher. The engine turns it into the
/// no-match result set with loading cleared; retry policy, if any, belongs to
/// the fetcher itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for FetchError {}

/// Caller-supplied asynchronous retrieval capability. Free to hit any
/// network or storage backend; the engine only sees the resulting list.
pub trait CandidateFetcher: Send + Sync {
    fn fetch(&self, query: &str) -> Result<Vec<Candidate>, FetchError>;
}

impl<F> CandidateFetcher for F
where
    F: Fn(&str) -> Result<Vec<Candidate>, FetchError> + Send + Sync,
{
    fn fetch(&self, query: &str) -> Result<Vec<Candidate>, FetchError> {
        self(query)
    }
}

/// Outcome of one dispatched retrieval, tagged with the request id it was
/// issued under so stale responses can be recognized.
#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub request_id: u64,
    pub query: String,
    pub outcome: Result<Vec<Candidate>, FetchError>,
}

/// Runs retrievals on worker threads and hands completions back to the host
/// thread without blocking it. Dispatched retrievals are never cancelled;
/// only not-yet-fired debounce payloads are.
pub struct FetchExecutor {
    completion_tx: Sender<FetchCompletion>,
    completion_rx: Receiver<FetchCompletion>,
}

impl FetchExecutor {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<FetchCompletion>();
        Self {
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, fetcher: Arc<dyn CandidateFetcher>, query: String, request_id: u64) {
        let completion_tx = self.completion_tx.clone();
        thread::spawn(move || {
            let outcome = fetcher.fetch(&query);
            let _ = completion_tx.send(FetchCompletion {
                request_id,
                query,
                outcome,
            });
        });
    }

    pub fn drain_ready(&self) -> Vec<FetchCompletion> {
        let mut out = Vec::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl Default for FetchExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateFetcher, FetchError, FetchExecutor, FetchState};
    use crate::core::candidate::Candidate;
    use std::sync::Arc;
    use std::time::Duration;

    fn drain_one(executor: &FetchExecutor) -> super::FetchCompletion {
        for _ in 0..200 {
            if let Some(completion) = executor.drain_ready().into_iter().next() {
                return completion;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("fetch completion never arrived");
    }

    #[test]
    fn loading_covers_debounce_and_dispatch() {
        assert!(!FetchState::Idle.is_loading());
        assert!(FetchState::Debouncing.is_loading());
        assert!(FetchState::Loading.is_loading());
        assert!(!FetchState::Settled.is_loading());
    }

    #[test]
    fn executor_reports_completion_with_request_id() {
        let fetcher: Arc<dyn CandidateFetcher> =
            Arc::new(|query: &str| Ok(vec![Candidate::text(format!("{query}-row"))]));
        let executor = FetchExecutor::new();
        executor.spawn(fetcher, "abc".to_string(), 7);

        let completion = drain_one(&executor);
        assert_eq!(completion.request_id, 7);
        assert_eq!(completion.query, "abc");
        assert_eq!(
            completion.outcome.expect("fetch should succeed"),
            vec![Candidate::text("abc-row")]
        );
    }

    #[test]
    fn executor_reports_failure_outcomes() {
        let fetcher: Arc<dyn CandidateFetcher> =
            Arc::new(|_: &str| -> Result<Vec<Candidate>, FetchError> {
                Err(FetchError::new("backend unavailable"))
            });
        let executor = FetchExecutor::new();
        executor.spawn(fetcher, "abc".to_string(), 1);

        let completion = drain_one(&executor);
        assert_eq!(
            completion.outcome,
            Err(FetchError::new("backend unavailable"))
        );
    }
}
