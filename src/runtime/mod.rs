pub mod dismiss;
pub mod event;
pub mod fetch;
pub mod navigation;
pub mod scheduler;
pub mod widget;

pub use dismiss::{DismissHub, DismissSubscription};
pub use event::{Effect, WidgetEvent};
pub use fetch::{CandidateFetcher, FetchCompletion, FetchError, FetchExecutor, FetchState};
pub use navigation::NavigationState;
pub use scheduler::DebounceScheduler;
pub use widget::Autocomplete;
