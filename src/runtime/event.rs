use crate::core::candidate::Candidate;
use crate::terminal::KeyEvent;

/// Events the host feeds into the engine.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// Full input text after a keystroke.
    Input(String),
    /// The input field gained focus; the current query is re-run so a static
    /// dropdown reopens over unchanged text.
    Focus,
    /// A key press; only Enter, Up and Down are meaningful here.
    Key(KeyEvent),
    /// Pointer selection of a visible row, bypassing the active index.
    RowClick(usize),
    /// Pointer activated outside the widget.
    Dismiss,
}

/// Side effects the engine asks the host to perform. State mutations happen
/// before these are returned; the effects carry only the outward-facing part.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A selection was committed.
    Submit(Candidate),
    /// Debounced query-change notification (dynamic mode). Emitted when the
    /// deferred retrieval dispatches, and immediately for the empty string.
    QueryChanged(String),
    /// Keep this row visible inside the dropdown viewport; scroll mechanics
    /// belong to the presentation layer.
    EnsureVisible(usize),
}
