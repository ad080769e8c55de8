/// User intents a front end feeds into a search session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Input text replaced (typing, paste, delete)
    QueryChanged(String),
    ArrowDown,
    ArrowUp,
    /// Open the highlighted result
    Accept,
    /// Dismiss the search
    Escape,
}
