//! Screen state types.

/// What the screen's surface is currently showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenState {
    /// Built but not launched yet
    Created,
    /// A top-level navigation to `url` was issued
    Loading { url: String },
    /// The offline fallback page is displayed
    ShowingFallback,
    /// The surface was released
    Destroyed,
}
