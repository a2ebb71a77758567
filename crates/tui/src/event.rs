//! Key routing between the form overlay and the dashboard.

/// Whether a widget used a key press.
///
/// The research form returns this so the app knows whether a key still
/// needs dashboard handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Handled; stop here.
    Consumed,
    /// Not handled; the next handler may take it.
    NotConsumed,
}
