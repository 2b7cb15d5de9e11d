use std::time::Duration;

/// Configuration for running a parse through one of the drivers.
///
/// ```text
/// ┌───────────────┬─────────────────────────────────────────────────────┐
/// │ Field         │ Purpose                                             │
/// ├───────────────┼─────────────────────────────────────────────────────┤
/// │ mode          │ Which driver steps the parse                        │
/// │ tick_interval │ Period between incremental steps; zero = yield-only │
/// └───────────────┴─────────────────────────────────────────────────────┘
/// ```
///
/// `tick_interval` only matters in [`ParseMode::Incremental`]. A zero
/// interval steps the parse as fast as the runtime allows while still
/// yielding between steps, which is what a UI event loop wants by default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub mode: ParseMode,
    pub tick_interval: Duration,
}

impl Default for DriverConfig {
    /// Incremental mode with yield-only ticks.
    fn default() -> Self {
        Self {
            mode: ParseMode::Incremental,
            tick_interval: Duration::ZERO,
        }
    }
}

/// The three ways to drive a parse.
///
/// ```text
/// ┌─────────────┬─────────────────────────────────────────────────────────┐
/// │ Mode        │ Behaviour                                               │
/// ├─────────────┼─────────────────────────────────────────────────────────┤
/// │ Complete    │ Every step in one synchronous call                      │
/// │ Cooperative │ Yield to the runtime between steps                      │
/// │ Incremental │ One step per tick, listeners notified, cancellable      │
/// └─────────────┴─────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    Complete,
    Cooperative,
    #[default]
    Incremental,
}

impl ParseMode {
    /// Parse a mode name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "complete" | "sync" => Some(Self::Complete),
            "cooperative" | "async" => Some(Self::Cooperative),
            "incremental" | "polled" => Some(Self::Incremental),
            _ => None,
        }
    }
}
