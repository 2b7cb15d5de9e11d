use bif_decoder::DecodeError;

/// Errors observable through a driver.
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────────────┐
/// │ Variant   │ Cause                                                │
/// ├───────────┼──────────────────────────────────────────────────────┤
/// │ Decode    │ The parse hit a malformed field and stopped          │
/// │ Cancelled │ The caller cancelled an incremental parse; reported  │
/// │           │ on every read after `cancel()`, whatever the progress│
/// └───────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("parsing was cancelled")]
    Cancelled,
}
