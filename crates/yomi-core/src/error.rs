/// Terminal lookup failures. Display strings are the exact messages the
/// popup shows, so callers can forward them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Empty selection.")]
    EmptyInput,

    /// The dictionary source answered but had nothing usable.
    #[error("No dictionary entry.")]
    NoEntry,

    /// Transport or parse fault on the mandatory source.
    #[error("Lookup failed. Try again.")]
    Failed,
}

/// Persistent-store failures. Fatal to the operation that hit them but
/// never to the process; the record is left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store codec error: {0}")]
    Codec(#[from] serde_json::Error),
}
