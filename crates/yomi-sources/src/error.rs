/// Failure modes shared by the remote source clients. Callers decide
/// whether a failure is fatal (dictionary) or degrades to an empty result
/// (translation, sentences); nothing here ever propagates as a panic.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}
