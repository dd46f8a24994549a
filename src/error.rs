use thiserror::Error;

#[derive(Debug, Error)]
pub enum Md5Error {
    /// `process` was called after `finish` without a `reset`.
    #[error("cannot process bytes: digest has already been finished")]
    InvalidState,

    #[error("malformed signature string: {0}")]
    MalformedInput(#[source] hex::FromHexError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
