use thiserror::Error;

pub(crate) mod result;

#[derive(Error, Debug)]
pub enum KmsModelError {
    /// Raised by the incremental encryption-context entry path when the
    /// key is already present. The only constraint this crate checks
    /// locally; everything else documented on the request fields is
    /// validated by the remote service.
    #[error("duplicate encryption context key: {0}")]
    DuplicateContextEntry(String),

    #[error("{0}")]
    Default(String),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}
