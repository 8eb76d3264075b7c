use std::fmt::Display;

use super::KmsModelError;

pub type KmsModelResult<T> = Result<T, KmsModelError>;

/// Attaches context to fallible model operations, mirroring the error
/// text the remote service would echo back for the same request.
pub trait ResultHelper<T> {
    fn context(self, context: &str) -> KmsModelResult<T>;

    fn with_context<D, O>(self, op: O) -> KmsModelResult<T>
    where
        D: Display,
        O: FnOnce() -> D;
}

impl<T, E: std::error::Error> ResultHelper<T> for Result<T, E> {
    fn context(self, context: &str) -> KmsModelResult<T> {
        self.map_err(|e| KmsModelError::Default(format!("{context}: {e}")))
    }

    fn with_context<D, O>(self, op: O) -> KmsModelResult<T>
    where
        D: Display,
        O: FnOnce() -> D,
    {
        self.map_err(|e| KmsModelError::Default(format!("{}: {e}", op())))
    }
}

impl<T> ResultHelper<T> for Option<T> {
    fn context(self, context: &str) -> KmsModelResult<T> {
        self.ok_or_else(|| KmsModelError::Default(context.to_owned()))
    }

    fn with_context<D, O>(self, op: O) -> KmsModelResult<T>
    where
        D: Display,
        O: FnOnce() -> D,
    {
        self.ok_or_else(|| KmsModelError::Default(op().to_string()))
    }
}
