use thiserror::Error;

/// Errors raised by the bindings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The foreign runtime rejected a call. No object is created by a failed
    /// factory call.
    #[error("foreign call `{operation}` failed: {message}")]
    ForeignCall { operation: String, message: String },
    /// An option value does not have the shape its component expects.
    #[error("invalid option `{key}`: {message}")]
    Configuration { key: String, message: String },
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn foreign(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ForeignCall {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }
}
