use thiserror::Error;

/// The three failure families a buffer or view operation can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Range,
    Type,
    Syntax,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("RangeError: {0}")]
    Range(String),
    #[error("TypeError: {0}")]
    Type(String),
    #[error("SyntaxError: {0}")]
    Syntax(String),
}

impl Error {
    pub(crate) fn range(msg: impl Into<String>) -> Self {
        let err = Error::Range(msg.into());
        tracing::debug!(error = %err, "operation rejected");
        err
    }

    pub(crate) fn type_error(msg: impl Into<String>) -> Self {
        let err = Error::Type(msg.into());
        tracing::debug!(error = %err, "operation rejected");
        err
    }

    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        let err = Error::Syntax(msg.into());
        tracing::debug!(error = %err, "operation rejected");
        err
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Range(_) => ErrorKind::Range,
            Error::Type(_) => ErrorKind::Type,
            Error::Syntax(_) => ErrorKind::Syntax,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::Range(m) | Error::Type(m) | Error::Syntax(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
