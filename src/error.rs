use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    NotFound(usize),
    InvalidOperation(String),
}

impl Error {
    pub(crate) fn invalid_operation(msg: impl Into<String>) -> Self {
        Error::InvalidOperation(msg.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(v) => write!(f, "Not Found: {}", v),
            Error::InvalidOperation(msg) => write!(f, "Invalid Operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
