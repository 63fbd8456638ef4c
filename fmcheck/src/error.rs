use std::io;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Formality(formality::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<formality::Error> for Error {
    fn from(err: formality::Error) -> Self {
        Self::Formality(err)
    }
}

impl From<formality::TypingError> for Error {
    fn from(err: formality::TypingError) -> Self {
        Self::Formality(err.into())
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Formality(e) => write!(f, "{}", e),
        }
    }
}
