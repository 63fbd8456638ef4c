//! Common error type.

use crate::kernel::Error as TypingError;
use crate::parse::Error as ParseError;
use crate::scope::Error as ScopeError;
use core::fmt;

/// Common error type.
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Scope(ScopeError),
    Typing(TypingError),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<ScopeError> for Error {
    fn from(err: ScopeError) -> Self {
        Self::Scope(err)
    }
}

impl From<TypingError> for Error {
    fn from(err: TypingError) -> Self {
        Self::Typing(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(e) => fmt::Display::fmt(e, f),
            Self::Scope(e) => fmt::Display::fmt(e, f),
            Self::Typing(e) => fmt::Display::fmt(e, f),
        }
    }
}
