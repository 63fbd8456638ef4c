//! Parser for the Formality surface syntax.
//!
//! The parser produces a *named* syntax tree:
//! variables are still referred to by their names, and
//! it is up to the consumer to resolve them to binders or global definitions.
//!
//! Example usage:
//!
//! ~~~
//! use formality_parse::{parse, Error, Term};
//!
//! let tm = parse("def id [A : Type] [-x : A] x (id Type -Type)")?;
//! assert!(matches!(tm, Term::Def(..)));
//! # Ok::<_, Error>(())
//! ~~~
#![no_std]

extern crate alloc;

pub mod lex;
mod parse;
pub mod term;

pub use lex::Token;
pub use parse::{parse, Error, ErrorKind};
pub use term::Term;

use logos::Logos;

/// Lex a string, dropping whitespace and comments.
pub fn lex<'s>(s: &'s str) -> impl Iterator<Item = (Token<'s>, core::ops::Range<usize>)> + 's {
    Token::lexer(s).spanned()
}
