#![no_std]
#![forbid(unsafe_code)]

//! Type checking for a dependently typed lambda calculus with erasure, boxes, and self types.
//!
//! # Usage
//!
//! A source text consists of a single term, which may
//! introduce global definitions via `def name term body`.
//! The text is first parsed to a [`parse::Term`], carrying names.
//! The scoping operation then turns the parse term into a [`Term`],
//! replacing local names by de Bruijn indices and
//! global names by references to [`Global`] definitions, which
//! it collects in a [`GCtx`].
//! Names may be used before they are defined;
//! such forward references are resolved once the definition is encountered.
//!
//! Type inference is performed by [`Term::infer`], which also verifies that
//! function arguments are used at most once (linearity) and that
//! variables are used under the right number of boxes (stratification).
//! Erased arguments, written with a leading `-`, are ignored by these checks
//! as well as by equality.
//!
//! ~~~
//! # use formality::{Ctx, Error, GCtx, Term};
//! let src = "
//!     def id [A : Type] [-x : A] x
//!     -- two applied to a boxed function
//!     def two [P : Type] [s : !{x : P} P] [S = s] |[z : P] (S (S z))
//!     (two Type |[x : Type] x)
//! ";
//! let (tm, gctx) = GCtx::parse(src)?;
//! gctx.check()?;
//!
//! let ty = tm.infer(&Ctx::new())?;
//! assert!(ty.equals(&Term::parse("!{z : Type} Type")?));
//! assert_eq!(tm.norm(true), Term::parse("|[z : Type] z")?);
//! # Ok::<(), Error>(())
//! ~~~

extern crate alloc;
#[macro_use]
extern crate log;

pub mod error;
pub mod gctx;
pub mod kernel;
pub mod scope;
pub mod stack;

mod arg;
mod term;

pub use formality_parse as parse;

pub use arg::Arg;
pub use error::Error;
pub use gctx::GCtx;
pub use kernel::{Binding, Ctx, ErrorKind, Global, RTerm, Slot, Undecided};
pub use kernel::Error as TypingError;
pub use scope::Error as ScopeError;
pub use stack::Stack;
pub use term::{DeBruijn, Term, TermC};
