//! Named terms, as produced by the parser.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt::{self, Display};

/// Term with binders and variables referred to by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// Variable, skipping the given number of same-named binders (`x''`)
    Var(String, usize),
    Type,
    /// Dependent function type (`{x : A} B`, erased: `{-x : A} B`)
    Prod(bool, String, Box<Term>, Box<Term>),
    /// Function (`[x : A] t`, erased: `[-x : A] t`, unannotated: `[x] t`)
    Abst(bool, String, Option<Box<Term>>, Box<Term>),
    /// Application of a head to arguments that may be erased (`(f a -b)`)
    Appl(Box<Term>, Vec<(bool, Term)>),
    /// Box type (`!A`)
    BoxType(Box<Term>),
    /// Box introduction (`|t`)
    BoxIntro(Box<Term>),
    /// Unboxing (`[x = e] t`)
    Unbox(String, Box<Term>, Box<Term>),
    /// Self type (`@x : T`)
    SelfType(String, Box<Term>),
    /// Self introduction (`: T = t`)
    SelfIntro(Box<Term>, Box<Term>),
    /// Self elimination (`~ t`)
    SelfElim(Box<Term>),
    /// Local definition (`let x t u`)
    Let(String, Box<Term>, Box<Term>),
    /// Global definition (`def x t u`)
    Def(String, Box<Term>, Box<Term>),
    /// Hole (`*`)
    Hole,
}

fn eras(e: bool) -> &'static str {
    if e {
        "-"
    } else {
        ""
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(x, primes) => {
                write!(f, "{}", x)?;
                (0..*primes).try_for_each(|_| write!(f, "'"))
            }
            Self::Type => write!(f, "Type"),
            Self::Prod(e, x, ty, tm) => write!(f, "{{{}{} : {}}} {}", eras(*e), x, ty, tm),
            Self::Abst(e, x, None, tm) => write!(f, "[{}{}] {}", eras(*e), x, tm),
            Self::Abst(e, x, Some(ty), tm) => write!(f, "[{}{} : {}] {}", eras(*e), x, ty, tm),
            Self::Appl(head, args) => {
                write!(f, "({}", head)?;
                for (e, arg) in args {
                    write!(f, " {}{}", eras(*e), arg)?;
                }
                write!(f, ")")
            }
            Self::BoxType(tm) => write!(f, "!{}", tm),
            Self::BoxIntro(tm) => write!(f, "|{}", tm),
            Self::Unbox(x, src, tm) => write!(f, "[{} = {}] {}", x, src, tm),
            Self::SelfType(x, tm) => write!(f, "@{} : {}", x, tm),
            Self::SelfIntro(ty, tm) => write!(f, ": {} = {}", ty, tm),
            Self::SelfElim(tm) => write!(f, "~ {}", tm),
            Self::Let(x, tm, body) => write!(f, "let {} {} {}", x, tm, body),
            Self::Def(x, tm, body) => write!(f, "def {} {} {}", x, tm, body),
            Self::Hole => write!(f, "*"),
        }
    }
}
