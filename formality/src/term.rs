//! Terms of the calculus.

use crate::kernel::{Global, RTerm, Slot};
use crate::Arg;
use alloc::{rc::Rc, string::String};

/// De Bruijn variable.
pub type DeBruijn = usize;

/// Term with de Bruijn variables.
///
/// Atoms are stored inline, whereas
/// combinations of terms are stored behind shared pointers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Type,
    BVar(DeBruijn),
    /// Reference to a closed global definition
    Ref(Rc<Global>),
    /// Forward reference if it carries a slot, otherwise a genuine hole
    Hole(Option<Rc<Slot>>),
    Comb(RTerm),
}

/// Combination of terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermC {
    /// Dependent function type; the body has one more free variable
    Prod(Arg<Term>, Term),
    /// Function; checking fails if the argument type is absent
    Abst(Arg<Option<Term>>, Term),
    /// Application, possibly to an erased argument
    Appl(bool, Term, Term),
    BoxType(Term),
    BoxIntro(Term),
    /// Bind the contents of a boxed value in the body
    Unbox(String, Term, Term),
    /// Type whose body may refer to the value being typed
    SelfType(String, Term),
    SelfIntro(Term, Term),
    SelfElim(Term),
    Let(String, Term, Term),
}

impl From<TermC> for Term {
    fn from(tm: TermC) -> Self {
        Self::Comb(RTerm::new(tm))
    }
}

impl Term {
    /// Return the combination if the term is one.
    pub fn as_comb(&self) -> Option<&TermC> {
        match self {
            Self::Comb(c) => Some(c),
            _ => None,
        }
    }

    /// Return the term a hole was resolved to, if any.
    pub fn resolved(&self) -> Option<&Term> {
        match self {
            Self::Hole(Some(slot)) => slot.get(),
            _ => None,
        }
    }

    /// Apply an argument to the term.
    pub fn apply(self, eras: bool, arg: Self) -> Self {
        TermC::Appl(eras, self, arg).into()
    }
}
