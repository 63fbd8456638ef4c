//! Pointers to shared terms.

use crate::{Term, TermC};
use alloc::rc::Rc;

/// Pointer to a shared term.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RTerm(Rc<TermC>);

impl RTerm {
    /// Create a term pointer from a term.
    pub fn new(tm: TermC) -> Self {
        Self(Rc::new(tm))
    }

    /// Compare the memory addresses of two term pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Term {
    /// Compare the memory addresses of two term pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self, &other) {
            (Term::Type, Term::Type) => true,
            (Term::BVar(v1), Term::BVar(v2)) => v1 == v2,
            (Term::Ref(g1), Term::Ref(g2)) => Rc::ptr_eq(g1, g2),
            (Term::Hole(Some(s1)), Term::Hole(Some(s2))) => Rc::ptr_eq(s1, s2),
            (Term::Comb(l), Term::Comb(r)) => RTerm::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl core::ops::Deref for RTerm {
    type Target = TermC;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<TermC> for RTerm {
    fn from(tm: TermC) -> Self {
        Self::new(tm)
    }
}
