//! Convertibility checking.

use super::Ctx;
use crate::{Term, TermC};
use alloc::vec::Vec;
use core::fmt;

/// Equality could not be decided, because an unresolved hole was encountered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undecided;

impl fmt::Display for Undecided {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "couldn't decide if terms are equal")
    }
}

type Constraint = (Term, Term);

/// Return the function of an erased application.
fn erased_appl(tm: &Term) -> Option<&Term> {
    match tm.as_comb()? {
        TermC::Appl(true, f, _) => Some(f),
        _ => None,
    }
}

/// Return the body of an erased function.
fn erased_abst(tm: &Term) -> Option<&Term> {
    match tm.as_comb()? {
        TermC::Abst(arg, body) if arg.eras => Some(body),
        _ => None,
    }
}

/// Return true if the given two terms are potentially convertible, and if so,
/// add convertibility constraints that have to be fulfilled.
fn step((cn1, cn2): Constraint, cns: &mut Vec<Constraint>) -> Result<bool, Undecided> {
    use TermC::*;
    if let Some(f) = erased_appl(&cn1) {
        cns.push((f.clone(), cn2));
        return Ok(true);
    }
    if let Some(f) = erased_appl(&cn2) {
        cns.push((cn1, f.clone()));
        return Ok(true);
    }
    // an erased function on only one side is compared to the other side under its binder
    let stripped = match (erased_abst(&cn1), erased_abst(&cn2)) {
        (Some(b1), Some(b2)) => Some((b1.clone(), b2.clone())),
        (Some(b1), None) => Some((b1.clone(), cn2.clone() << 1)),
        (None, Some(b2)) => Some((cn1.clone() << 1, b2.clone())),
        (None, None) => None,
    };
    if let Some(cn) = stripped {
        cns.push(cn);
        return Ok(true);
    }
    match (&cn1, &cn2) {
        (Term::Hole(_), _) | (_, Term::Hole(_)) => Err(Undecided),
        (Term::Type, Term::Type) => Ok(true),
        (Term::BVar(v1), Term::BVar(v2)) => Ok(v1 == v2),
        (Term::Ref(g1), Term::Ref(g2)) => Ok(g1 == g2),
        (Term::Comb(c1), Term::Comb(c2)) => Ok(match (&**c1, &**c2) {
            (Prod(a1, tm1), Prod(a2, tm2)) => {
                cns.push((a1.ty.clone(), a2.ty.clone()));
                cns.push((tm1.clone(), tm2.clone()));
                a1.eras == a2.eras
            }
            (Abst(_, tm1), Abst(_, tm2))
            | (SelfType(_, tm1), SelfType(_, tm2))
            | (BoxType(tm1), BoxType(tm2))
            | (BoxIntro(tm1), BoxIntro(tm2)) => {
                cns.push((tm1.clone(), tm2.clone()));
                true
            }
            (Appl(_, f1, a1), Appl(_, f2, a2)) | (Unbox(_, f1, a1), Unbox(_, f2, a2)) => {
                cns.push((f1.clone(), f2.clone()));
                cns.push((a1.clone(), a2.clone()));
                true
            }
            _ => false,
        }),
        _ => Ok(false),
    }
}

/// Return true if two terms in WHNF are equal without unfolding global definitions.
fn same_head(tm1: &Term, tm2: &Term) -> bool {
    use TermC::*;
    let conv = |l: &Term, r: &Term| matches!(Term::convertible(l, r), Ok(true));
    match (tm1, tm2) {
        (Term::Ref(g1), Term::Ref(g2)) => g1 == g2,
        (Term::Comb(c1), Term::Comb(c2)) => match (&**c1, &**c2) {
            (Appl(_, f1, a1), Appl(_, f2, a2)) | (Unbox(_, f1, a1), Unbox(_, f2, a2)) => {
                conv(f1, f2) && conv(a1, a2)
            }
            _ => false,
        },
        _ => false,
    }
}

impl Term {
    /// Decide whether two terms are equal modulo reduction and erased parts.
    ///
    /// Terms are first compared without unfolding global definitions;
    /// only if that does not succeed, definitions are unfolded.
    pub fn convertible(tm1: &Self, tm2: &Self) -> Result<bool, Undecided> {
        let mut cns = Vec::from([(tm1.clone(), tm2.clone())]);
        while let Some((cn1, cn2)) = cns.pop() {
            trace!("convertible: {} ~? {}", cn1, cn2);
            if cn1.ptr_eq(&cn2) {
                continue;
            }
            let (cn1, cn2) = (cn1.whnf(false), cn2.whnf(false));
            if same_head(&cn1, &cn2) {
                continue;
            }
            if !step((cn1.whnf(true), cn2.whnf(true)), &mut cns)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return true if the terms are convertible, treating undecided cases as unequal.
    ///
    /// ~~~
    /// # use formality::{Error, Term};
    /// let tm1 = Term::parse("[-A : Type] [x : A] x")?;
    /// let tm2 = Term::parse("[x : Type] x")?;
    /// assert!(tm1.equals(&tm2));
    /// assert!(!tm1.equals(&Term::Type));
    /// # Ok::<(), Error>(())
    /// ~~~
    pub fn equals(&self, other: &Self) -> bool {
        Self::convertible(self, other).unwrap_or(false)
    }
}

impl Ctx {
    /// Decide equality of two terms after substituting the values bound in the context.
    pub fn convertible(&self, tm1: &Term, tm2: &Term) -> Result<bool, Undecided> {
        Term::convertible(&tm1.subst(self), &tm2.subst(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const TERMS: &[&str] = &[
        "Type",
        "{x : Type} Type",
        "{-x : Type} Type",
        "[x : Type] x",
        "!Type",
        "|Type",
        "@s : {P : Type} P",
        "[b : !Type] [x = b] |x",
        "def id [A : Type] [x : A] x id",
    ];

    #[test]
    fn reflexive_symmetric() -> Result<(), Error> {
        let tms = TERMS.iter().map(|s| Term::parse(s)).collect::<Result<Vec<_>, _>>()?;
        for (i, t1) in tms.iter().enumerate() {
            assert!(t1.equals(&t1.norm(false)));
            for (j, t2) in tms.iter().enumerate() {
                assert_eq!(t1.equals(t2), t2.equals(t1));
                if i != j {
                    assert!(!t1.equals(t2), "{} = {}", t1, t2);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn erasure_irrelevant() -> Result<(), Error> {
        let tm1 = Term::parse("[f : {-A : Type} Type] (f -Type)")?;
        let tm2 = Term::parse("[f : {-A : Type} Type] (f -{x : Type} Type)")?;
        assert!(tm1.equals(&tm2));
        let tm3 = Term::parse("[f : {-A : Type} Type] f")?;
        assert!(tm1.equals(&tm3));
        Ok(())
    }

    #[test]
    fn unfold_on_demand() -> Result<(), Error> {
        let tm1 = Term::parse("def id [A : Type] [x : A] x (id Type)")?;
        let tm2 = Term::parse("[x : Type] x")?;
        assert!(tm1.equals(&tm2));
        let tm3 = Term::parse("def id [A : Type] [x : A] x [y : Type] (id Type y)")?;
        assert!(tm3.equals(&tm2));
        Ok(())
    }

    #[test]
    fn holes_undecided() -> Result<(), Error> {
        let hole = Term::parse("*")?;
        assert_eq!(Term::convertible(&hole, &Term::Type), Err(Undecided));
        assert!(!hole.equals(&Term::Type));
        Ok(())
    }

    #[test]
    fn context_values() {
        use super::super::Binding;
        let ctx = Ctx::new().bind(Binding::value(Term::Type));
        assert_eq!(ctx.convertible(&Term::BVar(0), &Term::Type), Ok(true));
        assert_eq!(Ctx::new().convertible(&Term::BVar(0), &Term::Type), Ok(false));
    }
}
