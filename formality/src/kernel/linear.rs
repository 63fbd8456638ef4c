//! Linearity and stratification of variable uses.

use crate::{DeBruijn, Term, TermC};

impl Term {
    /// Count the computationally relevant occurrences of the variable `depth`.
    ///
    /// Occurrences in types and in erased arguments are not counted.
    ///
    /// ~~~
    /// # use formality::{Term, TermC};
    /// let pair = Term::BVar(1).apply(false, Term::BVar(0)).apply(true, Term::BVar(0));
    /// assert_eq!(pair.uses(0), 1);
    /// assert_eq!(pair.uses(1), 1);
    /// ~~~
    pub fn uses(&self, depth: DeBruijn) -> usize {
        use TermC::*;
        match self {
            Self::BVar(n) => usize::from(*n == depth),
            Self::Type | Self::Ref(_) => 0,
            Self::Hole(_) => self.resolved().map_or(0, |tm| tm.uses(depth)),
            Self::Comb(c) => match &**c {
                Prod(..) | SelfType(..) => 0,
                Abst(_, tm) => tm.uses(depth + 1),
                Appl(eras, f, a) => f.uses(depth) + if *eras { 0 } else { a.uses(depth) },
                BoxType(tm) | BoxIntro(tm) | SelfIntro(_, tm) | SelfElim(tm) => tm.uses(depth),
                Unbox(_, s, tm) | Let(_, s, tm) => s.uses(depth) + tm.uses(depth + 1),
            },
        }
    }

    /// Return true if the number of boxes enclosing every
    /// relevant occurrence of the variable `depth`, added to `level`, is zero.
    ///
    /// Function arguments must be used outside of boxes (`level = 0`),
    /// whereas unboxed variables must be used inside exactly one box (`level = -1`).
    pub fn stratified(&self, depth: DeBruijn, level: isize) -> bool {
        use TermC::*;
        match self {
            Self::BVar(n) => *n != depth || level == 0,
            Self::Type | Self::Ref(_) => true,
            Self::Hole(_) => self.resolved().map_or(true, |tm| tm.stratified(depth, level)),
            Self::Comb(c) => match &**c {
                Prod(..) | SelfType(..) => true,
                Abst(_, tm) => tm.stratified(depth + 1, level),
                Appl(eras, f, a) => {
                    f.stratified(depth, level) && (*eras || a.stratified(depth, level))
                }
                BoxType(tm) | BoxIntro(tm) => tm.stratified(depth, level + 1),
                SelfIntro(_, tm) | SelfElim(tm) => tm.stratified(depth, level),
                Unbox(_, s, tm) | Let(_, s, tm) => {
                    s.stratified(depth, level) && tm.stratified(depth + 1, level)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arg, Term, TermC};

    #[test]
    fn uses_skip_types() {
        // {y : #0} #0
        let prod: Term = TermC::Prod(Arg::new(false, "y", Term::BVar(0)), Term::BVar(1)).into();
        assert_eq!(prod.uses(0), 0);
        // [y : #0] (#1 #1)
        let body = Term::BVar(1).apply(false, Term::BVar(1));
        let abst: Term = TermC::Abst(Arg::new(false, "y", Some(Term::BVar(0))), body).into();
        assert_eq!(abst.uses(0), 2);
    }

    #[test]
    fn stratification_levels() {
        let boxed: Term = TermC::BoxIntro(Term::BVar(0)).into();
        assert!(!boxed.stratified(0, 0));
        assert!(boxed.stratified(0, -1));
        assert!(!Term::BVar(0).stratified(0, -1));
        assert!(Term::BVar(1).stratified(0, -1));
        let erased = Term::Type.apply(true, Term::BVar(0));
        assert!(erased.stratified(0, -1));
    }
}
