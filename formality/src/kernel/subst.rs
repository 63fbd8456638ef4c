//! Substitution and shifting for terms.

use super::Ctx;
use crate::{DeBruijn, RTerm, Term, TermC};

impl RTerm {
    /// Substitute the free variables of the term, preserving unchanged subterms.
    pub fn apply_subst<S>(&self, subst: &S, k: usize) -> Self
    where
        S: Fn(DeBruijn, usize) -> Term,
    {
        use TermC::*;
        let sub = |tm: &Term| tm.apply_subst(subst, k);
        let sub1 = |tm: &Term| tm.apply_subst(subst, k + 1);
        let tm = match &**self {
            Prod(arg, tm) => Prod(arg.map_ty_ref(sub), sub1(tm)),
            Abst(arg, tm) => Abst(arg.map_ty_ref(|ty| ty.as_ref().map(sub)), sub1(tm)),
            Appl(eras, f, a) => Appl(*eras, sub(f), sub(a)),
            BoxType(tm) => BoxType(sub(tm)),
            BoxIntro(tm) => BoxIntro(sub(tm)),
            Unbox(x, s, tm) => Unbox(x.clone(), sub(s), sub1(tm)),
            SelfType(x, tm) => SelfType(x.clone(), sub1(tm)),
            SelfIntro(ty, tm) => SelfIntro(sub(ty), sub(tm)),
            SelfElim(tm) => SelfElim(sub(tm)),
            Let(x, t, tm) => Let(x.clone(), sub(t), sub1(tm)),
        };
        if ptr_eq_parts(&tm, self) {
            self.clone()
        } else {
            Self::new(tm)
        }
    }
}

/// Return true if two combinations have the same shape and share all subterms.
fn ptr_eq_parts(l: &TermC, r: &TermC) -> bool {
    use TermC::*;
    let opt_eq = |l: &Option<Term>, r: &Option<Term>| match (l, r) {
        (Some(l), Some(r)) => l.ptr_eq(r),
        (None, None) => true,
        _ => false,
    };
    match (l, r) {
        (Prod(a1, t1), Prod(a2, t2)) => a1.ty.ptr_eq(&a2.ty) && t1.ptr_eq(t2),
        (Abst(a1, t1), Abst(a2, t2)) => opt_eq(&a1.ty, &a2.ty) && t1.ptr_eq(t2),
        (Appl(_, f1, a1), Appl(_, f2, a2)) => f1.ptr_eq(f2) && a1.ptr_eq(a2),
        (BoxType(t1), BoxType(t2)) | (BoxIntro(t1), BoxIntro(t2)) => t1.ptr_eq(t2),
        (SelfType(_, t1), SelfType(_, t2)) | (SelfElim(t1), SelfElim(t2)) => t1.ptr_eq(t2),
        (Unbox(_, s1, t1), Unbox(_, s2, t2)) | (Let(_, s1, t1), Let(_, s2, t2)) => {
            s1.ptr_eq(s2) && t1.ptr_eq(t2)
        }
        (SelfIntro(ty1, t1), SelfIntro(ty2, t2)) => ty1.ptr_eq(ty2) && t1.ptr_eq(t2),
        _ => false,
    }
}

impl Term {
    /// Apply `subst` to all variables `n >= k`,
    /// where `k` is incremented whenever a binder is entered.
    pub fn apply_subst<S>(&self, subst: &S, k: usize) -> Self
    where
        S: Fn(DeBruijn, usize) -> Term,
    {
        match self {
            Self::BVar(n) if *n >= k => subst(*n, k),
            Self::Comb(c) => Self::Comb(c.apply_subst(subst, k)),
            // resolved holes only ever point to closed terms
            _ => self.clone(),
        }
    }

    /// Add `delta` to all variables with an index of at least `depth`.
    ///
    /// ~~~
    /// # use formality::Term;
    /// let tm = Term::BVar(1).apply(false, Term::BVar(0));
    /// let shifted = Term::BVar(2).apply(false, Term::BVar(0));
    /// assert_eq!(tm.shift(1, 1), shifted);
    /// assert_eq!(shifted.shift(1, -1), tm);
    /// ~~~
    pub fn shift(&self, depth: usize, delta: isize) -> Self {
        if delta == 0 {
            return self.clone();
        }
        let shift = |n: DeBruijn, _| Term::BVar((n as isize + delta) as DeBruijn);
        self.apply_subst(&shift, depth)
    }

    /// Replace all variables bound to a value in the context by that value.
    ///
    /// Variables without a value stay as they are.
    pub fn subst(&self, ctx: &Ctx) -> Self {
        if ctx.is_empty() {
            return self.clone();
        }
        self.apply_subst(
            &|n, k| match ctx.get(n - k).and_then(|b| b.tm.as_ref()) {
                Some(v) => v.clone() << (n + 1),
                None => Term::BVar(n),
            },
            0,
        )
    }

    /// Replace the variable 0 by `value` and lower all other free variables by one.
    ///
    /// ~~~
    /// # use formality::Term;
    /// let tm = Term::BVar(0).apply(false, Term::BVar(1));
    /// let expected = Term::Type.apply(false, Term::BVar(0));
    /// assert_eq!(tm.single_subst(&Term::Type), expected);
    /// ~~~
    pub fn single_subst(&self, value: &Term) -> Self {
        Ctx::new().subst_single(self, value)
    }
}

impl Ctx {
    /// Replace the variable 0 of a term by `value`,
    /// where the term lives under one binder more than the context.
    ///
    /// The values bound in the context are substituted as well.
    pub fn subst_single(&self, tm: &Term, value: &Term) -> Term {
        let ctx = self.bind(super::Binding::value(value.clone()));
        tm.subst(&ctx).shift(0, -1)
    }
}

/// Definition of `<<` for terms.
#[allow(clippy::suspicious_arithmetic_impl)]
impl core::ops::Shl<usize> for Term {
    type Output = Self;

    fn shl(self, rhs: usize) -> Self::Output {
        if rhs == 0 {
            self
        } else {
            self.apply_subst(&|n, _k| Term::BVar(n + rhs), 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arg;

    fn lam(x: &str, tm: Term) -> Term {
        TermC::Abst(Arg::new(false, x, Some(Term::Type)), tm).into()
    }

    #[test]
    fn shift_under_binder() {
        // [y : Type] (y #0)
        let tm = lam("y", Term::BVar(0).apply(false, Term::BVar(1)));
        let shifted = lam("y", Term::BVar(0).apply(false, Term::BVar(3)));
        assert_eq!(tm.shift(0, 2), shifted);
        assert_eq!(shifted.shift(0, -2), tm);
        assert_eq!(tm.clone() << 2, shifted);
    }

    #[test]
    fn shift_inverse() {
        let tms = [
            Term::Type,
            Term::BVar(3),
            lam("x", Term::BVar(0).apply(true, Term::BVar(2))),
            TermC::Let("x".into(), Term::BVar(1), TermC::BoxIntro(Term::BVar(1)).into()).into(),
        ];
        for tm in tms {
            for depth in 0..3 {
                assert_eq!(tm.shift(depth, 1).shift(depth, -1), tm);
            }
        }
    }

    #[test]
    fn unchanged_shared() {
        let tm = lam("x", Term::BVar(0));
        assert!(tm.shift(0, 1).ptr_eq(&tm));
        assert!(tm.single_subst(&Term::Type).ptr_eq(&tm));
    }

    #[test]
    fn subst_context_values() {
        // x = Type, y has no value
        let ctx = Ctx::new()
            .bind(super::super::Binding::value(Term::Type))
            .bind(super::super::Binding::new("y"));
        let tm = Term::BVar(0).apply(false, Term::BVar(1));
        assert_eq!(tm.subst(&ctx), Term::BVar(0).apply(false, Term::Type));
    }
}
