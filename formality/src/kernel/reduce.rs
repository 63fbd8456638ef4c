//! Reduction to weak head normal form (WHNF) and full normalisation.

use super::Ctx;
use crate::{Term, TermC};

impl Term {
    /// Evaluate the term to its weak head normal form.
    ///
    /// If `unfold` is true, references to global definitions are replaced by their terms.
    /// Let-bindings and self introduction/elimination are always reduced.
    ///
    /// ~~~
    /// # use formality::{Error, Term};
    /// let tm = Term::parse("([A : Type] [x : A] x Type)")?;
    /// let expected = Term::parse("[x : Type] x")?;
    /// assert_eq!(tm.whnf(false), expected);
    /// # Ok::<(), Error>(())
    /// ~~~
    pub fn whnf(&self, unfold: bool) -> Term {
        use TermC::*;
        let mut tm = self.clone();
        loop {
            trace!("whnf: {}", tm);
            let next = match &tm {
                Self::Ref(g) if unfold => g.term().clone(),
                Self::Hole(_) => match tm.resolved() {
                    Some(r) => r.clone(),
                    None => break,
                },
                Self::Comb(c) => match &**c {
                    Appl(_, f, a) => match f.whnf(unfold).as_comb() {
                        Some(Abst(_, body)) => body.single_subst(a),
                        _ => break,
                    },
                    Unbox(_, s, body) => match s.whnf(unfold).as_comb() {
                        Some(BoxIntro(v)) => body.single_subst(v),
                        _ => break,
                    },
                    Let(_, t, body) => body.single_subst(t),
                    SelfIntro(_, t) | SelfElim(t) => t.clone(),
                    _ => break,
                },
                _ => break,
            };
            tm = next;
        }
        tm
    }

    /// Evaluate the term to its normal form, reducing also below binders.
    ///
    /// This may not terminate for terms that were not type checked.
    pub fn norm(&self, unfold: bool) -> Term {
        use TermC::*;
        let norm = |tm: &Term| tm.norm(unfold);
        match self {
            Self::Type | Self::BVar(_) => self.clone(),
            Self::Ref(g) if unfold => norm(g.term()),
            Self::Ref(_) => self.clone(),
            Self::Hole(_) => self.resolved().map_or_else(|| self.clone(), norm),
            Self::Comb(c) => match &**c {
                Prod(arg, body) => Prod(arg.map_ty_ref(norm), norm(body)).into(),
                Abst(arg, body) => Abst(arg.map_ty_ref(|ty| ty.as_ref().map(norm)), norm(body)).into(),
                Appl(eras, f, a) => {
                    let f = norm(f);
                    if let Some(Abst(_, body)) = f.as_comb() {
                        return norm(&body.single_subst(a));
                    }
                    Appl(*eras, f, norm(a)).into()
                }
                BoxType(tm) => BoxType(norm(tm)).into(),
                BoxIntro(tm) => BoxIntro(norm(tm)).into(),
                Unbox(x, s, body) => {
                    let s = norm(s);
                    if let Some(BoxIntro(v)) = s.as_comb() {
                        return norm(&body.single_subst(v));
                    }
                    Unbox(x.clone(), s, norm(body)).into()
                }
                SelfType(x, body) => SelfType(x.clone(), norm(body)).into(),
                SelfIntro(_, tm) | SelfElim(tm) => norm(tm),
                Let(_, t, body) => norm(&body.single_subst(t)),
            },
        }
    }
}

impl Ctx {
    /// Normalise a term after substituting the values bound in the context.
    pub fn norm(&self, tm: &Term, unfold: bool) -> Term {
        tm.subst(self).norm(unfold)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Term, TermC};

    fn norm(s: &str) -> Result<Term, Error> {
        Ok(Term::parse(s)?.norm(false))
    }

    #[test]
    fn beta() -> Result<(), Error> {
        assert_eq!(norm("([A : Type] [x : A] x Type Type)")?, Term::Type);
        assert_eq!(norm("[B : Type] ([A : Type] A B)")?, norm("[B : Type] B")?);
        Ok(())
    }

    #[test]
    fn unbox_let_self() -> Result<(), Error> {
        assert_eq!(norm("[x = |Type] !x")?, norm("!Type")?);
        assert_eq!(norm("let t Type {x : t} t")?, norm("{x : Type} Type")?);
        assert_eq!(norm("~: @s : Type = Type")?, Term::Type);
        Ok(())
    }

    #[test]
    fn stuck_unbox() -> Result<(), Error> {
        let tm = Term::parse("[b : !Type] [x = b] |x")?;
        assert_eq!(tm.norm(false), tm);
        Ok(())
    }

    #[test]
    fn unfold_globals() -> Result<(), Error> {
        let tm = Term::parse("def id [A : Type] [x : A] x (id Type)")?;
        assert_eq!(tm.whnf(false), tm);
        assert_eq!(tm.whnf(true), Term::parse("[x : Type] x")?);
        assert_eq!(tm.norm(false), tm);
        Ok(())
    }

    #[test]
    fn context_values() -> Result<(), Error> {
        use crate::{Binding, Ctx};
        let ctx = Ctx::new().bind(Binding::value(Term::parse("[x : Type] x")?));
        let tm = Term::BVar(0).apply(false, Term::Type);
        assert_eq!(ctx.norm(&tm, false), Term::Type);
        assert_eq!(Ctx::new().norm(&tm, false), tm);
        Ok(())
    }

    #[test]
    fn beta_primitive() -> Result<(), Error> {
        let abst = Term::parse("[x : Type] [y : x] y")?;
        let body = match abst.as_comb() {
            Some(TermC::Abst(_, body)) => body.clone(),
            _ => panic!("not a function"),
        };
        let arg = Term::parse("!Type")?;
        let redex = abst.apply(false, arg.clone());
        assert_eq!(redex.whnf(false), body.single_subst(&arg));
        assert_eq!(redex.norm(false), Term::parse("[y : !Type] y")?);
        Ok(())
    }
}
