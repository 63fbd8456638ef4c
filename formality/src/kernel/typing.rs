//! Type inference for terms.

use super::{Binding, Ctx};
use crate::{Arg, DeBruijn, Term, TermC};
use alloc::string::String;
use core::fmt;

/// Reason why a term is ill-typed.
#[derive(Clone, Debug)]
pub enum ErrorKind {
    /// function without argument type
    UninferableFunction,
    NonLinearUse { id: String, uses: usize },
    /// variable used under a wrong number of boxes; `boxes` is the required number
    NonStratifiedUse { id: String, boxes: usize },
    NotAFunction(Term),
    /// erasure of argument differs from the function type
    ErasureMismatch { expected: bool },
    TypeMismatch { expected: Term, actual: Term, undecided: bool },
    NotABoxedValue(Term),
    NotASelfType(Term),
    NotSelfTyped(Term),
    UnresolvedHole,
    TypeNotFound(DeBruijn),
}

/// Type error, together with the offending term and the context it lives in.
#[derive(Clone, Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub expr: Term,
    pub ctx: Ctx,
}

impl Term {
    /// Infer the type of a term in a context.
    ///
    /// ~~~
    /// # use formality::{Ctx, Error, Term};
    /// let tm = Term::parse("def id [A : Type] [-x : A] x (id Type -Type)")?;
    /// assert_eq!(tm.infer(&Ctx::new())?, Term::Type);
    ///
    /// let tm = Term::parse("[A : Type] [x : A] [y : A] x")?;
    /// let expected = Term::parse("{A : Type} {x : A} {y : A} A")?;
    /// assert_eq!(tm.infer(&Ctx::new())?, expected);
    /// # Ok::<(), Error>(())
    /// ~~~
    pub fn infer(&self, ctx: &Ctx) -> Result<Term, Error> {
        debug!("infer type of {}", self.show(ctx));
        use TermC::*;
        let err = |kind| self.error(kind, ctx);
        match self {
            Self::Type => Ok(Self::Type),
            Self::BVar(x) => ctx.get_type(*x).ok_or_else(|| err(ErrorKind::TypeNotFound(*x))),
            Self::Ref(g) => g.infer(),
            Self::Hole(_) => match self.resolved() {
                Some(tm) => tm.infer(ctx),
                None => Err(err(ErrorKind::UnresolvedHole)),
            },
            Self::Comb(c) => match &**c {
                Prod(..) => Ok(Self::Type),
                Abst(arg, body) => {
                    let ty = arg.ty.as_ref().ok_or_else(|| err(ErrorKind::UninferableFunction))?;
                    let id = arg.id.clone();
                    let uses = body.uses(0);
                    if uses > 1 {
                        return Err(err(ErrorKind::NonLinearUse { id, uses }));
                    }
                    if !body.stratified(0, 0) {
                        return Err(err(ErrorKind::NonStratifiedUse { id, boxes: 0 }));
                    }
                    let body_ty = body.infer(&ctx.bind(Binding::typed(id.clone(), ty.clone())))?;
                    Ok(Prod(Arg::new(arg.eras, id, ty.clone()), body_ty).into())
                }
                Appl(eras, f, a) => {
                    let f_ty = f.infer(ctx)?.subst(ctx).whnf(true);
                    let (arg, body) = match f_ty.as_comb() {
                        Some(Prod(arg, body)) => (arg, body),
                        _ => return Err(err(ErrorKind::NotAFunction(f_ty.clone()))),
                    };
                    if arg.eras != *eras {
                        return Err(err(ErrorKind::ErasureMismatch { expected: arg.eras }));
                    }
                    let a_ty = a.infer(ctx)?;
                    self.expect(ctx, &arg.ty, &a_ty)?;
                    Ok(ctx.subst_single(body, a))
                }
                BoxType(tm) => {
                    self.expect(ctx, &Self::Type, &tm.infer(ctx)?)?;
                    Ok(Self::Type)
                }
                BoxIntro(tm) => Ok(BoxType(tm.infer(ctx)?).into()),
                Unbox(id, s, body) => {
                    let s_ty = s.infer(ctx)?.subst(ctx).whnf(true);
                    let ty = match s_ty.as_comb() {
                        Some(BoxType(ty)) => ty.clone(),
                        _ => return Err(err(ErrorKind::NotABoxedValue(s_ty.clone()))),
                    };
                    if !body.stratified(0, -1) {
                        let id = id.clone();
                        return Err(err(ErrorKind::NonStratifiedUse { id, boxes: 1 }));
                    }
                    let bind = Binding {
                        id: id.clone(),
                        ty: Some(ty),
                        tm: Some(s.clone()),
                    };
                    let body_ty = body.infer(&ctx.bind(bind))?;
                    Ok(ctx.subst_single(&body_ty, s))
                }
                SelfType(id, body) => {
                    let _ = body.infer(&ctx.bind(Binding::typed(id.clone(), self.clone())))?;
                    Ok(Self::Type)
                }
                SelfIntro(ty, tm) => {
                    let ty_whnf = ty.subst(ctx).whnf(true);
                    match ty_whnf.as_comb() {
                        Some(SelfType(_, body)) => tm.check(ctx, &ctx.subst_single(body, tm))?,
                        _ => return Err(err(ErrorKind::NotASelfType(ty_whnf.clone()))),
                    };
                    Ok(ty.clone())
                }
                SelfElim(tm) => {
                    let tm_ty = tm.infer(ctx)?.subst(ctx).whnf(true);
                    match tm_ty.as_comb() {
                        Some(SelfType(_, body)) => Ok(ctx.subst_single(body, tm)),
                        _ => Err(err(ErrorKind::NotSelfTyped(tm_ty.clone()))),
                    }
                }
                Let(id, tm, body) => {
                    let bind = Binding {
                        id: id.clone(),
                        ty: Some(tm.infer(ctx)?),
                        tm: Some(tm.clone()),
                    };
                    let body_ty = body.infer(&ctx.bind(bind))?;
                    Ok(ctx.subst_single(&body_ty, tm))
                }
            },
        }
    }

    /// Check whether a term is of the given type.
    pub fn check(&self, ctx: &Ctx, ty_exp: &Term) -> Result<(), Error> {
        let ty_inf = self.infer(ctx)?;
        self.expect(ctx, ty_exp, &ty_inf)
    }

    /// Fail with a type mismatch on `self` if the two types differ.
    fn expect(&self, ctx: &Ctx, expected: &Term, actual: &Term) -> Result<(), Error> {
        debug!("checking convertibility: {} ~ {}", expected.show(ctx), actual.show(ctx));
        match ctx.convertible(expected, actual) {
            Ok(true) => Ok(()),
            res => {
                let expected = expected.clone();
                let actual = actual.clone();
                let undecided = res.is_err();
                let kind = ErrorKind::TypeMismatch { expected, actual, undecided };
                Err(self.error(kind, ctx))
            }
        }
    }

    fn error(&self, kind: ErrorKind, ctx: &Ctx) -> Error {
        let expr = self.clone();
        let ctx = ctx.clone();
        Error { kind, expr, ctx }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorKind::*;
        let ctx = &self.ctx;
        let expr = self.expr.show(ctx).erased();
        let norm = |tm: &Term| ctx.norm(tm, false);
        writeln!(f, "[ERROR]")?;
        match &self.kind {
            UninferableFunction => writeln!(f, "Can't infer non-annotated function `{}`.", expr)?,
            NonLinearUse { id, uses } => {
                writeln!(f, "Non-linear function on `{}`.", expr)?;
                writeln!(f, "Variable '{}' is used {} times.", id, uses)?
            }
            NonStratifiedUse { id, boxes } => {
                writeln!(f, "Non-stratified use of variable '{}' on `{}`.", id, expr)?;
                writeln!(f, "Uses of '{}' must be inside exactly {} box(es).", id, boxes)?
            }
            NotAFunction(ty) => {
                writeln!(f, "Non-function application on `{}`.", expr)?;
                writeln!(f, "- Type = {}", norm(ty).show(ctx))?
            }
            ErasureMismatch { expected } => {
                let (exp, act) = if *expected { ("erased", "kept") } else { ("kept", "erased") };
                writeln!(f, "Mismatched erasure on `{}`.", expr)?;
                writeln!(f, "The argument must be {}, but it is {}.", exp, act)?
            }
            TypeMismatch { expected, actual, undecided } => {
                writeln!(f, "Type mismatch on `{}`.", self.expr.show(ctx))?;
                writeln!(f, "- Expect = {}", norm(expected).show(ctx))?;
                writeln!(f, "- Actual = {}", norm(actual).show(ctx))?;
                if *undecided {
                    writeln!(f, "({}.)", super::Undecided)?
                }
            }
            NotABoxedValue(ty) => {
                writeln!(f, "Unboxing of a value that is not boxed on `{}`.", expr)?;
                writeln!(f, "- Type = {}", norm(ty).show(ctx))?
            }
            NotASelfType(ty) => {
                writeln!(f, "Self introduction with a type that is not a self type on `{}`.", expr)?;
                writeln!(f, "- Type = {}", norm(ty).show(ctx))?
            }
            NotSelfTyped(ty) => {
                writeln!(f, "Self elimination of a value that is not self-typed on `{}`.", expr)?;
                writeln!(f, "- Type = {}", norm(ty).show(ctx))?
            }
            UnresolvedHole => writeln!(f, "Hole found.")?,
            TypeNotFound(x) => writeln!(f, "No type for variable #{} on `{}`.", x, expr)?,
        }
        write!(f, "\n[CONTEXT]\n{}", ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error as TopError;
    use alloc::string::ToString;

    fn infer(s: &str) -> Result<Term, TopError> {
        Ok(Term::parse(s)?.infer(&Ctx::new())?)
    }

    fn infer_err(s: &str) -> Result<ErrorKind, TopError> {
        match Term::parse(s)?.infer(&Ctx::new()) {
            Ok(ty) => panic!("{} unexpectedly has type {}", s, ty),
            Err(e) => Ok(e.kind),
        }
    }

    #[test]
    fn identity() -> Result<(), TopError> {
        let id = "def id [A : Type] [-x : A] x";
        assert_eq!(infer(&[id, "(id Type -Type)"].join(" "))?, Term::Type);
        let kind = infer_err(&[id, "(id Type Type)"].join(" "))?;
        assert!(matches!(kind, ErrorKind::ErasureMismatch { expected: true }));

        let kept = "def f [A : Type] [x : A] x";
        let kind = infer_err(&[kept, "(f Type -Type)"].join(" "))?;
        assert!(matches!(kind, ErrorKind::ErasureMismatch { expected: false }));
        Ok(())
    }

    #[test]
    fn linearity() -> Result<(), TopError> {
        let pair = "[A : Type] [pair : {a : A} {b : A} A] [x : A]";
        assert!(matches!(
            infer_err(&[pair, "(pair x x)"].join(" "))?,
            ErrorKind::NonLinearUse { uses: 2, .. }
        ));
        infer(&[pair, "(pair x x)"].join(" ").replace("{b : A}", "{-b : A}").replace("x x", "x -x"))?;
        Ok(())
    }

    #[test]
    fn stratification() -> Result<(), TopError> {
        let unbox = "[f : {t : Type} Type] [b : !Type] [x = b]";
        assert!(matches!(
            infer_err(&[unbox, "(f x)"].join(" "))?,
            ErrorKind::NonStratifiedUse { boxes: 1, .. }
        ));
        assert!(matches!(
            infer_err(&[unbox, "|(f x)"].join(" "))?,
            ErrorKind::NonStratifiedUse { boxes: 0, .. }
        ));
        let ty = infer("[b : !Type] [x = b] !x")?;
        assert!(ty.equals(&Term::parse("{b : !Type} Type")?));
        Ok(())
    }

    #[test]
    fn boxes() -> Result<(), TopError> {
        assert_eq!(infer("|Type")?, Term::parse("!Type")?);
        assert_eq!(infer("!Type")?, Term::Type);
        assert!(matches!(infer_err("[x = Type] x")?, ErrorKind::NotABoxedValue(_)));
        assert!(matches!(infer_err("!|Type")?, ErrorKind::TypeMismatch { .. }));
        Ok(())
    }

    #[test]
    fn church_numeral() -> Result<(), TopError> {
        let c2 = "def c2 [P : Type] [s : !{x : P} P] [S = s] |[z : P] (S (S z))";
        let ty = infer(&[c2, "c2"].join(" "))?;
        let expected = Term::parse("{P : Type} {s : !{x : P} P} !{z : P} P")?;
        assert!(ty.equals(&expected), "{}", ty);

        let app = Term::parse(&[c2, "(c2 Type |[x : Type] x)"].join(" "))?;
        assert!(app.infer(&Ctx::new())?.equals(&Term::parse("!{z : Type} Type")?));
        assert_eq!(app.norm(true), Term::parse("|[z : Type] z")?);
        Ok(())
    }

    #[test]
    fn self_types() -> Result<(), TopError> {
        let unit = "def Unit @self : {-P : {x : Unit} Type} {-new : (P unit)} (P self)
                    def unit : Unit = [-P : {x : Unit} Type] [-new : (P unit)] new";
        assert_eq!(infer(&[unit, "Unit"].join(" "))?, Term::Type);
        let ty = infer(&[unit, "unit"].join(" "))?;
        assert!(ty.equals(&Term::parse(&[unit, "Unit"].join(" "))?));

        let motive = Term::parse(&[unit, "{-P : {x : Unit} Type} {-new : (P unit)} (P unit)"].join(" "))?;
        assert!(infer(&[unit, "~unit"].join(" "))?.equals(&motive));
        let elim = [unit, "~: Unit = [-P : {x : Unit} Type] [-new : (P unit)] new"].join(" ");
        assert!(infer(&elim)?.equals(&motive));

        assert!(matches!(infer_err(&[unit, "~Type"].join(" "))?, ErrorKind::NotSelfTyped(_)));
        assert!(matches!(infer_err(": Type = Type")?, ErrorKind::NotASelfType(_)));
        Ok(())
    }

    #[test]
    fn let_and_holes() -> Result<(), TopError> {
        assert_eq!(infer("let T Type [x : T] x")?, Term::parse("{x : Type} Type")?);
        assert!(matches!(infer_err("*")?, ErrorKind::UnresolvedHole));
        assert!(matches!(infer_err("[x] x")?, ErrorKind::UninferableFunction));
        assert!(matches!(infer_err("(Type Type)")?, ErrorKind::NotAFunction(_)));
        Ok(())
    }

    #[test]
    fn undecided_mismatch() -> Result<(), TopError> {
        let err = Term::parse("[f : {x : Type} Type] (f *)")?.infer(&Ctx::new()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnresolvedHole));
        let err = Term::parse("[f : {x : *} Type] (f Type)")?.infer(&Ctx::new()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TypeMismatch { undecided: true, .. }));
        let s = err.to_string();
        assert!(s.contains("- Expect = *\n- Actual = Type\n(couldn't decide if terms are equal.)\n"));
        Ok(())
    }

    #[test]
    fn global_types_cached() -> Result<(), TopError> {
        let (tm, gctx) = crate::GCtx::parse("def id [A : Type] [x : A] x id")?;
        let id = gctx.get("id").expect("id is defined");
        assert!(id.cached_type().is_none());
        let ty1 = tm.infer(&Ctx::new())?;
        let ty2 = tm.infer(&Ctx::new())?;
        assert!(ty1.ptr_eq(&ty2));
        assert!(id.cached_type().is_some());
        Ok(())
    }

    #[test]
    fn error_display() -> Result<(), TopError> {
        let err = Term::parse("[A : Type] [a : A] (a Type)")?.infer(&Ctx::new()).unwrap_err();
        let s = err.to_string();
        assert!(s.starts_with("[ERROR]\nNon-function application on `(a Type)`."));
        assert!(s.contains("- Type = A"));
        assert!(s.ends_with("[CONTEXT]\n- A : Type\n- A = ?\n~\n- a : A\n- a = ?\n~\n"));

        let tm = Term::parse("[A : Type] let T A [a : T] [g : {y : Type} Type] (g a)")?;
        let s = tm.infer(&Ctx::new()).unwrap_err().to_string();
        assert!(s.starts_with("[ERROR]\nType mismatch on `(g a)`.\n- Expect = Type\n- Actual = A\n\n"));
        assert!(!s.contains("couldn't decide"));
        assert!(s.contains("- T : Type\n- T = A\n~\n"));
        Ok(())
    }
}
