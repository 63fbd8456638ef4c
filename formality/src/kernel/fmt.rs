//! Printing of terms and contexts.

use super::{Binding, Ctx};
use crate::{Term, TermC};
use alloc::vec::Vec;
use core::fmt::{self, Display};

/// Term together with the context naming its free variables.
pub struct Show<'a> {
    tm: &'a Term,
    ctx: &'a Ctx,
    erased: bool,
}

impl Term {
    /// Display a term, naming its free variables by the given context.
    ///
    /// ~~~
    /// # use formality::{Binding, Ctx, Term};
    /// let ctx = Ctx::new().bind(Binding::new("x")).bind(Binding::new("x"));
    /// let tm = Term::BVar(1).apply(true, Term::BVar(0));
    /// assert_eq!(tm.show(&ctx).to_string(), "(x' -x)");
    /// assert_eq!(tm.show(&ctx).erased().to_string(), "x'");
    /// ~~~
    pub fn show<'a>(&'a self, ctx: &'a Ctx) -> Show<'a> {
        let erased = false;
        Show { tm: self, ctx, erased }
    }
}

impl<'a> Show<'a> {
    /// Omit erased arguments, erased functions and self annotations.
    pub fn erased(self) -> Self {
        Self {
            erased: true,
            ..self
        }
    }

    fn with(&self, tm: &'a Term) -> Self {
        Self { tm, ..*self }
    }

    /// Display a subterm under a new binder.
    fn under(&self, id: &str, tm: &Term, f: &mut fmt::Formatter) -> fmt::Result {
        let ctx = self.ctx.bind(Binding::new(id));
        let erased = self.erased;
        Show { tm, ctx: &ctx, erased }.fmt(f)
    }
}

fn eras(e: bool) -> &'static str {
    if e {
        "-"
    } else {
        ""
    }
}

impl<'a> Display for Show<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TermC::*;
        let c = match self.tm {
            Term::Type => return write!(f, "Type"),
            Term::BVar(n) => match self.ctx.name(*n) {
                Some(x) => return write!(f, "{}", x),
                None => return write!(f, "#{}", n),
            },
            Term::Ref(g) => return write!(f, "{}", g.name()),
            Term::Hole(None) => return write!(f, "*"),
            Term::Hole(Some(slot)) => match slot.get() {
                Some(tm) => return self.with(tm).fmt(f),
                None => return write!(f, "{}", slot.name()),
            },
            Term::Comb(c) => c,
        };
        match &**c {
            Prod(arg, tm) => {
                let ty = self.with(&arg.ty);
                write!(f, "{{{}{} : {}}} ", eras(arg.eras), arg.id, ty)?;
                self.under(&arg.id, tm, f)
            }
            Abst(arg, tm) if self.erased && arg.eras => self.under(&arg.id, tm, f),
            Abst(arg, tm) => {
                write!(f, "[{}{}", eras(arg.eras), arg.id)?;
                match &arg.ty {
                    Some(ty) if !self.erased => write!(f, " : {}] ", self.with(ty))?,
                    _ => write!(f, "] ")?,
                }
                self.under(&arg.id, tm, f)
            }
            Appl(..) => {
                let mut head = self.tm;
                let mut args = Vec::new();
                while let Some(Appl(e, tm, arg)) = head.as_comb() {
                    if !(self.erased && *e) {
                        args.push((*e, arg))
                    }
                    head = tm;
                }
                if args.is_empty() {
                    return self.with(head).fmt(f);
                }
                write!(f, "({}", self.with(head))?;
                for (e, arg) in args.into_iter().rev() {
                    write!(f, " {}{}", eras(e), self.with(arg))?
                }
                write!(f, ")")
            }
            BoxType(tm) => write!(f, "!{}", self.with(tm)),
            BoxIntro(tm) => write!(f, "|{}", self.with(tm)),
            Unbox(x, s, tm) => {
                write!(f, "[{} = {}] ", x, self.with(s))?;
                self.under(x, tm, f)
            }
            SelfType(x, tm) => {
                write!(f, "@{} : ", x)?;
                self.under(x, tm, f)
            }
            SelfIntro(_, tm) if self.erased => self.with(tm).fmt(f),
            SelfIntro(ty, tm) => write!(f, ": {} = {}", self.with(ty), self.with(tm)),
            SelfElim(tm) if self.erased => self.with(tm).fmt(f),
            SelfElim(tm) => write!(f, "~{}", self.with(tm)),
            Let(x, t, tm) => {
                write!(f, "let {} {} ", x, self.with(t))?;
                self.under(x, tm, f)
            }
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.show(&Ctx::new()).fmt(f)
    }
}

/// Print the normalised types and values of all bindings, starting from the outermost.
impl Display for Ctx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ctxs = Vec::new();
        let mut ctx = self;
        while let Some((bind, tail)) = ctx.split() {
            ctxs.push((bind, tail));
            ctx = tail;
        }
        for (bind, tail) in ctxs.into_iter().rev() {
            let show = |f: &mut fmt::Formatter, tm: &Option<Term>| match tm {
                Some(tm) => write!(f, "{}", tm.norm(false).show(tail)),
                None => write!(f, "?"),
            };
            write!(f, "- {} : ", bind.id)?;
            show(f, &bind.ty)?;
            write!(f, "\n- {} = ", bind.id)?;
            show(f, &bind.tm)?;
            writeln!(f, "\n~")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Term};
    use alloc::string::ToString;

    #[test]
    fn reparse() -> Result<(), Error> {
        let srcs = [
            "{-A : Type} {x : A} A",
            "[A : Type] [x : A] [x : A] x'",
            "[b : !Type] [x = b] |x",
            "let T Type @s : {-P : {x : T} Type} (P s)",
            "~: Type = Type",
        ];
        for src in srcs {
            let tm = Term::parse(src)?;
            assert_eq!(Term::parse(&tm.to_string())?, tm, "{}", src);
        }
        Ok(())
    }

    #[test]
    fn erased() -> Result<(), Error> {
        let tm = Term::parse("[-A : Type] [x : A] (x -A ~: A = x)")?;
        let ctx = crate::Ctx::new();
        assert_eq!(tm.show(&ctx).erased().to_string(), "[x] (x x)");
        assert_eq!(tm.to_string(), "[-A : Type] [x : A] (x -A ~: A = x)");
        Ok(())
    }
}
