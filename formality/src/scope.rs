//! Scoping of parse terms, replacing names by de Bruijn indices and global references.

use crate::kernel::{Global, Slot};
use crate::parse;
use crate::{Arg, GCtx, Stack, Term, TermC};
use alloc::{rc::Rc, string::String, vec::Vec};
use core::fmt;
use fnv::FnvHashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// names that were referenced, but never defined
    UndefinedVariables(Vec<String>),
    /// definition refers to a variable bound outside of it
    OpenDefinition(String),
    /// forward reference resolved twice
    Reresolution(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UndefinedVariables(xs) => write!(f, "Undefined variables: {}.", xs.join(", ")),
            Self::OpenDefinition(x) => {
                write!(f, "Definition refers to local variable '{}' bound outside of it.", x)
            }
            Self::Reresolution(x) => write!(f, "Reference to '{}' was already resolved.", x),
        }
    }
}

/// Bound name, which is a local variable unless it carries a global.
struct Entry {
    id: String,
    global: Option<Rc<Global>>,
}

type Bound = Stack<Entry>;

#[derive(Default)]
struct State {
    gctx: GCtx,
    /// forward references, by name
    pending: FnvHashMap<String, Rc<Slot>>,
    /// number of bound entries not reachable from the current definition
    floor: usize,
}

impl State {
    /// Resolve the `skip`-th innermost variable named `id`.
    fn var(&mut self, id: String, mut skip: usize, bnd: &Bound) -> Result<Term, Error> {
        let mut locals = 0;
        for (i, entry) in bnd.iter().enumerate() {
            if entry.id == id {
                if skip == 0 {
                    return match &entry.global {
                        Some(g) => Ok(Term::Ref(g.clone())),
                        None if bnd.len() - i <= self.floor => Err(Error::OpenDefinition(id)),
                        None => Ok(Term::BVar(locals)),
                    };
                }
                skip -= 1;
            }
            if entry.global.is_none() {
                locals += 1;
            }
        }
        trace!("forward reference to {}", id);
        let slot = self.pending.entry(id);
        let slot = slot.or_insert_with_key(|id| Rc::new(Slot::new(id.clone())));
        Ok(Term::Hole(Some(slot.clone())))
    }

    /// Scope a definition and return its scoped body.
    fn def(&mut self, id: String, tm: parse::Term, body: parse::Term, bnd: &mut Bound) -> Result<Term, Error> {
        let floor = core::mem::replace(&mut self.floor, bnd.len());
        let tm = self.term(tm, bnd);
        self.floor = floor;

        let global = Rc::new(Global::new(id.clone(), tm?));
        debug!("define {}", id);
        // a slot leaves `pending` when it is resolved, so this cannot fail
        if let Some(slot) = self.pending.remove(&id) {
            let resolved = slot.resolve(Term::Ref(global.clone()));
            resolved.map_err(|_| Error::Reresolution(id.clone()))?;
        }
        self.gctx.insert(global.clone());
        let global = Some(global);
        bnd.with_pushed(Entry { id, global }, |bnd| self.term(body, bnd))
    }

    /// Scope a term under a new local variable.
    fn bind(&mut self, id: String, tm: parse::Term, bnd: &mut Bound) -> Result<Term, Error> {
        let global = None;
        bnd.with_pushed(Entry { id, global }, |bnd| self.term(tm, bnd))
    }

    fn term(&mut self, tm: parse::Term, bnd: &mut Bound) -> Result<Term, Error> {
        use parse::Term as P;
        use TermC::*;
        let tm = match tm {
            P::Var(id, skip) => return self.var(id, skip, bnd),
            P::Type => return Ok(Term::Type),
            P::Hole => return Ok(Term::Hole(None)),
            P::Def(id, tm, body) => return self.def(id, *tm, *body, bnd),
            P::Prod(eras, id, ty, body) => {
                let ty = self.term(*ty, bnd)?;
                let body = self.bind(id.clone(), *body, bnd)?;
                Prod(Arg::new(eras, id, ty), body)
            }
            P::Abst(eras, id, ty, body) => {
                let ty = ty.map(|ty| self.term(*ty, bnd)).transpose()?;
                let body = self.bind(id.clone(), *body, bnd)?;
                Abst(Arg::new(eras, id, ty), body)
            }
            P::Appl(head, args) => {
                let mut tm = self.term(*head, bnd)?;
                for (eras, arg) in args {
                    tm = tm.apply(eras, self.term(arg, bnd)?);
                }
                return Ok(tm);
            }
            P::BoxType(tm) => BoxType(self.term(*tm, bnd)?),
            P::BoxIntro(tm) => BoxIntro(self.term(*tm, bnd)?),
            P::Unbox(id, s, body) => {
                let s = self.term(*s, bnd)?;
                Unbox(id.clone(), s, self.bind(id, *body, bnd)?)
            }
            P::SelfType(id, body) => SelfType(id.clone(), self.bind(id, *body, bnd)?),
            P::SelfIntro(ty, tm) => SelfIntro(self.term(*ty, bnd)?, self.term(*tm, bnd)?),
            P::SelfElim(tm) => SelfElim(self.term(*tm, bnd)?),
            P::Let(id, tm, body) => {
                let tm = self.term(*tm, bnd)?;
                Let(id.clone(), tm, self.bind(id, *body, bnd)?)
            }
        };
        Ok(tm.into())
    }
}

/// Scope a closed parse term, returning the global definitions it introduces.
///
/// Definitions disappear from the scoped term;
/// references to them become global references,
/// possibly through holes if a name is used before its definition.
pub fn scope(tm: parse::Term) -> Result<(Term, GCtx), Error> {
    let mut state = State::default();
    let tm = state.term(tm, &mut Bound::new())?;
    if !state.pending.is_empty() {
        let mut names: Vec<String> = state.pending.into_keys().collect();
        names.sort();
        return Err(Error::UndefinedVariables(names));
    }
    Ok((tm, state.gctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    fn scope_str(s: &str) -> Result<(Term, GCtx), Error> {
        scope(parse::parse(s).expect("parse error"))
    }

    #[test]
    fn indices() -> Result<(), Error> {
        let (tm, _) = scope_str("[x : Type] [y : x] [x : y] (x x' y)")?;
        let body = Term::BVar(0).apply(false, Term::BVar(2)).apply(false, Term::BVar(1));
        let mut inner = &tm;
        for _ in 0..3 {
            inner = match inner.as_comb() {
                Some(TermC::Abst(_, body)) => body,
                _ => panic!("not a function"),
            };
        }
        assert_eq!(*inner, body);
        Ok(())
    }

    #[test]
    fn globals_are_not_indexed() -> Result<(), Error> {
        let (tm, gctx) = scope_str("[x : Type] def T Type [y : T] x")?;
        assert_eq!(gctx.len(), 1);
        let t = gctx.get("T").expect("T is defined").clone();
        let inner = TermC::Abst(Arg::new(false, "y", Some(Term::Ref(t))), Term::BVar(1));
        let expected = TermC::Abst(Arg::new(false, "x", Some(Term::Type)), inner.into());
        assert_eq!(tm, expected.into());
        Ok(())
    }

    #[test]
    fn forward_references() -> Result<(), Error> {
        let (tm, gctx) = scope_str("def a b def b Type a")?;
        let a = gctx.get("a").expect("a is defined");
        let b = gctx.get("b").expect("b is defined");
        assert_eq!(tm, Term::Ref(a.clone()));
        assert_eq!(a.term().resolved(), Some(&Term::Ref(b.clone())));
        let names: Vec<_> = gctx.iter().map(|g| g.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn redefinition() -> Result<(), Error> {
        let (tm, gctx) = scope_str("def a b def b Type def b [x : Type] x a")?;
        let a = gctx.get("a").expect("a is defined");
        let first = gctx.iter().nth(1).expect("first b is defined");
        assert_eq!(tm, Term::Ref(a.clone()));
        match a.term().resolved() {
            Some(Term::Ref(g)) => assert!(Rc::ptr_eq(g, first)),
            tm => panic!("unexpected resolution {:?}", tm),
        }
        assert_eq!(first.term(), &Term::Type);
        assert_eq!(gctx.len(), 3);
        Ok(())
    }

    #[test]
    fn errors() {
        let err = |s| scope_str(s).unwrap_err();
        let undef = vec!["a".to_string(), "b".to_string()];
        assert_eq!(err("(b a [a : Type] a b)"), Error::UndefinedVariables(undef));
        let open = Error::OpenDefinition("x".to_string());
        assert_eq!(err("[x : Type] def y x y"), open);
    }
}
