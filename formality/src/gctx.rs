//! Global definitions.

use crate::kernel::{typing, Global};
use crate::{Error, Term};
use alloc::{rc::Rc, string::String, vec::Vec};
use fnv::FnvHashMap;

/// Global definitions, in the order in which they were introduced.
///
/// A name can be defined several times;
/// lookup by name then yields its latest definition.
#[derive(Clone, Debug, Default)]
pub struct GCtx {
    defs: Vec<Rc<Global>>,
    by_name: FnvHashMap<String, Rc<Global>>,
}

impl GCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and scope a term, returning it together with the definitions it introduces.
    ///
    /// ~~~
    /// # use formality::{Error, GCtx, Term};
    /// let (tm, gctx) = GCtx::parse("def T Type def id [x : T] x (id Type)")?;
    /// assert_eq!(gctx.len(), 2);
    /// assert_eq!(gctx.get("T").map(|g| g.term()), Some(&Term::Type));
    /// gctx.check()?;
    /// assert_eq!(tm.norm(true), Term::Type);
    /// # Ok::<(), Error>(())
    /// ~~~
    pub fn parse(src: &str) -> Result<(Term, Self), Error> {
        let tm = crate::parse::parse(src)?;
        Ok(crate::scope::scope(tm)?)
    }

    pub fn insert(&mut self, global: Rc<Global>) {
        self.by_name.insert(String::from(global.name()), global.clone());
        self.defs.push(global)
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Global>> {
        self.by_name.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Global>> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Infer the types of all definitions in order, stopping at the first error.
    pub fn check(&self) -> Result<(), typing::Error> {
        self.iter().try_for_each(|g| g.infer().map(|_| ()))
    }
}

impl Term {
    /// Parse and scope a closed term.
    pub fn parse(src: &str) -> Result<Self, Error> {
        Ok(GCtx::parse(src)?.0)
    }
}
