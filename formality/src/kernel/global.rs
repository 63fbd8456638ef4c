//! Global definitions and forward references to them.

use super::typing::Error;
use super::Ctx;
use crate::Term;
use alloc::string::String;
use core::cell::OnceCell;
use core::fmt;

/// Named closed term whose type is inferred at most once.
pub struct Global {
    name: String,
    term: Term,
    ty: OnceCell<Term>,
}

impl Global {
    pub fn new(name: String, term: Term) -> Self {
        let ty = OnceCell::new();
        Self { name, term, ty }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Return the type of the definition if it was already inferred.
    pub fn cached_type(&self) -> Option<&Term> {
        self.ty.get()
    }

    /// Infer the type of the definition.
    ///
    /// On success, the type is cached, so that
    /// subsequent calls return the very same type.
    pub fn infer(&self) -> Result<Term, Error> {
        if let Some(ty) = self.ty.get() {
            return Ok(ty.clone());
        }
        debug!("infer type of global {}", self.name);
        let ty = self.term.infer(&Ctx::new())?;
        Ok(self.ty.get_or_init(|| ty).clone())
    }
}

/// Globals are identified by their name.
impl PartialEq for Global {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Global {}

impl fmt::Debug for Global {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Global").field(&self.name).finish()
    }
}

/// Reference to a name that is defined only later.
///
/// Once the definition is encountered, the slot is resolved to it.
pub struct Slot {
    name: String,
    cell: OnceCell<Term>,
}

impl Slot {
    pub fn new(name: String) -> Self {
        let cell = OnceCell::new();
        Self { name, cell }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the term that the slot was resolved to, if any.
    pub fn get(&self) -> Option<&Term> {
        self.cell.get()
    }

    /// Resolve the slot, returning the term back if the slot was already resolved.
    pub fn resolve(&self, tm: Term) -> Result<(), Term> {
        self.cell.set(tm)
    }
}

/// Slots are identified by their address.
impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl Eq for Slot {}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_once() {
        let slot = Slot::new("x".into());
        assert_eq!(slot.get(), None);
        assert_eq!(slot.resolve(Term::Type), Ok(()));
        assert_eq!(slot.resolve(Term::BVar(0)), Err(Term::BVar(0)));
        assert_eq!(slot.get(), Some(&Term::Type));
    }
}
