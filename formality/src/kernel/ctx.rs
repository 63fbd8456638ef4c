//! Persistent contexts of bound variables.

use crate::{DeBruijn, Term};
use alloc::{rc::Rc, string::String};

/// Information about a bound variable.
///
/// Type and value of a binding live in the context *below* the binding.
#[derive(Clone, Debug, Default)]
pub struct Binding {
    pub id: String,
    pub ty: Option<Term>,
    pub tm: Option<Term>,
}

impl Binding {
    /// A binding without type or value, used for printing.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn typed(id: impl Into<String>, ty: Term) -> Self {
        Self {
            ty: Some(ty),
            ..Self::new(id)
        }
    }

    /// An anonymous binding carrying a value.
    pub fn value(tm: Term) -> Self {
        Self {
            tm: Some(tm),
            ..Default::default()
        }
    }
}

/// Context of bound variables, where the variable 0 is the last bound one.
///
/// Binding a variable does not modify a context, but
/// creates a new one that shares the old one as its tail.
#[derive(Clone, Debug, Default)]
pub struct Ctx(Option<Rc<Node>>);

#[derive(Debug)]
struct Node {
    bind: Binding,
    tail: Ctx,
}

impl Ctx {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Return a new context with an additional binding.
    pub fn bind(&self, bind: Binding) -> Self {
        let tail = self.clone();
        Self(Some(Rc::new(Node { bind, tail })))
    }

    /// Return the innermost binding and the context below it.
    pub fn split(&self) -> Option<(&Binding, &Ctx)> {
        self.0.as_deref().map(|node| (&node.bind, &node.tail))
    }

    /// Iterate over bindings, starting with the innermost one.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self)
    }

    pub fn get(&self, n: DeBruijn) -> Option<&Binding> {
        self.iter().nth(n)
    }

    /// Type of the variable `n`, valid in the whole context.
    pub fn get_type(&self, n: DeBruijn) -> Option<Term> {
        Some(self.get(n)?.ty.clone()? << (n + 1))
    }

    /// Value of the variable `n`, valid in the whole context.
    pub fn get_value(&self, n: DeBruijn) -> Option<Term> {
        Some(self.get(n)?.tm.clone()? << (n + 1))
    }

    /// Find the variable that is the `skip`-th innermost one named `id`.
    pub fn find(&self, id: &str, skip: usize) -> Option<DeBruijn> {
        let mut named = self.iter().enumerate().filter(|(_, b)| b.id == id);
        named.nth(skip).map(|(n, _)| n)
    }

    /// Name of the variable `n`, with one prime for
    /// every more recently bound variable of the same name.
    pub fn name(&self, n: DeBruijn) -> Option<String> {
        let id = &self.get(n)?.id;
        let primes = self.iter().take(n).filter(|b| b.id == *id).count();
        let mut name = id.clone();
        name.extend(core::iter::repeat('\'').take(primes));
        Some(name)
    }
}

/// Iterator over the bindings of a context.
pub struct Iter<'a>(&'a Ctx);

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Binding;

    fn next(&mut self) -> Option<Self::Item> {
        let (bind, tail) = self.0.split()?;
        self.0 = tail;
        Some(bind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Ctx {
        // x : Type, y : x, x : y
        Ctx::new()
            .bind(Binding::typed("x", Term::Type))
            .bind(Binding::typed("y", Term::BVar(0)))
            .bind(Binding::typed("x", Term::BVar(0)))
    }

    #[test]
    fn lookup() {
        let ctx = ctx();
        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.find("x", 0), Some(0));
        assert_eq!(ctx.find("x", 1), Some(2));
        assert_eq!(ctx.find("x", 2), None);
        assert_eq!(ctx.find("y", 0), Some(1));
        assert_eq!(ctx.name(2).as_deref(), Some("x'"));
        assert_eq!(ctx.name(0).as_deref(), Some("x"));
    }

    #[test]
    fn types_are_lifted() {
        let ctx = ctx();
        assert_eq!(ctx.get_type(0), Some(Term::BVar(1)));
        assert_eq!(ctx.get_type(1), Some(Term::BVar(2)));
        assert_eq!(ctx.get_type(2), Some(Term::Type));
        assert_eq!(ctx.get_value(0), None);
    }

    #[test]
    fn persistent() {
        let outer = Ctx::new().bind(Binding::new("a"));
        let inner = outer.bind(Binding::new("b"));
        assert_eq!(outer.len(), 1);
        assert_eq!(inner.find("a", 0), Some(1));
    }
}
