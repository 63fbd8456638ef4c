//! A `Vec` that is iterated from the last to the first pushed element.

use alloc::vec::Vec;
use core::iter::FromIterator;

/// A `Vec` that is iterated from the last to the first pushed element.
///
/// The motivation for this data structure is
/// the translation of algorithms using (immutable) linked lists.
/// These algorithms usually assume that
/// the nth element of a list  is the nth-*last*  consed element, whereas
/// the nth element of a `Vec` is the nth-*first* pushed element.
/// This data structure uses a `Vec` inside, but
/// the nth element of a `Stack` is the nth-*last* pushed element, that is,
/// the nth element counted from the end of the underlying `Vec`.
///
/// This behaviour is convenient e.g. when resolving names to de Bruijn indices.
#[derive(Clone, Debug)]
pub struct Stack<A>(Vec<A>);

impl<A> Stack<A> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an element to the top of the stack.
    pub fn push(&mut self, x: A) {
        self.0.push(x)
    }

    /// Remove and return an element from the top of the stack.
    pub fn pop(&mut self) -> Option<A> {
        self.0.pop()
    }

    /// Push an element, run a function on the stack, and pop the element.
    pub fn with_pushed<B>(&mut self, x: A, f: impl FnOnce(&mut Self) -> B) -> B {
        self.push(x);
        let y = f(self);
        self.pop();
        y
    }

    /// Return the number of elements on the stack.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the stack contains no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Obtain the nth element counted from the top of the stack.
    pub fn get(&self, n: usize) -> Option<&A> {
        self.iter().nth(n)
    }

    /// Iterate through the elements of the stack starting from the top.
    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.0.iter().rev()
    }
}

impl<A> Default for Stack<A> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<A> FromIterator<A> for Stack<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

#[test]
fn top_first() {
    let mut stack: Stack<_> = [1, 2].into_iter().collect();
    stack.push(3);
    assert_eq!(stack.get(0), Some(&3));
    assert_eq!(stack.get(2), Some(&1));
    assert_eq!(stack.with_pushed(4, |s| s.get(1).copied()), Some(3));
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.len(), 2);
}
