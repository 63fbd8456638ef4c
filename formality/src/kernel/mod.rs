//! Type checking kernel.

mod convertible;
mod ctx;
mod fmt;
mod global;
mod linear;
mod reduce;
mod rterm;
mod subst;
pub mod typing;

pub use convertible::Undecided;
pub use ctx::{Binding, Ctx};
pub use fmt::Show;
pub use global::{Global, Slot};
pub use rterm::RTerm;
pub use typing::{Error, ErrorKind};
