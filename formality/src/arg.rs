use alloc::string::String;

/// Argument of a binder.
/// For example, the `x` and `A` in the term `[x : A] t`,
/// together with the information whether `x` is erased (`[-x : A] t`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arg<Ty> {
    pub eras: bool,
    pub id: String,
    pub ty: Ty,
}

impl<Ty> Arg<Ty> {
    pub fn new(eras: bool, id: impl Into<String>, ty: Ty) -> Self {
        let id = id.into();
        Self { eras, id, ty }
    }

    /// Construct an argument with the same name and erasure, but a new type.
    pub fn map_ty_ref<F, U>(&self, f: F) -> Arg<U>
    where
        F: FnOnce(&Ty) -> U,
    {
        let ty = f(&self.ty);
        Arg { eras: self.eras, id: self.id.clone(), ty }
    }
}
