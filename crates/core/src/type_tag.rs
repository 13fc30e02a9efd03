//! Runtime type identity for type-erased cells
//!
//! The registry stores cells behind `dyn Any`. Every entry carries a
//! [`TypeTag`] next to it so a mismatch can be reported by name without
//! attempting the downcast first.

use std::any::{type_name, TypeId};
use std::fmt;

/// Identity and readable name of a cell's element type
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for `T`
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Readable type name (for diagnostics only, not guaranteed stable)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check whether this tag identifies `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// Equality is by TypeId only; names are informational.
impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
