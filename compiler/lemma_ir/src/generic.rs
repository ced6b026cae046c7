//! Opaque values defined outside the expression language.
//!
//! A generic value has a type name, a size and indexed slots. The expression
//! tree only holds a [`GenericHandle`]; two handles are equal when they point
//! at the same object.

use crate::Expr;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Contract every generic value type implements.
///
/// Indices are zero-based; language-level primitives translate from the
/// one-based indexing users see.
pub trait GenericObject: Send + Sync {
    /// Name reported by `GenericTypeName`.
    fn type_name(&self) -> &'static str;

    /// Number of addressable slots.
    fn size(&self) -> usize;

    /// Slot `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<Expr>;

    /// Replace slot `index`. Returns `false` when out of range.
    fn set(&self, index: usize, value: Expr) -> bool;
}

/// Shared, identity-compared reference to a generic object.
#[derive(Clone)]
pub struct GenericHandle(Arc<dyn GenericObject>);

impl GenericHandle {
    pub fn new(object: impl GenericObject + 'static) -> Self {
        GenericHandle(Arc::new(object))
    }

    pub fn ptr_eq(&self, other: &GenericHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl std::ops::Deref for GenericHandle {
    type Target = dyn GenericObject;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for GenericHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for GenericHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} size={}>", self.type_name(), self.size())
    }
}

/// Fixed-size mutable array of expressions.
pub struct ArrayObject {
    items: RwLock<Vec<Expr>>,
}

impl ArrayObject {
    pub const TYPE_NAME: &'static str = "Array";

    /// Largest number of slots an array may have.
    pub const MAX_LEN: usize = 1 << 24;

    /// Array of `size` slots, each holding `init`.
    ///
    /// `None` when `size` exceeds [`ArrayObject::MAX_LEN`] or the slots cannot
    /// be allocated.
    pub fn new(size: usize, init: &Expr) -> Option<Self> {
        if size > Self::MAX_LEN {
            return None;
        }
        let mut items = Vec::new();
        items.try_reserve_exact(size).ok()?;
        items.resize(size, init.clone());
        Some(ArrayObject {
            items: RwLock::new(items),
        })
    }
}

impl GenericObject for ArrayObject {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn size(&self) -> usize {
        self.items.read().len()
    }

    fn get(&self, index: usize) -> Option<Expr> {
        self.items.read().get(index).cloned()
    }

    fn set(&self, index: usize, value: Expr) -> bool {
        match self.items.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}
