//! The shared, immutable expression tree.
//!
//! # Sharing
//!
//! `Expr` is a pointer to an immutable [`ExprKind`]. Cloning bumps a
//! reference count; rewriting builds new parents over the unchanged
//! children, so a substituted rule body shares every subtree the
//! substitution did not touch.
//!
//! # Shape
//!
//! Compound expressions are lists whose first element is the head:
//! `f(a, b)` is `List[f, a, b]` and `{a, b}` is `List[List, a, b]`.

use crate::{GenericHandle, Name, Number};
use std::fmt;
use std::sync::Arc;

/// Node payload.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Symbol or operator name.
    Atom(Name),
    /// String literal; the content is interned.
    Str(Name),
    Number(Number),
    /// Head followed by arguments. Never empty when built via `Expr::apply`.
    List(Vec<Expr>),
    Generic(GenericHandle),
}

/// Errors from indexed access to the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrError {
    /// Indexed access on a non-list node.
    NotAList,
    /// Index past the end of a list.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for IrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrError::NotAList => write!(f, "expression is not a list"),
            IrError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
        }
    }
}

impl std::error::Error for IrError {}

/// Reference-counted expression node.
#[derive(Clone)]
pub struct Expr(Arc<ExprKind>);

impl Expr {
    fn from_kind(kind: ExprKind) -> Self {
        Expr(Arc::new(kind))
    }

    pub fn atom(name: Name) -> Self {
        Self::from_kind(ExprKind::Atom(name))
    }

    pub fn string(content: Name) -> Self {
        Self::from_kind(ExprKind::Str(content))
    }

    pub fn number(value: impl Into<Number>) -> Self {
        Self::from_kind(ExprKind::Number(value.into()))
    }

    pub fn list(items: Vec<Expr>) -> Self {
        Self::from_kind(ExprKind::List(items))
    }

    /// `head(args...)` as a list.
    pub fn apply(head: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        let mut items = vec![head];
        items.extend(args);
        Self::list(items)
    }

    /// `name(args...)` with an atom head.
    pub fn call(name: Name, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::apply(Self::atom(name), args)
    }

    pub fn generic(handle: GenericHandle) -> Self {
        Self::from_kind(ExprKind::Generic(handle))
    }

    #[inline]
    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    /// Whether both point at the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_atom(&self) -> Option<Name> {
        match self.kind() {
            ExprKind::Atom(name) => Some(*name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<Name> {
        match self.kind() {
            ExprKind::Str(name) => Some(*name),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self.kind() {
            ExprKind::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self.kind() {
            ExprKind::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericHandle> {
        match self.kind() {
            ExprKind::Generic(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self.kind(), ExprKind::Atom(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind(), ExprKind::List(_))
    }

    /// First element of a list.
    pub fn head(&self) -> Result<&Expr, IrError> {
        self.nth(0)
    }

    /// Head name when the head is an atom.
    pub fn head_name(&self) -> Option<Name> {
        self.as_list()?.first()?.as_atom()
    }

    /// Elements after the head.
    pub fn args(&self) -> Result<&[Expr], IrError> {
        match self.as_list() {
            Some([]) => Ok(&[]),
            Some([_, args @ ..]) => Ok(args),
            None => Err(IrError::NotAList),
        }
    }

    /// Number of arguments (list length minus the head).
    pub fn arity(&self) -> Option<usize> {
        self.as_list().map(|items| items.len().saturating_sub(1))
    }

    /// Element `index` of a list, counting the head as 0.
    ///
    /// The reported length on failure is the argument count, matching
    /// `Length`.
    pub fn nth(&self, index: usize) -> Result<&Expr, IrError> {
        let items = self.as_list().ok_or(IrError::NotAList)?;
        items.get(index).ok_or(IrError::IndexOutOfRange {
            index,
            len: items.len().saturating_sub(1),
        })
    }

    /// Same head with new arguments.
    ///
    /// Returns a clone of `self` (same node) when every argument is
    /// pointer-identical to the current one.
    pub fn with_args(&self, args: Vec<Expr>) -> Result<Expr, IrError> {
        let items = self.as_list().ok_or(IrError::NotAList)?;
        let Some((head, old)) = items.split_first() else {
            return Err(IrError::IndexOutOfRange { index: 0, len: 0 });
        };
        let unchanged = old.len() == args.len() && old.iter().zip(&args).all(|(a, b)| a.ptr_eq(b));
        if unchanged {
            return Ok(self.clone());
        }
        Ok(Self::apply(head.clone(), args))
    }

    /// Same list with a new element sequence, reusing `self` when unchanged.
    pub fn with_items(&self, new_items: Vec<Expr>) -> Expr {
        match self.as_list() {
            Some(items)
                if items.len() == new_items.len()
                    && items.iter().zip(&new_items).all(|(a, b)| a.ptr_eq(b)) =>
            {
                self.clone()
            }
            _ => Self::list(new_items),
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Atom(name) => write!(f, "Atom({name:?})"),
            ExprKind::Str(name) => write!(f, "Str({name:?})"),
            ExprKind::Number(n) => write!(f, "{n}"),
            ExprKind::List(items) => f.debug_list().entries(items).finish(),
            ExprKind::Generic(handle) => write!(f, "{handle:?}"),
        }
    }
}

impl From<Number> for Expr {
    fn from(value: Number) -> Self {
        Expr::number(value)
    }
}

#[cfg(test)]
mod tests;
