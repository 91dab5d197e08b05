//! Persistent variable environment and argument stack.
//!
//! Both are immutable values: extending one returns a new one that shares
//! structure with the one it extends, so a lambda body can never disturb the
//! bindings or pending arguments of its caller.

use crate::value::Value;
use icfp_types::ast::{Expr, VarId};

/// Variable bindings visible to an expression.
#[derive(Debug, Clone, Default)]
pub struct Environment<'ast> {
    bindings: im::HashMap<VarId, Value<'ast>>,
}

impl<'ast> Environment<'ast> {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this environment with `id` bound to `value`.
    ///
    /// An existing binding for `id` is shadowed in the copy only.
    pub fn bind(&self, id: VarId, value: Value<'ast>) -> Self {
        Self {
            bindings: self.bindings.update(id, value),
        }
    }

    pub fn get(&self, id: VarId) -> Option<&Value<'ast>> {
        self.bindings.get(&id)
    }

    pub fn contains(&self, id: VarId) -> bool {
        self.bindings.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Unevaluated argument expressions waiting for a lambda to consume them.
///
/// The top of the stack is the back of the vector.
#[derive(Debug, Clone, Default)]
pub struct ArgStack<'ast> {
    pending: im::Vector<&'ast Expr>,
}

impl<'ast> ArgStack<'ast> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this stack with `arg` on top.
    pub fn push(&self, arg: &'ast Expr) -> Self {
        let mut pending = self.pending.clone();
        pending.push_back(arg);
        Self { pending }
    }

    /// The top argument and the stack beneath it, or `None` when empty.
    pub fn pop(&self) -> Option<(&'ast Expr, Self)> {
        let mut pending = self.pending.clone();
        let top = pending.pop_back()?;
        Some((top, Self { pending }))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
