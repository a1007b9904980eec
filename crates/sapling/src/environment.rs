//! Runtime environment managing lexical scopes
//!
//! Scopes live in an arena and refer to their parent by handle, so closures
//! that capture the scope they are later bound into do not form ownership
//! cycles. Unreachable scopes are reclaimed by [`Environment::collect`].

mod frame;
mod gc;
mod prelude;

pub use frame::VARIADIC_MARKER;
pub(crate) use prelude::PRELUDE;

use indexmap::IndexMap;

use crate::error::{type_name, EvalError, Result};
use crate::value::Value;

/// Handle to a scope in an [`Environment`].
///
/// Handles are cheap to copy. A handle whose scope has been reclaimed is
/// detected by its generation and reported as [`EvalError::StaleScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId {
    index: u32,
    generation: u32,
}

impl EnvId {
    /// Position of the scope in the arena (for debugging)
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// A single lexical scope: its bindings and the scope it is nested in.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Enclosing scope, `None` for a root
    pub outer: Option<EnvId>,

    /// Bindings in definition order
    pub bindings: IndexMap<String, Value>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    scope: Option<Scope>,
}

/// The arena of every scope created by an interpreter.
///
/// # Example
///
/// ```
/// use sapling::{Environment, Value};
///
/// let mut env = Environment::new();
/// let global = env.new_scope(None);
/// env.define(global, "x", Value::Int(1)).unwrap();
///
/// // Enter a nested scope
/// let local = env.new_scope(Some(global));
/// env.define(local, "x", Value::Int(10)).unwrap(); // Shadows outer x
///
/// assert_eq!(env.get(local, "x").unwrap(), Value::Int(10));
/// assert_eq!(env.get(global, "x").unwrap(), Value::Int(1));
/// assert_eq!(env.find(local, "x"), Some(local));
/// assert!(env.get(global, "y").is_err());
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Environment {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scope Management
    // ═══════════════════════════════════════════════════════════════════

    /// Create a scope nested in `outer` (or a root scope for `None`).
    pub fn new_scope(&mut self, outer: Option<EnvId>) -> EnvId {
        let scope = Scope {
            outer,
            bindings: IndexMap::new(),
        };
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.scope = Some(scope);
            return EnvId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            scope: Some(scope),
        });
        EnvId {
            index,
            generation: 0,
        }
    }

    /// Borrow a scope.
    pub fn scope(&self, id: EnvId) -> Result<&Scope> {
        match self.slots.get(id.index as usize) {
            Some(Slot {
                generation,
                scope: Some(scope),
            }) if *generation == id.generation => Ok(scope),
            _ => Err(EvalError::StaleScope),
        }
    }

    fn scope_mut(&mut self, id: EnvId) -> Result<&mut Scope> {
        match self.slots.get_mut(id.index as usize) {
            Some(Slot {
                generation,
                scope: Some(scope),
            }) if *generation == id.generation => Ok(scope),
            _ => Err(EvalError::StaleScope),
        }
    }

    /// Number of live scopes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if no scope is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `key` in `scope` only and return the bound value.
    ///
    /// # Errors
    ///
    /// `TypeError` if `key` is not a Symbol.
    pub fn set(&mut self, scope: EnvId, key: &Value, value: Value) -> Result<Value> {
        let name = key.as_symbol().ok_or_else(|| {
            EvalError::type_error(format!(
                "cannot bind {} {}, expected a symbol",
                type_name(key),
                key
            ))
        })?;
        self.define(scope, name, value.clone())?;
        Ok(value)
    }

    /// Bind `name` in `scope` only, replacing any previous binding there.
    pub fn define(&mut self, scope: EnvId, name: impl Into<String>, value: Value) -> Result<()> {
        self.scope_mut(scope)?.bindings.insert(name.into(), value);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up `name` starting at `scope` and walking outwards.
    ///
    /// # Errors
    ///
    /// `ReferenceError` if no scope in the chain binds `name`.
    pub fn get(&self, scope: EnvId, name: &str) -> Result<Value> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(value) = scope.bindings.get(name) {
                return Ok(value.clone());
            }
            current = scope.outer;
        }
        Err(EvalError::reference(name))
    }

    /// The innermost scope in the chain that binds `name`.
    pub fn find(&self, scope: EnvId, name: &str) -> Option<EnvId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id).ok()?;
            if scope.bindings.contains_key(name) {
                return Some(id);
            }
            current = scope.outer;
        }
        None
    }

    /// Names bound directly in `scope`, in definition order.
    pub fn names(&self, scope: EnvId) -> Result<Vec<&str>> {
        Ok(self
            .scope(scope)?
            .bindings
            .keys()
            .map(String::as_str)
            .collect())
    }
}
