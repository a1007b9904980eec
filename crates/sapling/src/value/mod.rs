//! Value representation for runtime values

mod callable;
mod display;
mod impls;
mod key;

pub use callable::{Arity, BuiltinFn, BuiltinFnPtr, Lambda};
pub use key::MapKey;

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

/// The map payload shared by `Value::Map`.
pub type ValueMap = IndexMap<MapKey, Value>;

/// Runtime value representation for the Sapling interpreter.
///
/// Every component (reader, evaluator, printer, builtins) matches on this
/// closed set of variants. Containers are reference-counted and never
/// mutated in place; the only mutable cell is [`Value::Atom`].
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Scalars
    // ═══════════════════════════════════════════════════════════════════
    /// The `nil` value, distinct from `false`
    Nil,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// Immutable string, escapes already resolved
    String(Rc<str>),

    /// Keyword, stored without its leading `:`
    Keyword(Rc<str>),

    /// Symbol, resolved through the environment when evaluated
    Symbol(Rc<str>),

    // ═══════════════════════════════════════════════════════════════════
    // Persistent Collections
    // ═══════════════════════════════════════════════════════════════════
    /// List: `(a b c)`
    List(Rc<Vec<Value>>),

    /// Vector: `[a b c]`
    Vector(Rc<Vec<Value>>),

    /// Map with string or keyword keys: `{:a 1 "b" 2}`
    Map(Rc<ValueMap>),

    // ═══════════════════════════════════════════════════════════════════
    // Callables
    // ═══════════════════════════════════════════════════════════════════
    /// Interpreted function (or macro) created by `fn*`
    Function(Rc<Lambda>),

    /// Native function supplied by the host
    Builtin(BuiltinFn),

    // ═══════════════════════════════════════════════════════════════════
    // Mutable Reference
    // ═══════════════════════════════════════════════════════════════════
    /// Single mutable slot shared by every holder
    Atom(Rc<RefCell<Value>>),
}
