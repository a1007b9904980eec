//! The native builtin library bound into the root scope
//!
//! Each submodule contributes a list of [`BuiltinFn`]s; [`all`] gathers them
//! for [`Environment::load_builtins`](crate::Environment::load_builtins).

mod atom;
mod basic;
mod map;
mod math;
mod seq;
mod string;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{EvalError, Result};
use crate::value::{BuiltinFn, Value, ValueMap};

/// Every native builtin.
pub fn all() -> Vec<BuiltinFn> {
    let mut builtins = Vec::new();
    builtins.extend(math::builtins());
    builtins.extend(basic::builtins());
    builtins.extend(seq::builtins());
    builtins.extend(map::builtins());
    builtins.extend(atom::builtins());
    builtins.extend(string::builtins());
    builtins
}

// ═══════════════════════════════════════════════════════════════════════
// Argument Helpers
// ═══════════════════════════════════════════════════════════════════════

/// Elements of a list or vector; `nil` counts as empty.
fn expect_seq<'a>(name: &str, value: &'a Value) -> Result<&'a [Value]> {
    match value {
        Value::Nil => Ok(&[]),
        other => other
            .as_seq()
            .ok_or_else(|| EvalError::expected("a list or vector", name, other)),
    }
}

fn expect_map<'a>(name: &str, value: &'a Value) -> Result<&'a ValueMap> {
    value
        .as_map()
        .ok_or_else(|| EvalError::expected("a map", name, value))
}

fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| EvalError::expected("a string", name, value))
}

fn expect_int(name: &str, value: &Value) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| EvalError::expected("an integer", name, value))
}

fn expect_atom<'a>(name: &str, value: &'a Value) -> Result<&'a Rc<RefCell<Value>>> {
    match value {
        Value::Atom(cell) => Ok(cell),
        other => Err(EvalError::expected("an atom", name, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_names_are_unique() {
        let builtins = all();
        let names: HashSet<_> = builtins.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names.len(), builtins.len());
    }

    #[test]
    fn test_expect_seq_accepts_nil() {
        assert!(expect_seq("first", &Value::Nil).unwrap().is_empty());
        assert!(expect_seq("first", &Value::Int(1)).is_err());
    }
}
