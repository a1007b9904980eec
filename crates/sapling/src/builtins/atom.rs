//! Atoms: the one mutable cell

use super::basic::predicate;
use super::expect_atom;
use crate::error::Result;
use crate::evaluator::Interpreter;
use crate::value::{Arity, BuiltinFn, Value};

pub(super) fn builtins() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::pure("atom", Arity::Exact(1), |args| Ok(Value::atom(args[0].clone()))),
        predicate("atom?", |v| matches!(v, Value::Atom(_))),
        BuiltinFn::pure("deref", Arity::Exact(1), |args| {
            Ok(expect_atom("deref", &args[0])?.borrow().clone())
        }),
        BuiltinFn::pure("reset!", Arity::Exact(2), |args| {
            let cell = expect_atom("reset!", &args[0])?;
            *cell.borrow_mut() = args[1].clone();
            Ok(args[1].clone())
        }),
        BuiltinFn::new("swap!", Arity::AtLeast(2), swap),
    ]
}

/// `(swap! a f x y)` stores `(f @a x y)` and returns it.
///
/// The slot is read before `f` runs and written after, so `f` may itself
/// read the atom.
fn swap(interp: &mut Interpreter, args: &[Value]) -> Result<Value> {
    let cell = expect_atom("swap!", &args[0])?;
    let current = cell.borrow().clone();

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(current);
    call_args.extend_from_slice(&args[2..]);

    let updated = interp.apply(&args[1], call_args)?;
    *cell.borrow_mut() = updated.clone();
    Ok(updated)
}
