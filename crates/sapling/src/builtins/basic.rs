//! Equality, type predicates, symbols and the evaluator hooks

use super::{expect_seq, expect_str};
use crate::error::{EvalError, Result};
use crate::evaluator::Interpreter;
use crate::value::{Arity, BuiltinFn, Value};

pub(super) fn builtins() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::pure("=", Arity::AtLeast(1), |args| {
            Ok(Value::Bool(args.windows(2).all(|pair| equal(&pair[0], &pair[1]))))
        }),
        predicate("nil?", |v| v.is_nil()),
        predicate("true?", |v| matches!(v, Value::Bool(true))),
        predicate("false?", |v| matches!(v, Value::Bool(false))),
        predicate("symbol?", |v| matches!(v, Value::Symbol(_))),
        predicate("keyword?", |v| matches!(v, Value::Keyword(_))),
        predicate("string?", |v| matches!(v, Value::String(_))),
        predicate("number?", Value::is_number),
        predicate("fn?", |v| v.is_callable() && !v.is_macro()),
        predicate("macro?", Value::is_macro),
        BuiltinFn::pure("symbol", Arity::Exact(1), |args| {
            Ok(Value::symbol(expect_str("symbol", &args[0])?))
        }),
        BuiltinFn::pure("keyword", Arity::Exact(1), |args| match &args[0] {
            Value::Keyword(_) => Ok(args[0].clone()),
            other => Ok(Value::keyword(expect_str("keyword", other)?)),
        }),
        BuiltinFn::pure("throw", Arity::Exact(1), |args| {
            Err(EvalError::UserException(args[0].clone()))
        }),
        BuiltinFn::new("eval", Arity::Exact(1), |interp, args| {
            let root = interp.root();
            interp.eval(args[0].clone(), root)
        }),
        BuiltinFn::new("apply", Arity::AtLeast(1), apply),
    ]
}

/// A one-argument builtin answering a yes/no question about its argument.
pub(super) fn predicate(name: &'static str, test: fn(&Value) -> bool) -> BuiltinFn {
    BuiltinFn::new(name, Arity::Exact(1), move |_, args| {
        Ok(Value::Bool(test(&args[0])))
    })
}

/// Structural equality where a list and a vector with equal elements match.
pub(crate) fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::List(_) | Value::Vector(_), Value::List(_) | Value::Vector(_)) => {
            let (xs, ys) = (a.as_seq().unwrap_or(&[]), b.as_seq().unwrap_or(&[]));
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| equal(x, y))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).map_or(false, |other| equal(v, other)))
        }
        _ => a == b,
    }
}

/// `(apply f a b [c d])` calls `(f a b c d)`.
fn apply(interp: &mut Interpreter, args: &[Value]) -> Result<Value> {
    let (func, rest) = (&args[0], &args[1..]);
    let mut call_args = Vec::new();
    if let Some((last, leading)) = rest.split_last() {
        call_args.extend_from_slice(leading);
        match last {
            Value::List(_) | Value::Vector(_) => {
                call_args.extend_from_slice(expect_seq("apply", last)?)
            }
            other => call_args.push(other.clone()),
        }
    }
    interp.apply(func, call_args)
}
