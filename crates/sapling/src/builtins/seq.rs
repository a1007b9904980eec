//! Lists, vectors and the sequence operations shared by both

use super::basic::predicate;
use super::{expect_int, expect_seq};
use crate::error::{EvalError, Result};
use crate::evaluator::Interpreter;
use crate::value::{Arity, BuiltinFn, Value};

pub(super) fn builtins() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::pure("list", Arity::AtLeast(0), |args| Ok(Value::list(args.to_vec()))),
        BuiltinFn::pure("vector", Arity::AtLeast(0), |args| {
            Ok(Value::vector(args.to_vec()))
        }),
        predicate("list?", |v| matches!(v, Value::List(_))),
        predicate("vector?", |v| matches!(v, Value::Vector(_))),
        predicate("sequential?", Value::is_sequential),
        BuiltinFn::pure("vec", Arity::Exact(1), |args| {
            Ok(Value::vector(expect_seq("vec", &args[0])?.to_vec()))
        }),
        BuiltinFn::pure("count", Arity::Exact(1), |args| {
            Ok(Value::Int(count("count", &args[0])? as i64))
        }),
        BuiltinFn::pure("empty?", Arity::Exact(1), |args| {
            Ok(Value::Bool(count("empty?", &args[0])? == 0))
        }),
        BuiltinFn::pure("cons", Arity::Exact(2), cons),
        BuiltinFn::pure("concat", Arity::AtLeast(0), concat),
        BuiltinFn::pure("nth", Arity::Exact(2), nth),
        BuiltinFn::pure("first", Arity::Exact(1), |args| {
            Ok(expect_seq("first", &args[0])?
                .first()
                .cloned()
                .unwrap_or(Value::Nil))
        }),
        BuiltinFn::pure("rest", Arity::Exact(1), |args| {
            let items = expect_seq("rest", &args[0])?;
            Ok(Value::list(items.iter().skip(1).cloned().collect()))
        }),
        BuiltinFn::new("reduce", Arity::Range(2, 3), reduce),
    ]
}

/// Element count of a collection or string; `nil` has none.
fn count(name: &str, value: &Value) -> Result<usize> {
    match value {
        Value::Nil => Ok(0),
        Value::List(items) | Value::Vector(items) => Ok(items.len()),
        Value::Map(map) => Ok(map.len()),
        Value::String(s) => Ok(s.chars().count()),
        other => Err(EvalError::expected("a collection", name, other)),
    }
}

fn cons(args: &[Value]) -> Result<Value> {
    let tail = expect_seq("cons", &args[1])?;
    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(args[0].clone());
    items.extend_from_slice(tail);
    Ok(Value::list(items))
}

fn concat(args: &[Value]) -> Result<Value> {
    let mut items = Vec::new();
    for arg in args {
        items.extend_from_slice(expect_seq("concat", arg)?);
    }
    Ok(Value::list(items))
}

/// The element at an index, whatever it is; a missing index is an error.
fn nth(args: &[Value]) -> Result<Value> {
    let items = expect_seq("nth", &args[0])?;
    let index = expect_int("nth", &args[1])?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| {
            EvalError::type_error(format!(
                "'nth' index {} out of range for {} elements",
                index,
                items.len()
            ))
        })
}

/// `(reduce f init coll)` or `(reduce f coll)`.
fn reduce(interp: &mut Interpreter, args: &[Value]) -> Result<Value> {
    let func = &args[0];
    let (mut acc, items) = match args {
        [_, init, coll] => (init.clone(), expect_seq("reduce", coll)?),
        [_, coll] => match expect_seq("reduce", coll)?.split_first() {
            Some((first, rest)) => (first.clone(), rest),
            None => return interp.apply(func, Vec::new()),
        },
        _ => return Err(EvalError::arity("reduce", "2 to 3", args.len())),
    };

    for item in items {
        acc = interp.apply(func, vec![acc, item.clone()])?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<Value> {
        ns.iter().map(|n| Value::Int(*n)).collect()
    }

    #[test]
    fn test_cons_onto_vector_gives_list() {
        let result = cons(&[Value::Int(0), Value::vector(ints(&[1, 2]))]).unwrap();
        assert_eq!(result, Value::list(ints(&[0, 1, 2])));
        assert_eq!(cons(&[Value::Int(0), Value::Nil]).unwrap(), Value::list(ints(&[0])));
    }

    #[test]
    fn test_concat_mixes_kinds() {
        let result = concat(&[
            Value::list(ints(&[1])),
            Value::vector(ints(&[2, 3])),
            Value::Nil,
            Value::empty_list(),
        ])
        .unwrap();
        assert_eq!(result, Value::list(ints(&[1, 2, 3])));
        assert_eq!(concat(&[]).unwrap(), Value::empty_list());
    }

    #[test]
    fn test_nth_returns_falsy_elements() {
        let items = Value::list(vec![Value::Bool(false), Value::Nil, Value::Int(0)]);
        assert_eq!(nth(&[items.clone(), Value::Int(0)]).unwrap(), Value::Bool(false));
        assert_eq!(nth(&[items.clone(), Value::Int(1)]).unwrap(), Value::Nil);
        assert_eq!(nth(&[items.clone(), Value::Int(2)]).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_nth_out_of_range() {
        let items = Value::vector(ints(&[1]));
        assert!(matches!(
            nth(&[items.clone(), Value::Int(1)]),
            Err(EvalError::Type { .. })
        ));
        assert!(matches!(nth(&[items, Value::Int(-1)]), Err(EvalError::Type { .. })));
    }

    #[test]
    fn test_count_kinds() {
        assert_eq!(count("count", &Value::Nil).unwrap(), 0);
        assert_eq!(count("count", &Value::string("héllo")).unwrap(), 5);
        assert!(count("count", &Value::Int(3)).is_err());
    }
}
