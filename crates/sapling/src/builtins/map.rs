//! Hash maps keyed by strings and keywords

use super::basic::predicate;
use super::expect_map;
use crate::error::{EvalError, Result};
use crate::value::{Arity, BuiltinFn, MapKey, Value, ValueMap};

pub(super) fn builtins() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::pure("hash-map", Arity::AtLeast(0), |args| {
            let mut map = ValueMap::with_capacity(args.len() / 2);
            insert_pairs("hash-map", &mut map, args)?;
            Ok(Value::map(map))
        }),
        predicate("map?", |v| matches!(v, Value::Map(_))),
        BuiltinFn::pure("get", Arity::Exact(2), get),
        BuiltinFn::pure("contains?", Arity::Exact(2), |args| {
            let map = expect_map("contains?", &args[0])?;
            Ok(Value::Bool(map.contains_key(&MapKey::try_from(&args[1])?)))
        }),
        BuiltinFn::pure("assoc", Arity::AtLeast(1), |args| {
            let mut map = expect_map("assoc", &args[0])?.clone();
            insert_pairs("assoc", &mut map, &args[1..])?;
            Ok(Value::map(map))
        }),
        BuiltinFn::pure("dissoc", Arity::AtLeast(1), |args| {
            let mut map = expect_map("dissoc", &args[0])?.clone();
            for key in &args[1..] {
                map.shift_remove(&MapKey::try_from(key)?);
            }
            Ok(Value::map(map))
        }),
        BuiltinFn::pure("keys", Arity::Exact(1), |args| {
            let map = expect_map("keys", &args[0])?;
            Ok(Value::list(map.keys().map(MapKey::to_value).collect()))
        }),
        BuiltinFn::pure("vals", Arity::Exact(1), |args| {
            let map = expect_map("vals", &args[0])?;
            Ok(Value::list(map.values().cloned().collect()))
        }),
    ]
}

/// Insert alternating keys and values; a later key replaces an earlier one.
fn insert_pairs(name: &str, map: &mut ValueMap, args: &[Value]) -> Result<()> {
    if args.len() % 2 != 0 {
        return Err(EvalError::type_error(format!(
            "'{}' expects key/value pairs, got {} arguments",
            name,
            args.len()
        )));
    }
    for pair in args.chunks(2) {
        map.insert(MapKey::try_from(&pair[0])?, pair[1].clone());
    }
    Ok(())
}

/// `(get m k)`; a missing key or a `nil` map gives `nil`.
fn get(args: &[Value]) -> Result<Value> {
    if args[0].is_nil() {
        return Ok(Value::Nil);
    }
    let map = expect_map("get", &args[0])?;
    let key = MapKey::try_from(&args[1])?;
    Ok(map.get(&key).cloned().unwrap_or(Value::Nil))
}
