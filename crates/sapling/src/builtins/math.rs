//! Arithmetic and numeric comparison

use std::cmp::Ordering;

use super::expect_int;
use crate::error::{EvalError, Result};
use crate::value::{Arity, BuiltinFn, Value};

pub(super) fn builtins() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::pure("+", Arity::AtLeast(0), add),
        BuiltinFn::pure("-", Arity::AtLeast(1), sub),
        BuiltinFn::pure("*", Arity::AtLeast(0), mul),
        BuiltinFn::pure("/", Arity::AtLeast(1), div),
        BuiltinFn::pure("mod", Arity::Exact(2), modulo),
        BuiltinFn::pure("<", Arity::AtLeast(1), |args| {
            compare_chain("<", args, Ordering::is_lt)
        }),
        BuiltinFn::pure("<=", Arity::AtLeast(1), |args| {
            compare_chain("<=", args, Ordering::is_le)
        }),
        BuiltinFn::pure(">", Arity::AtLeast(1), |args| {
            compare_chain(">", args, Ordering::is_gt)
        }),
        BuiltinFn::pure(">=", Arity::AtLeast(1), |args| {
            compare_chain(">=", args, Ordering::is_ge)
        }),
        BuiltinFn::pure("even?", Arity::Exact(1), |args| {
            Ok(Value::Bool(expect_int("even?", &args[0])? % 2 == 0))
        }),
        BuiltinFn::pure("odd?", Arity::Exact(1), |args| {
            Ok(Value::Bool(expect_int("odd?", &args[0])? % 2 != 0))
        }),
    ]
}

/// A numeric argument.
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn from_value(name: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(n) => Ok(Num::Float(*n)),
            other => Err(EvalError::expected("numbers", name, other)),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Int(n),
            Num::Float(n) => Value::Float(n),
        }
    }
}

/// Combine two numbers: both Int uses `int_op`, otherwise `float_op`.
fn combine(
    name: &str,
    a: Num,
    b: Num,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Num> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => int_op(x, y)
            .map(Num::Int)
            .ok_or_else(|| EvalError::arithmetic(format!("integer overflow in '{}'", name))),
        (x, y) => Ok(Num::Float(float_op(x.to_f64(), y.to_f64()))),
    }
}

fn fold(
    name: &str,
    seed: Num,
    args: &[Value],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    let mut acc = seed;
    for arg in args {
        acc = combine(name, acc, Num::from_value(name, arg)?, int_op, float_op)?;
    }
    Ok(acc.into_value())
}

fn add(args: &[Value]) -> Result<Value> {
    fold("+", Num::Int(0), args, i64::checked_add, |a, b| a + b)
}

fn mul(args: &[Value]) -> Result<Value> {
    fold("*", Num::Int(1), args, i64::checked_mul, |a, b| a * b)
}

/// `(- x)` negates; otherwise subtract the rest from the first.
fn sub(args: &[Value]) -> Result<Value> {
    let first = Num::from_value("-", &args[0])?;
    if args.len() == 1 {
        return Ok(combine("-", Num::Int(0), first, i64::checked_sub, |a, b| a - b)?.into_value());
    }
    fold("-", first, &args[1..], i64::checked_sub, |a, b| a - b)
}

/// `(/ x)` is `(/ 1 x)`; integer division truncates toward zero.
fn div(args: &[Value]) -> Result<Value> {
    let (seed, rest) = if args.len() == 1 {
        (Num::Int(1), args)
    } else {
        (Num::from_value("/", &args[0])?, &args[1..])
    };

    let mut acc = seed;
    for arg in rest {
        let divisor = Num::from_value("/", arg)?;
        if matches!(divisor, Num::Int(0)) && matches!(acc, Num::Int(_)) {
            return Err(EvalError::arithmetic("division by zero"));
        }
        acc = combine("/", acc, divisor, i64::checked_div, |a, b| a / b)?;
    }
    Ok(acc.into_value())
}

fn modulo(args: &[Value]) -> Result<Value> {
    let a = Num::from_value("mod", &args[0])?;
    let b = Num::from_value("mod", &args[1])?;
    if matches!((a, b), (Num::Int(_), Num::Int(0))) {
        return Err(EvalError::arithmetic("division by zero"));
    }
    Ok(combine("mod", a, b, i64::checked_rem, |a, b| a % b)?.into_value())
}

fn compare(a: Num, b: Num) -> Option<Ordering> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Some(x.cmp(&y)),
        (x, y) => x.to_f64().partial_cmp(&y.to_f64()),
    }
}

/// True when every adjacent pair satisfies `test`.
fn compare_chain(name: &str, args: &[Value], test: fn(Ordering) -> bool) -> Result<Value> {
    let nums = args
        .iter()
        .map(|arg| Num::from_value(name, arg))
        .collect::<Result<Vec<_>>>()?;

    let holds = nums
        .windows(2)
        .all(|pair| compare(pair[0], pair[1]).map_or(false, test));
    Ok(Value::Bool(holds))
}
