//! Printing, reading and file input

use super::expect_str;
use crate::error::EvalError;
use crate::printer::{print_joined, print_str};
use crate::reader;
use crate::value::{Arity, BuiltinFn, Value};

pub(super) fn builtins() -> Vec<BuiltinFn> {
    vec![
        BuiltinFn::pure("pr-str", Arity::AtLeast(0), |args| {
            Ok(Value::string(print_joined(args, true, " ")))
        }),
        BuiltinFn::pure("str", Arity::AtLeast(0), |args| {
            Ok(Value::string(print_str(args, "")))
        }),
        BuiltinFn::pure("prn", Arity::AtLeast(0), |args| {
            println!("{}", print_joined(args, true, " "));
            Ok(Value::Nil)
        }),
        BuiltinFn::pure("println", Arity::AtLeast(0), |args| {
            println!("{}", print_str(args, " "));
            Ok(Value::Nil)
        }),
        BuiltinFn::pure("read-string", Arity::Exact(1), |args| {
            reader::read(expect_str("read-string", &args[0])?)
        }),
        BuiltinFn::pure("slurp", Arity::Exact(1), |args| {
            let path = expect_str("slurp", &args[0])?;
            std::fs::read_to_string(path)
                .map(Value::string)
                .map_err(|source| EvalError::Io {
                    path: path.into(),
                    source,
                })
        }),
    ]
}
