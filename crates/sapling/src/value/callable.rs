//! Callable value types: interpreted functions and builtins

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::environment::EnvId;
use crate::error::{EvalError, Result};
use crate::evaluator::Interpreter;

/// Type alias for builtin function pointers to reduce complexity
pub type BuiltinFnPtr = Rc<dyn Fn(&mut Interpreter, &[Value]) -> Result<Value>>;

/// A function created by `fn*`.
///
/// The body is kept as data and re-entered by the evaluator's trampoline;
/// the defining scope is captured by handle, not copied.
#[derive(Debug, Clone)]
pub struct Lambda {
    /// Parameter names in order, possibly containing `&`
    pub params: Vec<Rc<str>>,

    /// The function body
    pub body: Value,

    /// Scope the function was created in
    pub env: EnvId,

    /// Set by `defmacro!`
    pub is_macro: bool,
}

impl Lambda {
    /// Create a new (non-macro) function value
    pub fn new(params: Vec<Rc<str>>, body: Value, env: EnvId) -> Self {
        Self {
            params,
            body,
            env,
            is_macro: false,
        }
    }

    /// Copy of this function flagged as a macro
    pub fn to_macro(&self) -> Self {
        Self {
            is_macro: true,
            ..self.clone()
        }
    }
}

/// Number of arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments
    Exact(usize),

    /// `n` or more arguments
    AtLeast(usize),

    /// Between `min` and `max` arguments inclusive
    Range(usize, usize),
}

impl Arity {
    /// Whether `got` arguments satisfy this arity
    pub fn accepts(&self, got: usize) -> bool {
        match *self {
            Arity::Exact(n) => got == n,
            Arity::AtLeast(n) => got >= n,
            Arity::Range(min, max) => (min..=max).contains(&got),
        }
    }

    /// Fail with an arity `TypeError` unless `got` is accepted
    pub fn check(&self, name: &str, got: usize) -> Result<()> {
        if self.accepts(got) {
            Ok(())
        } else {
            Err(EvalError::arity(name, &self.to_string(), got))
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

/// A built-in native function.
///
/// These are Rust functions exposed to the interpreter.
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Accepted argument counts
    pub arity: Arity,

    /// The actual function pointer
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Wrap a native function that needs the interpreter (to evaluate or apply).
    pub fn new(
        name: impl Into<String>,
        arity: Arity,
        func: impl Fn(&mut Interpreter, &[Value]) -> Result<Value> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }

    /// Wrap a native function that only looks at its arguments.
    pub fn pure(name: impl Into<String>, arity: Arity, func: fn(&[Value]) -> Result<Value>) -> Self {
        Self::new(name, arity, move |_, args| func(args))
    }

    /// Check arity and call the native function.
    pub fn call(&self, interp: &mut Interpreter, args: &[Value]) -> Result<Value> {
        self.arity.check(&self.name, args.len())?;
        (self.func)(interp, args)
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}
