//! Error types for Sapling evaluation

use std::path::PathBuf;

use thiserror::Error;

use crate::printer;
use crate::value::Value;

/// Main error type for reading and evaluating.
///
/// Every error aborts the evaluation in progress; nothing in the core
/// recovers locally.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Malformed or unbalanced source text (reader only)
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Lookup of an unbound symbol
    #[error("'{name}' not found")]
    Reference {
        /// The unbound symbol
        name: String,
    },

    /// Wrong arity, wrong argument kind, non-callable head or malformed form
    #[error("type error: {message}")]
    Type {
        /// What went wrong
        message: String,
    },

    /// A value raised by `throw`
    #[error("{}", printer::print(.0, true))]
    UserException(Value),

    /// Integer overflow or integer division by zero
    #[error("arithmetic error: {message}")]
    Arithmetic {
        /// What went wrong
        message: String,
    },

    /// Non-tail evaluation nested deeper than the configured limit
    #[error("stack overflow: evaluation depth {depth} exceeds maximum {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// A scope handle outlived its scope
    #[error("scope has been reclaimed")]
    StaleScope,

    /// `slurp` could not read a file
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl EvalError {
    /// Create a `TypeError` with a message.
    pub fn type_error(message: impl Into<String>) -> Self {
        EvalError::Type {
            message: message.into(),
        }
    }

    /// Create a `ReferenceError` for `name`.
    pub fn reference(name: impl Into<String>) -> Self {
        EvalError::Reference { name: name.into() }
    }

    /// Create an arity `TypeError`.
    pub fn arity(name: &str, expected: &str, got: usize) -> Self {
        Self::type_error(format!(
            "'{}' expects {} argument{}, got {}",
            name,
            expected,
            if expected == "1" { "" } else { "s" },
            got
        ))
    }

    /// Create a `TypeError` for applying something that is not a function.
    pub fn not_callable(value: &Value) -> Self {
        Self::type_error(format!(
            "{} is not callable: {}",
            type_name(value),
            printer::print(value, true)
        ))
    }

    /// Create a `TypeError` for an argument of the wrong kind.
    pub fn expected(what: &str, name: &str, got: &Value) -> Self {
        Self::type_error(format!(
            "'{}' expects {}, got {}",
            name,
            what,
            type_name(got)
        ))
    }

    /// Create an `ArithmeticError`.
    pub fn arithmetic(message: impl Into<String>) -> Self {
        EvalError::Arithmetic {
            message: message.into(),
        }
    }

    /// The thrown value, if this error came from `throw`.
    pub fn thrown(&self) -> Option<&Value> {
        match self {
            EvalError::UserException(value) => Some(value),
            _ => None,
        }
    }
}

/// Result type alias for Sapling operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Human-readable name of a value's kind, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Bool(_) => "boolean",
        Value::Int(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Keyword(_) => "keyword",
        Value::Symbol(_) => "symbol",
        Value::List(_) => "list",
        Value::Vector(_) => "vector",
        Value::Map(_) => "map",
        Value::Function(f) if f.is_macro => "macro",
        Value::Function(_) => "function",
        Value::Builtin(_) => "builtin",
        Value::Atom(_) => "atom",
    }
}
