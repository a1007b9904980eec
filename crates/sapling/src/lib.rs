//! # Sapling
//!
//! A small Lisp interpreter: reader, trampolined evaluator, macros and a
//! builtin library.
//!
//! Source text is read into [`Value`]s, macro-expanded and evaluated against
//! lexical scopes held in an [`Environment`] arena, then printed back.
//! Function calls in tail position run in constant native stack.
//!
//! ## Architecture
//!
//! - **Reader**: tokenize and parse text into values ([`reader`])
//! - **Evaluator**: the [`Interpreter`] trampoline and its special forms ([`eval`])
//! - **Macro Expander**: macro calls and quasiquote rewriting ([`expansion`])
//! - **Environment**: generation-checked scope arena with reclamation ([`environment`])
//! - **Printer**: readable and display rendering ([`printer`])
//!
//! ## Example
//!
//! ```
//! use sapling::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! interp
//!     .eval_str("(defn! count-down (n) (if (= n 0) :done (count-down (- n 1))))")
//!     .unwrap();
//! assert_eq!(interp.rep("(count-down 100000)").unwrap(), ":done");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtins;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod expansion;
pub mod printer;
pub mod reader;
pub mod value;

// Re-export main types
pub use context::EvalContext;
pub use environment::{EnvId, Environment, Scope};
pub use error::{EvalError, Result};
pub use evaluator::Interpreter;
pub use value::{Arity, BuiltinFn, BuiltinFnPtr, Lambda, MapKey, Value, ValueMap};

/// Sapling version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
