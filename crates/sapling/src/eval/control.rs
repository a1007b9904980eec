//! Trampoline control for the evaluator loop

use crate::environment::EnvId;
use crate::value::Value;

/// Outcome of evaluating one list form.
///
/// A special form either produces its value or hands back the form it
/// reduces to, which the evaluator continues with in place of recursing.
#[derive(Debug, Clone)]
pub enum Step {
    /// Evaluation finished with a value
    Done(Value),

    /// Evaluation continues with a tail form
    Continue {
        /// Form to evaluate next
        ast: Value,
        /// Scope to evaluate it in
        env: EnvId,
    },
}

impl Step {
    /// Continue with `ast` in `env`.
    pub fn tail(ast: Value, env: EnvId) -> Self {
        Step::Continue { ast, env }
    }
}
