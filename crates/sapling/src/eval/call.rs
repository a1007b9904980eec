//! Function application

use super::Step;
use crate::environment::EnvId;
use crate::error::{EvalError, Result};
use crate::evaluator::Interpreter;
use crate::value::Value;

impl Interpreter {
    /// Evaluate every element, then apply the head to the rest.
    ///
    /// A builtin runs to completion; a function continues with its body in
    /// a new call frame, which keeps calls in tail position flat.
    pub(super) fn eval_call(&mut self, items: &[Value], env: EnvId) -> Result<Step> {
        let mut evaluated = self.eval_each(items, env)?;
        let head = evaluated.remove(0);

        match head {
            Value::Builtin(builtin) => Ok(Step::Done(builtin.call(self, &evaluated)?)),
            Value::Function(lambda) => {
                let frame = self
                    .env_mut()
                    .bind_frame(lambda.env, &lambda.params, evaluated)?;
                Ok(Step::tail(lambda.body.clone(), frame))
            }
            other => Err(EvalError::not_callable(&other)),
        }
    }
}
