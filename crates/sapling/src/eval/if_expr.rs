//! Conditionals and sequencing: `if` and `do`

use super::Step;
use crate::environment::EnvId;
use crate::error::Result;
use crate::evaluator::Interpreter;
use crate::value::Value;

impl Interpreter {
    /// `(if cond then else?)`: only `nil` and `false` take the else branch.
    pub(super) fn eval_if(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        let cond = self.eval(args[0].clone(), env)?;
        let branch = if cond.is_truthy() {
            args.get(1)
        } else {
            args.get(2)
        };

        Ok(match branch {
            Some(form) => Step::tail(form.clone(), env),
            None => Step::Done(Value::Nil),
        })
    }

    /// `(do a b c)`: evaluate for effect, continue with the last form.
    pub(super) fn eval_do(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        let Some((last, leading)) = args.split_last() else {
            return Ok(Step::Done(Value::Nil));
        };
        for form in leading {
            self.eval(form.clone(), env)?;
        }
        Ok(Step::tail(last.clone(), env))
    }
}
