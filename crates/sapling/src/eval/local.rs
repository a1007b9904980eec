//! Binding forms: `def!` and `let*`

use super::{expect_symbol, SpecialForm, Step};
use crate::environment::EnvId;
use crate::error::{type_name, EvalError, Result};
use crate::evaluator::Interpreter;
use crate::value::Value;

impl Interpreter {
    /// `(def! name expr)`: bind in the current scope and return the value.
    pub(super) fn eval_def(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        let name = expect_symbol(SpecialForm::Def, &args[0])?;
        let value = self.eval(args[1].clone(), env)?;
        self.env_mut().define(env, name, value.clone())?;
        tracing::debug!(name, kind = type_name(&value), "def!");
        Ok(Step::Done(value))
    }

    /// `(let* (a 1 b (+ a 1)) body)`: bind pairs in a child scope, each
    /// initializer seeing the bindings before it, then continue with body.
    pub(super) fn eval_let(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        let bindings = args[0].as_seq().ok_or_else(|| {
            EvalError::type_error(format!(
                "'let*' expects a list or vector of bindings, got {}",
                type_name(&args[0])
            ))
        })?;
        if bindings.len() % 2 != 0 {
            return Err(EvalError::type_error(
                "'let*' bindings need an even number of forms",
            ));
        }

        let scope = self.env_mut().new_scope(Some(env));
        for pair in bindings.chunks(2) {
            let name = expect_symbol(SpecialForm::Let, &pair[0])?;
            let value = self.eval(pair[1].clone(), scope)?;
            self.env_mut().define(scope, name, value)?;
        }

        Ok(Step::tail(args[1].clone(), scope))
    }
}
