//! Quoting forms and the expansion diagnostics

use super::Step;
use crate::environment::EnvId;
use crate::error::Result;
use crate::evaluator::Interpreter;
use crate::expansion::quasiquote;
use crate::value::Value;

impl Interpreter {
    /// `(quasiquote form)`: continue with the expansion of `form`.
    pub(super) fn eval_quasiquote(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        Ok(Step::tail(quasiquote(&args[0]), env))
    }

    /// `(quasiquoteexpand form)`: the expansion itself, unevaluated.
    pub(super) fn eval_quasiquote_expand(&mut self, args: &[Value]) -> Result<Step> {
        Ok(Step::Done(quasiquote(&args[0])))
    }

    /// `(macroexpand form)`: `form` with every outer macro call expanded.
    pub(super) fn eval_macroexpand(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        Ok(Step::Done(self.macroexpand(args[0].clone(), env)?))
    }
}
