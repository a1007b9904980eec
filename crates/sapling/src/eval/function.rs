//! Function and macro definition: `fn*` and `defmacro!`

use std::rc::Rc;

use super::{expect_symbol, SpecialForm, Step};
use crate::environment::{EnvId, VARIADIC_MARKER};
use crate::error::{type_name, EvalError, Result};
use crate::evaluator::Interpreter;
use crate::value::{Lambda, Value};

/// Validate a parameter list: a list or vector of symbols in which `&`,
/// if present, is followed by exactly one symbol.
///
/// ```
/// use sapling::{eval::parse_params, reader};
///
/// let params = parse_params(&reader::read("[a & more]").unwrap()).unwrap();
/// assert_eq!(params.len(), 3);
/// assert!(parse_params(&reader::read("(a &)").unwrap()).is_err());
/// ```
pub fn parse_params(value: &Value) -> Result<Vec<Rc<str>>> {
    let items = value.as_seq().ok_or_else(|| {
        EvalError::type_error(format!(
            "'fn*' expects a list or vector of parameters, got {}",
            type_name(value)
        ))
    })?;

    let params = items
        .iter()
        .map(|item| match item {
            Value::Symbol(name) => Ok(name.clone()),
            other => Err(EvalError::type_error(format!(
                "'fn*' parameters must be symbols, got {}",
                type_name(other)
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(position) = params.iter().position(|p| p.as_ref() == VARIADIC_MARKER) {
        if position + 2 != params.len() || params[position + 1].as_ref() == VARIADIC_MARKER {
            return Err(EvalError::type_error(
                "'fn*' expects exactly one parameter after '&'",
            ));
        }
    }

    Ok(params)
}

impl Interpreter {
    /// `(fn* (params) body)`: a closure over the current scope.
    pub(super) fn eval_fn(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        let params = parse_params(&args[0])?;
        let lambda = Lambda::new(params, args[1].clone(), env);
        Ok(Step::Done(Value::Function(Rc::new(lambda))))
    }

    /// `(defmacro! name fn)`: bind a macro copy of the evaluated function.
    ///
    /// The original function value is left unchanged.
    pub(super) fn eval_defmacro(&mut self, args: &[Value], env: EnvId) -> Result<Step> {
        let name = expect_symbol(SpecialForm::DefMacro, &args[0])?;
        let macro_fn = match self.eval(args[1].clone(), env)? {
            Value::Function(lambda) => Value::Function(Rc::new(lambda.to_macro())),
            other => {
                return Err(EvalError::type_error(format!(
                    "'defmacro!' expects a function, got {}",
                    type_name(&other)
                )))
            }
        };

        self.env_mut().define(env, name, macro_fn.clone())?;
        tracing::debug!(name, "defmacro!");
        Ok(Step::Done(macro_fn))
    }
}
