//! Call-frame construction for function application

use std::rc::Rc;

use super::{EnvId, Environment};
use crate::error::{EvalError, Result};
use crate::value::Value;

/// The reserved parameter that collects remaining arguments.
pub const VARIADIC_MARKER: &str = "&";

impl Environment {
    /// Create the scope for one call of a function.
    ///
    /// Parameters are bound to arguments positionally. A `&` parameter binds
    /// the parameter after it to a List of every remaining argument and
    /// ends binding.
    ///
    /// # Errors
    ///
    /// `TypeError` when there are fewer arguments than required parameters,
    /// or more arguments than parameters and no `&`.
    ///
    /// # Example
    ///
    /// ```
    /// use sapling::{Environment, Value};
    ///
    /// let mut env = Environment::new();
    /// let root = env.new_scope(None);
    /// let params: Vec<std::rc::Rc<str>> = vec!["a".into(), "&".into(), "rest".into()];
    /// let args = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
    ///
    /// let frame = env.bind_frame(root, &params, args).unwrap();
    /// assert_eq!(env.get(frame, "a").unwrap(), Value::Int(1));
    /// assert_eq!(
    ///     env.get(frame, "rest").unwrap(),
    ///     Value::list(vec![Value::Int(2), Value::Int(3)])
    /// );
    /// ```
    pub fn bind_frame(&mut self, outer: EnvId, params: &[Rc<str>], args: Vec<Value>) -> Result<EnvId> {
        let variadic = params.iter().position(|p| p.as_ref() == VARIADIC_MARKER);
        let required = variadic.unwrap_or(params.len());

        if args.len() < required || (variadic.is_none() && args.len() > required) {
            let expected = match variadic {
                Some(n) => format!("at least {}", n),
                None => required.to_string(),
            };
            return Err(EvalError::arity("function", &expected, args.len()));
        }

        let frame = self.new_scope(Some(outer));
        let mut args = args.into_iter();
        let mut params = params.iter();

        while let Some(param) = params.next() {
            if param.as_ref() == VARIADIC_MARKER {
                if let Some(rest) = params.next() {
                    self.define(frame, rest.as_ref(), Value::list(args.collect()))?;
                }
                break;
            }
            // Arity was checked above
            if let Some(arg) = args.next() {
                self.define(frame, param.as_ref(), arg)?;
            }
        }

        Ok(frame)
    }
}
