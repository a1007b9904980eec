//! Macro expansion and quasiquote rewriting
//!
//! Expansion runs at the top of every evaluator step, before the form is
//! dispatched:
//!
//! ```text
//! Form → [macroexpand: repeat while the head names a macro] → Eval
//! ```
//!
//! A macro is an ordinary function flagged by `defmacro!`. Expanding a call
//! applies it to the call's unevaluated arguments and replaces the call
//! with the result.

use std::rc::Rc;

use crate::environment::EnvId;
use crate::error::{EvalError, Result};
use crate::evaluator::Interpreter;
use crate::value::{Lambda, Value};

impl Interpreter {
    /// Whether `ast` is a list whose head symbol is bound to a macro in `env`.
    pub fn is_macro_call(&self, ast: &Value, env: EnvId) -> bool {
        matches!(self.macro_for(ast, env), Ok(Some(_)))
    }

    /// The macro named by the head of `ast`. An unbound head is not a
    /// macro; any other lookup failure is an error.
    fn macro_for(&self, ast: &Value, env: EnvId) -> Result<Option<Rc<Lambda>>> {
        let name = match ast.as_list().and_then(|items| items.first()?.as_symbol()) {
            Some(name) => name,
            None => return Ok(None),
        };
        match self.env().get(env, name) {
            Ok(Value::Function(lambda)) if lambda.is_macro => Ok(Some(lambda)),
            Ok(_) | Err(EvalError::Reference { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Expand `ast` until it is no longer a macro call.
    ///
    /// ```
    /// use sapling::Interpreter;
    ///
    /// let mut interp = Interpreter::new();
    /// let form = sapling::reader::read("(cond false 1 :else 2)").unwrap();
    /// let expanded = interp.macroexpand(form, interp.root()).unwrap();
    /// assert_eq!(format!("{:?}", expanded), "(if false 1 (cond :else 2))");
    /// ```
    pub fn macroexpand(&mut self, mut ast: Value, env: EnvId) -> Result<Value> {
        while let Some(lambda) = self.macro_for(&ast, env)? {
            let args = ast.as_list().map(|items| items[1..].to_vec()).unwrap_or_default();
            tracing::debug!(form = ?ast, "expanding macro");
            ast = self.apply(&Value::Function(lambda), args)?;
        }
        Ok(ast)
    }
}

/// Rewrite a quasiquoted form into code that builds it.
///
/// `(unquote x)` becomes `x`; each `(splice-unquote xs)` element becomes a
/// `concat` of `xs`; every other list element is `cons`ed on after being
/// quasiquoted itself. Symbols and maps are quoted whole, vectors are
/// rebuilt with `vec`.
///
/// ```
/// use sapling::{expansion::quasiquote, reader};
///
/// let form = reader::read("(a ~b ~@c)").unwrap();
/// assert_eq!(
///     format!("{:?}", quasiquote(&form)),
///     "(cons (quote a) (cons b (concat c ())))"
/// );
/// ```
pub fn quasiquote(ast: &Value) -> Value {
    match ast {
        Value::List(items) => match unquoted(items, "unquote") {
            Some(form) => form.clone(),
            None => build_list(items),
        },
        Value::Vector(items) => call("vec", quasiquote(&Value::list(items.to_vec()))),
        Value::Symbol(_) | Value::Map(_) => call("quote", ast.clone()),
        other => other.clone(),
    }
}

/// Fold the elements right to left into nested `cons`/`concat` calls.
fn build_list(items: &[Value]) -> Value {
    items.iter().rev().fold(Value::empty_list(), |acc, item| {
        let spliced = match item {
            Value::List(inner) => unquoted(inner, "splice-unquote"),
            _ => None,
        };
        match spliced {
            Some(form) => Value::list(vec![Value::symbol("concat"), form.clone(), acc]),
            None => Value::list(vec![Value::symbol("cons"), quasiquote(item), acc]),
        }
    })
}

/// The argument of `(marker x ...)`, if `items` starts that way.
fn unquoted<'a>(items: &'a [Value], marker: &str) -> Option<&'a Value> {
    match items {
        [head, form, ..] if head.is_symbol_named(marker) => Some(form),
        _ => None,
    }
}

fn call(name: &str, arg: Value) -> Value {
    Value::list(vec![Value::symbol(name), arg])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;
    use pretty_assertions::assert_eq;

    fn expand(source: &str) -> String {
        format!("{:?}", quasiquote(&read(source).unwrap()))
    }

    #[test]
    fn test_self_evaluating_forms_pass_through() {
        assert_eq!(expand("1"), "1");
        assert_eq!(expand("\"s\""), "\"s\"");
        assert_eq!(expand(":k"), ":k");
        assert_eq!(expand("nil"), "nil");
    }

    #[test]
    fn test_symbols_and_maps_are_quoted() {
        assert_eq!(expand("a"), "(quote a)");
        assert_eq!(expand("{:a b}"), "(quote {:a b})");
    }

    #[test]
    fn test_unquote_stops_quoting() {
        assert_eq!(expand("(unquote x)"), "x");
        assert_eq!(expand("()"), "()");
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(
            expand("(a (b ~c))"),
            "(cons (quote a) (cons (cons (quote b) (cons c ())) ()))"
        );
    }

    #[test]
    fn test_vector_is_rebuilt_with_vec() {
        assert_eq!(expand("[~a b]"), "(vec (cons a (cons (quote b) ())))");
    }

    #[test]
    fn test_vector_quasiquotes_as_list() {
        assert_eq!(expand("[unquote x]"), "(vec x)");
        assert_eq!(expand("[~@xs]"), "(vec (concat xs ()))");
    }

    #[test]
    fn test_splice_in_middle() {
        assert_eq!(
            expand("(1 ~@xs 2)"),
            "(cons 1 (concat xs (cons 2 ())))"
        );
    }

    #[test]
    fn test_is_macro_call() {
        let mut interp = Interpreter::new();
        let root = interp.root();
        interp.eval_str("(defmacro! m (fn* () 1)) (def! f (fn* () 1))").unwrap();
        assert!(interp.is_macro_call(&read("(m)").unwrap(), root));
        assert!(!interp.is_macro_call(&read("(f)").unwrap(), root));
        assert!(!interp.is_macro_call(&read("(unbound)").unwrap(), root));
        assert!(!interp.is_macro_call(&read("m").unwrap(), root));
        assert!(!interp.is_macro_call(&read("[m]").unwrap(), root));
    }

    #[test]
    fn test_macroexpand_repeats_until_fixed_point() {
        let mut interp = Interpreter::new();
        interp
            .eval_str("(defmacro! twice (fn* (x) `(once ~x))) (defmacro! once (fn* (x) x))")
            .unwrap();
        let root = interp.root();
        let expanded = interp.macroexpand(read("(twice 5)").unwrap(), root).unwrap();
        assert_eq!(expanded, Value::Int(5));
    }

    #[test]
    fn test_macroexpand_in_reclaimed_scope() {
        let mut interp = Interpreter::new();
        let root = interp.root();
        let scope = interp.env_mut().new_scope(Some(root));
        interp.collect_garbage();

        assert!(!interp.is_macro_call(&read("(cond)").unwrap(), scope));
        assert!(matches!(
            interp.macroexpand(read("(cond)").unwrap(), scope),
            Err(EvalError::StaleScope)
        ));
        assert_eq!(
            interp.macroexpand(read("(not-bound 1)").unwrap(), root).unwrap(),
            read("(not-bound 1)").unwrap()
        );
    }
}
