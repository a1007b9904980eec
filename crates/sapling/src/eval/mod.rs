//! Special forms and function application
//!
//! Each special form lives in its own file as an `Interpreter` method that
//! returns a [`Step`]: the finished value, or the tail form to continue with.

pub mod control;

mod call;
mod function;
mod if_expr;
mod local;
mod quote;

pub use control::Step;
pub use function::parse_params;

use std::fmt;

use crate::environment::EnvId;
use crate::error::{EvalError, Result};
use crate::evaluator::Interpreter;
use crate::value::{Arity, Value};

/// The forms the evaluator handles itself instead of applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    /// `(def! name value)`
    Def,
    /// `(let* (name value ...) body)`
    Let,
    /// `(do form ...)`
    Do,
    /// `(if cond then else?)`
    If,
    /// `(fn* (params) body)`
    Fn,
    /// `(quote form)`
    Quote,
    /// `(quasiquote form)`
    Quasiquote,
    /// `(quasiquoteexpand form)`
    QuasiquoteExpand,
    /// `(defmacro! name fn)`
    DefMacro,
    /// `(macroexpand form)`
    MacroExpand,
}

impl SpecialForm {
    /// Recognise a special form by its head symbol.
    pub fn from_symbol(name: &str) -> Option<Self> {
        Some(match name {
            "def!" => SpecialForm::Def,
            "let*" => SpecialForm::Let,
            "do" => SpecialForm::Do,
            "if" => SpecialForm::If,
            "fn*" => SpecialForm::Fn,
            "quote" => SpecialForm::Quote,
            "quasiquote" => SpecialForm::Quasiquote,
            "quasiquoteexpand" => SpecialForm::QuasiquoteExpand,
            "defmacro!" => SpecialForm::DefMacro,
            "macroexpand" => SpecialForm::MacroExpand,
            _ => return None,
        })
    }

    /// The head symbol of this form.
    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Def => "def!",
            SpecialForm::Let => "let*",
            SpecialForm::Do => "do",
            SpecialForm::If => "if",
            SpecialForm::Fn => "fn*",
            SpecialForm::Quote => "quote",
            SpecialForm::Quasiquote => "quasiquote",
            SpecialForm::QuasiquoteExpand => "quasiquoteexpand",
            SpecialForm::DefMacro => "defmacro!",
            SpecialForm::MacroExpand => "macroexpand",
        }
    }

    /// Arguments the form takes after its head.
    pub fn arity(self) -> Arity {
        match self {
            SpecialForm::Def | SpecialForm::Let | SpecialForm::Fn | SpecialForm::DefMacro => {
                Arity::Exact(2)
            }
            SpecialForm::Do => Arity::AtLeast(0),
            SpecialForm::If => Arity::Range(2, 3),
            SpecialForm::Quote
            | SpecialForm::Quasiquote
            | SpecialForm::QuasiquoteExpand
            | SpecialForm::MacroExpand => Arity::Exact(1),
        }
    }
}

impl fmt::Display for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Main List Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Interpreter {
    /// Evaluate one non-empty, already macro-expanded list form.
    pub(crate) fn eval_list(&mut self, items: &[Value], env: EnvId) -> Result<Step> {
        let Some(form) = items
            .first()
            .and_then(Value::as_symbol)
            .and_then(SpecialForm::from_symbol)
        else {
            return self.eval_call(items, env);
        };

        let args = &items[1..];
        form.arity().check(form.name(), args.len())?;

        match form {
            SpecialForm::Def => self.eval_def(args, env),
            SpecialForm::Let => self.eval_let(args, env),
            SpecialForm::Do => self.eval_do(args, env),
            SpecialForm::If => self.eval_if(args, env),
            SpecialForm::Fn => self.eval_fn(args, env),
            SpecialForm::Quote => Ok(Step::Done(args[0].clone())),
            SpecialForm::Quasiquote => self.eval_quasiquote(args, env),
            SpecialForm::QuasiquoteExpand => self.eval_quasiquote_expand(args),
            SpecialForm::DefMacro => self.eval_defmacro(args, env),
            SpecialForm::MacroExpand => self.eval_macroexpand(args, env),
        }
    }
}

/// The symbol a binding form names, or a `TypeError` naming the form.
fn expect_symbol<'a>(form: SpecialForm, value: &'a Value) -> Result<&'a str> {
    value.as_symbol().ok_or_else(|| {
        EvalError::type_error(format!(
            "'{}' expects a symbol to bind, got {}",
            form,
            crate::error::type_name(value)
        ))
    })
}
