//! The interpreter: trampolined evaluation over an environment arena
//!
//! [`Interpreter::eval`] runs a loop over `(ast, env)`. Forms in tail
//! position (`let*` and `fn*` bodies, the last form of `do`, the branches
//! of `if`, quasiquote expansions) replace the loop state instead of
//! recursing, so tail recursion runs in constant native stack. Every
//! other nested evaluation goes back through [`Interpreter::eval`] and is
//! counted against [`EvalContext::max_call_depth`].

use crate::context::EvalContext;
use crate::environment::{EnvId, Environment, PRELUDE};
use crate::error::{EvalError, Result};
use crate::eval::Step;
use crate::printer;
use crate::reader;
use crate::value::{BuiltinFn, Value, ValueMap};

/// Remaining native stack below which a nested evaluation grows the stack.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const STACK_GROW_SIZE: usize = 2 * 1024 * 1024;

/// A complete interpreter: the scope arena, its root scope and settings.
///
/// # Example
///
/// ```
/// use sapling::{Interpreter, Value};
///
/// let mut interp = Interpreter::new();
/// interp.eval_str("(def! sq (fn* (x) (* x x)))").unwrap();
/// assert_eq!(interp.eval_str("(sq 7)").unwrap(), Value::Int(49));
/// assert_eq!(interp.rep("(map sq [1 2 3])").unwrap(), "(1 4 9)");
/// ```
#[derive(Debug)]
pub struct Interpreter {
    env: Environment,
    root: EnvId,
    ctx: EvalContext,
    depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter with every builtin and the prelude loaded.
    pub fn new() -> Self {
        Self::with_context(EvalContext::default())
    }

    /// Like [`Interpreter::new`] with custom settings.
    ///
    /// # Panics
    ///
    /// Only if the built-in prelude fails to evaluate, which the test
    /// suite rules out.
    pub fn with_context(ctx: EvalContext) -> Self {
        let mut interp = Self::bare_with_context(ctx);
        let root = interp.root;
        interp
            .env
            .load_builtins(root)
            .and_then(|()| interp.eval_str(PRELUDE))
            .expect("prelude evaluates");
        interp
    }

    /// An interpreter whose root scope is empty.
    pub fn bare() -> Self {
        Self::bare_with_context(EvalContext::default())
    }

    fn bare_with_context(ctx: EvalContext) -> Self {
        let mut env = Environment::new();
        let root = env.new_scope(None);
        Self {
            env,
            root,
            ctx,
            depth: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    /// The root scope, where builtins and top-level definitions live.
    pub fn root(&self) -> EnvId {
        self.root
    }

    /// The scope arena.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The scope arena, mutably.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The settings this interpreter was built with.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// Bind `name` in the root scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) -> Result<()> {
        self.env.define(self.root, name, value)
    }

    /// Bind a native function in the root scope.
    pub fn define_builtin(&mut self, builtin: BuiltinFn) -> Result<()> {
        self.env.define_builtin(self.root, builtin)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Evaluation
    // ═══════════════════════════════════════════════════════════════════

    /// Evaluate `ast` in scope `env`.
    ///
    /// # Errors
    ///
    /// Any [`EvalError`]; `StackOverflow` once non-tail evaluations nest
    /// deeper than the configured maximum. The native stack is extended on
    /// demand, so the limit holds whatever stack the caller's thread has.
    pub fn eval(&mut self, ast: Value, env: EnvId) -> Result<Value> {
        if self.depth >= self.ctx.max_call_depth {
            return Err(EvalError::StackOverflow {
                depth: self.depth + 1,
                max: self.ctx.max_call_depth,
            });
        }

        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.eval_loop(ast, env)
        });
        self.depth -= 1;
        result
    }

    fn eval_loop(&mut self, mut ast: Value, mut env: EnvId) -> Result<Value> {
        loop {
            if self.ctx.trace {
                tracing::trace!(depth = self.depth, scope = env.index(), form = ?ast, "eval");
            }

            ast = self.macroexpand(ast, env)?;
            let items = match &ast {
                Value::List(items) => items.clone(),
                _ => return self.eval_ast(&ast, env),
            };
            if items.is_empty() {
                return Ok(ast);
            }

            match self.eval_list(&items, env)? {
                Step::Done(value) => return Ok(value),
                Step::Continue { ast: next, env: next_env } => {
                    ast = next;
                    env = next_env;
                }
            }
        }
    }

    /// Evaluate the sub-forms of a non-call form: look up symbols, evaluate
    /// collection elements (map values only), return anything else as is.
    pub fn eval_ast(&mut self, ast: &Value, env: EnvId) -> Result<Value> {
        match ast {
            Value::Symbol(name) => self.env.get(env, name),
            Value::List(items) => Ok(Value::list(self.eval_each(items, env)?)),
            Value::Vector(items) => Ok(Value::vector(self.eval_each(items, env)?)),
            Value::Map(map) => {
                let mut evaluated = ValueMap::with_capacity(map.len());
                for (key, value) in map.iter() {
                    evaluated.insert(key.clone(), self.eval(value.clone(), env)?);
                }
                Ok(Value::map(evaluated))
            }
            other => Ok(other.clone()),
        }
    }

    /// Evaluate each form left to right.
    pub(crate) fn eval_each(&mut self, forms: &[Value], env: EnvId) -> Result<Vec<Value>> {
        forms
            .iter()
            .map(|form| self.eval(form.clone(), env))
            .collect()
    }

    /// Call a function or builtin with already-evaluated arguments.
    ///
    /// A function body runs as a nested evaluation in a fresh call frame.
    pub fn apply(&mut self, func: &Value, args: Vec<Value>) -> Result<Value> {
        match func {
            Value::Builtin(builtin) => builtin.call(self, &args),
            Value::Function(lambda) => {
                let frame = self.env.bind_frame(lambda.env, &lambda.params, args)?;
                self.eval(lambda.body.clone(), frame)
            }
            other => Err(EvalError::not_callable(other)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Source Text
    // ═══════════════════════════════════════════════════════════════════

    /// Read every form in `text` and evaluate them in the root scope;
    /// returns the last value, or `nil` for empty input.
    pub fn eval_str(&mut self, text: &str) -> Result<Value> {
        let mut last = Value::Nil;
        for form in reader::read_all(text)? {
            last = self.eval(form, self.root)?;
        }
        Ok(last)
    }

    /// Read, evaluate and print: the readable form of the last value.
    ///
    /// Reclaims unreachable scopes afterwards once the arena holds more
    /// than [`EvalContext::gc_threshold`] of them.
    pub fn rep(&mut self, text: &str) -> Result<String> {
        let result = self.eval_str(text);
        if self.env.len() > self.ctx.gc_threshold {
            self.collect_garbage();
        }
        result.map(|value| printer::print(&value, true))
    }

    /// Free every scope not reachable from the root scope.
    ///
    /// Handles held outside the interpreter (including the captured scope
    /// of a function value that is not bound anywhere) become stale.
    pub fn collect_garbage(&mut self) -> usize {
        self.env.collect([self.root])
    }
}
