//! Standard prelude with built-in functions

use super::{EnvId, Environment};
use crate::builtins;
use crate::error::Result;
use crate::value::{BuiltinFn, Value};

/// Definitions written in the language itself, evaluated after the
/// builtins are bound.
pub(crate) const PRELUDE: &str = r#"
(def! not (fn* (a) (if a false true)))

(def! load-file
  (fn* (f) (eval (read-string (str "(do " (slurp f) "\nnil)")))))

(def! map
  (fn* [f xs] (reduce (fn* [acc x] (concat acc (list (f x)))) '() xs)))

(def! filter
  (fn* [pred xs] (reduce (fn* [acc x] (if (pred x) (concat acc (list x)) acc)) '() xs)))

(def! some? (fn* [pred xs] (if (> (count (filter pred xs)) 0) true nil)))

(def! every? (fn* [pred xs] (= (count xs) (count (filter pred xs)))))

(defmacro! cond
  (fn* (& xs)
    (if (> (count xs) 0)
      (list 'if (first xs)
            (if (> (count xs) 1) (nth xs 1) (throw "odd number of forms to cond"))
            (cons 'cond (rest (rest xs)))))))

(defmacro! defn! (fn* [name args body] `(def! ~name (fn* ~args ~body))))
"#;

impl Environment {
    /// Register a built-in function in `scope`.
    pub fn define_builtin(&mut self, scope: EnvId, builtin: BuiltinFn) -> Result<()> {
        let name = builtin.name.clone();
        self.define(scope, name, Value::Builtin(builtin))
    }

    /// Load every native builtin into `scope`.
    pub fn load_builtins(&mut self, scope: EnvId) -> Result<()> {
        for builtin in builtins::all() {
            self.define_builtin(scope, builtin)?;
        }
        Ok(())
    }
}
