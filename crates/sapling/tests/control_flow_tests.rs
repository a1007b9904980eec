//! Tests for conditionals, sequencing and the prelude control macros

use sapling::*;

fn rep(src: &str) -> String {
    let mut interp = Interpreter::new();
    match interp.rep(src) {
        Ok(output) => output,
        Err(err) => panic!("{} failed: {}", src, err),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// If Expression Tests
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_if_true_branch() {
    assert_eq!(rep("(if true 42 0)"), "42");
}

#[test]
fn test_if_false_branch() {
    assert_eq!(rep("(if false 42 0)"), "0");
}

#[test]
fn test_if_without_else() {
    assert_eq!(rep("(if false 42)"), "nil");
    assert_eq!(rep("(if nil 42)"), "nil");
}

#[test]
fn test_if_zero_and_empty_are_truthy() {
    assert_eq!(rep("(if 0 :yes :no)"), ":yes");
    assert_eq!(rep("(if [] :yes :no)"), ":yes");
    assert_eq!(rep("(if \"\" :yes :no)"), ":yes");
}

#[test]
fn test_nested_if() {
    assert_eq!(rep("(if (> 3 2) (if (< 3 2) :a :b) :c)"), ":b");
}

#[test]
fn test_if_too_many_arguments() {
    let mut interp = Interpreter::new();
    assert!(matches!(
        interp.eval_str("(if true 1 2 3)"),
        Err(EvalError::Type { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Do and Let
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_do_returns_last() {
    assert_eq!(rep("(do 1 2 3)"), "3");
    assert_eq!(rep("(do)"), "nil");
}

#[test]
fn test_do_evaluates_for_effect() {
    assert_eq!(rep("(do (def! a (atom 0)) (swap! a + 5) (swap! a + 1) @a)"), "6");
}

#[test]
fn test_let_shadowing() {
    assert_eq!(rep("(let* (x 1) (let* (x 2) x))"), "2");
    assert_eq!(rep("(let* (x 1) (do (let* (x 2) x) x))"), "1");
}

#[test]
fn test_let_vector_bindings() {
    assert_eq!(rep("(let* [p 2 q (* p p)] [p q])"), "[2 4]");
}

// ═══════════════════════════════════════════════════════════════════════
// Prelude Macros
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_cond_picks_first_truthy() {
    assert_eq!(rep("(cond false 1 nil 2 :else 3)"), "3");
    assert_eq!(rep("(cond (= 1 1) :one :else :other)"), ":one");
    assert_eq!(rep("(cond)"), "nil");
    assert_eq!(rep("(cond false 1)"), "nil");
}

#[test]
fn test_cond_odd_forms_throws() {
    let mut interp = Interpreter::new();
    let err = interp.eval_str("(cond false 1 true)").unwrap_err();
    assert_eq!(err.thrown(), Some(&Value::string("odd number of forms to cond")));
}

#[test]
fn test_cond_only_evaluates_chosen_branch() {
    assert_eq!(
        rep("(do (def! hits (atom 0)) (cond true :a :else (swap! hits + 1)) @hits)"),
        "0"
    );
}

#[test]
fn test_defn_defines_function() {
    let mut interp = Interpreter::new();
    interp.eval_str("(defn! square [x] (* x x))").unwrap();
    assert_eq!(interp.rep("(square 9)").unwrap(), "81");
}

#[test]
fn test_not() {
    assert_eq!(rep("(not nil)"), "true");
    assert_eq!(rep("(not false)"), "true");
    assert_eq!(rep("(not 0)"), "false");
}
