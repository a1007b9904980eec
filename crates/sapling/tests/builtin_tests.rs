//! Builtin library tests, driven through the evaluator

use sapling::*;

fn rep(src: &str) -> String {
    let mut interp = Interpreter::new();
    match interp.rep(src) {
        Ok(output) => output,
        Err(err) => panic!("{} failed: {}", src, err),
    }
}

fn fails(src: &str) -> EvalError {
    match Interpreter::new().eval_str(src) {
        Ok(value) => panic!("{} should fail, got {:?}", src, value),
        Err(err) => err,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic and Comparison
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_arithmetic() {
    assert_eq!(rep("(+ 1 2 3)"), "6");
    assert_eq!(rep("(- 10 4 3)"), "3");
    assert_eq!(rep("(* 2 3.5)"), "7.0");
    assert_eq!(rep("(/ 10 4)"), "2");
    assert_eq!(rep("(/ 10.0 4)"), "2.5");
    assert_eq!(rep("(mod 10 3)"), "1");
    assert_eq!(rep("(+)"), "0");
}

#[test]
fn test_arithmetic_errors() {
    assert!(matches!(fails("(/ 1 0)"), EvalError::Arithmetic { .. }));
    assert!(matches!(
        fails("(* 9223372036854775807 2)"),
        EvalError::Arithmetic { .. }
    ));
    assert!(matches!(fails("(+ 1 :a)"), EvalError::Type { .. }));
    assert!(matches!(fails("(-)"), EvalError::Type { .. }));
}

#[test]
fn test_comparisons() {
    assert_eq!(rep("(< 1 2 3)"), "true");
    assert_eq!(rep("(<= 1 1 2)"), "true");
    assert_eq!(rep("(> 3 3)"), "false");
    assert_eq!(rep("(>= 3 3 1)"), "true");
    assert_eq!(rep("(< 1 1.5)"), "true");
}

#[test]
fn test_equality() {
    assert_eq!(rep("(= [1 2 (3)] '(1 2 [3]))"), "true");
    assert_eq!(rep("(= {:a [1]} {:a '(1)})"), "true");
    assert_eq!(rep("(= \"a\" :a)"), "false");
    assert_eq!(rep("(= nil false)"), "false");
    assert_eq!(rep("(= 1 1 1)"), "true");
    assert_eq!(rep("(= (atom 1) (atom 1))"), "false");
}

// ═══════════════════════════════════════════════════════════════════════
// Predicates
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_type_predicates() {
    assert_eq!(rep("(nil? nil)"), "true");
    assert_eq!(rep("(true? true)"), "true");
    assert_eq!(rep("(false? nil)"), "false");
    assert_eq!(rep("(symbol? 'a)"), "true");
    assert_eq!(rep("(keyword? :a)"), "true");
    assert_eq!(rep("(string? \"a\")"), "true");
    assert_eq!(rep("(number? 1.5)"), "true");
    assert_eq!(rep("(fn? +)"), "true");
    assert_eq!(rep("(fn? cond)"), "false");
    assert_eq!(rep("(macro? cond)"), "true");
    assert_eq!(rep("(list? [])"), "false");
    assert_eq!(rep("(vector? [])"), "true");
    assert_eq!(rep("(sequential? '())"), "true");
    assert_eq!(rep("(map? {})"), "true");
    assert_eq!(rep("(atom? (atom nil))"), "true");
    assert_eq!(rep("(even? 4)"), "true");
    assert_eq!(rep("(odd? 4)"), "false");
}

#[test]
fn test_empty() {
    assert_eq!(rep("(empty? [])"), "true");
    assert_eq!(rep("(empty? '(1))"), "false");
    assert_eq!(rep("(empty? nil)"), "true");
    assert_eq!(rep("(empty? {})"), "true");
}

// ═══════════════════════════════════════════════════════════════════════
// Sequences
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_constructors() {
    assert_eq!(rep("(list 1 2)"), "(1 2)");
    assert_eq!(rep("(vector 1 2)"), "[1 2]");
    assert_eq!(rep("(vec '(1 2))"), "[1 2]");
    assert_eq!(rep("(symbol \"abc\")"), "abc");
    assert_eq!(rep("(keyword \"abc\")"), ":abc");
    assert_eq!(rep("(keyword :abc)"), ":abc");
}

#[test]
fn test_sequence_operations() {
    assert_eq!(rep("(count [1 2 3])"), "3");
    assert_eq!(rep("(count nil)"), "0");
    assert_eq!(rep("(cons 0 [1 2])"), "(0 1 2)");
    assert_eq!(rep("(concat [1] '(2) [] nil)"), "(1 2)");
    assert_eq!(rep("(first [7 8])"), "7");
    assert_eq!(rep("(first [])"), "nil");
    assert_eq!(rep("(first nil)"), "nil");
    assert_eq!(rep("(rest [7 8])"), "(8)");
    assert_eq!(rep("(rest [])"), "()");
    assert_eq!(rep("(rest nil)"), "()");
}

#[test]
fn test_nth_distinguishes_absence_from_falsy() {
    assert_eq!(rep("(nth [false nil 0] 0)"), "false");
    assert_eq!(rep("(nth [false nil 0] 1)"), "nil");
    assert_eq!(rep("(first [false 1])"), "false");
    assert!(matches!(fails("(nth [1 2] 2)"), EvalError::Type { .. }));
}

#[test]
fn test_reduce() {
    assert_eq!(rep("(reduce + 0 [1 2 3])"), "6");
    assert_eq!(rep("(reduce + [1 2 3])"), "6");
    assert_eq!(rep("(reduce + [])"), "0");
    assert_eq!(rep("(reduce + 10 [])"), "10");
    assert_eq!(rep("(reduce (fn* (acc x) (cons x acc)) () [1 2 3])"), "(3 2 1)");
}

#[test]
fn test_prelude_sequence_functions() {
    assert_eq!(rep("(map (fn* (x) (* x x)) [1 2 3])"), "(1 4 9)");
    assert_eq!(rep("(filter even? '(1 2 3 4))"), "(2 4)");
    assert_eq!(rep("(some? even? [1 3 4])"), "true");
    assert_eq!(rep("(some? even? [1 3])"), "nil");
    assert_eq!(rep("(every? odd? [1 3])"), "true");
    assert_eq!(rep("(every? odd? [1 2])"), "false");
}

#[test]
fn test_apply_spreads_last_argument() {
    assert_eq!(rep("(apply + [1 2 3])"), "6");
    assert_eq!(rep("(apply + 1 2 '(3 4))"), "10");
    assert_eq!(rep("(apply list 1 2)"), "(1 2)");
    assert_eq!(rep("(apply (fn* (& xs) xs) [])"), "()");
}

// ═══════════════════════════════════════════════════════════════════════
// Maps
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_map_operations() {
    assert_eq!(rep("(hash-map :a 1 \"b\" 2)"), "{:a 1, \"b\" 2}");
    assert_eq!(rep("(get {:a 1} :a)"), "1");
    assert_eq!(rep("(get {:a 1} :b)"), "nil");
    assert_eq!(rep("(get nil :a)"), "nil");
    assert_eq!(rep("(contains? {:a nil} :a)"), "true");
    assert_eq!(rep("(assoc {:a 1} :b 2 :a 3)"), "{:a 3, :b 2}");
    assert_eq!(rep("(dissoc {:a 1 :b 2 :c 3} :a :c)"), "{:b 2}");
    assert_eq!(rep("(keys {:a 1 :b 2})"), "(:a :b)");
    assert_eq!(rep("(vals {:a 1 :b 2})"), "(1 2)");
}

#[test]
fn test_assoc_does_not_mutate() {
    assert_eq!(rep("(let* (m {:a 1} n (assoc m :b 2)) [m n])"), "[{:a 1} {:a 1, :b 2}]");
}

#[test]
fn test_map_key_errors() {
    assert!(matches!(fails("(hash-map 1 2)"), EvalError::Type { .. }));
    assert!(matches!(fails("(assoc {} :a)"), EvalError::Type { .. }));
}

// ═══════════════════════════════════════════════════════════════════════
// Atoms
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_atom_operations() {
    assert_eq!(rep("(do (def! a (atom 1)) (reset! a 5))"), "5");
    assert_eq!(rep("(do (def! a (atom 1)) (swap! a + 2 3) @a)"), "6");
    assert_eq!(rep("(do (def! a (atom 1)) (deref a))"), "1");
    assert_eq!(rep("(atom [1])"), "(atom [1])");
}

#[test]
fn test_atom_is_shared_by_closures() {
    let mut interp = Interpreter::new();
    interp
        .eval_str(
            "(def! counter (atom 0))
             (def! inc! (fn* () (swap! counter (fn* (n) (+ n 1)))))
             (def! read (fn* () @counter))",
        )
        .unwrap();
    interp.eval_str("(inc!) (inc!) (inc!)").unwrap();
    assert_eq!(interp.rep("(read)").unwrap(), "3");
}

#[test]
fn test_swap_with_non_function() {
    assert!(matches!(
        fails("(swap! (atom 1) 2)"),
        EvalError::Type { .. }
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Strings and Reading
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_string_functions() {
    assert_eq!(rep("(pr-str \"a\" 1 :k)"), r#""\"a\" 1 :k""#);
    assert_eq!(rep("(str \"a\" 1 :k)"), r#""a1:k""#);
    assert_eq!(rep("(str [\"x\"])"), r#""[\"x\"]""#);
    assert_eq!(rep("(read-string \"(1 [2])\")"), "(1 [2])");
    assert_eq!(rep("(eval (read-string \"(+ 1 2)\"))"), "3");
}

#[test]
fn test_throw_carries_any_value() {
    let err = fails("(throw {:code 42})");
    assert_eq!(err.to_string(), "{:code 42}");
    assert!(matches!(err, EvalError::UserException(Value::Map(_))));
}

#[test]
fn test_load_file_and_slurp() {
    let path = std::env::temp_dir().join(format!("sapling-load-{}.lisp", std::process::id()));
    std::fs::write(&path, "(def! loaded-value 41)\n(def! bumped (+ loaded-value 1))").unwrap();

    let mut interp = Interpreter::new();
    let src = format!("(load-file {:?})", path.display().to_string());
    assert_eq!(interp.rep(&src).unwrap(), "nil");
    assert_eq!(interp.rep("bumped").unwrap(), "42");

    let slurp = format!("(count (slurp {:?}))", path.display().to_string());
    assert!(interp.eval_str(&slurp).is_ok());

    std::fs::remove_file(&path).unwrap();
}
