//! End-to-end tests for the special forms: definitions, scoping, tail calls,
//! quasiquote, macros and exception handling.

mod common;

use common::{eval_err, eval_ok, expect, new_env};

#[test]
fn arithmetic_evaluates() {
    let env = new_env();
    expect(&env, "(+ 1 2 3)", "6");
    expect(&env, "(+ 5 (* 2 3))", "11");
}

#[test]
fn def_binds_and_returns_the_value() {
    let env = new_env();
    expect(&env, "(def! x 10)", "10");
    expect(&env, "x", "10");
}

#[test]
fn let_binds_left_to_right_and_shadows() {
    let env = new_env();
    expect(&env, "(def! x 10)", "10");
    expect(&env, "(let* (x 20 y (+ x 1)) (+ x y))", "41");
    // The outer binding is untouched.
    expect(&env, "x", "10");
}

#[test]
fn def_inside_let_lands_at_top_level() {
    let env = new_env();
    expect(&env, "(let* (a 5) (def! from-let a))", "5");
    expect(&env, "from-let", "5");
}

#[test]
fn do_evaluates_in_order() {
    let env = new_env();
    expect(&env, "(def! a (atom 1))", "(atom 1)");
    expect(&env, "(do (reset! a 2) (reset! a 3) @a)", "3");
}

#[test]
fn if_considers_only_nil_and_false_falsy() {
    let env = new_env();
    expect(&env, "(if true 1 2)", "1");
    expect(&env, "(if false 1 2)", "2");
    expect(&env, "(if nil 1 2)", "2");
    expect(&env, "(if 0 1 2)", "1");
    expect(&env, "(if (list) 1 2)", "1");
    expect(&env, "(if false 1)", "nil");
}

#[test]
fn functions_apply_positionally() {
    let env = new_env();
    expect(&env, "((fn* (a b) (+ a b)) 2 3)", "5");
    expect(&env, "((fn* () 7))", "7");
}

#[test]
fn variadic_parameters_collect_the_tail() {
    let env = new_env();
    expect(&env, "((fn* (& xs) (count xs)) 1 2 3 4)", "4");
    expect(&env, "((fn* (a & xs) (list a xs)) 1 2 3)", "(1 (2 3))");
    expect(&env, "((fn* (a & xs) xs) 1)", "()");
}

#[test]
fn closures_capture_their_defining_scope() {
    let env = new_env();
    expect(&env, "(def! make-adder (fn* (n) (fn* (m) (+ n m))))", "#<function>");
    expect(&env, "((make-adder 7) 8)", "15");
    // The captured frame outlives the let* that made it.
    expect(&env, "((let* (a 1) (fn* () a)))", "1");
}

#[test]
fn tail_recursion_runs_in_constant_stack() {
    let env = new_env();
    eval_ok(
        &env,
        "(def! countdown (fn* (n acc) (if (= n 0) acc (countdown (- n 1) (+ acc 1)))))",
    );
    expect(&env, "(countdown 10000 0)", "10000");
}

#[test]
fn quote_suppresses_evaluation() {
    let env = new_env();
    expect(&env, "(quote (1 2 missing))", "(1 2 missing)");
    expect(&env, "'a", "a");
}

#[test]
fn quasiquote_laws() {
    let env = new_env();
    expect(&env, "`(1 ~(+ 1 1) 3)", "(1 2 3)");
    expect(&env, "`(1 ~@(list 2 3) 4)", "(1 2 3 4)");
    expect(&env, "`a", "a");
    expect(&env, "(quasiquoteexpand a)", "(quote a)");
    // Vectors pass through the rewrite untouched.
    expect(&env, "(quasiquoteexpand [a b])", "[a b]");
}

#[test]
fn macros_expand_before_evaluation() {
    let env = new_env();
    eval_ok(&env, "(defmacro! unless (fn* (p a b) `(if ~p ~b ~a)))");
    expect(&env, "(unless false 1 2)", "1");
    expect(&env, "(unless true 1 2)", "2");
    expect(&env, "(macroexpand (unless p a b))", "(if p b a)");
}

#[test]
fn macro_expansions_evaluate_in_the_caller_environment() {
    let env = new_env();
    eval_ok(&env, "(defmacro! twice (fn* (e) `(do ~e ~e)))");
    eval_ok(&env, "(def! hits (atom 0))");
    eval_ok(&env, "(twice (swap! hits (fn* (n) (+ n 1))))");
    expect(&env, "@hits", "2");
}

#[test]
fn defmacro_requires_a_function() {
    let env = new_env();
    let message = eval_err(&env, "(defmacro! nope 3)");
    assert!(message.contains("defmacro!"), "message was {:?}", message);
}

#[test]
fn prelude_definitions_are_available() {
    let env = new_env();
    expect(&env, "(not nil)", "true");
    expect(&env, "(not 1)", "false");
    expect(&env, "(cond false 1 true 2)", "2");
    expect(&env, "(cond)", "nil");
}

#[test]
fn thrown_values_reach_the_catch_handler_verbatim() {
    let env = new_env();
    expect(&env, "(try* (throw {:k 1}) (catch* e (get e :k)))", "1");
    expect(&env, r#"(try* (throw "boom") (catch* e e))"#, r#""boom""#);
    expect(&env, "(try* 7 (catch* e e))", "7");
}

#[test]
fn host_errors_reach_the_handler_as_strings() {
    let env = new_env();
    expect(&env, "(try* xyz (catch* e e))", r#""'xyz' not found""#);
    let printed = eval_ok(&env, "(try* (nth (list) 0) (catch* e e))");
    assert!(printed.contains("out of range"), "printed {:?}", printed);
}

#[test]
fn uncaught_errors_unwind_to_the_driver() {
    let env = new_env();
    let message = eval_err(&env, "(throw 1)");
    assert!(message.contains("Runtime error"), "message was {:?}", message);
    assert!(message.contains("uncaught"), "message was {:?}", message);
    let message = eval_err(&env, "missing-symbol");
    assert!(
        message.contains("'missing-symbol' not found"),
        "message was {:?}",
        message
    );
}

#[test]
fn try_reraises_without_a_catch_clause() {
    let env = new_env();
    let message = eval_err(&env, "(try* (throw 1))");
    assert!(message.contains("uncaught"), "message was {:?}", message);
}

#[test]
fn eval_runs_at_the_root_environment() {
    let env = new_env();
    expect(&env, r#"(eval (read-string "(+ 1 2)"))"#, "3");
    eval_ok(&env, r#"(let* (a 1) (eval (read-string "(def! from-eval 9)")))"#);
    expect(&env, "from-eval", "9");
}

#[test]
fn swap_applies_then_stores() {
    let env = new_env();
    expect(&env, "(def! a (atom 1))", "(atom 1)");
    expect(&env, "(swap! a + 2 3)", "6");
    expect(&env, "@a", "6");
    expect(&env, "(def! b (atom 0))", "(atom 0)");
    eval_ok(&env, "(swap! b (fn* (v) (+ v 1)))");
    eval_ok(&env, "(swap! b (fn* (v) (+ v 1)))");
    expect(&env, "@b", "2");
}

#[test]
fn vectors_and_maps_evaluate_their_elements() {
    let env = new_env();
    expect(&env, "[1 (+ 1 1) 3]", "[1 2 3]");
    expect(&env, "(get {:k (+ 2 2)} :k)", "4");
}

#[test]
fn the_host_identifies_itself() {
    let env = new_env();
    expect(&env, "*host-language*", r#""rust""#);
}
