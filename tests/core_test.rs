//! End-to-end coverage of the builtin table: arithmetic, printing helpers,
//! sequences, maps, atoms, predicates and metadata.

mod common;

use common::{eval_err, eval_ok, expect, new_env};

#[test]
fn arithmetic_folds_left() {
    let env = new_env();
    expect(&env, "(+)", "0");
    expect(&env, "(*)", "1");
    expect(&env, "(- 10 1 2)", "7");
    expect(&env, "(- 5)", "5");
    expect(&env, "(* 2 3 4)", "24");
}

#[test]
fn division_truncates_toward_zero() {
    let env = new_env();
    expect(&env, "(/ 7 2)", "3");
    expect(&env, "(/ -7 2)", "-3");
    expect(&env, "(/ 100 5 2)", "10");
    let message = eval_err(&env, "(/ 1 0)");
    assert!(message.contains("divide"), "message was {:?}", message);
}

#[test]
fn comparisons_chain_pairwise() {
    let env = new_env();
    expect(&env, "(< 1 2 3)", "true");
    expect(&env, "(< 1 3 2)", "false");
    expect(&env, "(<= 1 1 2)", "true");
    expect(&env, "(> 3 2 1)", "true");
    expect(&env, "(>= 3 3 1)", "true");
    expect(&env, "(= 1 1 1)", "true");
    expect(&env, "(= 1 2)", "false");
}

#[test]
fn equality_is_structural_and_crosses_sequence_variants() {
    let env = new_env();
    expect(&env, "(= (list 1 2 3) [1 2 3])", "true");
    expect(&env, "(= {:a (list 1 2)} {:a [1 2]})", "true");
    expect(&env, "(= {:a 1} {:a 2})", "false");
    expect(&env, r#"(= "a" :a)"#, "false");
    expect(&env, "(= 'a 'a)", "true");
}

#[test]
fn string_builders_respect_readability() {
    let env = new_env();
    expect(&env, r#"(str "a" 1 :k)"#, r#""a1:k""#);
    expect(&env, "(str)", r#""""#);
    expect(&env, r#"(pr-str "a")"#, r#""\"a\"""#);
    expect(&env, r#"(str "line" "\n")"#, "\"line\\n\"");
}

#[test]
fn list_and_vector_constructors() {
    let env = new_env();
    expect(&env, "(list 1 2)", "(1 2)");
    expect(&env, "(list)", "()");
    expect(&env, "(vector 1 2)", "[1 2]");
    expect(&env, "(vec (list 1 2))", "[1 2]");
    expect(&env, "(list? (list))", "true");
    expect(&env, "(list? [1])", "false");
    expect(&env, "(vector? [1])", "true");
    expect(&env, "(vector? (list))", "false");
    expect(&env, "(sequential? [1])", "true");
    expect(&env, "(sequential? (list))", "true");
    expect(&env, r#"(sequential? "a")"#, "false");
}

#[test]
fn count_and_empty_treat_nil_as_the_empty_sequence() {
    let env = new_env();
    expect(&env, "(count (list 1 2 3))", "3");
    expect(&env, "(count nil)", "0");
    expect(&env, "(empty? (list))", "true");
    expect(&env, "(empty? [1])", "false");
    expect(&env, "(empty? nil)", "true");
}

#[test]
fn element_access() {
    let env = new_env();
    expect(&env, "(nth (list 1 2) 1)", "2");
    expect(&env, "(nth [4 5 6] 0)", "4");
    let message = eval_err(&env, "(nth (list 1) 5)");
    assert!(message.contains("out of range"), "message was {:?}", message);
    expect(&env, "(first (list 7 8))", "7");
    expect(&env, "(first (list))", "nil");
    expect(&env, "(first nil)", "nil");
    expect(&env, "(rest (list 1 2 3))", "(2 3)");
    expect(&env, "(rest (list))", "()");
    expect(&env, "(rest nil)", "()");
}

#[test]
fn cons_and_concat_build_lists() {
    let env = new_env();
    expect(&env, "(cons 1 (list 2))", "(1 2)");
    expect(&env, "(cons 1 [2 3])", "(1 2 3)");
    expect(&env, "(cons 1 nil)", "(1)");
    expect(&env, "(concat (list 1) [2] (list 3))", "(1 2 3)");
    expect(&env, "(concat)", "()");
}

#[test]
fn seq_coerces_to_list_or_nil() {
    let env = new_env();
    expect(&env, "(seq (list 1 2))", "(1 2)");
    expect(&env, "(seq [1 2])", "(1 2)");
    expect(&env, "(seq (list))", "nil");
    expect(&env, "(seq [])", "nil");
    expect(&env, "(seq nil)", "nil");
    expect(&env, r#"(seq "abc")"#, r#"("a" "b" "c")"#);
    expect(&env, r#"(seq "")"#, "nil");
}

#[test]
fn conj_prepends_to_lists_and_appends_to_vectors() {
    let env = new_env();
    expect(&env, "(conj (list 1 2) 3 4)", "(4 3 1 2)");
    expect(&env, "(conj [1 2] 3 4)", "[1 2 3 4]");
    expect(&env, "(conj (list) 1)", "(1)");
}

#[test]
fn map_lookups_are_nil_safe() {
    let env = new_env();
    expect(&env, "(get {:a 1} :a)", "1");
    expect(&env, "(get {:a 1} :b)", "nil");
    expect(&env, "(get nil :a)", "nil");
    expect(&env, "(contains? {:a 1} :a)", "true");
    expect(&env, "(contains? {:a 1} :b)", "false");
    expect(&env, "(contains? nil :a)", "false");
}

#[test]
fn maps_accept_the_full_key_subset() {
    let env = new_env();
    expect(&env, r#"(get {1 "one"} 1)"#, r#""one""#);
    expect(&env, "(get {nil 0} nil)", "0");
    expect(&env, "(get {true 1 false 2} false)", "2");
    expect(&env, r#"(get {"s" 3} "s")"#, "3");
    expect(&env, "(get (hash-map 'sym 4) 'sym)", "4");
}

#[test]
fn assoc_and_dissoc_copy_rather_than_mutate() {
    let env = new_env();
    expect(&env, "(def! m {:a 1})", "{:a 1}");
    expect(&env, "(get (assoc m :b 2) :b)", "2");
    expect(&env, "(get (assoc m :a 9) :a)", "9");
    // The original map is unchanged by either operation.
    expect(&env, "(count (keys m))", "1");
    expect(&env, "(dissoc {:a 1} :a)", "{}");
    expect(&env, "(get (dissoc {:a 1 :b 2} :a) :b)", "2");
    expect(&env, "(keys {:a 1})", "(:a)");
    expect(&env, "(vals {:a 1})", "(1)");
    expect(&env, "(hash-map)", "{}");
}

#[test]
fn predicates_partition_the_value_space() {
    let env = new_env();
    expect(&env, "(nil? nil)", "true");
    expect(&env, "(nil? false)", "false");
    expect(&env, "(true? true)", "true");
    expect(&env, "(true? 1)", "false");
    expect(&env, "(false? false)", "true");
    expect(&env, "(symbol? 'a)", "true");
    expect(&env, "(symbol? :a)", "false");
    expect(&env, "(keyword? :a)", "true");
    expect(&env, "(keyword? 'a)", "false");
    expect(&env, r#"(keyword? "a")"#, "false");
    expect(&env, r#"(string? "s")"#, "true");
    expect(&env, "(string? :s)", "false");
    expect(&env, "(number? 3)", "true");
    expect(&env, r#"(number? "3")"#, "false");
    expect(&env, "(fn? +)", "true");
    expect(&env, "(fn? (fn* () 1))", "true");
    expect(&env, "(fn? 1)", "false");
    expect(&env, "(map? {})", "true");
    expect(&env, "(map? [])", "false");
}

#[test]
fn macro_predicate_excludes_plain_functions() {
    let env = new_env();
    eval_ok(&env, "(defmacro! m (fn* () 1))");
    expect(&env, "(macro? m)", "true");
    expect(&env, "(fn? m)", "false");
    expect(&env, "(macro? (fn* () 1))", "false");
}

#[test]
fn symbol_and_keyword_constructors() {
    let env = new_env();
    expect(&env, r#"(symbol "abc")"#, "abc");
    expect(&env, r#"(symbol? (symbol "abc"))"#, "true");
    expect(&env, r#"(keyword "k")"#, ":k");
    expect(&env, "(keyword :k)", ":k");
}

#[test]
fn atoms_are_mutable_cells() {
    let env = new_env();
    expect(&env, "(atom? (atom 1))", "true");
    expect(&env, "(atom? 1)", "false");
    expect(&env, "(def! a (atom 1))", "(atom 1)");
    expect(&env, "@a", "1");
    expect(&env, "(reset! a 5)", "5");
    expect(&env, "@a", "5");
    let message = eval_err(&env, "(deref 3)");
    assert!(message.contains("NotAnAtom"), "message was {:?}", message);
}

#[test]
fn apply_spreads_its_final_argument() {
    let env = new_env();
    expect(&env, "(apply + 1 2 (list 3 4))", "10");
    expect(&env, "(apply list (list))", "()");
    expect(&env, "(apply (fn* (a b) (* a b)) (list 3 4))", "12");
}

#[test]
fn map_builds_a_new_list() {
    let env = new_env();
    expect(&env, "(map (fn* (n) (* n n)) (list 1 2 3))", "(1 4 9)");
    expect(&env, "(map (fn* (n) n) nil)", "()");
    expect(&env, "(map first (list [1 2] [3 4]))", "(1 3)");
}

#[test]
fn metadata_rides_on_a_copy() {
    let env = new_env();
    expect(&env, "(meta (with-meta [1 2] {:a 1}))", "{:a 1}");
    expect(&env, "(meta [1 2])", "nil");
    expect(&env, "(def! v [1])", "[1]");
    eval_ok(&env, "(with-meta v {:m 1})");
    expect(&env, "(meta v)", "nil");
    expect(&env, "(meta (with-meta (fn* () 1) {:m 2}))", "{:m 2}");
    expect(&env, "(= [1 2] (with-meta [1 2] {:a 1}))", "true");
}

#[test]
fn read_string_parses_and_time_flows() {
    let env = new_env();
    expect(&env, r#"(read-string "(1 2 3)")"#, "(1 2 3)");
    expect(&env, r#"(read-string "7 ;; rest ignored")"#, "7");
    expect(&env, "(number? (time-ms))", "true");
    let message = eval_err(&env, r#"(read-string "(1 2")"#);
    assert!(message.contains("EOF"), "message was {:?}", message);
}

#[test]
fn arity_violations_are_reported() {
    let env = new_env();
    let message = eval_err(&env, "(nth (list 1 2))");
    assert!(message.contains("nth"), "message was {:?}", message);
    assert!(message.contains("expected"), "message was {:?}", message);
    let message = eval_err(&env, "(-)");
    assert!(message.contains("at least 1"), "message was {:?}", message);
}
