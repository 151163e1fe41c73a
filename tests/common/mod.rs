#![allow(dead_code)]

use opal::environment::{self, Environment};
use opal::interpreter;
use opal::printer::Outcome;
use std::rc::Rc;

/// A root environment with the prelude loaded and `eval` bound, matching
/// what the binary sets up at launch.
pub fn new_env() -> Rc<Environment> {
    let env = Rc::new(Environment::default());
    environment::read_prelude(&env).expect("prelude should load");
    environment::add_eval(&env);
    env
}

pub fn eval_ok(env: &Rc<Environment>, source: &str) -> String {
    match interpreter::rep(source, env) {
        Ok(Outcome::String(printed)) => printed,
        other => panic!("expected a value from {:?}, got {:?}", source, other),
    }
}

pub fn eval_err(env: &Rc<Environment>, source: &str) -> String {
    match interpreter::rep(source, env) {
        Err(message) => message,
        other => panic!("expected an error from {:?}, got {:?}", source, other),
    }
}

pub fn expect(env: &Rc<Environment>, source: &str, want: &str) {
    assert_eq!(eval_ok(env, source), want, "for input {:?}", source);
}
