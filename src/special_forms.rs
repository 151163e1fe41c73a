use crate::environment::Environment;
use crate::evaluator::{Error, EvalContext, Result, EVAL};
use crate::types::{
    truthy, Arity, BadClosureParameters, Closure, ClosureParameters, OpalObject, OpalSymbol,
};
use itertools::Itertools;
use std::rc::Rc;

#[derive(Debug)]
pub enum DefError {
    WrongArgCount(usize),
    KeyNotASymbol,
}

pub fn apply_def(args: &[OpalObject], env: &Rc<Environment>) -> Result {
    let (key, value) = match args {
        [key, value] => Ok((key, value)),
        _ => Err(Error::Def(DefError::WrongArgCount(args.len()))),
    }?;
    let key = key
        .as_symbol()
        .map_err(|_| Error::Def(DefError::KeyNotASymbol))?;
    let value = EVAL(value, env)?;
    // Definitions land at top level, even mid let* or mid file load.
    env.set_root(key.clone(), value.clone());
    Ok(value)
}

#[derive(Debug)]
pub enum DefmacroError {
    WrongArgCount(usize),
    KeyNotASymbol,
    ValueNotAFunction,
}

pub fn apply_defmacro(args: &[OpalObject], env: &Rc<Environment>) -> Result {
    let (key, value) = match args {
        [key, value] => Ok((key, value)),
        _ => Err(Error::Defmacro(DefmacroError::WrongArgCount(args.len()))),
    }?;
    let key = key
        .as_symbol()
        .map_err(|_| Error::Defmacro(DefmacroError::KeyNotASymbol))?;
    let value = EVAL(value, env)?;
    let closure = value
        .as_closure()
        .map_err(|_| Error::Defmacro(DefmacroError::ValueNotAFunction))?;
    // The macro flag is decided exactly once, here. Closures are shared, so
    // build a flagged copy instead of mutating the evaluated one.
    let mac = OpalObject::Closure(Rc::new(Closure {
        parameters: closure.parameters.clone(),
        body: closure.body.clone(),
        parent: Rc::clone(&closure.parent),
        is_macro: true,
        meta: closure.meta.clone(),
    }));
    env.set_root(key.clone(), mac.clone());
    Ok(mac)
}

#[derive(Debug)]
pub enum LetError {
    WrongArgCount(usize),
    BindingsNotSequence,
    BindingsOddLength,
    BindToNonSymbol,
}

pub fn apply_let(args: &[OpalObject], env: &Rc<Environment>) -> Result<EvalContext> {
    let (bindings, body) = match args {
        [bindings, body] => Ok((bindings, body)),
        _ => Err(Error::Let(LetError::WrongArgCount(args.len()))),
    }?;
    let bindings = bindings
        .as_seq()
        .map_err(|_| Error::Let(LetError::BindingsNotSequence))?;
    if bindings.len() % 2 == 1 {
        return Err(Error::Let(LetError::BindingsOddLength));
    }
    let child = make_let_environment(bindings, env)?;
    Ok((body.clone(), child))
}

fn make_let_environment(
    bindings: &[OpalObject],
    parent: &Rc<Environment>,
) -> Result<Rc<Environment>> {
    let child = Environment::spawn_from(parent);
    for (key, value) in bindings.iter().tuples() {
        let key = key
            .as_symbol()
            .map_err(|_| Error::Let(LetError::BindToNonSymbol))?;
        // Evaluate in the child so later bindings see earlier ones.
        let value = EVAL(value, &child)?;
        child.set(key.clone(), value);
    }
    Ok(child)
}

#[derive(Debug)]
pub enum DoError {
    NothingToDo,
}

/// Evaluate all but the last operand; hand the last back to the trampoline.
pub fn apply_do(args: &[OpalObject], env: &Rc<Environment>) -> Result {
    let (last, init) = args.split_last().ok_or(Error::Do(DoError::NothingToDo))?;
    for obj in init {
        EVAL(obj, env)?;
    }
    Ok(last.clone())
}

/// Pick the branch; the trampoline evaluates it in tail position.
pub fn apply_if(args: &[OpalObject], env: &Rc<Environment>) -> Result {
    Arity::Between(2..=3)
        .validate_for(args.len(), "if")
        .map_err(Error::BadArgCount)?;
    let condition = EVAL(&args[0], env)?;
    if truthy(&condition) {
        Ok(args[1].clone())
    } else if args.len() == 3 {
        Ok(args[2].clone())
    } else {
        Ok(OpalObject::Nil)
    }
}

#[derive(Debug)]
pub enum FnError {
    WrongArgCount(usize),
    ParametersNotSequence,
    ParameterNotASymbol,
    BadVariadic(BadClosureParameters),
}

pub fn apply_fn(args: &[OpalObject], env: &Rc<Environment>) -> Result {
    // Exactly two arguments: a sequence of parameter symbols, and the body.
    let (parameters, body) = match args {
        [parameters, body] => Ok((parameters, body)),
        _ => Err(Error::Fn(FnError::WrongArgCount(args.len()))),
    }?;
    let parameters = parameters
        .as_seq()
        .map_err(|_| Error::Fn(FnError::ParametersNotSequence))?;
    let extract_symbol = |obj: &OpalObject| {
        obj.as_symbol()
            .map(Clone::clone)
            .map_err(|_| FnError::ParameterNotASymbol)
    };
    let parameters: std::result::Result<Vec<OpalSymbol>, _> =
        parameters.iter().map(extract_symbol).collect();
    let parameters = parameters.map_err(Error::Fn)?;
    let closure = Closure {
        parameters: ClosureParameters::new(parameters)
            .map_err(|e| Error::Fn(FnError::BadVariadic(e)))?,
        body: body.clone(),
        parent: Rc::clone(env),
        is_macro: false,
        meta: OpalObject::Nil,
    };
    Ok(OpalObject::Closure(Rc::new(closure)))
}

/// Recognize a `(catch* name body)` clause. Anything else means the error
/// should keep unwinding.
pub(crate) fn parse_catch(clause: Option<&OpalObject>) -> Option<(&OpalSymbol, &OpalObject)> {
    let list = match clause? {
        OpalObject::List(list) => list,
        _ => return None,
    };
    match list.payload.as_slice() {
        [OpalObject::Symbol(head), OpalObject::Symbol(name), body]
            if head.as_ref() == "catch*" =>
        {
            Some((name, body))
        }
        _ => None,
    }
}

/// Rewrite a quasiquoted form into cons/concat calls. Lists recurse, maps and
/// symbols become quoted, everything else (vectors included) passes through.
pub(crate) fn quasiquote(ast: &OpalObject) -> Result {
    log::debug!("quasiquote {:?}", ast);
    match ast {
        OpalObject::List(list) => quasiquote_list(&list.payload),
        OpalObject::Map(_) | OpalObject::Symbol(_) => Ok(quote_form(ast)),
        _ => Ok(ast.clone()),
    }
}

fn quote_form(ast: &OpalObject) -> OpalObject {
    OpalObject::wrap_list(vec![OpalObject::new_symbol("quote"), ast.clone()])
}

fn quasiquote_list(elements: &[OpalObject]) -> Result {
    if elements.is_empty() {
        return Ok(OpalObject::new_list());
    }
    let unquote = OpalObject::new_symbol("unquote");
    if elements[0] == unquote {
        Arity::exactly(2)
            .validate_for(elements.len(), "unquote")
            .map_err(Error::BadArgCount)?;
        return Ok(elements[1].clone());
    }
    let (elt, rest) = elements.split_first().unwrap();
    let splice_unquote = OpalObject::new_symbol("splice-unquote");
    match elt {
        OpalObject::List(inner)
            if !inner.payload.is_empty() && inner.payload[0] == splice_unquote =>
        {
            Arity::exactly(2)
                .validate_for(inner.payload.len(), "splice-unquote")
                .map_err(Error::BadArgCount)?;
            Ok(OpalObject::wrap_list(vec![
                OpalObject::new_symbol("concat"),
                inner.payload[1].clone(),
                quasiquote_list(rest)?,
            ]))
        }
        _ => Ok(OpalObject::wrap_list(vec![
            OpalObject::new_symbol("cons"),
            quasiquote(elt)?,
            quasiquote_list(rest)?,
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::{pr_str, PrintMode};
    use crate::reader::read_str;

    fn expand(input: &str) -> String {
        let ast = read_str(input).expect("input should read");
        pr_str(
            &quasiquote(&ast).expect("expansion should succeed"),
            PrintMode::ReadableRepresentation,
        )
    }

    #[test]
    fn literals_pass_through() {
        assert_eq!(expand("7"), "7");
        assert_eq!(expand("[a b]"), "[a b]");
    }

    #[test]
    fn symbols_and_maps_are_quoted() {
        assert_eq!(expand("a"), "(quote a)");
        assert_eq!(expand("{:k 1}"), "(quote {:k 1})");
    }

    #[test]
    fn lists_become_cons_chains() {
        assert_eq!(expand("(1 ~a 3)"), "(cons 1 (cons a (cons 3 ())))");
    }

    #[test]
    fn unquote_replaces_the_whole_form() {
        assert_eq!(expand("(unquote x)"), "x");
    }

    #[test]
    fn splice_unquote_concats() {
        assert_eq!(expand("(~@xs end)"), "(concat xs (cons (quote end) ()))");
    }

    #[test]
    fn catch_clauses_parse_strictly() {
        let good = read_str("(catch* e body)").unwrap();
        assert!(parse_catch(Some(&good)).is_some());
        let bad = read_str("(catch* (e) body)").unwrap();
        assert!(parse_catch(Some(&bad)).is_none());
        assert!(parse_catch(None).is_none());
    }
}
