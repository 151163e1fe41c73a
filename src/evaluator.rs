use crate::environment::Environment;
use crate::types::{
    Arity, BadArgCount, Closure, MapError, OpalInt, OpalMap, OpalObject, PrimitiveFn, TypeMismatch,
};
use crate::{printer, reader, special_forms};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type Result<T = OpalObject> = std::result::Result<T, Error>;

/// A tail rewrite: the next ast and environment for the EVAL loop.
pub type EvalContext = (OpalObject, Rc<Environment>);

#[derive(Debug)]
pub enum Error {
    UnknownSymbol(String),
    TypeMismatch(TypeMismatch),
    BadArgCount(BadArgCount),
    DivideByZero,
    IndexOutOfRange { index: OpalInt, length: usize },
    Def(special_forms::DefError),
    Let(special_forms::LetError),
    Do(special_forms::DoError),
    Fn(special_forms::FnError),
    Defmacro(special_forms::DefmacroError),
    Map(MapError),
    Read(reader::Error),
    Io(String),
    RootEnvironmentGone,
    Throw(OpalObject),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            UnknownSymbol(s) => write!(f, "'{}' not found", s),
            TypeMismatch(e) => write!(f, "type mismatch: {:?}", e),
            BadArgCount(e) => write!(f, "{}", e),
            DivideByZero => write!(f, "cannot divide by zero"),
            IndexOutOfRange { index, length } => write!(
                f,
                "index {} out of range for a sequence of {} elements",
                index, length
            ),
            Def(e) => write!(f, "def!: {:?}", e),
            Let(e) => write!(f, "let*: {:?}", e),
            Do(e) => write!(f, "do: {:?}", e),
            Fn(e) => write!(f, "fn*: {:?}", e),
            Defmacro(e) => write!(f, "defmacro!: {:?}", e),
            Map(e) => write!(f, "map operation failed: {:?}", e),
            Read(e) => write!(f, "{}", e),
            Io(msg) => write!(f, "{}", msg),
            RootEnvironmentGone => write!(f, "the root environment is gone"),
            Throw(payload) => write!(
                f,
                "uncaught exception: {}",
                printer::pr_str(payload, printer::PrintMode::ReadableRepresentation)
            ),
        }
    }
}

impl Error {
    /// What a catch* handler binds: thrown values verbatim, host errors as
    /// their one-line description.
    pub(crate) fn exception_payload(&self) -> OpalObject {
        match self {
            Error::Throw(payload) => payload.clone(),
            other => OpalObject::String(other.to_string()),
        }
    }
}

/// The trampoline. Tail positions (`let*`/`do`/`if` bodies, `quasiquote`
/// rewrites, `catch*` handlers, closure and `eval` calls) rewrite `ast` and
/// `env` and loop instead of recursing, so user-level tail recursion runs in
/// constant host stack.
#[allow(non_snake_case)]
pub fn EVAL(ast: &OpalObject, env: &Rc<Environment>) -> Result {
    let mut ast = ast.clone();
    let mut env = Rc::clone(env);
    loop {
        ast = macroexpand(ast, &env)?;
        let list = match &ast {
            OpalObject::List(list) => Rc::clone(list),
            _ => return eval_ast(&ast, &env),
        };
        if list.payload.is_empty() {
            return Ok(ast);
        }
        if let OpalObject::Symbol(symbol) = &list.payload[0] {
            let args = &list.payload[1..];
            match symbol.as_ref() {
                "def!" => return special_forms::apply_def(args, &env),
                "defmacro!" => return special_forms::apply_defmacro(args, &env),
                "let*" => {
                    let (body, child) = special_forms::apply_let(args, &env)?;
                    ast = body;
                    env = child;
                    continue;
                }
                "do" => {
                    ast = special_forms::apply_do(args, &env)?;
                    continue;
                }
                "if" => {
                    ast = special_forms::apply_if(args, &env)?;
                    continue;
                }
                "fn*" => return special_forms::apply_fn(args, &env),
                "quote" => {
                    Arity::exactly(1)
                        .validate_for(args.len(), "quote")
                        .map_err(Error::BadArgCount)?;
                    return Ok(args[0].clone());
                }
                "quasiquote" => {
                    Arity::exactly(1)
                        .validate_for(args.len(), "quasiquote")
                        .map_err(Error::BadArgCount)?;
                    ast = special_forms::quasiquote(&args[0])?;
                    continue;
                }
                "quasiquoteexpand" => {
                    Arity::exactly(1)
                        .validate_for(args.len(), "quasiquoteexpand")
                        .map_err(Error::BadArgCount)?;
                    return special_forms::quasiquote(&args[0]);
                }
                "macroexpand" => {
                    Arity::exactly(1)
                        .validate_for(args.len(), "macroexpand")
                        .map_err(Error::BadArgCount)?;
                    return macroexpand(args[0].clone(), &env);
                }
                "try*" => {
                    Arity::Between(1..=2)
                        .validate_for(args.len(), "try*")
                        .map_err(Error::BadArgCount)?;
                    match EVAL(&args[0], &env) {
                        Ok(value) => return Ok(value),
                        Err(error) => match special_forms::parse_catch(args.get(1)) {
                            Some((name, body)) => {
                                let child = Environment::spawn_from(&env);
                                child.set(name.clone(), error.exception_payload());
                                ast = body.clone();
                                env = child;
                                continue;
                            }
                            None => return Err(error),
                        },
                    }
                }
                _ => {}
            }
        }
        // An ordinary call: evaluate every element, then enter the callee.
        let evaluated = evaluate_sequence_elementwise(&list.payload, &env)?;
        let (callable, args) = evaluated.split_first().unwrap();
        log::debug!("apply {:?}", evaluated);
        match callable {
            OpalObject::Primitive(p) => return call_primitive(p.payload, args),
            OpalObject::Closure(closure) => {
                closure
                    .parameters
                    .arity()
                    .validate_for(args.len(), "#<function>")
                    .map_err(Error::BadArgCount)?;
                env = Environment::spawn_with_binds(&closure.parent, &closure.parameters, args);
                ast = closure.body.clone();
            }
            OpalObject::Eval(handle) => {
                Arity::exactly(1)
                    .validate_for(args.len(), "eval")
                    .map_err(Error::BadArgCount)?;
                env = handle.env.upgrade().ok_or(Error::RootEnvironmentGone)?;
                ast = args[0].clone();
            }
            _ => return Err(Error::TypeMismatch(TypeMismatch::NotCallable)),
        }
    }
}

pub fn eval_ast(ast: &OpalObject, env: &Rc<Environment>) -> Result {
    match ast {
        OpalObject::Symbol(s) => env.find(s).ok_or_else(|| Error::UnknownSymbol(s.0.clone())),
        OpalObject::List(list) => {
            evaluate_sequence_elementwise(&list.payload, env).map(OpalObject::wrap_list)
        }
        OpalObject::Vector(vector) => {
            evaluate_sequence_elementwise(&vector.payload, env).map(OpalObject::wrap_vector)
        }
        OpalObject::Map(map) => evaluate_map(map, env),
        _ => Ok(ast.clone()),
    }
}

fn evaluate_map(map: &OpalMap, env: &Rc<Environment>) -> Result {
    let mut evaluated = HashMap::new();
    for (key, value) in map.payload.iter() {
        evaluated.insert(key.clone(), EVAL(value, env)?);
    }
    Ok(OpalObject::wrap_map(evaluated))
}

pub(crate) fn evaluate_sequence_elementwise(
    seq: &[OpalObject],
    env: &Rc<Environment>,
) -> Result<Vec<OpalObject>> {
    seq.iter().map(|obj| EVAL(obj, env)).collect()
}

/// Expand macro calls until the head is no longer a macro. A macro call is a
/// list whose head symbol resolves to a closure with the macro flag.
pub fn macroexpand(mut ast: OpalObject, env: &Rc<Environment>) -> Result {
    while let Some((closure, args)) = macro_call(&ast, env) {
        let expansion = apply(&OpalObject::Closure(closure), &args)?;
        log::debug!("macroexpand {:?} -> {:?}", ast, expansion);
        ast = expansion;
    }
    Ok(ast)
}

fn macro_call(ast: &OpalObject, env: &Rc<Environment>) -> Option<(Rc<Closure>, Vec<OpalObject>)> {
    let list = match ast {
        OpalObject::List(list) => list,
        _ => return None,
    };
    let symbol = match list.payload.first() {
        Some(OpalObject::Symbol(s)) => s,
        _ => return None,
    };
    match env.find(symbol) {
        Some(OpalObject::Closure(closure)) if closure.is_macro => {
            Some((closure, list.payload[1..].to_vec()))
        }
        _ => None,
    }
}

/// Call a callable with already-evaluated arguments. Higher-order primitives
/// (`apply`, `map`, `swap!`) funnel through here so closures, the `eval`
/// binding and host primitives are interchangeable.
pub(crate) fn apply(callable: &OpalObject, args: &[OpalObject]) -> Result {
    match callable {
        OpalObject::Primitive(p) => call_primitive(p.payload, args),
        OpalObject::Closure(closure) => {
            closure
                .parameters
                .arity()
                .validate_for(args.len(), "#<function>")
                .map_err(Error::BadArgCount)?;
            let env = Environment::spawn_with_binds(&closure.parent, &closure.parameters, args);
            EVAL(&closure.body, &env)
        }
        OpalObject::Eval(handle) => {
            Arity::exactly(1)
                .validate_for(args.len(), "eval")
                .map_err(Error::BadArgCount)?;
            let root = handle.env.upgrade().ok_or(Error::RootEnvironmentGone)?;
            EVAL(&args[0], &root)
        }
        _ => Err(Error::TypeMismatch(TypeMismatch::NotCallable)),
    }
}

pub(crate) fn call_primitive(func: &'static PrimitiveFn, args: &[OpalObject]) -> Result {
    func.arity
        .validate_for(args.len(), func.name)
        .map_err(Error::BadArgCount)?;
    (func.fn_ptr)(args)
}
