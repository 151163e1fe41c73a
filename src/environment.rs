use crate::core::CORE;
use crate::types::{ClosureParameters, OpalObject, OpalSymbol, PrimitiveEval, PrimitiveFnRef};
use crate::{evaluator, interpreter, prelude, reader};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of bindings plus an optional parent. Frames are shared by
/// reference: closures keep their defining frame alive, and `set` works
/// through interior mutability.
pub struct Environment {
    data: RefCell<HashMap<OpalSymbol, OpalObject>>,
    parent: Option<Rc<Environment>>,
}

impl Default for Environment {
    /// The root frame: every core primitive, plus the host identification.
    fn default() -> Self {
        let env = Environment {
            data: RefCell::new(HashMap::new()),
            parent: None,
        };
        for (name, func) in CORE.iter() {
            env.set(
                OpalSymbol((*name).into()),
                OpalObject::Primitive(PrimitiveFnRef {
                    payload: *func,
                    meta: Box::new(OpalObject::Nil),
                }),
            );
        }
        env.set(
            OpalSymbol("*host-language*".into()),
            OpalObject::String("rust".into()),
        );
        env
    }
}

impl Environment {
    pub fn spawn_from(parent: &Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            data: RefCell::new(HashMap::new()),
            parent: Some(parent.clone()),
        })
    }

    /// The frame for a closure call. Positional parameters bind pairwise
    /// against the arguments; a variadic name takes the leftovers as a list.
    /// The caller has already validated the argument count.
    pub fn spawn_with_binds(
        parent: &Rc<Environment>,
        parameters: &ClosureParameters,
        exprs: &[OpalObject],
    ) -> Rc<Environment> {
        let env = Self::spawn_from(parent);
        for (name, value) in parameters.positional.iter().zip(exprs) {
            env.set(name.clone(), value.clone());
        }
        if let Some(rest_name) = &parameters.others {
            let rest = exprs[parameters.positional.len()..].to_vec();
            env.set(rest_name.clone(), OpalObject::wrap_list(rest));
        }
        env
    }

    pub fn set(&self, key: OpalSymbol, value: OpalObject) {
        self.data.borrow_mut().insert(key, value);
    }

    /// `def!` and `defmacro!` bind at top level no matter where they execute.
    pub fn set_root(&self, key: OpalSymbol, value: OpalObject) {
        match &self.parent {
            None => self.set(key, value),
            Some(parent) => parent.set_root(key, value),
        }
    }

    pub fn find(&self, key: &OpalSymbol) -> Option<OpalObject> {
        match self.data.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.find(key)),
        }
    }
}

/// Evaluate the bootstrap definitions written in the language itself.
pub fn read_prelude(env: &Rc<Environment>) -> Result<(), interpreter::Error> {
    for form in prelude::FORMS {
        let ast = reader::read_str(form).map_err(interpreter::Error::Read)?;
        evaluator::EVAL(&ast, env).map_err(interpreter::Error::Eval)?;
    }
    Ok(())
}

/// Bind `eval`. It holds a weak handle on the root frame, so it has to be
/// added after that frame is wrapped in an Rc.
pub fn add_eval(env: &Rc<Environment>) {
    env.set(
        OpalSymbol("eval".into()),
        OpalObject::Eval(PrimitiveEval {
            env: Rc::downgrade(env),
        }),
    );
}

pub fn set_argv(env: &Rc<Environment>, args: &[String]) {
    let argv = args.iter().map(|arg| OpalObject::String(arg.clone())).collect();
    env.set(OpalSymbol("*ARGV*".into()), OpalObject::wrap_list(argv));
}
