use crate::environment::Environment;
use crate::types::OpalObject;
use crate::{evaluator, printer, reader};
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<OpalObject, Error>;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "Runtime error: {}", e),
            Error::Eval(e) => write!(f, "Runtime error: {}", e),
        }
    }
}

#[allow(non_snake_case)]
pub fn READ(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

#[allow(non_snake_case)]
pub fn PRINT(result: &Result) -> printer::Result {
    printer::print(result)
}

/// One read-eval-print pass over a line of source.
pub fn rep(line: &str, env: &Rc<Environment>) -> printer::Result {
    let result = READ(line).and_then(|ast| evaluator::EVAL(&ast, env).map_err(Error::Eval));
    PRINT(&result)
}
