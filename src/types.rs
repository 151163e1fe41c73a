use crate::environment::Environment;
use crate::strings::BuildError;
use crate::tokens::StringLiteral;
use crate::{evaluator, strings};
use derive_more::Deref;
use itertools::Itertools;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::{Rc, Weak};

pub type OpalInt = i64;

#[derive(Debug, Clone)]
pub struct OpalList {
    pub payload: Vec<OpalObject>,
    pub meta: OpalObject,
}

#[derive(Debug, Clone)]
pub struct OpalVector {
    pub payload: Vec<OpalObject>,
    pub meta: OpalObject,
}

type OpalMapInternal = HashMap<HashKey, OpalObject>;

#[derive(Debug, Clone)]
pub struct OpalMap {
    pub payload: OpalMapInternal,
    pub meta: OpalObject,
}

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct OpalSymbol(pub String);

impl AsRef<str> for OpalSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
    Even,
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
            Self::Even => n % 2 == 0,
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
            Arity::Even => write!(f, "any even number, including zero"),
        }
    }
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "when evaluating {} expected {} arguments, but received {}",
            self.name, self.expected, self.got
        )
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[OpalObject]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

#[derive(Debug, Clone)]
pub struct PrimitiveFnRef {
    pub payload: &'static PrimitiveFn,
    pub meta: Box<OpalObject>,
}

/// The `eval` binding. Holds a weak handle on the root environment so that
/// evaluation requested by a program always happens at top level.
#[derive(Clone)]
pub struct PrimitiveEval {
    pub env: Weak<Environment>,
}

impl fmt::Debug for PrimitiveEval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PrimitiveEval")
    }
}

#[derive(Debug, Clone)]
pub struct ClosureParameters {
    pub positional: Vec<OpalSymbol>,
    pub others: Option<OpalSymbol>,
}

#[derive(Debug)]
pub enum BadClosureParameters {
    TooManyAmpersands(usize),
    TooShortForAmpersand,
    AmpersandPositionNotPenultimate,
}

impl ClosureParameters {
    pub fn new(mut symbols: Vec<OpalSymbol>) -> Result<Self, BadClosureParameters> {
        let is_ampersand = |s: &&OpalSymbol| ***s == "&";
        let ampersand_count = symbols.iter().filter(is_ampersand).count();

        match ampersand_count {
            0 => Ok(ClosureParameters {
                positional: symbols,
                others: None,
            }),
            1 => {
                if symbols.len() < 2 {
                    return Err(BadClosureParameters::TooShortForAmpersand);
                }
                let penultimate = symbols.get(symbols.len() - 2).unwrap();
                match is_ampersand(&penultimate) {
                    false => Err(BadClosureParameters::AmpersandPositionNotPenultimate),
                    true => {
                        let variadic_name = symbols.pop().unwrap();
                        let _ampersand = symbols.pop();
                        Ok(ClosureParameters {
                            positional: symbols,
                            others: Some(variadic_name),
                        })
                    }
                }
            }
            _ => Err(BadClosureParameters::TooManyAmpersands(ampersand_count)),
        }
    }

    pub fn arity(&self) -> Arity {
        match self.others {
            None => Arity::exactly(self.positional.len()),
            Some(_) => Arity::at_least(self.positional.len()),
        }
    }
}

#[derive(Clone)]
pub struct Closure {
    pub parameters: ClosureParameters,
    pub body: OpalObject,
    pub parent: Rc<Environment>,
    pub is_macro: bool,
    pub meta: OpalObject,
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain
    // this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}, is_macro: {:?}}}",
            self.parameters, self.body, self.is_macro
        )
    }
}

#[derive(Debug, Clone)]
pub struct Atom {
    payload: Rc<RefCell<OpalObject>>,
}

impl Atom {
    pub(crate) fn new(obj: &OpalObject) -> Self {
        Self {
            payload: Rc::new(RefCell::new(obj.clone())),
        }
    }

    pub(crate) fn borrow_payload(&self) -> Ref<OpalObject> {
        self.payload.borrow()
    }

    pub(crate) fn clone_payload(&self) -> OpalObject {
        self.payload.borrow().clone()
    }

    pub(crate) fn replace(&self, obj: &OpalObject) {
        self.payload.replace(obj.clone());
    }

    pub(crate) fn ptr_eq(&self, other: &Atom) -> bool {
        Rc::ptr_eq(&self.payload, &other.payload)
    }
}

#[derive(Debug, Clone)]
pub enum OpalObject {
    Nil,
    Integer(OpalInt),
    Bool(bool),
    String(String),
    Symbol(OpalSymbol),
    Keyword(String),
    List(Rc<OpalList>),
    Vector(Rc<OpalVector>),
    Map(Rc<OpalMap>),
    Primitive(PrimitiveFnRef),
    Closure(Rc<Closure>),
    Eval(PrimitiveEval),
    Atom(Atom),
}

pub(crate) fn truthy(obj: &OpalObject) -> bool {
    use OpalObject::*;
    match obj {
        Bool(t) => *t,
        Nil => false,
        _ => true,
    }
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotAnInt,
    NotASequence,
    NotASymbol,
    NotAString,
    NotAnAtom,
    NotCallable,
    NotAClosure,
    NotIntoKeyword,
    NotAMap,
    NotAValidKey,
    CantHoldMetadata,
}

impl OpalObject {
    pub(crate) fn as_int(&self) -> Result<OpalInt, TypeMismatch> {
        match self {
            OpalObject::Integer(x) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInt),
        }
    }

    pub(crate) fn as_seq(&self) -> Result<&[OpalObject], TypeMismatch> {
        match self {
            OpalObject::List(x) => Ok(&x.payload),
            OpalObject::Vector(x) => Ok(&x.payload),
            _ => Err(TypeMismatch::NotASequence),
        }
    }

    pub(crate) fn as_map(&self) -> Result<&OpalMapInternal, TypeMismatch> {
        match self {
            OpalObject::Map(x) => Ok(&x.payload),
            _ => Err(TypeMismatch::NotAMap),
        }
    }

    pub(crate) fn as_symbol(&self) -> Result<&OpalSymbol, TypeMismatch> {
        match self {
            OpalObject::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub(crate) fn as_closure(&self) -> Result<&Rc<Closure>, TypeMismatch> {
        match self {
            OpalObject::Closure(c) => Ok(c),
            _ => Err(TypeMismatch::NotAClosure),
        }
    }

    pub(crate) fn as_string(&self) -> Result<&str, TypeMismatch> {
        match self {
            OpalObject::String(s) => Ok(s),
            _ => Err(TypeMismatch::NotAString),
        }
    }

    pub(crate) fn as_atom(&self) -> Result<&Atom, TypeMismatch> {
        match self {
            OpalObject::Atom(a) => Ok(a),
            _ => Err(TypeMismatch::NotAnAtom),
        }
    }

    pub(crate) fn as_hashkey(&self) -> Result<HashKey, TypeMismatch> {
        match self {
            OpalObject::String(s) => Ok(HashKey::String(s.clone())),
            OpalObject::Keyword(s) => Ok(HashKey::Keyword(s.clone())),
            OpalObject::Symbol(s) => Ok(HashKey::Symbol(s.0.clone())),
            OpalObject::Integer(n) => Ok(HashKey::Integer(*n)),
            OpalObject::Bool(b) => Ok(HashKey::Bool(*b)),
            OpalObject::Nil => Ok(HashKey::Nil),
            _ => Err(TypeMismatch::NotAValidKey),
        }
    }

    pub(crate) fn is_nil(&self) -> bool {
        matches!(self, OpalObject::Nil)
    }
    pub(crate) fn is_list(&self) -> bool {
        matches!(self, OpalObject::List(_))
    }
    pub(crate) fn is_vector(&self) -> bool {
        matches!(self, OpalObject::Vector(_))
    }
    pub(crate) fn is_seq(&self) -> bool {
        matches!(self, OpalObject::List(_) | OpalObject::Vector(_))
    }
    pub(crate) fn is_atom(&self) -> bool {
        matches!(self, OpalObject::Atom(_))
    }
    pub(crate) fn is_symbol(&self) -> bool {
        matches!(self, OpalObject::Symbol(_))
    }
    pub(crate) fn is_keyword(&self) -> bool {
        matches!(self, OpalObject::Keyword(_))
    }
    pub(crate) fn is_map(&self) -> bool {
        matches!(self, OpalObject::Map(_))
    }
    pub(crate) fn is_string(&self) -> bool {
        matches!(self, OpalObject::String(_))
    }
    pub(crate) fn is_number(&self) -> bool {
        matches!(self, OpalObject::Integer(_))
    }
    pub(crate) fn is_fn(&self) -> bool {
        match self {
            OpalObject::Primitive(_) | OpalObject::Eval(_) => true,
            OpalObject::Closure(f) => !f.is_macro,
            _ => false,
        }
    }
    pub(crate) fn is_macro(&self) -> bool {
        match self {
            OpalObject::Closure(f) => f.is_macro,
            _ => false,
        }
    }
}

/// The subset of values usable as map keys.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum HashKey {
    String(String),
    Keyword(String),
    Symbol(String),
    Integer(OpalInt),
    Bool(bool),
    Nil,
}

impl HashKey {
    pub(crate) fn to_object(&self) -> OpalObject {
        match self {
            HashKey::String(x) => OpalObject::String(x.clone()),
            HashKey::Keyword(x) => OpalObject::Keyword(x.clone()),
            HashKey::Symbol(x) => OpalObject::Symbol(OpalSymbol(x.clone())),
            HashKey::Integer(n) => OpalObject::Integer(*n),
            HashKey::Bool(b) => OpalObject::Bool(*b),
            HashKey::Nil => OpalObject::Nil,
        }
    }
}

#[derive(Debug)]
pub enum MapError {
    MissingValue,
    UnhashableKey,
}

pub(crate) fn build_map(entries: Vec<OpalObject>) -> Result<OpalObject, MapError> {
    if entries.len() % 2 == 1 {
        return Err(MapError::MissingValue);
    }
    let mut map = HashMap::new();
    for (key, value) in entries.into_iter().tuples() {
        let key = key.as_hashkey().map_err(|_| MapError::UnhashableKey)?;
        map.insert(key, value);
    }
    Ok(OpalObject::wrap_map(map))
}

pub(crate) fn build_symbol(chars: &str) -> OpalObject {
    OpalObject::new_symbol(chars)
}

pub(crate) fn build_keyword(chars: &str) -> OpalObject {
    OpalObject::Keyword(String::from(chars))
}

pub(crate) fn build_string(src: &StringLiteral) -> Result<OpalObject, BuildError> {
    strings::build_string(src.payload).map(OpalObject::String)
}

impl OpalObject {
    pub(crate) fn new_list() -> Self {
        Self::wrap_list(Vec::new())
    }
    pub(crate) fn wrap_list(elements: Vec<OpalObject>) -> Self {
        Self::List(Rc::new(OpalList {
            payload: elements,
            meta: OpalObject::Nil,
        }))
    }
    pub(crate) fn wrap_vector(elements: Vec<OpalObject>) -> Self {
        Self::Vector(Rc::new(OpalVector {
            payload: elements,
            meta: OpalObject::Nil,
        }))
    }
    pub(crate) fn wrap_map(map: OpalMapInternal) -> Self {
        Self::Map(Rc::new(OpalMap {
            payload: map,
            meta: OpalObject::Nil,
        }))
    }
    pub(crate) fn new_symbol(name: &str) -> Self {
        Self::Symbol(OpalSymbol(name.into()))
    }
}

impl PartialEq for OpalObject {
    fn eq(&self, other: &Self) -> bool {
        use OpalObject::*;
        // Lists and vectors of pairwise-equal elements compare equal to each
        // other, regardless of variant.
        if let (Ok(x), Ok(y)) = (self.as_seq(), other.as_seq()) {
            return equal_sequences(x, y);
        }
        match [self, other] {
            [Integer(x), Integer(y)] => x == y,
            [Bool(x), Bool(y)] => x == y,
            [String(x), String(y)] => x == y,
            [Keyword(x), Keyword(y)] => x == y,
            [Symbol(x), Symbol(y)] => x == y,
            [Map(x), Map(y)] => equal_maps(x, y),
            [Nil, Nil] => true,
            // Reference cells and callables compare by identity.
            [Atom(x), Atom(y)] => x.ptr_eq(y),
            [Closure(x), Closure(y)] => Rc::ptr_eq(x, y),
            [Primitive(x), Primitive(y)] => std::ptr::eq(x.payload, y.payload),
            [_, _] => false,
        }
    }
}

fn equal_sequences(xs: &[OpalObject], ys: &[OpalObject]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x == y)
}

fn equal_maps(xs: &OpalMap, ys: &OpalMap) -> bool {
    xs.payload.len() == ys.payload.len()
        && xs
            .payload
            .iter()
            .all(|(key, value)| ys.payload.get(key) == Some(value))
}

impl Eq for OpalObject {}
