use crate::evaluator::{self, Error};
use crate::printer::{pr_str, PrintMode};
use crate::reader;
use crate::types::{
    build_map, Arity, Atom, Closure, MapError, OpalInt, OpalList, OpalMap, OpalObject,
    OpalVector, PrimitiveFn, PrimitiveFnRef, TypeMismatch,
};
use itertools::Itertools;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::io::Write;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fs, io};

fn grab_ints(args: &[OpalObject]) -> evaluator::Result<Vec<OpalInt>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(OpalObject::as_int).collect();
    type_check.map_err(Error::TypeMismatch)
}

/// Sequences, with nil standing in for the empty one.
fn seq_or_nil(obj: &OpalObject) -> evaluator::Result<&[OpalObject]> {
    match obj {
        OpalObject::Nil => Ok(&[]),
        _ => obj.as_seq().map_err(Error::TypeMismatch),
    }
}

// --- arithmetic and comparison ---

fn sum_(args: &[OpalObject]) -> evaluator::Result {
    let value = grab_ints(args)?
        .iter()
        .fold(0 as OpalInt, |acc, &x| acc.wrapping_add(x));
    Ok(OpalObject::Integer(value))
}

fn mul_(args: &[OpalObject]) -> evaluator::Result {
    let value = grab_ints(args)?
        .iter()
        .fold(1 as OpalInt, |acc, &x| acc.wrapping_mul(x));
    Ok(OpalObject::Integer(value))
}

fn sub_(args: &[OpalObject]) -> evaluator::Result {
    let ints = grab_ints(args)?;
    let (first, rest) = ints.split_first().unwrap();
    let value = rest.iter().fold(*first, |acc, &x| acc.wrapping_sub(x));
    Ok(OpalObject::Integer(value))
}

fn div_(args: &[OpalObject]) -> evaluator::Result {
    let ints = grab_ints(args)?;
    let (first, rest) = ints.split_first().unwrap();
    let mut acc = *first;
    for &divisor in rest {
        if divisor == 0 {
            return Err(Error::DivideByZero);
        }
        // Truncates toward zero.
        acc = acc.wrapping_div(divisor);
    }
    Ok(OpalObject::Integer(acc))
}

fn compare_chain(
    args: &[OpalObject],
    ok: fn(OpalInt, OpalInt) -> bool,
) -> evaluator::Result {
    let ints = grab_ints(args)?;
    let monotonic = ints.windows(2).all(|pair| ok(pair[0], pair[1]));
    Ok(OpalObject::Bool(monotonic))
}

fn lt_(args: &[OpalObject]) -> evaluator::Result {
    compare_chain(args, |x, y| x < y)
}

fn le_(args: &[OpalObject]) -> evaluator::Result {
    compare_chain(args, |x, y| x <= y)
}

fn gt_(args: &[OpalObject]) -> evaluator::Result {
    compare_chain(args, |x, y| x > y)
}

fn ge_(args: &[OpalObject]) -> evaluator::Result {
    compare_chain(args, |x, y| x >= y)
}

fn eq_(args: &[OpalObject]) -> evaluator::Result {
    let equal = args.windows(2).all(|pair| pair[0] == pair[1]);
    Ok(OpalObject::Bool(equal))
}

// --- printing ---

fn join_printed(args: &[OpalObject], mode: PrintMode, separator: &str) -> String {
    args.iter().map(|arg| pr_str(arg, mode)).join(separator)
}

fn prn_(args: &[OpalObject]) -> evaluator::Result {
    println!(
        "{}",
        join_printed(args, PrintMode::ReadableRepresentation, " ")
    );
    Ok(OpalObject::Nil)
}

fn println_(args: &[OpalObject]) -> evaluator::Result {
    println!("{}", join_printed(args, PrintMode::Directly, " "));
    Ok(OpalObject::Nil)
}

fn pr_str_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::String(join_printed(
        args,
        PrintMode::ReadableRepresentation,
        " ",
    )))
}

fn str_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::String(join_printed(
        args,
        PrintMode::Directly,
        "",
    )))
}

// --- reader bridge ---

fn read_string_(args: &[OpalObject]) -> evaluator::Result {
    let source = args[0].as_string().map_err(Error::TypeMismatch)?;
    match reader::read_str(source) {
        Ok(form) => Ok(form),
        Err(reader::Error::NothingToRead) => Ok(OpalObject::Nil),
        Err(e) => Err(Error::Read(e)),
    }
}

fn slurp_(args: &[OpalObject]) -> evaluator::Result {
    let path = args[0].as_string().map_err(Error::TypeMismatch)?;
    fs::read_to_string(path)
        .map(OpalObject::String)
        .map_err(|e| Error::Io(format!("slurp: {}: {}", path, e)))
}

// --- sequences ---

fn list_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::wrap_list(args.to_vec()))
}

fn is_list_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_list()))
}

fn vec_(args: &[OpalObject]) -> evaluator::Result {
    let elements = args[0].as_seq().map_err(Error::TypeMismatch)?;
    Ok(OpalObject::wrap_vector(elements.to_vec()))
}

fn vector_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::wrap_vector(args.to_vec()))
}

fn is_vector_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_vector()))
}

fn is_sequential_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_seq()))
}

fn is_empty_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(seq_or_nil(&args[0])?.is_empty()))
}

fn count_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Integer(seq_or_nil(&args[0])?.len() as OpalInt))
}

fn nth_(args: &[OpalObject]) -> evaluator::Result {
    let seq = args[0].as_seq().map_err(Error::TypeMismatch)?;
    let index = args[1].as_int().map_err(Error::TypeMismatch)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| seq.get(i))
        .cloned()
        .ok_or(Error::IndexOutOfRange {
            index,
            length: seq.len(),
        })
}

fn first_(args: &[OpalObject]) -> evaluator::Result {
    Ok(seq_or_nil(&args[0])?
        .first()
        .cloned()
        .unwrap_or(OpalObject::Nil))
}

fn rest_(args: &[OpalObject]) -> evaluator::Result {
    let seq = seq_or_nil(&args[0])?;
    let tail = seq.get(1..).unwrap_or(&[]);
    Ok(OpalObject::wrap_list(tail.to_vec()))
}

fn cons_(args: &[OpalObject]) -> evaluator::Result {
    let tail = seq_or_nil(&args[1])?;
    let mut elements = Vec::with_capacity(tail.len() + 1);
    elements.push(args[0].clone());
    elements.extend_from_slice(tail);
    Ok(OpalObject::wrap_list(elements))
}

fn concat_(args: &[OpalObject]) -> evaluator::Result {
    let mut elements = Vec::new();
    for arg in args {
        elements.extend_from_slice(seq_or_nil(arg)?);
    }
    Ok(OpalObject::wrap_list(elements))
}

fn seq_(args: &[OpalObject]) -> evaluator::Result {
    match &args[0] {
        OpalObject::Nil => Ok(OpalObject::Nil),
        OpalObject::List(list) if list.payload.is_empty() => Ok(OpalObject::Nil),
        OpalObject::List(_) => Ok(args[0].clone()),
        OpalObject::Vector(vector) if vector.payload.is_empty() => Ok(OpalObject::Nil),
        OpalObject::Vector(vector) => Ok(OpalObject::wrap_list(vector.payload.clone())),
        OpalObject::String(s) if s.is_empty() => Ok(OpalObject::Nil),
        OpalObject::String(s) => Ok(OpalObject::wrap_list(
            s.chars()
                .map(|c| OpalObject::String(c.to_string()))
                .collect(),
        )),
        _ => Err(Error::TypeMismatch(TypeMismatch::NotASequence)),
    }
}

fn conj_(args: &[OpalObject]) -> evaluator::Result {
    let extra = &args[1..];
    match &args[0] {
        // Lists grow at the front, one prepend per argument.
        OpalObject::List(list) => {
            let mut elements: Vec<OpalObject> = extra.iter().rev().cloned().collect();
            elements.extend_from_slice(&list.payload);
            Ok(OpalObject::wrap_list(elements))
        }
        // Vectors grow at the back.
        OpalObject::Vector(vector) => {
            let mut elements = vector.payload.clone();
            elements.extend_from_slice(extra);
            Ok(OpalObject::wrap_vector(elements))
        }
        _ => Err(Error::TypeMismatch(TypeMismatch::NotASequence)),
    }
}

// --- maps ---

fn assoc_(args: &[OpalObject]) -> evaluator::Result {
    let map = args[0].as_map().map_err(Error::TypeMismatch)?;
    let additions = &args[1..];
    if additions.len() % 2 == 1 {
        return Err(Error::Map(MapError::MissingValue));
    }
    let mut payload = map.clone();
    for (key, value) in additions.iter().tuples() {
        let key = key.as_hashkey().map_err(Error::TypeMismatch)?;
        payload.insert(key, value.clone());
    }
    Ok(OpalObject::wrap_map(payload))
}

fn dissoc_(args: &[OpalObject]) -> evaluator::Result {
    let map = args[0].as_map().map_err(Error::TypeMismatch)?;
    let mut payload = map.clone();
    for key in &args[1..] {
        let key = key.as_hashkey().map_err(Error::TypeMismatch)?;
        payload.remove(&key);
    }
    Ok(OpalObject::wrap_map(payload))
}

fn get_(args: &[OpalObject]) -> evaluator::Result {
    if args[0].is_nil() {
        return Ok(OpalObject::Nil);
    }
    let map = args[0].as_map().map_err(Error::TypeMismatch)?;
    let key = args[1].as_hashkey().map_err(Error::TypeMismatch)?;
    Ok(map.get(&key).cloned().unwrap_or(OpalObject::Nil))
}

fn contains_(args: &[OpalObject]) -> evaluator::Result {
    if args[0].is_nil() {
        return Ok(OpalObject::Bool(false));
    }
    let map = args[0].as_map().map_err(Error::TypeMismatch)?;
    let key = args[1].as_hashkey().map_err(Error::TypeMismatch)?;
    Ok(OpalObject::Bool(map.contains_key(&key)))
}

fn keys_(args: &[OpalObject]) -> evaluator::Result {
    let map = args[0].as_map().map_err(Error::TypeMismatch)?;
    Ok(OpalObject::wrap_list(
        map.keys().map(|key| key.to_object()).collect(),
    ))
}

fn vals_(args: &[OpalObject]) -> evaluator::Result {
    let map = args[0].as_map().map_err(Error::TypeMismatch)?;
    Ok(OpalObject::wrap_list(map.values().cloned().collect()))
}

fn hash_map_(args: &[OpalObject]) -> evaluator::Result {
    build_map(args.to_vec()).map_err(Error::Map)
}

fn is_map_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_map()))
}

// --- atoms ---

fn atom_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Atom(Atom::new(&args[0])))
}

fn is_atom_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_atom()))
}

fn deref_(args: &[OpalObject]) -> evaluator::Result {
    let atom = args[0].as_atom().map_err(Error::TypeMismatch)?;
    Ok(atom.clone_payload())
}

fn reset_(args: &[OpalObject]) -> evaluator::Result {
    let atom = args[0].as_atom().map_err(Error::TypeMismatch)?;
    atom.replace(&args[1]);
    Ok(args[1].clone())
}

fn swap_(args: &[OpalObject]) -> evaluator::Result {
    let atom = args[0].as_atom().map_err(Error::TypeMismatch)?;
    // Read, apply, then write: a recursive swap! observes the outer value.
    let mut call_args = vec![atom.clone_payload()];
    call_args.extend_from_slice(&args[2..]);
    let value = evaluator::apply(&args[1], &call_args)?;
    atom.replace(&value);
    Ok(value)
}

// --- control ---

fn throw_(args: &[OpalObject]) -> evaluator::Result {
    Err(Error::Throw(args[0].clone()))
}

fn apply_(args: &[OpalObject]) -> evaluator::Result {
    let (callable, rest) = args.split_first().unwrap();
    let (last, mid) = rest.split_last().unwrap();
    // The final argument spreads one level into the call.
    let mut call_args = mid.to_vec();
    call_args.extend_from_slice(last.as_seq().map_err(Error::TypeMismatch)?);
    evaluator::apply(callable, &call_args)
}

fn map_(args: &[OpalObject]) -> evaluator::Result {
    let elements = seq_or_nil(&args[1])?;
    let mapped: evaluator::Result<Vec<OpalObject>> = elements
        .iter()
        .map(|element| evaluator::apply(&args[0], std::slice::from_ref(element)))
        .collect();
    Ok(OpalObject::wrap_list(mapped?))
}

// --- predicates ---

fn is_nil_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_nil()))
}

fn is_true_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(matches!(args[0], OpalObject::Bool(true))))
}

fn is_false_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(matches!(args[0], OpalObject::Bool(false))))
}

fn is_symbol_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_symbol()))
}

fn is_keyword_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_keyword()))
}

fn is_string_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_string()))
}

fn is_number_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_number()))
}

fn is_fn_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_fn()))
}

fn is_macro_(args: &[OpalObject]) -> evaluator::Result {
    Ok(OpalObject::Bool(args[0].is_macro()))
}

// --- constructors ---

fn symbol_(args: &[OpalObject]) -> evaluator::Result {
    let name = args[0].as_string().map_err(Error::TypeMismatch)?;
    Ok(OpalObject::new_symbol(name))
}

fn keyword_(args: &[OpalObject]) -> evaluator::Result {
    match &args[0] {
        OpalObject::String(name) => Ok(OpalObject::Keyword(name.clone())),
        OpalObject::Keyword(_) => Ok(args[0].clone()),
        _ => Err(Error::TypeMismatch(TypeMismatch::NotIntoKeyword)),
    }
}

// --- metadata ---

fn meta_(args: &[OpalObject]) -> evaluator::Result {
    match &args[0] {
        OpalObject::List(list) => Ok(list.meta.clone()),
        OpalObject::Vector(vector) => Ok(vector.meta.clone()),
        OpalObject::Map(map) => Ok(map.meta.clone()),
        OpalObject::Primitive(primitive) => Ok((*primitive.meta).clone()),
        OpalObject::Closure(closure) => Ok(closure.meta.clone()),
        _ => Err(Error::TypeMismatch(TypeMismatch::CantHoldMetadata)),
    }
}

fn with_meta_(args: &[OpalObject]) -> evaluator::Result {
    let meta = args[1].clone();
    // A shallow copy with the new metadata; the original is untouched.
    match &args[0] {
        OpalObject::List(list) => Ok(OpalObject::List(Rc::new(OpalList {
            payload: list.payload.clone(),
            meta,
        }))),
        OpalObject::Vector(vector) => Ok(OpalObject::Vector(Rc::new(OpalVector {
            payload: vector.payload.clone(),
            meta,
        }))),
        OpalObject::Map(map) => Ok(OpalObject::Map(Rc::new(OpalMap {
            payload: map.payload.clone(),
            meta,
        }))),
        OpalObject::Primitive(primitive) => Ok(OpalObject::Primitive(PrimitiveFnRef {
            payload: primitive.payload,
            meta: Box::new(meta),
        })),
        OpalObject::Closure(closure) => Ok(OpalObject::Closure(Rc::new(Closure {
            parameters: closure.parameters.clone(),
            body: closure.body.clone(),
            parent: Rc::clone(&closure.parent),
            is_macro: closure.is_macro,
            meta,
        }))),
        _ => Err(Error::TypeMismatch(TypeMismatch::CantHoldMetadata)),
    }
}

// --- misc ---

fn time_ms_(_args: &[OpalObject]) -> evaluator::Result {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Io(format!("time-ms: {}", e)))?;
    Ok(OpalObject::Integer(elapsed.as_millis() as OpalInt))
}

fn readline_(args: &[OpalObject]) -> evaluator::Result {
    let prompt = args[0].as_string().map_err(Error::TypeMismatch)?;
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| Error::Io(format!("readline: {}", e)))?;
    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .map_err(|e| Error::Io(format!("readline: {}", e)))?;
    if read == 0 {
        return Ok(OpalObject::Nil);
    }
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(OpalObject::String(line))
}

// --- the table ---

static SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    arity: Arity::at_least(0),
    fn_ptr: sum_,
};
static SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    arity: Arity::at_least(1),
    fn_ptr: sub_,
};
static MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    arity: Arity::at_least(0),
    fn_ptr: mul_,
};
static DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    arity: Arity::at_least(1),
    fn_ptr: div_,
};
static EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    arity: Arity::at_least(1),
    fn_ptr: eq_,
};
static LT: PrimitiveFn = PrimitiveFn {
    name: "<",
    arity: Arity::at_least(1),
    fn_ptr: lt_,
};
static LE: PrimitiveFn = PrimitiveFn {
    name: "<=",
    arity: Arity::at_least(1),
    fn_ptr: le_,
};
static GT: PrimitiveFn = PrimitiveFn {
    name: ">",
    arity: Arity::at_least(1),
    fn_ptr: gt_,
};
static GE: PrimitiveFn = PrimitiveFn {
    name: ">=",
    arity: Arity::at_least(1),
    fn_ptr: ge_,
};
static PRN: PrimitiveFn = PrimitiveFn {
    name: "prn",
    arity: Arity::at_least(0),
    fn_ptr: prn_,
};
static PRINTLN: PrimitiveFn = PrimitiveFn {
    name: "println",
    arity: Arity::at_least(0),
    fn_ptr: println_,
};
static PR_STR: PrimitiveFn = PrimitiveFn {
    name: "pr-str",
    arity: Arity::at_least(0),
    fn_ptr: pr_str_,
};
static STR: PrimitiveFn = PrimitiveFn {
    name: "str",
    arity: Arity::at_least(0),
    fn_ptr: str_,
};
static READ_STRING: PrimitiveFn = PrimitiveFn {
    name: "read-string",
    arity: Arity::exactly(1),
    fn_ptr: read_string_,
};
static SLURP: PrimitiveFn = PrimitiveFn {
    name: "slurp",
    arity: Arity::exactly(1),
    fn_ptr: slurp_,
};
static LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    arity: Arity::at_least(0),
    fn_ptr: list_,
};
static IS_LIST: PrimitiveFn = PrimitiveFn {
    name: "list?",
    arity: Arity::exactly(1),
    fn_ptr: is_list_,
};
static VEC: PrimitiveFn = PrimitiveFn {
    name: "vec",
    arity: Arity::exactly(1),
    fn_ptr: vec_,
};
static VECTOR: PrimitiveFn = PrimitiveFn {
    name: "vector",
    arity: Arity::at_least(0),
    fn_ptr: vector_,
};
static IS_VECTOR: PrimitiveFn = PrimitiveFn {
    name: "vector?",
    arity: Arity::exactly(1),
    fn_ptr: is_vector_,
};
static IS_SEQUENTIAL: PrimitiveFn = PrimitiveFn {
    name: "sequential?",
    arity: Arity::exactly(1),
    fn_ptr: is_sequential_,
};
static HASH_MAP: PrimitiveFn = PrimitiveFn {
    name: "hash-map",
    arity: Arity::Even,
    fn_ptr: hash_map_,
};
static IS_MAP: PrimitiveFn = PrimitiveFn {
    name: "map?",
    arity: Arity::exactly(1),
    fn_ptr: is_map_,
};
static IS_EMPTY: PrimitiveFn = PrimitiveFn {
    name: "empty?",
    arity: Arity::exactly(1),
    fn_ptr: is_empty_,
};
static COUNT: PrimitiveFn = PrimitiveFn {
    name: "count",
    arity: Arity::exactly(1),
    fn_ptr: count_,
};
static NTH: PrimitiveFn = PrimitiveFn {
    name: "nth",
    arity: Arity::exactly(2),
    fn_ptr: nth_,
};
static FIRST: PrimitiveFn = PrimitiveFn {
    name: "first",
    arity: Arity::exactly(1),
    fn_ptr: first_,
};
static REST: PrimitiveFn = PrimitiveFn {
    name: "rest",
    arity: Arity::exactly(1),
    fn_ptr: rest_,
};
static CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    arity: Arity::exactly(2),
    fn_ptr: cons_,
};
static CONCAT: PrimitiveFn = PrimitiveFn {
    name: "concat",
    arity: Arity::at_least(0),
    fn_ptr: concat_,
};
static SEQ: PrimitiveFn = PrimitiveFn {
    name: "seq",
    arity: Arity::exactly(1),
    fn_ptr: seq_,
};
static CONJ: PrimitiveFn = PrimitiveFn {
    name: "conj",
    arity: Arity::at_least(1),
    fn_ptr: conj_,
};
static ASSOC: PrimitiveFn = PrimitiveFn {
    name: "assoc",
    arity: Arity::at_least(1),
    fn_ptr: assoc_,
};
static DISSOC: PrimitiveFn = PrimitiveFn {
    name: "dissoc",
    arity: Arity::at_least(1),
    fn_ptr: dissoc_,
};
static GET: PrimitiveFn = PrimitiveFn {
    name: "get",
    arity: Arity::exactly(2),
    fn_ptr: get_,
};
static CONTAINS: PrimitiveFn = PrimitiveFn {
    name: "contains?",
    arity: Arity::exactly(2),
    fn_ptr: contains_,
};
static KEYS: PrimitiveFn = PrimitiveFn {
    name: "keys",
    arity: Arity::exactly(1),
    fn_ptr: keys_,
};
static VALS: PrimitiveFn = PrimitiveFn {
    name: "vals",
    arity: Arity::exactly(1),
    fn_ptr: vals_,
};
static ATOM: PrimitiveFn = PrimitiveFn {
    name: "atom",
    arity: Arity::exactly(1),
    fn_ptr: atom_,
};
static IS_ATOM: PrimitiveFn = PrimitiveFn {
    name: "atom?",
    arity: Arity::exactly(1),
    fn_ptr: is_atom_,
};
static DEREF: PrimitiveFn = PrimitiveFn {
    name: "deref",
    arity: Arity::exactly(1),
    fn_ptr: deref_,
};
static RESET: PrimitiveFn = PrimitiveFn {
    name: "reset!",
    arity: Arity::exactly(2),
    fn_ptr: reset_,
};
static SWAP: PrimitiveFn = PrimitiveFn {
    name: "swap!",
    arity: Arity::at_least(2),
    fn_ptr: swap_,
};
static THROW: PrimitiveFn = PrimitiveFn {
    name: "throw",
    arity: Arity::exactly(1),
    fn_ptr: throw_,
};
static APPLY: PrimitiveFn = PrimitiveFn {
    name: "apply",
    arity: Arity::at_least(2),
    fn_ptr: apply_,
};
static MAP: PrimitiveFn = PrimitiveFn {
    name: "map",
    arity: Arity::exactly(2),
    fn_ptr: map_,
};
static IS_NIL: PrimitiveFn = PrimitiveFn {
    name: "nil?",
    arity: Arity::exactly(1),
    fn_ptr: is_nil_,
};
static IS_TRUE: PrimitiveFn = PrimitiveFn {
    name: "true?",
    arity: Arity::exactly(1),
    fn_ptr: is_true_,
};
static IS_FALSE: PrimitiveFn = PrimitiveFn {
    name: "false?",
    arity: Arity::exactly(1),
    fn_ptr: is_false_,
};
static IS_SYMBOL: PrimitiveFn = PrimitiveFn {
    name: "symbol?",
    arity: Arity::exactly(1),
    fn_ptr: is_symbol_,
};
static IS_KEYWORD: PrimitiveFn = PrimitiveFn {
    name: "keyword?",
    arity: Arity::exactly(1),
    fn_ptr: is_keyword_,
};
static IS_STRING: PrimitiveFn = PrimitiveFn {
    name: "string?",
    arity: Arity::exactly(1),
    fn_ptr: is_string_,
};
static IS_NUMBER: PrimitiveFn = PrimitiveFn {
    name: "number?",
    arity: Arity::exactly(1),
    fn_ptr: is_number_,
};
static IS_FN: PrimitiveFn = PrimitiveFn {
    name: "fn?",
    arity: Arity::exactly(1),
    fn_ptr: is_fn_,
};
static IS_MACRO: PrimitiveFn = PrimitiveFn {
    name: "macro?",
    arity: Arity::exactly(1),
    fn_ptr: is_macro_,
};
static SYMBOL: PrimitiveFn = PrimitiveFn {
    name: "symbol",
    arity: Arity::exactly(1),
    fn_ptr: symbol_,
};
static KEYWORD: PrimitiveFn = PrimitiveFn {
    name: "keyword",
    arity: Arity::exactly(1),
    fn_ptr: keyword_,
};
static META: PrimitiveFn = PrimitiveFn {
    name: "meta",
    arity: Arity::exactly(1),
    fn_ptr: meta_,
};
static WITH_META: PrimitiveFn = PrimitiveFn {
    name: "with-meta",
    arity: Arity::exactly(2),
    fn_ptr: with_meta_,
};
static TIME_MS: PrimitiveFn = PrimitiveFn {
    name: "time-ms",
    arity: Arity::exactly(0),
    fn_ptr: time_ms_,
};
static READLINE: PrimitiveFn = PrimitiveFn {
    name: "readline",
    arity: Arity::exactly(1),
    fn_ptr: readline_,
};

static PRIMITIVES: &[&PrimitiveFn] = &[
    &SUM,
    &SUB,
    &MUL,
    &DIV,
    &EQUAL,
    &LT,
    &LE,
    &GT,
    &GE,
    &PRN,
    &PRINTLN,
    &PR_STR,
    &STR,
    &READ_STRING,
    &SLURP,
    &LIST,
    &IS_LIST,
    &VEC,
    &VECTOR,
    &IS_VECTOR,
    &IS_SEQUENTIAL,
    &HASH_MAP,
    &IS_MAP,
    &IS_EMPTY,
    &COUNT,
    &NTH,
    &FIRST,
    &REST,
    &CONS,
    &CONCAT,
    &SEQ,
    &CONJ,
    &ASSOC,
    &DISSOC,
    &GET,
    &CONTAINS,
    &KEYS,
    &VALS,
    &ATOM,
    &IS_ATOM,
    &DEREF,
    &RESET,
    &SWAP,
    &THROW,
    &APPLY,
    &MAP,
    &IS_NIL,
    &IS_TRUE,
    &IS_FALSE,
    &IS_SYMBOL,
    &IS_KEYWORD,
    &IS_STRING,
    &IS_NUMBER,
    &IS_FN,
    &IS_MACRO,
    &SYMBOL,
    &KEYWORD,
    &META,
    &WITH_META,
    &TIME_MS,
    &READLINE,
];

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;

lazy_static! {
    pub(crate) static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for func in PRIMITIVES {
            map.insert(func.name, *func);
        }
        map
    };
}
