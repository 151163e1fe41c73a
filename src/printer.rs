use crate::types::{OpalMap, OpalObject};
use crate::{interpreter, reader, strings};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// Escape strings so the output reads back as the same value.
    ReadableRepresentation,
    /// Raw text, for user-facing output.
    Directly,
}

pub fn pr_str(object: &OpalObject, mode: PrintMode) -> String {
    match object {
        OpalObject::Nil => String::from("nil"),
        OpalObject::Bool(b) => b.to_string(),
        OpalObject::Integer(value) => value.to_string(),
        OpalObject::Symbol(s) => s.0.clone(),
        OpalObject::Keyword(name) => format!(":{}", name),
        OpalObject::String(payload) => match mode {
            PrintMode::ReadableRepresentation => strings::string_repr(payload),
            PrintMode::Directly => payload.clone(),
        },
        OpalObject::List(list) => format!("({})", pr_seq(&list.payload, mode)),
        OpalObject::Vector(vector) => format!("[{}]", pr_seq(&vector.payload, mode)),
        OpalObject::Map(map) => pr_map(map, mode),
        OpalObject::Atom(atom) => format!("(atom {})", pr_str(&atom.borrow_payload(), mode)),
        OpalObject::Primitive(_) | OpalObject::Closure(_) | OpalObject::Eval(_) => {
            String::from("#<function>")
        }
    }
}

fn pr_seq(elements: &[OpalObject], mode: PrintMode) -> String {
    elements.iter().map(|element| pr_str(element, mode)).join(" ")
}

fn pr_map(map: &OpalMap, mode: PrintMode) -> String {
    let entries = map
        .payload
        .iter()
        .map(|(key, value)| {
            format!(
                "{} {}",
                pr_str(&key.to_object(), mode),
                pr_str(value, mode)
            )
        })
        .join(" ");
    format!("{{{}}}", entries)
}

#[derive(Debug)]
pub enum Outcome {
    String(String),
    /// Nothing to show, e.g. a comment-only line at the REPL.
    Empty,
}

pub type Result = std::result::Result<Outcome, String>;

pub fn print(result: &interpreter::Result) -> Result {
    match result {
        Ok(object) => Ok(Outcome::String(pr_str(
            object,
            PrintMode::ReadableRepresentation,
        ))),
        Err(interpreter::Error::Read(reader::Error::NothingToRead)) => Ok(Outcome::Empty),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{build_keyword, build_map, build_symbol, Atom};

    #[test]
    fn strings_escape_only_in_readable_mode() {
        let s = OpalObject::String("a\"b\nc\\d".into());
        assert_eq!(
            pr_str(&s, PrintMode::ReadableRepresentation),
            r#""a\"b\nc\\d""#
        );
        assert_eq!(pr_str(&s, PrintMode::Directly), "a\"b\nc\\d");
    }

    #[test]
    fn collections_print_delimited() {
        let list = OpalObject::wrap_list(vec![
            OpalObject::Integer(1),
            OpalObject::wrap_vector(vec![build_symbol("x")]),
        ]);
        assert_eq!(pr_str(&list, PrintMode::ReadableRepresentation), "(1 [x])");
        let map = build_map(vec![build_keyword("k"), OpalObject::Nil]).unwrap();
        assert_eq!(pr_str(&map, PrintMode::ReadableRepresentation), "{:k nil}");
    }

    #[test]
    fn atoms_print_their_payload() {
        let atom = OpalObject::Atom(Atom::new(&OpalObject::Integer(3)));
        assert_eq!(pr_str(&atom, PrintMode::ReadableRepresentation), "(atom 3)");
    }
}
