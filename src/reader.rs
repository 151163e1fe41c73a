use crate::strings::BuildError;
use crate::tokens;
use crate::tokens::{tokenize, Close, Token, TokenizerError};
use crate::types::{
    build_keyword, build_map, build_string, build_symbol, MapError, OpalInt, OpalObject,
};
use regex::Regex;
use std::iter::Peekable;
use std::{fmt, slice};

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

#[derive(Debug)]
pub enum Error {
    TokenizerError(TokenizerError),
    NothingToRead,
    NoMoreTokens,
    UnbalancedSequence(tokens::Close),
    ReadIntError,
    UnexpectedCloseToken(tokens::Close),
    ReadMapError(MapError),
    StringError(BuildError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            TokenizerError(e) => write!(f, "{}", e),
            NothingToRead => write!(f, "nothing to read"),
            NoMoreTokens => write!(f, "ran out of tokens while scanning for a form (EOF)"),
            UnbalancedSequence(c) => write!(
                f,
                "unbalanced sequence: missing a Close::{:?} bracket (EOF)",
                c
            ),
            ReadIntError => write!(f, "failed to parse integer"),
            UnexpectedCloseToken(c) => write!(f, "unexpected Close::{:?} token while parsing", c),
            ReadMapError(e) => write!(f, "malformed map literal: {:?}", e),
            StringError(e) => write!(f, "{}", e),
        }
    }
}

pub type Result = std::result::Result<OpalObject, Error>;

pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input).map_err(Error::TokenizerError)?;
    log::debug!("tokenize produced {:?}", tokens);
    // Comments are token-level noise: the tokenizer emits them, the reader
    // discards them.
    let tokens: Vec<Token> = tokens
        .into_iter()
        .filter(|token| !matches!(token, Token::Comment(_)))
        .collect();
    if tokens.is_empty() {
        return Err(Error::NothingToRead);
    }
    let mut reader = tokens.iter().peekable();
    let result = read_form(&mut reader);
    log::debug!("read_form produced {:?}", result);
    result
}

fn read_form(reader: &mut Reader) -> Result {
    use crate::tokens::UnaryOp::*;

    let token = reader.next().ok_or(Error::NoMoreTokens)?;
    log::debug!("read_form, token={:?}", token);
    match token {
        Token::Open(tokens::Open::List) => read_list(reader),
        Token::Open(tokens::Open::Vector) => read_vector(reader),
        Token::Open(tokens::Open::Map) => read_map(reader),
        Token::Close(kind) => Err(Error::UnexpectedCloseToken(*kind)),
        Token::PlainChars(chars) => read_plain_chars(chars),
        Token::StringLiteral(s) => build_string(s).map_err(Error::StringError),
        Token::Comment(_) => read_form(reader),
        Token::UnaryOp(Quote) => read_unary_operand(reader, "quote"),
        Token::UnaryOp(Quasiquote) => read_unary_operand(reader, "quasiquote"),
        Token::UnaryOp(Unquote) => read_unary_operand(reader, "unquote"),
        Token::UnaryOp(SpliceUnquote) => read_unary_operand(reader, "splice-unquote"),
        Token::UnaryOp(Deref) => read_unary_operand(reader, "deref"),
        Token::UnaryOp(WithMeta) => read_with_meta(reader),
    }
}

fn read_list(reader: &mut Reader) -> Result {
    read_sequence(reader, Close::List).map(OpalObject::wrap_list)
}

fn read_vector(reader: &mut Reader) -> Result {
    read_sequence(reader, Close::Vector).map(OpalObject::wrap_vector)
}

fn read_map(reader: &mut Reader) -> Result {
    let entries = read_sequence(reader, Close::Map)?;
    build_map(entries).map_err(Error::ReadMapError)
}

fn read_sequence(
    reader: &mut Reader,
    closing_token: Close,
) -> std::result::Result<Vec<OpalObject>, Error> {
    log::debug!("read_sequence, looking for {:?}", closing_token);
    let mut elements = Vec::<OpalObject>::new();
    // opening token already consumed
    loop {
        match reader.peek() {
            Some(Token::Close(c)) if *c == closing_token => {
                reader.next();
                break;
            }
            Some(_token) => elements.push(read_form(reader)?),
            None => return Err(Error::UnbalancedSequence(closing_token)),
        }
    }
    Ok(elements)
}

fn read_plain_chars(chars: &str) -> Result {
    lazy_static! {
        // A token is an integer exactly when it equals its own integer
        // re-printing. Anything else, digits included, is a symbol.
        static ref INT_RE: Regex = Regex::new(r"^-?\d+$").unwrap();
    }
    match chars {
        "nil" => return Ok(OpalObject::Nil),
        "true" => return Ok(OpalObject::Bool(true)),
        "false" => return Ok(OpalObject::Bool(false)),
        _ => {}
    }
    if let Some(name) = chars.strip_prefix(':') {
        return Ok(build_keyword(name));
    }
    if INT_RE.is_match(chars) {
        return read_int(chars);
    }
    Ok(build_symbol(chars))
}

fn read_int(chars: &str) -> Result {
    chars
        .parse::<OpalInt>()
        .or(Err(Error::ReadIntError))
        .map(OpalObject::Integer)
}

fn read_unary_operand(reader: &mut Reader, opname: &str) -> Result {
    let operand = read_form(reader)?;
    Ok(OpalObject::wrap_list(vec![build_symbol(opname), operand]))
}

fn read_with_meta(reader: &mut Reader) -> Result {
    // ^meta value reads the metadata form first but expands with the value
    // form in between: (with-meta value meta).
    let meta = read_form(reader)?;
    let value = read_form(reader)?;
    Ok(OpalObject::wrap_list(vec![
        build_symbol("with-meta"),
        value,
        meta,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::{pr_str, PrintMode};

    fn roundtrip(input: &str) -> String {
        pr_str(
            &read_str(input).expect("input should read"),
            PrintMode::ReadableRepresentation,
        )
    }

    #[test]
    fn reads_atoms() {
        assert!(matches!(read_str("nil"), Ok(OpalObject::Nil)));
        assert!(matches!(read_str("true"), Ok(OpalObject::Bool(true))));
        assert!(matches!(read_str("-42"), Ok(OpalObject::Integer(-42))));
        assert_eq!(read_str("foo").unwrap(), build_symbol("foo"));
        assert_eq!(read_str(":foo").unwrap(), build_keyword("foo"));
    }

    #[test]
    fn digit_prefixed_symbols_are_symbols() {
        assert_eq!(read_str("1two").unwrap(), build_symbol("1two"));
        assert_eq!(read_str("-").unwrap(), build_symbol("-"));
        assert_eq!(read_str("+7").unwrap(), build_symbol("+7"));
    }

    #[test]
    fn reads_nested_sequences() {
        assert_eq!(roundtrip("( 1 [2, 3] {:k 4} )"), "(1 [2 3] {:k 4})");
    }

    #[test]
    fn quote_family_desugars() {
        assert_eq!(roundtrip("'x"), "(quote x)");
        assert_eq!(roundtrip("`x"), "(quasiquote x)");
        assert_eq!(roundtrip("~x"), "(unquote x)");
        assert_eq!(roundtrip("~@xs"), "(splice-unquote xs)");
        assert_eq!(roundtrip("@a"), "(deref a)");
    }

    #[test]
    fn with_meta_swaps_its_operands() {
        assert_eq!(roundtrip("^{:a 1} [2]"), "(with-meta [2] {:a 1})");
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(roundtrip("; leading\n(+ 1 2) ; trailing"), "(+ 1 2)");
        assert!(matches!(
            read_str("; nothing else"),
            Err(Error::NothingToRead)
        ));
    }

    #[test]
    fn unbalanced_input_is_an_eof_error() {
        assert!(matches!(read_str("(1 2"), Err(Error::UnbalancedSequence(_))));
        assert!(matches!(read_str("'"), Err(Error::NoMoreTokens)));
        let message = read_str("[1").unwrap_err().to_string();
        assert!(message.contains("EOF"), "message was {:?}", message);
    }

    #[test]
    fn string_escapes_decode() {
        match read_str(r#""a\nb""#).unwrap() {
            OpalObject::String(s) => assert_eq!(s, "a\nb"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn odd_map_literals_are_rejected() {
        assert!(matches!(
            read_str("{:a}"),
            Err(Error::ReadMapError(MapError::MissingValue))
        ));
    }
}
