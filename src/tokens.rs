use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Open {
    List,
    Vector,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Close {
    List,
    Vector,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Quote,
    Quasiquote,
    Unquote,
    SpliceUnquote,
    Deref,
    WithMeta,
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteral<'a> {
    /// The characters between the quotes, escapes still encoded.
    pub payload: &'a str,
}

#[derive(Debug)]
pub enum Token<'a> {
    Open(Open),
    Close(Close),
    UnaryOp(UnaryOp),
    StringLiteral(StringLiteral<'a>),
    Comment(&'a str),
    PlainChars(&'a str),
}

#[derive(Debug)]
pub enum TokenizerError {
    BadTildeMatch,
    UnclosedString,
    NoCapture(String),
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::BadTildeMatch => write!(f, "malformed ~ token"),
            TokenizerError::UnclosedString => {
                write!(f, "unbalanced string literal, expected a closing '\"' (EOF)")
            }
            TokenizerError::NoCapture(rest) => {
                write!(f, "could not match a token at {:?}", rest)
            }
        }
    }
}

fn create_token(captured: &str) -> Result<Token, TokenizerError> {
    let mut chars = captured.chars();
    // The caller discards empty captures, so there is a first character.
    let first_char = chars.next().unwrap();
    match first_char {
        '~' => {
            if captured.len() == 1 {
                Ok(Token::UnaryOp(UnaryOp::Unquote))
            } else if let Some('@') = chars.next() {
                Ok(Token::UnaryOp(UnaryOp::SpliceUnquote))
            } else {
                Err(TokenizerError::BadTildeMatch)
            }
        }
        '(' => Ok(Token::Open(Open::List)),
        ')' => Ok(Token::Close(Close::List)),
        '[' => Ok(Token::Open(Open::Vector)),
        ']' => Ok(Token::Close(Close::Vector)),
        '{' => Ok(Token::Open(Open::Map)),
        '}' => Ok(Token::Close(Close::Map)),
        '\'' => Ok(Token::UnaryOp(UnaryOp::Quote)),
        '`' => Ok(Token::UnaryOp(UnaryOp::Quasiquote)),
        '^' => Ok(Token::UnaryOp(UnaryOp::WithMeta)),
        '@' => Ok(Token::UnaryOp(UnaryOp::Deref)),
        '"' => string_literal(captured),
        // ; is ASCII, so slicing on bytes is safe even if the rest of the
        // comment is not.
        ';' => Ok(Token::Comment(&captured[1..])),
        _ => Ok(Token::PlainChars(captured)),
    }
}

/// Decide whether a string capture actually reached its closing quote. The
/// regex consumes `\X` pairs wholesale, so a trailing `"` preceded by a
/// backslash belongs to an escape and does not close the literal.
fn string_literal(captured: &str) -> Result<Token, TokenizerError> {
    let mut chars = captured[1..].chars();
    loop {
        match chars.next() {
            None => return Err(TokenizerError::UnclosedString),
            Some('\\') => {
                if chars.next().is_none() {
                    return Err(TokenizerError::UnclosedString);
                }
            }
            Some('"') => {
                // First and last bytes are ASCII quotes: byte slicing is safe.
                return Ok(Token::StringLiteral(StringLiteral {
                    payload: &captured[1..captured.len() - 1],
                }));
            }
            Some(_) => continue,
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)                          # ignore whitespace in this pattern & allow comments
                [\s,]*                       # whitespace or commas, ignored
                (                            # token capture group
                    ~@                       # literal splice-unquote
                    |[\[\]{}()'`~^@]         # single special characters
                    |"(?:                    # string literal. its contents, not captured, include:
                        \\.                  #    escapes
                        |[^\\"]              #    anything which isn't a backslash or a quote
                      )*
                      "?                     #    possibly missing a closing quote
                    |;.*                     # comments
                    |[^\s\[\]{}('"`,;)]*     # zero or more plain characters
                )
                [\s,]*                       # whitespace or commas, ignored
            "#
        )
        .unwrap();
    }
    let mut input = input;
    let mut tokens = Vec::new();
    while !input.is_empty() {
        let caps = TOKEN_RE
            .captures(input)
            .ok_or_else(|| TokenizerError::NoCapture(String::from(input)))?;
        let consumed = caps.get(0).unwrap().end();
        if consumed == 0 {
            return Err(TokenizerError::NoCapture(String::from(input)));
        }
        let captured = caps.get(1).unwrap().as_str();
        // A capture can be empty when the input is nothing but separators.
        if !captured.is_empty() {
            tokens.push(create_token(captured)?);
        }
        input = &input[consumed..];
    }
    Ok(tokens)
}
