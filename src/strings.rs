// The language defines exactly three escapes in a string literal: \n, \" and
// \\. One bidirectional table drives both decoding (reader) and encoding
// (printer), so the two cannot drift apart.

use bimap::BiMap;
use std::fmt;
use std::str::Chars;

lazy_static! {
    static ref ESCAPES: BiMap<char, char> = {
        let mut m = BiMap::new();
        m.insert('\\', '\\');
        m.insert('"', '"');
        m.insert('n', '\n');
        m
    };
}

#[derive(Debug)]
pub enum BuildError {
    UnknownEscape(char),
    UnexpectedSingleBackslash,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownEscape(c) => {
                write!(f, "unsupported escape \\{} in string literal (EOF)", c)
            }
            BuildError::UnexpectedSingleBackslash => {
                write!(f, "string literal ends with a bare backslash (EOF)")
            }
        }
    }
}

struct StringBuilder<'a> {
    chars: Chars<'a>,
}

impl<'a> StringBuilder<'a> {
    fn new(src: &'a str) -> Self {
        Self { chars: src.chars() }
    }
}

impl Iterator for StringBuilder<'_> {
    type Item = std::result::Result<char, BuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match self.chars.next()? {
            '\\' => match self.chars.next() {
                None => Err(BuildError::UnexpectedSingleBackslash),
                Some(c) => ESCAPES
                    .get_by_left(&c)
                    .copied()
                    .ok_or(BuildError::UnknownEscape(c)),
            },
            c => Ok(c),
        };
        Some(result)
    }
}

/// Decode a literal's payload (the characters between the quotes).
pub(crate) fn build_string(src: &str) -> Result<String, BuildError> {
    StringBuilder::new(src).collect()
}

struct StringPrinter<'a> {
    chars: Chars<'a>,
}

impl<'a> StringPrinter<'a> {
    fn new(src: &'a str) -> Self {
        Self { chars: src.chars() }
    }
}

impl Iterator for StringPrinter<'_> {
    type Item = (char, Option<char>);

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.chars.next()?;
        let charseq = match ESCAPES.get_by_right(&next) {
            Some(&l) => ('\\', Some(l)),
            None => (next, None),
        };
        Some(charseq)
    }
}

/// Encode a string back to a double-quoted literal the reader accepts.
pub(crate) fn string_repr(src: &str) -> String {
    let mut output = String::new();
    output.push('"');
    for (char1, char2) in StringPrinter::new(src) {
        output.push(char1);
        if let Some(char2) = char2 {
            output.push(char2)
        };
    }
    output.push('"');
    output
}
