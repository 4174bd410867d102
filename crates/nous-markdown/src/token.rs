//! Token kinds and tokens passed from the lexer to the parser.
//!
//! Tokens are block-level only: the lexer does not know whether a `-` sits at
//! the start of a line or in the middle of one, it only knows that a marker
//! was found at the scan cursor.

use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Never produced by the lexer. The parser treats it as a bug.
    Error,
    /// Terminal token, always last and always empty.
    EndOfInput,
    /// A run of `#` followed by a space. The run length is the heading level.
    Header,
    /// Plain text between markers.
    Text,
    /// A single `\n`.
    NewLine,
    /// A `-` followed by a space.
    List,
    /// A single `*`.
    Bold,
}

/// A lexed token: its kind and the slice of input it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => f.write_str("EOF"),
            TokenKind::Error => f.write_str(self.text),
            _ if self.text.chars().count() > 10 => {
                let head: String = self.text.chars().take(10).collect();
                write!(f, "{head:?}...")
            }
            _ => write!(f, "{:?}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_short_text() {
        let token = Token::new(TokenKind::Text, "hello");
        assert_eq!(token.to_string(), "\"hello\"");
    }

    #[test]
    fn display_truncates_long_text() {
        let token = Token::new(TokenKind::Text, "a rather long line of text");
        assert_eq!(token.to_string(), "\"a rather l\"...");
    }

    #[test]
    fn display_end_of_input() {
        let token = Token::new(TokenKind::EndOfInput, "");
        assert_eq!(token.to_string(), "EOF");
    }
}
