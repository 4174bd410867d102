//! # Lexer - Scanning Note Bodies into Tokens
//!
//! The first stage of rendering: a hand-written scanner that walks the input
//! one character at a time and cuts it into [`Token`]s.
//!
//! ## State Functions
//!
//! The scanner is a small state machine in the "state function returns the
//! next state function" style. Each state is a plain function taking the
//! lexer and returning the state to run next, or `None` once the input is
//! exhausted:
//!
//! ```text
//!            ┌──────────── `-` ───────────► lex_list ──┐
//!            ├──────────── `\n` ──────────► lex_newline┤
//! lex_text ──┼──────────── `#` ───────────► lex_header ┼──► lex_text
//!            ├──────────── `*` ───────────► lex_bold ──┘
//!            └── end of input ──► EndOfInput, stop
//! ```
//!
//! `lex_text` checks the markers in that exact order (list, newline, header,
//! bold) at every cursor position, so markers are recognised anywhere in a
//! line, not only at its start.
//!
//! ## Lookahead and Backtracking
//!
//! A header is a run of `#` **followed by a space**; a list item is a `-`
//! **followed by a space**. The marker states consume the marker, then peek
//! at the next character. If it is not a space nothing is emitted: the
//! consumed characters stay pending and become part of the next Text token.
//!
//! ```
//! use nous_markdown::lexer::lex;
//! use nous_markdown::TokenKind;
//!
//! let kinds: Vec<_> = lex("## Title").iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [TokenKind::Header, TokenKind::Text, TokenKind::EndOfInput]);
//!
//! let kinds: Vec<_> = lex("##Title").iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [TokenKind::Text, TokenKind::EndOfInput]);
//! ```
//!
//! The space after a recognised header or list marker is dropped: it belongs
//! to neither the marker token nor the text that follows. Apart from those
//! spaces, concatenating the token texts gives back the input.
//!
//! ## Laziness
//!
//! [`Lexer`] is an [`Iterator`]. States only run when the consumer pulls the
//! next token, so tokenizing and parsing interleave without threads or
//! channels.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::token::{Token, TokenKind};

const LIST: char = '-';
const EOL: char = '\n';
const HEADER: char = '#';
const BOLD: char = '*';
const SPACE: char = ' ';

/// A lexer state. Wrapping the function pointer lets the type refer to itself.
struct StateFn<'a>(fn(&mut Lexer<'a>) -> Option<StateFn<'a>>);

/// Pull-based tokenizer over a single input string.
///
/// Single pass and not restartable: once [`TokenKind::EndOfInput`] has been
/// yielded the iterator only returns `None`.
pub struct Lexer<'a> {
    input: &'a str,
    /// Start of the token being accumulated.
    start: usize,
    /// Current scan position.
    pos: usize,
    /// Width in bytes of the last character read, for `backup`.
    width: usize,
    state: Option<StateFn<'a>>,
    pending: VecDeque<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            width: 0,
            state: Some(StateFn(lex_text)),
            pending: VecDeque::with_capacity(2),
        }
    }

    /// Queue a token covering `start..pos` and move `start` up to `pos`.
    fn emit(&mut self, kind: TokenKind) {
        let text = &self.input[self.start..self.pos];
        self.pending.push_back(Token::new(kind, text));
        self.start = self.pos;
    }

    /// Emit any text accumulated since the last token.
    fn flush_text(&mut self) {
        if self.pos > self.start {
            self.emit(TokenKind::Text);
        }
    }

    /// Drop everything accumulated since the last token.
    fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Consume the next character. Multi-byte characters are read whole.
    fn next_char(&mut self) -> Option<char> {
        match self.input[self.pos..].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Step back over the last character read. Only valid once per `next_char`.
    fn backup(&mut self) {
        self.pos -= self.width;
    }

    fn peek(&mut self) -> Option<char> {
        let c = self.next_char();
        self.backup();
        c
    }

    /// Consume the next character if it is `valid`.
    fn accept(&mut self, valid: char) -> bool {
        if self.next_char() == Some(valid) {
            return true;
        }
        self.backup();
        false
    }

    /// Consume a run of `valid` characters.
    fn accept_run(&mut self, valid: char) {
        while self.accept(valid) {}
    }

    /// The state for the marker sitting at the cursor, if any.
    fn marker_state(&self) -> Option<StateFn<'a>> {
        let rest = &self.input[self.pos..];
        if rest.starts_with(LIST) {
            Some(StateFn(lex_list))
        } else if rest.starts_with(EOL) {
            Some(StateFn(lex_newline))
        } else if rest.starts_with(HEADER) {
            Some(StateFn(lex_header))
        } else if rest.starts_with(BOLD) {
            Some(StateFn(lex_bold))
        } else {
            None
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let StateFn(state) = self.state.take()?;
            self.state = state(self);
        }
    }
}

impl FusedIterator for Lexer<'_> {}

fn lex_text<'a>(l: &mut Lexer<'a>) -> Option<StateFn<'a>> {
    loop {
        if let Some(state) = l.marker_state() {
            l.flush_text();
            return Some(state);
        }
        if l.next_char().is_none() {
            break;
        }
    }
    l.flush_text();
    l.emit(TokenKind::EndOfInput);
    None
}

fn lex_header<'a>(l: &mut Lexer<'a>) -> Option<StateFn<'a>> {
    l.accept_run(HEADER);
    if l.peek() == Some(SPACE) {
        l.emit(TokenKind::Header);
        l.next_char();
        l.ignore();
    }
    Some(StateFn(lex_text))
}

fn lex_list<'a>(l: &mut Lexer<'a>) -> Option<StateFn<'a>> {
    if l.accept(LIST) && l.peek() == Some(SPACE) {
        l.emit(TokenKind::List);
        l.next_char();
        l.ignore();
    }
    Some(StateFn(lex_text))
}

fn lex_bold<'a>(l: &mut Lexer<'a>) -> Option<StateFn<'a>> {
    if l.accept(BOLD) {
        l.emit(TokenKind::Bold);
    }
    Some(StateFn(lex_text))
}

fn lex_newline<'a>(l: &mut Lexer<'a>) -> Option<StateFn<'a>> {
    if l.accept(EOL) {
        l.emit(TokenKind::NewLine);
    }
    Some(StateFn(lex_text))
}

/// Start lazily tokenizing `input`.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

/// Tokenize `input` into a vector, ending with [`TokenKind::EndOfInput`].
pub fn lex(input: &str) -> Vec<Token<'_>> {
    tokenize(input).collect()
}
