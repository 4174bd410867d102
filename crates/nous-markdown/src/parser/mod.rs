//! # Parser - Tokens to HTML
//!
//! The second stage of rendering. The parser pulls tokens one at a time and
//! writes HTML straight into a `String`, using an explicit [`TagStack`] to
//! remember which elements are still open.
//!
//! ## Token Handling
//!
//! ```text
//! Text        write verbatim (no escaping)
//! Header      push Header(len of `#` run), write <hN>
//! List        first item: push UnorderedList, write "<ul>\n"
//!             every item: push ListItem, write <li>
//! Bold        top is Bold ? pop, write </b> : push Bold, write <b>
//! NewLine     close an unpaired Bold on top first, then by the new top:
//!             empty stack        → write "\n"
//!             Header / ListItem  → close that one tag
//!             UnorderedList      → nothing, the list stays open
//! EndOfInput  close everything left on the stack
//! ```
//!
//! A closed `</li>` or `</ul>` is always followed by `"\n"`, so each list
//! line ends up on its own output line.
//!
//! ## Invariant Violations
//!
//! Every input string is valid; tokens are produced internally. A token
//! stream the lexer could never produce (an `Error` token, an empty header
//! marker, anything after `EndOfInput`) is a bug and panics.
//!
//! ```
//! use nous_markdown::{lexer::tokenize, parser::render};
//!
//! let html = render(tokenize("- list 1\n- list 2"));
//! assert_eq!(html, "<ul>\n<li>list 1</li>\n<li>list 2</li>\n</ul>\n");
//! ```

pub mod stack;
pub mod tag;

use crate::token::{Token, TokenKind};
use stack::TagStack;
use tag::Tag;

/// Whether an unordered list is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    InText,
    InList,
}

/// Incremental token-to-HTML state machine.
///
/// Feed every token with [`Parser::feed`], then take the HTML with
/// [`Parser::finish`].
#[derive(Debug, Default)]
pub struct Parser {
    output: String,
    stack: TagStack,
    context: Context,
    finished: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser whose output buffer starts with `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Handle one token.
    pub fn feed(&mut self, token: Token<'_>) {
        assert!(!self.finished, "token {token} after end of input");
        log::trace!("{:?} {token} at depth {}", token.kind, self.depth());

        match token.kind {
            TokenKind::Text => self.output.push_str(token.text),
            TokenKind::Header => self.header(token.text),
            TokenKind::List => self.list_item(),
            TokenKind::Bold => self.bold(),
            TokenKind::NewLine => self.newline(),
            TokenKind::EndOfInput => self.end_of_input(),
            TokenKind::Error => panic!("lexer produced an error token: {token}"),
        }
    }

    /// Number of currently open tags.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// The open-tag stack, for inspecting push/pop counts.
    pub fn stack(&self) -> &TagStack {
        &self.stack
    }

    /// HTML written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Return the rendered HTML. Panics if `EndOfInput` was never fed.
    pub fn finish(self) -> String {
        assert!(self.finished, "token stream ended without EndOfInput");
        self.output
    }

    fn open(&mut self, tag: Tag) {
        self.output.push_str(&tag.open());
        self.stack.push(tag);
    }

    fn close_top(&mut self) {
        let Some(tag) = self.stack.pop() else {
            unreachable!("closing a tag on an empty stack");
        };
        self.output.push_str(&tag.close());
        if tag.breaks_line_on_close() {
            self.output.push('\n');
        }
        if tag == Tag::UnorderedList {
            self.context = Context::InText;
        }
    }

    fn header(&mut self, marker: &str) {
        assert!(
            !marker.is_empty() && marker.bytes().all(|b| b == b'#'),
            "malformed header marker {marker:?}"
        );
        self.open(Tag::Header(marker.len()));
    }

    fn list_item(&mut self) {
        if self.context != Context::InList {
            self.open(Tag::UnorderedList);
            self.output.push('\n');
            self.context = Context::InList;
        }
        self.open(Tag::ListItem);
    }

    fn bold(&mut self) {
        if self.stack.peek() == Some(Tag::Bold) {
            self.close_top();
        } else {
            self.open(Tag::Bold);
        }
    }

    fn newline(&mut self) {
        // An unpaired `*` ends with its line.
        if self.stack.peek() == Some(Tag::Bold) {
            self.close_top();
        }
        match self.stack.peek() {
            None => self.output.push('\n'),
            Some(Tag::Header(_) | Tag::ListItem) => self.close_top(),
            // Blank line inside a list. Only EndOfInput closes the list.
            Some(Tag::UnorderedList) => {}
            Some(Tag::Bold) => unreachable!("bold opened directly inside bold"),
        }
    }

    fn end_of_input(&mut self) {
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.finished = true;
    }
}

/// Consume a whole token sequence and return the HTML.
pub fn render<'a>(tokens: impl IntoIterator<Item = Token<'a>>) -> String {
    let mut parser = Parser::new();
    for token in tokens {
        parser.feed(token);
    }
    parser.finish()
}
