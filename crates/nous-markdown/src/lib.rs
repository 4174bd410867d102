//! # nous-markdown
//!
//! Renders note bodies written in the nous Markdown dialect to HTML fragments.
//!
//! The dialect is deliberately small: ATX-style headers (`# Title`),
//! unordered list items (`- item`), bold (`*bold*`) and plain lines. Anything
//! else is text and passes through untouched, HTML included.
//!
//! ## Architecture Overview
//!
//! Rendering is a two stage pipeline:
//!
//! ```text
//! &str → Lexer → Tokens → Parser → HTML
//!        (state functions)  (tag stack)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! A hand-written scanner built from state functions. It recognises the
//! markers `-`, `\n`, `#` and `*` at the cursor and yields [`Token`]s lazily
//! through an [`Iterator`].
//!
//! ```text
//! "## Hi\n" → [Header("##"), Text("Hi"), NewLine("\n"), EndOfInput]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! Consumes tokens one by one. Block structure is tracked with an explicit
//! stack of open [`Tag`]s, so closing order is always innermost first. Output
//! is written incrementally to a `String`.
//!
//! ```text
//! [Header("##"), Text("Hi"), NewLine, EndOfInput] → "<h2>Hi</h2>"
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! nous-markdown/
//! ├── lib.rs       # This file - public API and integration tests
//! ├── token.rs     # TokenKind and Token
//! ├── lexer.rs     # State function scanner
//! ├── notes.rs     # @mentions and todo toggling on raw note bodies
//! └── parser/
//!     ├── mod.rs   # Parser state machine, render()
//!     ├── tag.rs   # Tag enum and its markup
//!     └── stack.rs # TagStack
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use nous_markdown::to_html;
//!
//! assert_eq!(to_html("# The Title\n"), "<h1>The Title</h1>");
//! assert_eq!(to_html("plain *and* bold"), "plain <b>and</b> bold");
//! ```
//!
//! Text is **not** HTML-escaped. Escaping policy belongs to whoever embeds
//! the fragment in a page.

pub mod lexer;
pub mod notes;
pub mod parser;
pub mod token;

pub use lexer::{Lexer, lex, tokenize};
pub use notes::{NoteError, extract_people, toggle_todo};
pub use parser::{Parser, render, tag::Tag};
pub use token::{Token, TokenKind};

/// Render a note body to an HTML fragment.
pub fn to_html(input: &str) -> String {
    let html = render(tokenize(input));
    log::debug!(
        "rendered {} bytes of markdown into {} bytes of html",
        input.len(),
        html.len()
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    /// Compare `src/fixtures/{name}.md` rendered against `src/fixtures/{name}.html`.
    fn fixture_test(name: &str) {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/src/fixtures");
        let md = std::fs::read_to_string(format!("{dir}/{name}.md")).unwrap();
        let expected = std::fs::read_to_string(format!("{dir}/{name}.html")).unwrap();
        assert_eq!(to_html(&md), expected, "fixture {name}");
    }

    include!(concat!(env!("OUT_DIR"), "/fixture_tests.rs"));

    #[test]
    fn snapshot_title() {
        assert_snapshot!(to_html("# The Title\n"), @"<h1>The Title</h1>");
    }

    #[test]
    fn snapshot_not_a_header() {
        assert_snapshot!(to_html("##The Title"), @"##The Title");
    }

    #[test]
    fn list_document() {
        let input = "- list 1\n- list 2\n\n";
        assert_eq!(to_html(input), "<ul>\n<li>list 1</li>\n<li>list 2</li>\n</ul>\n");
    }

    #[test]
    fn messy_real_world_note() {
        // Half-finished markers, stray symbols and raw HTML all have to render
        // without panicking, and every opened tag has to be closed.
        let input = r#"#Meeting Notes 2024-01-15
## Action *items
- call @john about the -project
-not a list
*
<em>html that's not closed
- [ ] todo from a checklist
###### "#;
        let html = to_html(input);
        for tag in ["h2", "ul", "li", "b", "h6"] {
            assert_eq!(
                html.matches(&format!("<{tag}>")).count(),
                html.matches(&format!("</{tag}>")).count(),
                "unbalanced <{tag}> in {html:?}"
            );
        }
    }

    #[test]
    fn render_matches_incremental_parser() {
        let input = "# a\n- b\n- *c*\n\nd";
        let mut parser = Parser::new();
        for token in tokenize(input) {
            parser.feed(token);
        }
        assert_eq!(parser.finish(), to_html(input));
    }

    #[test]
    fn independent_renders_share_nothing() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || to_html(&format!("- item {i}"))))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                format!("<ul>\n<li>item {i}</li>\n</ul>\n")
            );
        }
    }
}
