//! # Tags
//!
//! A [`Tag`] is an HTML element the parser has opened and not yet closed.
//! Tags live on the [`TagStack`](super::stack::TagStack) and produce their
//! own markup:
//!
//! ```text
//! Header(2)      <h2>  ... </h2>
//! UnorderedList  <ul>  ... </ul>
//! ListItem       <li>  ... </li>
//! Bold           <b>   ... </b>
//! ```
//!
//! A newline closes the header or list item on top of the stack. An unordered
//! list spans lines, blank ones included, and is closed at the end of input.

use std::borrow::Cow;

/// An open HTML element awaiting its close tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<hN>` where N is the number of `#` in the marker.
    Header(usize),
    UnorderedList,
    ListItem,
    Bold,
}

impl Tag {
    /// Opening markup.
    pub fn open(self) -> Cow<'static, str> {
        match self {
            Tag::Header(level) => Cow::Owned(format!("<h{level}>")),
            Tag::UnorderedList => Cow::Borrowed("<ul>"),
            Tag::ListItem => Cow::Borrowed("<li>"),
            Tag::Bold => Cow::Borrowed("<b>"),
        }
    }

    /// Closing markup.
    pub fn close(self) -> Cow<'static, str> {
        match self {
            Tag::Header(level) => Cow::Owned(format!("</h{level}>")),
            Tag::UnorderedList => Cow::Borrowed("</ul>"),
            Tag::ListItem => Cow::Borrowed("</li>"),
            Tag::Bold => Cow::Borrowed("</b>"),
        }
    }

    /// True for tags whose close markup is followed by a newline.
    pub fn breaks_line_on_close(self) -> bool {
        matches!(self, Tag::UnorderedList | Tag::ListItem)
    }
}
