//! LIFO stack of open tags.

use super::tag::Tag;

/// The parser's stack of open tags. The top is the innermost open element.
///
/// Push and pop counts are kept so the depth invariant
/// (`len == pushes - pops`) can be checked at any point of a parse.
#[derive(Debug, Default)]
pub struct TagStack {
    tags: Vec<Tag>,
    pushes: usize,
    pops: usize,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: Tag) {
        self.pushes += 1;
        self.tags.push(tag);
    }

    pub fn pop(&mut self) -> Option<Tag> {
        let tag = self.tags.pop()?;
        self.pops += 1;
        Some(tag)
    }

    /// The innermost open tag.
    pub fn peek(&self) -> Option<Tag> {
        self.tags.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn pops(&self) -> usize {
        self.pops
    }
}
