//! Helpers that work on raw note bodies rather than rendered HTML.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const CHECKED: &str = "- [x]";
const UNCHECKED: &str = "- [ ]";

fn mention_regex() -> &'static Regex {
    static MENTION_REGEX: OnceLock<Regex> = OnceLock::new();
    MENTION_REGEX.get_or_init(|| Regex::new(r"\B@(\w+)").expect("Invalid mention regex"))
}

fn todo_regex() -> &'static Regex {
    static TODO_REGEX: OnceLock<Regex> = OnceLock::new();
    TODO_REGEX.get_or_init(|| Regex::new(r"- \[[ xX]\]").expect("Invalid todo regex"))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteError {
    #[error("todo {index} not found, the note has {found} todos")]
    TodoNotFound { index: usize, found: usize },
}

/// Names mentioned as `@name`, in order of appearance, without the `@`.
///
/// An `@` directly after a word character is not a mention, so e-mail
/// addresses are skipped.
pub fn extract_people(text: &str) -> Vec<&str> {
    mention_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Flip the `index`-th todo marker (`- [ ]`, `- [x]` or `- [X]`) in `body`.
pub fn toggle_todo(body: &str, index: usize) -> Result<String, NoteError> {
    let todos = todo_regex();
    let Some(todo) = todos.find_iter(body).nth(index) else {
        return Err(NoteError::TodoNotFound {
            index,
            found: todos.find_iter(body).count(),
        });
    };

    let replacement = if todo.as_str() == UNCHECKED {
        CHECKED
    } else {
        UNCHECKED
    };

    log::debug!("toggling todo {index} at byte {}", todo.start());
    let mut toggled = String::with_capacity(body.len());
    toggled.push_str(&body[..todo.start()]);
    toggled.push_str(replacement);
    toggled.push_str(&body[todo.end()..]);
    Ok(toggled)
}
