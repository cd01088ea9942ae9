//! Shared fixtures for integration tests.

use std::collections::VecDeque;
use std::path::PathBuf;

use create_webcomp::flow::Prompter;
use create_webcomp::Result;

/// Installation root shipped with the crate.
pub fn shipped_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(&'static str),
    Confirm(bool),
    Select(usize),
    Cancel,
}

/// A question the flow asked, with the default it offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asked {
    pub message: String,
    pub default: String,
}

/// Answers prompts from a fixed script and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    pub asked: Vec<Asked>,
    pub warnings: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next(&mut self, message: &str, default: String) -> Reply {
        self.asked.push(Asked {
            message: message.to_string(),
            default,
        });
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(
        &mut self,
        message: &str,
        default: &str,
        on_update: &mut dyn FnMut(&str),
    ) -> Result<Option<String>> {
        match self.next(message, default.to_string()) {
            Reply::Text(text) => {
                // Simulate typing: every prefix is an update.
                for end in text.char_indices().map(|(i, c)| i + c.len_utf8()) {
                    on_update(&text[..end]);
                }
                Ok(Some(text.to_string()))
            }
            Reply::Cancel => Ok(None),
            other => panic!("expected a text reply for {message:?}, got {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        match self.next(message, default.to_string()) {
            Reply::Confirm(value) => Ok(Some(value)),
            Reply::Cancel => Ok(None),
            other => panic!("expected a confirm reply for {message:?}, got {other:?}"),
        }
    }

    fn select(
        &mut self,
        message: &str,
        _items: &[String],
        default: usize,
    ) -> Result<Option<usize>> {
        match self.next(message, default.to_string()) {
            Reply::Select(index) => Ok(Some(index)),
            Reply::Cancel => Ok(None),
            other => panic!("expected a select reply for {message:?}, got {other:?}"),
        }
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
