//! Command-line editing for the terminal prompt
//!
//! Holds the text being typed and decides what Enter and Tab mean. Submission
//! and completion results are handed back to the controller, which owns the
//! interpreter.

use crate::domain::command::{self, Completion};

/// Keys the prompt reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Left,
    Right,
    Home,
    End,
    Enter,
    Tab,
}

/// What the controller should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Only the visible line changed (or nothing did)
    Edited,
    /// Interpret this normalized text
    Submit(String),
}

/// Editable prompt line with a caret measured in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
    caret: usize,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    fn byte_index(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replaces the line and moves the caret to the end
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    pub fn handle(&mut self, key: Key) -> LineAction {
        match key {
            Key::Char(ch) => {
                let index = self.byte_index(self.caret);
                self.text.insert(index, ch);
                self.caret += 1;
            }
            Key::Backspace => {
                if self.caret > 0 {
                    let index = self.byte_index(self.caret - 1);
                    self.text.remove(index);
                    self.caret -= 1;
                }
            }
            Key::Left => self.caret = self.caret.saturating_sub(1),
            Key::Right => self.caret = (self.caret + 1).min(self.char_len()),
            Key::Home => self.caret = 0,
            Key::End => self.caret = self.char_len(),
            Key::Enter => {
                let line = command::normalize(&self.text);
                self.clear();
                return LineAction::Submit(line);
            }
            Key::Tab => return self.complete(),
        }
        LineAction::Edited
    }

    /// Tab completion: a unique match replaces the line, several matches
    /// submit the partial text as typed, no match leaves the line alone.
    fn complete(&mut self) -> LineAction {
        match command::complete(&self.text) {
            Completion::Unique(token) => {
                self.set(token);
                LineAction::Edited
            }
            Completion::Ambiguous(_) => LineAction::Submit(command::normalize(&self.text)),
            Completion::NoMatch => LineAction::Edited,
        }
    }
}
