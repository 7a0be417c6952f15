//! Single-line text field: a buffer plus a cursor counted in codepoints.
//!
//! The editor never calls back into its host. Each key returns an
//! [`EditOutcome`] saying whether the text changed and whether the user
//! committed or abandoned the field; the hosting mode decides what that means.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{byte_offset, char_len, word_left, word_right};

/// What the user asked the host to do with the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Submit, carrying the text as it was before the field was cleared.
    /// The host should leave edit mode unless it rejects the text.
    Commit(String),
    /// Escape: the field was cleared and the host should leave edit mode
    Cancel,
}

/// Result of handling one key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditOutcome {
    /// The value changed; read the new one from [`LineEditor::value`]
    pub changed: bool,
    pub action: Option<EditAction>,
}

impl EditOutcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(changed: bool) -> Self {
        EditOutcome {
            changed,
            action: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    value: String,
    /// Codepoint offset, always within `0..=char_len(value)`
    cursor: usize,
    max_length: Option<usize>,
    submit_on_tab: bool,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_submit_on_tab(mut self, submit_on_tab: bool) -> Self {
        self.submit_on_tab = submit_on_tab;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn len(&self) -> usize {
        char_len(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the buffer, cursor at the end
    pub fn set_value(&mut self, text: &str) {
        self.value = text.to_string();
        self.cursor = self.len();
    }

    /// Empty the buffer. Returns whether there was anything to clear.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        had_text
    }

    pub fn handle(&mut self, key: KeyEvent) -> EditOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => {
                let changed = self.clear();
                EditOutcome {
                    changed,
                    action: Some(EditAction::Cancel),
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab if self.submit_on_tab => self.submit(),

            // Word motion
            KeyCode::Left if ctrl || alt => self.move_to(word_left(&self.value, self.cursor)),
            KeyCode::Right if ctrl || alt => self.move_to(word_right(&self.value, self.cursor)),
            KeyCode::Char('b') if alt => self.move_to(word_left(&self.value, self.cursor)),
            KeyCode::Char('f') if alt => self.move_to(word_right(&self.value, self.cursor)),

            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to(self.cursor + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            KeyCode::Char('a') if ctrl => self.move_to(0),
            KeyCode::Char('e') if ctrl => self.move_to(self.len()),

            // Word deletion
            KeyCode::Backspace if ctrl || alt => self.delete_word_backward(),
            KeyCode::Char('w') if ctrl => self.delete_word_backward(),
            KeyCode::Delete if ctrl || alt => self.delete_word_forward(),
            KeyCode::Char('d') if alt => self.delete_word_forward(),

            KeyCode::Backspace => self.backspace(),
            KeyCode::Char('h') if ctrl => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Char('d') if ctrl => self.delete_forward(),
            KeyCode::Char('u') if ctrl => self.delete_range(0, self.cursor, 0),

            KeyCode::Char(c) if is_plain(key.modifiers) => self.insert(c),
            _ => EditOutcome::unchanged(),
        }
    }

    fn submit(&mut self) -> EditOutcome {
        let text = self.value.clone();
        let changed = self.clear();
        EditOutcome {
            changed,
            action: Some(EditAction::Commit(text)),
        }
    }

    fn move_to(&mut self, cursor: usize) -> EditOutcome {
        self.cursor = cursor.min(self.len());
        EditOutcome::unchanged()
    }

    fn insert(&mut self, c: char) -> EditOutcome {
        if self.max_length.is_some_and(|max| self.len() >= max) {
            return EditOutcome::unchanged();
        }
        let at = byte_offset(&self.value, self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        EditOutcome::changed(true)
    }

    fn backspace(&mut self) -> EditOutcome {
        if self.cursor == 0 {
            return EditOutcome::unchanged();
        }
        self.delete_range(self.cursor - 1, self.cursor, self.cursor - 1)
    }

    fn delete_forward(&mut self) -> EditOutcome {
        self.delete_range(self.cursor, self.cursor + 1, self.cursor)
    }

    fn delete_word_backward(&mut self) -> EditOutcome {
        let start = word_left(&self.value, self.cursor);
        self.delete_range(start, self.cursor, start)
    }

    fn delete_word_forward(&mut self) -> EditOutcome {
        let end = word_right(&self.value, self.cursor);
        self.delete_range(self.cursor, end, self.cursor)
    }

    /// Remove codepoints `start..end` and put the cursor at `new_cursor`.
    fn delete_range(&mut self, start: usize, end: usize, new_cursor: usize) -> EditOutcome {
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        if start >= end {
            return EditOutcome::unchanged();
        }
        let from = byte_offset(&self.value, start);
        let to = byte_offset(&self.value, end);
        self.value.replace_range(from..to, "");
        self.cursor = new_cursor.min(self.len());
        EditOutcome::changed(true)
    }
}

/// Keys that type a character: no modifier, or Shift alone (capitals).
fn is_plain(modifiers: KeyModifiers) -> bool {
    (modifiers - KeyModifiers::SHIFT).is_empty()
}
