use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of feeding a key to a [`TextField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// The text or cursor changed
    Changed,
    /// Submit was triggered (Enter pressed)
    Submit,
    /// Cancel was triggered (Esc pressed)
    Cancel,
    /// Key was not handled
    Ignored,
}

/// Single-line text input with a character-based cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    chars: Vec<char>,
    cursor: usize,
}

impl TextField {
    /// A field holding `value` with the cursor at the end.
    pub fn with_value(value: &str) -> Self {
        let chars: Vec<char> = value.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Text before the cursor, the character under it (a space at the end)
    /// and the text after it.
    pub fn split_at_cursor(&self) -> (String, char, String) {
        let before = self.chars[..self.cursor].iter().collect();
        let under = self.chars.get(self.cursor).copied().unwrap_or(' ');
        let after = self
            .chars
            .get(self.cursor + 1..)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default();
        (before, under, after)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.chars.len(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.chars.len(),
            KeyCode::Char('u') if ctrl => {
                // Clear line before cursor
                self.chars.drain(..self.cursor);
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => {
                // Clear line after cursor
                self.chars.truncate(self.cursor);
            }
            KeyCode::Char('w') if ctrl => {
                // Delete word before cursor
                let mut start = self.cursor;
                while start > 0 && self.chars[start - 1] == ' ' {
                    start -= 1;
                }
                while start > 0 && self.chars[start - 1] != ' ' {
                    start -= 1;
                }
                self.chars.drain(start..self.cursor);
                self.cursor = start;
            }
            KeyCode::Char(_) if ctrl => return InputResult::Ignored,
            KeyCode::Char(c) => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
            }
            _ => return InputResult::Ignored,
        }

        InputResult::Changed
    }
}
