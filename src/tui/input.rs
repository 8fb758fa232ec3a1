//! Text editing state for the add-task field and the notes editor.
//!
//! Cursors are byte offsets that always sit on a char boundary.

fn prev_boundary(s: &str, idx: usize) -> usize {
    s[..idx].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_boundary(s: &str, idx: usize) -> usize {
    s[idx..].chars().next().map(|c| idx + c.len_utf8()).unwrap_or(idx)
}

/// A single-line text input with a cursor.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let start = prev_boundary(&self.value, self.cursor);
            self.value.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.len() {
            let end = next_boundary(&self.value, self.cursor);
            self.value.replace_range(self.cursor..end, "");
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = prev_boundary(&self.value, self.cursor);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = next_boundary(&self.value, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Number of chars left of the cursor, for terminal cursor placement.
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// Take the current text, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }
}

/// A multi-line editor. Lines are separated by `\n` inside `value`.
#[derive(Clone, Debug, Default)]
pub struct TextArea {
    pub value: String,
    pub cursor: usize,
}

impl TextArea {
    /// Start editing `value` with the cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Returns false when there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = prev_boundary(&self.value, self.cursor);
        self.value.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    /// Returns false when there was nothing to delete.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        let end = next_boundary(&self.value, self.cursor);
        self.value.replace_range(self.cursor..end, "");
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_boundary(&self.value, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = next_boundary(&self.value, self.cursor);
    }

    fn line_start(&self, idx: usize) -> usize {
        self.value[..idx].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, idx: usize) -> usize {
        self.value[idx..].find('\n').map(|i| idx + i).unwrap_or(self.value.len())
    }

    /// Byte offset of char column `col` in the line starting at `start`, clamped to the line end.
    fn offset_in_line(&self, start: usize, col: usize) -> usize {
        let end = self.line_end(start);
        self.value[start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let (_, col) = self.cursor_line_col();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, col);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.value.len() {
            self.cursor = end;
            return;
        }
        let (_, col) = self.cursor_line_col();
        self.cursor = self.offset_in_line(end + 1, col);
    }

    /// Zero-based (line, column) of the cursor, counting chars.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let col = before[self.line_start(self.cursor)..].chars().count();
        (line, col)
    }
}
