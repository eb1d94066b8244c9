//! Single-line text field used by the symbol filter and date inputs.

/// State for a text input field.
///
/// The cursor counts characters, not bytes, so editing never splits a
/// multi-byte character.
#[derive(Clone, Debug)]
pub struct TextInput {
    content: String,
    /// Cursor position (character index, `0..=len`).
    cursor: usize,
    max_chars: usize,
    accepts: fn(char) -> bool,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    /// Creates an empty input that accepts any printable character.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            max_chars: 64,
            accepts: |c| !c.is_control(),
        }
    }

    /// An input for `YYYY-MM-DD` dates: digits and dashes, ten characters.
    pub fn date() -> Self {
        Self {
            max_chars: 10,
            accepts: |c| c.is_ascii_digit() || c == '-',
            ..Self::new()
        }
    }

    /// An input for filtering symbols: ASCII alphanumerics only.
    pub fn symbol_filter() -> Self {
        Self {
            max_chars: 20,
            accepts: |c| c.is_ascii_alphanumeric(),
            ..Self::new()
        }
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Inserts a character at the cursor position.
    ///
    /// Returns `false` if the character is rejected or the field is full.
    pub fn insert(&mut self, c: char) -> bool {
        if !(self.accepts)(c) || self.char_count() >= self.max_chars {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(mut input: TextInput, text: &str) -> TextInput {
        for c in text.chars() {
            input.insert(c);
        }
        input
    }

    #[test]
    fn date_input_rejects_letters_and_overflow() {
        let input = typed(TextInput::date(), "2024-01-15x99");
        assert_eq!(input.as_str(), "2024-01-15");
        assert_eq!(input.cursor(), 10);
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = typed(TextInput::new(), "BTUSDT");
        input.move_home();
        input.move_right();
        input.move_right();
        input.insert('C');
        assert_eq!(input.as_str(), "BTCUSDT");

        input.backspace();
        input.delete();
        assert_eq!(input.as_str(), "BTSDT");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn cursor_is_character_based() {
        let mut input = typed(TextInput::new(), "é€x");
        input.move_end();
        input.backspace();
        input.backspace();
        assert_eq!(input.as_str(), "é");
        input.move_home();
        input.delete();
        assert!(input.is_empty());
    }

    #[test]
    fn symbol_filter_accepts_alphanumerics_only() {
        let input = typed(TextInput::symbol_filter(), "eth/usdt 1");
        assert_eq!(input.as_str(), "ethusdt1");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut input = typed(TextInput::date(), "2024");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
