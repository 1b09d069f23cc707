//=========================================================================
// Text Field
//=========================================================================
//
// Single-line text input used to capture the player's name.
//
// The stage controller only needs `focus()` and `text()`; everything else
// is how the bundled `TextField` collects typed characters.
//
//=========================================================================

//=== TextInput ===========================================================

/// Text-input collaborator queried at name-submit time.
pub trait TextInput {
    /// Gives the field keyboard focus. Unfocused fields ignore typing.
    fn focus(&mut self);

    /// Removes keyboard focus.
    fn blur(&mut self);

    /// Current contents.
    fn text(&self) -> &str;

    /// Empties the field.
    fn clear(&mut self);

    /// Appends a typed character.
    fn insert(&mut self, c: char);

    /// Deletes the last character.
    fn erase(&mut self);
}

//=== TextField ===========================================================

/// Bounded line editor accepting printable characters only.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    text: String,
    focused: bool,
    max_chars: usize,
}

impl TextField {
    pub const DEFAULT_MAX_CHARS: usize = 16;

    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            focused: false,
            max_chars,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl TextInput for TextField {
    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    fn insert(&mut self, c: char) {
        if !self.focused || c.is_control() {
            return;
        }
        if self.text.chars().count() < self.max_chars {
            self.text.push(c);
        }
    }

    fn erase(&mut self) {
        if self.focused {
            self.text.pop();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
