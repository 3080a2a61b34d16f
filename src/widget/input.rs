//! Keyboard handling for the single text-entry field.

/// A key event delivered to the input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Enter { shift: bool },
    Char(char),
    Backspace,
}

/// What a key press did to the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Plain Enter: submit the buffer. No newline is inserted.
    Submit,
    Edited,
    /// The field is disabled while a request is pending.
    Ignored,
}

/// Apply `key` to `buffer`. `locked` disables editing but not submit; the
/// submit itself is then rejected by the pending gate.
pub fn apply_key(buffer: &mut String, key: KeyPress, locked: bool) -> KeyAction {
    match key {
        KeyPress::Enter { shift: false } => KeyAction::Submit,
        _ if locked => KeyAction::Ignored,
        KeyPress::Enter { shift: true } => {
            buffer.push('\n');
            KeyAction::Edited
        }
        KeyPress::Char(c) => {
            buffer.push(c);
            KeyAction::Edited
        }
        KeyPress::Backspace => {
            if buffer.pop().is_some() { KeyAction::Edited } else { KeyAction::Ignored }
        }
    }
}
