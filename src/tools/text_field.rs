use crate::input::{InputEvent, Key};

/// Result of feeding one event to a [`TextField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFieldOutcome {
    /// The event is not text input; let someone else handle it
    Unhandled,
    /// The text changed or the key was swallowed
    Editing,
    /// Escape: abandon the field
    Previous,
    /// Enter: commit the captured text
    Advance,
}

/// Single-line text capture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    text: String,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle(&mut self, event: &InputEvent) -> TextFieldOutcome {
        match event {
            InputEvent::Text(typed) => {
                self.text.extend(typed.chars().filter(|c| !c.is_control()));
                TextFieldOutcome::Editing
            }
            InputEvent::KeyDown(Key::Backspace) => {
                self.text.pop();
                TextFieldOutcome::Editing
            }
            InputEvent::KeyDown(Key::Escape) => TextFieldOutcome::Previous,
            InputEvent::KeyDown(Key::Enter) => TextFieldOutcome::Advance,
            // printable keys arrive again as Text; swallow the key press
            InputEvent::KeyDown(Key::Char(_)) => TextFieldOutcome::Editing,
            _ => TextFieldOutcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new();
        assert_eq!(field.handle(&InputEvent::text("lev")), TextFieldOutcome::Editing);
        assert_eq!(field.handle(&InputEvent::text("el\t")), TextFieldOutcome::Editing);
        assert_eq!(field.text(), "level");
        assert_eq!(field.handle(&InputEvent::key(Key::Backspace)), TextFieldOutcome::Editing);
        assert_eq!(field.text(), "leve");
    }

    #[test]
    fn test_backspace_on_empty_field() {
        let mut field = TextField::new();
        assert_eq!(field.handle(&InputEvent::key(Key::Backspace)), TextFieldOutcome::Editing);
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_outcomes() {
        let mut field = TextField::new();
        assert_eq!(field.handle(&InputEvent::char('u')), TextFieldOutcome::Editing);
        assert_eq!(field.text(), "");
        assert_eq!(field.handle(&InputEvent::key(Key::Escape)), TextFieldOutcome::Previous);
        assert_eq!(field.handle(&InputEvent::key(Key::Enter)), TextFieldOutcome::Advance);
        assert_eq!(
            field.handle(&InputEvent::pointer_up(PointerButton::Left, 1.0, 1.0)),
            TextFieldOutcome::Unhandled
        );
    }

    #[test]
    fn test_modifier_keys_pass_through() {
        let mut field = TextField::new();
        field.handle(&InputEvent::text("map"));
        for key in [Key::LeftShift, Key::LeftAlt, Key::Other] {
            assert_eq!(field.handle(&InputEvent::key(key)), TextFieldOutcome::Unhandled);
        }
        assert_eq!(field.text(), "map");
    }
}
