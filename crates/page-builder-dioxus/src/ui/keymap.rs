use dioxus::prelude::{Key, Modifiers};
use page_builder_engine::{Direction, EditCmd, Mark};

/// Map a keydown in the edit overlay to an editing command. `None` leaves
/// the key to the browser.
pub fn command_for(key: &Key, modifiers: Modifiers) -> Option<EditCmd> {
    let shortcut = modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META);
    let extend = modifiers.contains(Modifiers::SHIFT);
    let moving = |direction| Some(EditCmd::Move { direction, extend });

    match key {
        Key::Character(text) if shortcut => match text.to_lowercase().as_str() {
            "i" => Some(EditCmd::ToggleMark(Mark::Italic)),
            "u" => Some(EditCmd::ToggleMark(Mark::UnderScore)),
            "a" => Some(EditCmd::SelectAll),
            _ => None,
        },
        Key::Character(text) => Some(EditCmd::InsertText(text.clone())),
        Key::Enter => Some(EditCmd::SplitBlock),
        Key::Backspace => Some(EditCmd::DeleteBackward),
        Key::Delete => Some(EditCmd::DeleteForward),
        Key::ArrowLeft => moving(Direction::Left),
        Key::ArrowRight => moving(Direction::Right),
        Key::ArrowUp => moving(Direction::Up),
        Key::ArrowDown => moving(Direction::Down),
        Key::Home => moving(Direction::LineStart),
        Key::End => moving(Direction::LineEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typing_inserts_text() {
        assert_eq!(
            command_for(&Key::Character("é".to_string()), Modifiers::SHIFT),
            Some(EditCmd::InsertText("é".to_string()))
        );
    }

    #[test]
    fn test_shortcuts_toggle_marks() {
        assert_eq!(
            command_for(&Key::Character("i".to_string()), Modifiers::CONTROL),
            Some(EditCmd::ToggleMark(Mark::Italic))
        );
        assert_eq!(
            command_for(&Key::Character("U".to_string()), Modifiers::META | Modifiers::SHIFT),
            Some(EditCmd::ToggleMark(Mark::UnderScore))
        );
        assert_eq!(
            command_for(&Key::Character("c".to_string()), Modifiers::CONTROL),
            None
        );
    }

    #[test]
    fn test_shift_arrows_extend_selection() {
        assert_eq!(
            command_for(&Key::ArrowLeft, Modifiers::SHIFT),
            Some(EditCmd::Move {
                direction: Direction::Left,
                extend: true,
            })
        );
        assert_eq!(
            command_for(&Key::End, Modifiers::empty()),
            Some(EditCmd::Move {
                direction: Direction::LineEnd,
                extend: false,
            })
        );
    }

    #[test]
    fn test_unhandled_keys_pass_through() {
        assert_eq!(command_for(&Key::Tab, Modifiers::empty()), None);
        assert_eq!(command_for(&Key::Escape, Modifiers::empty()), None);
    }
}
