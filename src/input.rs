use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    ToggleSegmentOrder, // o: start-extent order vs. pvdisplay order
    ReversePvOrder,     // r: flip timeline rows
    CycleTheme,
    ShowHelp,
    Back,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation — arrow keys and vim jk
        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::ScrollUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::ScrollDown,
        (KeyCode::PageUp,   _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpTop,
        (KeyCode::Char('G'), _) | (KeyCode::End,  _) => Action::JumpBottom,

        (KeyCode::Char('o'), _) => Action::ToggleSegmentOrder,
        (KeyCode::Char('r'), _) => Action::ReversePvOrder,
        (KeyCode::Char('t'), _) => Action::CycleTheme,

        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)   => Action::ShowHelp,
        (KeyCode::Esc, _)      => Action::Back,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

    #[test]
    fn maps_keys() {
        assert_eq!(handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(handle_key(key(KeyCode::Char('j'))), Action::ScrollDown);
        assert_eq!(handle_key(key(KeyCode::Char('o'))), Action::ToggleSegmentOrder);
        assert_eq!(handle_key(key(KeyCode::F(1))), Action::ShowHelp);
        assert_eq!(handle_key(key(KeyCode::Char('z'))), Action::None);
    }
}
