// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Hand the key to the component the modal hosts
    Forward,
}

/// Available modal types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Filter form as a drawer over the list (narrow terminals)
    Filter,
}

impl Modal {
    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            // Typing goes to the form, so only Esc is reserved
            Modal::Filter => match key {
                KeyCode::Esc => ModalAction::Close,
                _ => ModalAction::Forward,
            },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Modal::Help => " 快捷键 ",
            Modal::Filter => " 筛选 ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_closes_on_its_own_key() {
        assert_eq!(Modal::Help.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(Modal::Help.handle_input(KeyCode::Char('x')), ModalAction::None);
    }

    #[test]
    fn filter_drawer_forwards_typing() {
        assert_eq!(Modal::Filter.handle_input(KeyCode::Char('q')), ModalAction::Forward);
        assert_eq!(Modal::Filter.handle_input(KeyCode::Esc), ModalAction::Close);
    }
}
