//! Interactive trait for components that handle keyboard input

use crossterm::event::KeyEvent;

/// Whether a key was consumed or should bubble up to the App.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    /// Create from a boolean (true = handled)
    pub fn from_bool(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        Self::from_bool(handled)
    }
}

/// A component that turns key events into its own action type.
///
/// The action tells the App what to do next (sort, open a record, run a
/// query). Keys the component does not want map to an action that converts
/// into [`Handled::No`], so the App can fall back to its own handlers.
pub trait Interactive {
    type Action: Into<Handled>;

    fn handle_key(&mut self, key: KeyEvent) -> Self::Action;

    /// Keybind hints for the status bar while this component has focus.
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_conversion() {
        assert_eq!(Handled::from(true), Handled::Yes);
        assert_eq!(Handled::from_bool(false), Handled::No);
    }
}
