//! Host actions produced from input.
//!
//! ```text
//! Key/Resize/Tick → Action → Panel
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Name of the one action the widget exposes to its host.
pub const RELOAD_ACTION: &str = "reload";

/// What the host loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Action {
    /// Invoke a named widget action.
    Invoke(&'static str),

    /// Ask the widget for a new frame.
    Redraw,

    /// Advance the animation clock.
    Tick,

    /// Leave the host loop.
    Quit,

    /// Nothing to do.
    #[default]
    None,
}

impl Action {
    /// Maps a key press to an action.
    ///
    /// | Key | Action |
    /// |---|---|
    /// | `r` | `Invoke("reload")` |
    /// | `q`, `Esc`, `Ctrl-C` | `Quit` |
    ///
    /// # Examples
    ///
    /// ```
    /// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    /// use cs_panel::Action;
    ///
    /// let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
    /// assert_eq!(Action::from_key(key), Action::Invoke("reload"));
    /// ```
    #[must_use]
    pub fn from_key(key: KeyEvent) -> Self {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Self::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            KeyCode::Char('r' | 'R') => Self::Invoke(RELOAD_ACTION),
            _ => Self::None,
        }
    }

    /// Returns `true` if the panel should be redrawn after this action.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::None | Self::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(Action::from_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(Action::from_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_reload_key() {
        assert_eq!(
            Action::from_key(key(KeyCode::Char('r'))),
            Action::Invoke(RELOAD_ACTION)
        );
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert_eq!(Action::from_key(key(KeyCode::Char('c'))), Action::None);
        assert_eq!(Action::from_key(key(KeyCode::Enter)), Action::None);
    }

    #[test]
    fn test_needs_render() {
        assert!(Action::Redraw.needs_render());
        assert!(Action::Tick.needs_render());
        assert!(Action::Invoke(RELOAD_ACTION).needs_render());
        assert!(!Action::None.needs_render());
        assert!(!Action::Quit.needs_render());
        assert_eq!(Action::default(), Action::None);
    }
}
