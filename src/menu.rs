//! Visibility state of the mobile navigation menu.
//!
//! Each rendered page shell owns one [`MenuToggle`]. On phones the menu is
//! hidden until the hamburger control flips it; on larger screens the
//! state has no visible effect.

/// The two states of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Collapsed,
    Expanded,
}

impl MenuState {
    pub fn flipped(self) -> Self {
        match self {
            MenuState::Collapsed => MenuState::Expanded,
            MenuState::Expanded => MenuState::Collapsed,
        }
    }

    /// Value for the `aria-expanded` attribute.
    pub fn aria_expanded(self) -> &'static str {
        match self {
            MenuState::Collapsed => "false",
            MenuState::Expanded => "true",
        }
    }
}

/// Collapsed ⇄ expanded flag for one page shell. Starts collapsed.
#[derive(Debug, Clone, Default)]
pub struct MenuToggle {
    state: MenuState,
}

impl MenuToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == MenuState::Expanded
    }

    /// Flip the state. Always legal.
    pub fn toggle(&mut self) -> MenuState {
        self.state = self.state.flipped();
        self.state
    }
}
