//=========================================================================
// Menus
//=========================================================================
//
// Fixed item lists with a wrapping cursor. Activating an item yields a
// `MenuCommand`; the stage controller turns that into a transition.
//
//=========================================================================

//=== MenuCommand =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    NewGame,
    Ratings,
    Continue,
    MainMenu,
    Exit,
}

//=== MenuItem ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub command: MenuCommand,
}

const fn item(label: &'static str, command: MenuCommand) -> MenuItem {
    MenuItem { label, command }
}

pub const MAIN_ITEMS: &[MenuItem] = &[
    item("New game", MenuCommand::NewGame),
    item("Player ratings", MenuCommand::Ratings),
    item("Exit", MenuCommand::Exit),
];

pub const PAUSE_ITEMS: &[MenuItem] = &[
    item("Continue game", MenuCommand::Continue),
    item("Go back to the main menu", MenuCommand::MainMenu),
    item("Exit", MenuCommand::Exit),
];

//=== Menu ================================================================

/// An item list and the focused index. The cursor survives re-entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: &'static [MenuItem],
    selected: usize,
}

impl Menu {
    pub fn new(items: &'static [MenuItem]) -> Self {
        Self { items, selected: 0 }
    }

    pub fn main() -> Self {
        Self::new(MAIN_ITEMS)
    }

    pub fn pause() -> Self {
        Self::new(PAUSE_ITEMS)
    }

    /// Moves focus down, wrapping to the first item.
    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Moves focus up, wrapping to the last item.
    pub fn previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    /// Command of the focused item.
    pub fn confirm(&self) -> Option<MenuCommand> {
        self.items.get(self.selected).map(|item| item.command)
    }

    pub fn items(&self) -> &'static [MenuItem] {
        self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
