use crate::collection::TAB_ALL;
use crate::compose::ComposedLists;
use crate::model::ListItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    MoveFocusUp,
    MoveFocusDown,
    PrevTab,
    NextTab,
    Activate,
    QueryChanged,
    CollectionRemoved(String),
    SelectTab(String),
}

impl NavEvent {
    /// Maps a key code (`ArrowUp`, `Tab`, `Enter`, ...) to a navigation event.
    pub fn from_key(code: &str, shift: bool) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "arrowup" | "up" => Some(Self::MoveFocusUp),
            "arrowdown" | "down" => Some(Self::MoveFocusDown),
            "arrowleft" | "left" => Some(Self::PrevTab),
            "arrowright" | "right" => Some(Self::NextTab),
            "tab" if shift => Some(Self::PrevTab),
            "tab" => Some(Self::NextTab),
            "enter" | "return" => Some(Self::Activate),
            _ => None,
        }
    }
}

/// Result of feeding one event to the navigator. `Ignored` leaves the host's
/// default key handling in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Handled,
    Activate(ListItem),
}

impl Outcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Active tab plus focused row. `focus` always indexes into the active tab's
/// list, or is 0 when that list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current_tab: String,
    focus: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current_tab: TAB_ALL.to_string(),
            focus: 0,
        }
    }
}

impl Navigator {
    pub fn new(lists: &ComposedLists) -> Self {
        let current_tab = lists
            .tabs()
            .first()
            .map(|tab| tab.name.clone())
            .unwrap_or_else(|| TAB_ALL.to_string());
        Self {
            current_tab,
            focus: 0,
        }
    }

    pub fn current_tab(&self) -> &str {
        &self.current_tab
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_item<'a>(&self, lists: &'a ComposedLists) -> Option<&'a ListItem> {
        lists.get(&self.current_tab)?.get(self.focus)
    }

    pub fn handle(&mut self, event: NavEvent, lists: &ComposedLists) -> Outcome {
        // Tab cycling resolves a vanished tab on its own: next goes to the
        // first tab, previous to the last.
        if !matches!(event, NavEvent::PrevTab | NavEvent::NextTab) {
            self.fall_back_if_stale(lists);
        }

        match event {
            NavEvent::MoveFocusUp => {
                if self.focus > 0 {
                    self.focus -= 1;
                    return Outcome::Handled;
                }
                Outcome::Ignored
            }
            NavEvent::MoveFocusDown => {
                if self.focus + 1 < lists.len_of(&self.current_tab) {
                    self.focus += 1;
                    return Outcome::Handled;
                }
                Outcome::Ignored
            }
            NavEvent::PrevTab => self.move_tab(lists, false),
            NavEvent::NextTab => self.move_tab(lists, true),
            NavEvent::Activate => match self.focused_item(lists) {
                Some(item) => Outcome::Activate(item.clone()),
                None => Outcome::Ignored,
            },
            NavEvent::QueryChanged => {
                self.focus = 0;
                Outcome::Handled
            }
            NavEvent::CollectionRemoved(name) => {
                if name == self.current_tab {
                    return self.move_tab(lists, false);
                }
                Outcome::Ignored
            }
            NavEvent::SelectTab(name) => {
                if lists.position(&name).is_none() {
                    return Outcome::Ignored;
                }
                self.set_tab(name, lists);
                Outcome::Handled
            }
        }
    }

    /// Re-establishes the focus invariant against freshly composed lists.
    pub fn reconcile(&mut self, lists: &ComposedLists) {
        self.fall_back_if_stale(lists);
        self.focus = clamp_focus(self.focus, lists.len_of(&self.current_tab));
    }

    fn move_tab(&mut self, lists: &ComposedLists, forward: bool) -> Outcome {
        let count = lists.tabs().len();
        if count == 0 {
            return Outcome::Ignored;
        }

        let index = lists.position(&self.current_tab);
        let next = match (forward, index) {
            (true, Some(index)) => (index + 1) % count,
            (true, None) => 0,
            (false, Some(index)) if index > 0 => index - 1,
            (false, _) => count - 1,
        };
        let name = lists.tabs()[next].name.clone();
        self.set_tab(name, lists);
        Outcome::Handled
    }

    fn set_tab(&mut self, name: String, lists: &ComposedLists) {
        self.focus = clamp_focus(self.focus, lists.len_of(&name));
        self.current_tab = name;
    }

    fn fall_back_if_stale(&mut self, lists: &ComposedLists) {
        if lists.position(&self.current_tab).is_some() {
            return;
        }
        if let Some(first) = lists.tabs().first() {
            tracing::debug!(stale = %self.current_tab, fallback = %first.name, "active tab vanished");
            let name = first.name.clone();
            self.set_tab(name, lists);
        }
    }
}

fn clamp_focus(focus: usize, len: usize) -> usize {
    focus.min(len.saturating_sub(1))
}
