//! Discrete interaction state: hover, expanded, menu.
//!
//! Transitions are edge-triggered by input events; nothing here is polled per
//! frame. The menu flag and the card flags are independent axes.

use crate::catalog::ContentId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovering: bool,
    pub expanded: bool,
    pub menu_open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerEnterCard,
    PointerLeaveCard,
    CardClicked,
    MenuButtonClicked,
    /// Show the overlay; a no-op if it is already shown.
    OpenMenu,
    /// Hide the overlay; a no-op if it is already hidden.
    CloseMenu,
    CatalogSelected(ContentId),
    /// Pointer entered or left the catalog list (cursor highlight only).
    CatalogHover(bool),
}

/// Side effect requested by a transition, applied by the owner of the
/// selection within the same call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    Select(ContentId),
    Highlight(bool),
}

impl InteractionState {
    pub fn apply(&mut self, event: &InteractionEvent) -> Transition {
        match *event {
            InteractionEvent::PointerEnterCard => {
                self.hovering = true;
                Transition::None
            }
            InteractionEvent::PointerLeaveCard => {
                self.hovering = false;
                Transition::None
            }
            InteractionEvent::CardClicked => {
                self.expanded = !self.expanded;
                Transition::None
            }
            InteractionEvent::MenuButtonClicked => {
                self.menu_open = !self.menu_open;
                Transition::None
            }
            InteractionEvent::OpenMenu => {
                self.menu_open = true;
                Transition::None
            }
            InteractionEvent::CloseMenu => {
                self.menu_open = false;
                Transition::None
            }
            InteractionEvent::CatalogSelected(id) => {
                // The catalog is only clickable while the overlay is shown.
                if !self.menu_open {
                    return Transition::None;
                }
                self.menu_open = false;
                Transition::Select(id)
            }
            InteractionEvent::CatalogHover(on) => Transition::Highlight(on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_toggle_keeps_card_flags() {
        let mut s = InteractionState {
            hovering: true,
            expanded: true,
            menu_open: false,
        };
        s.apply(&InteractionEvent::MenuButtonClicked);
        assert!(s.menu_open && s.hovering && s.expanded);
        s.apply(&InteractionEvent::MenuButtonClicked);
        assert!(!s.menu_open && s.hovering && s.expanded);
    }

    #[test]
    fn explicit_open_close_are_idempotent() {
        let mut s = InteractionState {
            hovering: true,
            expanded: false,
            menu_open: false,
        };
        for _ in 0..2 {
            assert_eq!(s.apply(&InteractionEvent::OpenMenu), Transition::None);
            assert!(s.menu_open && s.hovering && !s.expanded);
        }
        for _ in 0..2 {
            assert_eq!(s.apply(&InteractionEvent::CloseMenu), Transition::None);
            assert!(!s.menu_open && s.hovering && !s.expanded);
        }
    }

    #[test]
    fn selection_ignored_while_menu_closed() {
        let mut s = InteractionState::default();
        let t = s.apply(&InteractionEvent::CatalogSelected(ContentId(2)));
        assert_eq!(t, Transition::None);
        assert_eq!(s, InteractionState::default());
    }

    #[test]
    fn last_hover_edge_wins() {
        let mut s = InteractionState::default();
        for ev in [
            InteractionEvent::PointerEnterCard,
            InteractionEvent::PointerLeaveCard,
            InteractionEvent::PointerEnterCard,
        ] {
            s.apply(&ev);
        }
        assert!(s.hovering);
    }
}
