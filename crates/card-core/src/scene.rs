//! The card scene controller.
//!
//! `CardScene` is the write API for interaction events and the read model for
//! presentation code. A transition that touches several pieces of state
//! (selecting a catalog entry closes the menu) is applied inside one
//! `dispatch` call, so no caller can observe it half-done.

use crate::animation::{AnimationState, CardFrame, FrameInput, TextureRef};
use crate::camera::{card_hit, Camera};
use crate::catalog::{Catalog, ContentItem, Selection};
use crate::config::Tuning;
use crate::error::SelectionError;
use crate::interaction::{InteractionEvent, InteractionState, Transition};
use crate::pointer::{CursorPreset, PointerMove, PointerSample};

pub struct CardScene {
    tuning: Tuning,
    camera: Camera,
    state: InteractionState,
    selection: Selection,
    animation: AnimationState,
    last_frame: CardFrame,
    cursor_highlight: bool,
}

impl CardScene {
    pub fn new(catalog: Catalog, tuning: Tuning) -> Self {
        let animation = AnimationState::new(&tuning);
        let selection = Selection::new(catalog);
        let mut last_frame = CardFrame {
            scale: tuning.collapsed_scale,
            ..CardFrame::default()
        };
        last_frame.uniforms.texture = TextureRef {
            content: Some(selection.active().id),
            revision: selection.revision(),
        };
        Self {
            tuning,
            camera: Camera::default(),
            state: InteractionState::default(),
            selection,
            animation,
            last_frame,
            cursor_highlight: false,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    pub fn interaction(&self) -> InteractionState {
        self.state
    }

    pub fn active_item(&self) -> &ContentItem {
        self.selection.active()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cursor(&self) -> CursorPreset {
        CursorPreset::for_highlight(self.cursor_highlight)
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn last_frame(&self) -> &CardFrame {
        &self.last_frame
    }

    /// Apply one interaction event. Catalog selections are ignored while the
    /// menu is closed; with the menu open an unknown id is rejected before
    /// any state changes.
    pub fn dispatch(&mut self, event: InteractionEvent) -> Result<(), SelectionError> {
        if let InteractionEvent::CatalogSelected(id) = event {
            if self.state.menu_open && self.selection.catalog().get(id).is_none() {
                return Err(SelectionError::UnknownItem(id));
            }
        }
        let before = self.state;
        match self.state.apply(&event) {
            Transition::None => {}
            Transition::Select(id) => {
                self.selection.select(id)?;
            }
            Transition::Highlight(on) => self.cursor_highlight = on,
        }
        if before != self.state {
            log::debug!("[interaction] {:?} -> {:?}", event, self.state);
        }
        Ok(())
    }

    /// Edge-trigger hover from a hit-test result; repeated values are ignored.
    pub fn pointer_over_card(&mut self, over: bool) {
        if over == self.state.hovering {
            return;
        }
        let event = if over {
            InteractionEvent::PointerEnterCard
        } else {
            InteractionEvent::PointerLeaveCard
        };
        // Hover events never touch the selection.
        _ = self.dispatch(event);
    }

    /// Whether a pointer position lands on the card as it was last drawn.
    pub fn hit_test(&self, ev: &PointerMove) -> bool {
        let ray = self.camera.screen_ray(ev.uv());
        card_hit(ray, self.last_frame.model_matrix()).is_some()
    }

    /// Run the per-frame update and remember its output.
    pub fn frame(&mut self, pointer: PointerSample, elapsed: f32, delta: f32) -> &CardFrame {
        let input = FrameInput {
            pointer,
            interaction: self.state,
            elapsed,
            delta,
            texture: TextureRef {
                content: Some(self.selection.active().id),
                revision: self.selection.revision(),
            },
        };
        let (next, frame) = self.animation.advance(&input, &self.tuning);
        self.animation = next;
        self.last_frame = frame;
        &self.last_frame
    }
}
