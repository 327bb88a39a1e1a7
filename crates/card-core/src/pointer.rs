//! Pointer sampling and the input-source seam.
//!
//! The tracker never reaches for a global listener: it is handed an
//! [`InputSource`] and keeps the returned subscription alive for exactly as
//! long as the tracker itself lives.

use crate::constants::{
    CURSOR_HIGHLIGHT_OFFSET_PX, CURSOR_HIGHLIGHT_SIZE_PX, CURSOR_OFFSET_PX, CURSOR_SIZE_PX,
};
use glam::Vec2;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Raw pointer-move event: position and the viewport it was measured in,
/// both in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMove {
    pub screen: Vec2,
    pub viewport: Vec2,
}

impl PointerMove {
    pub fn new(x: f32, y: f32, viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            screen: Vec2::new(x, y),
            viewport: Vec2::new(viewport_w, viewport_h),
        }
    }

    /// Position as a fraction of the viewport, each axis in [0, 1] when the
    /// pointer is inside. A degenerate viewport maps to the center.
    #[inline]
    pub fn uv(&self) -> Vec2 {
        if self.viewport.x > 0.0 && self.viewport.y > 0.0 {
            self.screen / self.viewport
        } else {
            Vec2::splat(0.5)
        }
    }
}

/// Latest pointer position in device-normalized and absolute coordinates.
///
/// `normalized` is in [-1, 1] with +y pointing up, so the top-right corner of
/// the viewport is (1, 1).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub normalized: Vec2,
    pub screen: Vec2,
    viewport: Vec2,
}

impl PointerSample {
    pub fn from_move(ev: &PointerMove) -> Self {
        let centered = ev.uv() - Vec2::splat(0.5);
        Self {
            normalized: Vec2::new(centered.x * 2.0, -centered.y * 2.0),
            screen: ev.screen,
            viewport: ev.viewport,
        }
    }

    /// Offset for content that drifts with the pointer, in pixels.
    /// `range` is the total travel across the viewport.
    pub fn parallax(&self, range: f32) -> Vec2 {
        if self.viewport.x > 0.0 && self.viewport.y > 0.0 {
            (self.screen / self.viewport - Vec2::splat(0.5)) * range
        } else {
            Vec2::ZERO
        }
    }
}

/// A source of pointer-move events.
///
/// Dropping the returned subscription must detach the handler.
pub trait InputSource {
    type Subscription;

    fn subscribe(&self, handler: Box<dyn FnMut(&PointerMove)>) -> Self::Subscription;
}

/// Keeps the most recent [`PointerSample`] from an input source.
pub struct PointerTracker<S: InputSource> {
    latest: Rc<Cell<PointerSample>>,
    _subscription: S::Subscription,
}

impl<S: InputSource> PointerTracker<S> {
    pub fn attach(source: &S) -> Self {
        let latest = Rc::new(Cell::new(PointerSample::default()));
        let sink = latest.clone();
        let subscription = source.subscribe(Box::new(move |ev| {
            sink.set(PointerSample::from_move(ev));
        }));
        Self {
            latest,
            _subscription: subscription,
        }
    }

    #[inline]
    pub fn latest(&self) -> PointerSample {
        self.latest.get()
    }
}

type Handler = Box<dyn FnMut(&PointerMove)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: SmallVec<[(u64, Rc<RefCell<Handler>>); 4]>,
}

/// In-process broadcaster used by host drivers and tests.
#[derive(Clone, Default)]
pub struct LocalInputSource {
    registry: Rc<RefCell<Registry>>,
}

/// Handle returned by [`LocalInputSource::subscribe`]; unsubscribes on drop.
pub struct LocalSubscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for LocalSubscription {
    fn drop(&mut self) {
        if let Some(reg) = self.registry.upgrade() {
            reg.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl LocalInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, ev: PointerMove) {
        // Snapshot so handlers may subscribe or drop subscriptions re-entrantly.
        let handlers: SmallVec<[Rc<RefCell<Handler>>; 4]> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for h in handlers {
            let mut handler = h.borrow_mut();
            (*handler)(&ev);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

impl InputSource for LocalInputSource {
    type Subscription = LocalSubscription;

    fn subscribe(&self, handler: Box<dyn FnMut(&PointerMove)>) -> LocalSubscription {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.handlers.push((id, Rc::new(RefCell::new(handler))));
        LocalSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }
}

/// Size and anchor offset of the on-screen pointer indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPreset {
    pub size_px: f32,
    pub offset_px: f32,
}

impl CursorPreset {
    pub const NORMAL: CursorPreset = CursorPreset {
        size_px: CURSOR_SIZE_PX,
        offset_px: CURSOR_OFFSET_PX,
    };
    pub const HIGHLIGHT: CursorPreset = CursorPreset {
        size_px: CURSOR_HIGHLIGHT_SIZE_PX,
        offset_px: CURSOR_HIGHLIGHT_OFFSET_PX,
    };

    #[inline]
    pub fn for_highlight(highlighting: bool) -> Self {
        if highlighting {
            Self::HIGHLIGHT
        } else {
            Self::NORMAL
        }
    }

    /// Top-left corner that centers the indicator on `screen`.
    #[inline]
    pub fn position(&self, screen: Vec2) -> Vec2 {
        screen - Vec2::splat(self.offset_px)
    }
}
