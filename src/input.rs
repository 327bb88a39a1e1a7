use crate::dom::{self, EventListener};
use card_core::{InputSource, PointerMove};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer coordinates of a DOM mouse/pointer event relative to the window.
#[inline]
pub fn pointer_move(ev: &web::MouseEvent, window: &web::Window) -> PointerMove {
    let (w, h) = dom::viewport_size(window);
    PointerMove::new(ev.client_x() as f32, ev.client_y() as f32, w, h)
}

/// `pointermove` events from a DOM target, measured against the window.
///
/// Each subscription is an [`EventListener`]; dropping it removes the DOM
/// listener.
pub struct DomPointerSource {
    target: web::EventTarget,
    window: web::Window,
}

impl DomPointerSource {
    pub fn window(window: &web::Window) -> Self {
        Self {
            target: window.clone().into(),
            window: window.clone(),
        }
    }

    pub fn element(el: &web::Element, window: &web::Window) -> Self {
        Self {
            target: el.clone().into(),
            window: window.clone(),
        }
    }
}

impl InputSource for DomPointerSource {
    type Subscription = EventListener;

    fn subscribe(&self, mut handler: Box<dyn FnMut(&PointerMove)>) -> EventListener {
        let window = self.window.clone();
        EventListener::new(&self.target, "pointermove", move |ev: web::Event| {
            if let Some(me) = ev.dyn_ref::<web::MouseEvent>() {
                handler(&pointer_move(me, &window));
            }
        })
    }
}
