use super::Wiring;
use crate::dom::EventListener;
use crate::input::{self, DomPointerSource};
use crate::overlay;
use card_core::{InputSource, InteractionEvent, PointerSample};
use wasm_bindgen::JsCast;
use web_sys as web;

pub(super) fn wire(w: &Wiring) -> Vec<EventListener> {
    vec![
        wire_hover(w),
        wire_leave(w),
        wire_click(w),
        wire_cursor(w),
    ]
}

// Hover is picked from moves over the canvas only, so an open overlay on top
// of it leaves the hover state as it was.
fn wire_hover(w: &Wiring) -> EventListener {
    let w2 = w.clone();
    DomPointerSource::element(&w.canvas, &w.window).subscribe(Box::new(move |ev| {
        let over = w2.scene.borrow().hit_test(ev);
        let changed = {
            let mut scene = w2.scene.borrow_mut();
            let before = scene.interaction();
            scene.pointer_over_card(over);
            before != scene.interaction()
        };
        if changed {
            overlay::sync(&w2.document, &w2.scene.borrow());
        }
    }))
}

fn wire_leave(w: &Wiring) -> EventListener {
    let w2 = w.clone();
    EventListener::new(&w.canvas, "pointerleave", move |_ev| {
        w2.scene.borrow_mut().pointer_over_card(false);
        overlay::sync(&w2.document, &w2.scene.borrow());
    })
}

fn wire_click(w: &Wiring) -> EventListener {
    let w2 = w.clone();
    EventListener::new(&w.canvas, "click", move |ev: web::Event| {
        let Some(me) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pm = input::pointer_move(me, &w2.window);
        let mut scene = w2.scene.borrow_mut();
        if !scene.hit_test(&pm) {
            return;
        }
        // Card clicks never carry a catalog id.
        _ = scene.dispatch(InteractionEvent::CardClicked);
        log::info!(
            "[pointer] card {}",
            if scene.interaction().expanded {
                "expanded"
            } else {
                "collapsed"
            }
        );
    })
}

// The cursor indicator and the title parallax follow the pointer anywhere in
// the window.
fn wire_cursor(w: &Wiring) -> EventListener {
    let w2 = w.clone();
    DomPointerSource::window(&w.window).subscribe(Box::new(move |ev| {
        let scene = w2.scene.borrow();
        let sample = PointerSample::from_move(ev);
        overlay::place_cursor(&w2.document, scene.cursor(), sample.screen);
        overlay::place_title(
            &w2.document,
            sample.parallax(scene.tuning().parallax_range_px),
        );
    }))
}
