use super::Wiring;
use crate::constants::{CATALOG_ID_ATTR, CATALOG_LIST_ID, MENU_BUTTON_ID, OVERLAY_ID};
use crate::dom::EventListener;
use crate::overlay;
use card_core::{ContentId, InteractionEvent};
use wasm_bindgen::JsCast;
use web_sys as web;

pub(super) fn wire(w: &Wiring) -> Vec<EventListener> {
    let mut out = Vec::new();
    if let Some(btn) = w.document.get_element_by_id(MENU_BUTTON_ID) {
        out.push(wire_menu_button(w, &btn));
    } else {
        log::warn!("[menu] missing #{}", MENU_BUTTON_ID);
    }
    if let Some(overlay) = w.document.get_element_by_id(OVERLAY_ID) {
        out.push(wire_backdrop_close(w, &overlay));
    }
    if let Some(list) = w.document.get_element_by_id(CATALOG_LIST_ID) {
        out.push(wire_catalog_click(w, &list));
        out.push(wire_catalog_hover(w, &list, "mouseenter", true));
        out.push(wire_catalog_hover(w, &list, "mouseleave", false));
    } else {
        log::warn!("[menu] missing #{}", CATALOG_LIST_ID);
    }
    out
}

fn dispatch(w: &Wiring, event: InteractionEvent) {
    let result = w.scene.borrow_mut().dispatch(event);
    match result {
        Ok(()) => overlay::sync(&w.document, &w.scene.borrow()),
        Err(e) => log::warn!("[menu] {:?} rejected: {}", event, e),
    }
}

fn wire_menu_button(w: &Wiring, btn: &web::Element) -> EventListener {
    let w2 = w.clone();
    EventListener::new(btn, "click", move |_ev| {
        dispatch(&w2, InteractionEvent::MenuButtonClicked);
    })
}

// A click on the overlay backdrop itself, not on its content, hides it.
fn wire_backdrop_close(w: &Wiring, overlay: &web::Element) -> EventListener {
    let w2 = w.clone();
    let backdrop = overlay.clone();
    EventListener::new(overlay, "click", move |ev: web::Event| {
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .is_some_and(|el| el == backdrop);
        if on_backdrop {
            dispatch(&w2, InteractionEvent::CloseMenu);
        }
    })
}

/// Catalog id of the entry an event landed in, if any.
fn entry_id(ev: &web::Event) -> Option<ContentId> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    let entry = target
        .closest(&format!("[{}]", CATALOG_ID_ATTR))
        .ok()
        .flatten()?;
    let raw = entry.get_attribute(CATALOG_ID_ATTR)?;
    raw.parse::<u32>().ok().map(ContentId)
}

// One delegated listener on the list covers every entry.
fn wire_catalog_click(w: &Wiring, list: &web::Element) -> EventListener {
    let w2 = w.clone();
    EventListener::new(list, "click", move |ev: web::Event| {
        if let Some(id) = entry_id(&ev) {
            dispatch(&w2, InteractionEvent::CatalogSelected(id));
        }
    })
}

fn wire_catalog_hover(
    w: &Wiring,
    list: &web::Element,
    event: &'static str,
    entering: bool,
) -> EventListener {
    let w2 = w.clone();
    EventListener::new(list, event, move |_ev| {
        dispatch(&w2, InteractionEvent::CatalogHover(entering));
    })
}
