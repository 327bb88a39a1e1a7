use crate::constants::*;
use card_core::{menu_label, CardScene, Catalog, CursorPreset};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fill the catalog list with one entry per item, in catalog order.
pub fn build_catalog(document: &web::Document, catalog: &Catalog) -> anyhow::Result<()> {
    let list = document
        .get_element_by_id(CATALOG_LIST_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CATALOG_LIST_ID))?;
    list.set_inner_html("");
    for item in catalog.items() {
        let entry = document
            .create_element("p")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        entry.set_text_content(Some(&item.title));
        _ = entry.set_attribute(CATALOG_ID_ATTR, &item.id.0.to_string());
        _ = list.append_child(&entry);
    }
    Ok(())
}

#[inline]
fn set_open(document: &web::Document, open: bool) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let cl = el.class_list();
        if open {
            _ = cl.add_1(OVERLAY_OPEN_CLASS);
        } else {
            _ = cl.remove_1(OVERLAY_OPEN_CLASS);
        }
    }
}

/// Bring the overlay DOM in line with the scene's read model.
pub fn sync(document: &web::Document, scene: &CardScene) {
    let state = scene.interaction();
    set_open(document, state.menu_open);
    if let Some(btn) = document.get_element_by_id(MENU_BUTTON_ID) {
        btn.set_text_content(Some(menu_label(state.menu_open)));
    }
    if let Some(title) = document.get_element_by_id(TITLE_ID) {
        let text = &scene.active_item().title;
        if title.text_content().as_deref() != Some(text.as_str()) {
            title.set_text_content(Some(text));
        }
    }
    set_cursor_class(document, scene.cursor() == CursorPreset::HIGHLIGHT);
}

#[inline]
fn set_cursor_class(document: &web::Document, highlight: bool) {
    if let Some(el) = document.get_element_by_id(CURSOR_ID) {
        let cl = el.class_list();
        if highlight {
            _ = cl.add_1(CURSOR_HOVER_CLASS);
        } else {
            _ = cl.remove_1(CURSOR_HOVER_CLASS);
        }
    }
}

fn set_transform(el: &web::Element, x: f32, y: f32, z3d: bool) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        let value = if z3d {
            format!("translate3d({:.1}px, {:.1}px, 0)", x, y)
        } else {
            format!("translate({:.1}px, {:.1}px)", x, y)
        };
        _ = html.style().set_property("transform", &value);
    }
}

/// Move the pointer indicator so it stays centered on the pointer.
pub fn place_cursor(document: &web::Document, preset: CursorPreset, screen: Vec2) {
    if let Some(el) = document.get_element_by_id(CURSOR_ID) {
        let p = preset.position(screen);
        set_transform(&el, p.x, p.y, true);
    }
}

/// Shift the title by the pointer parallax offset.
pub fn place_title(document: &web::Document, offset: Vec2) {
    if let Some(el) = document.get_element_by_id(TITLE_ID) {
        set_transform(&el, offset.x, offset.y, false);
    }
}
