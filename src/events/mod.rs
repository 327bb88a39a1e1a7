//! DOM listeners that feed the card scene.
//!
//! Every listener is returned as an [`EventListener`] so the frame context can
//! own it; dropping the context detaches them all.

use crate::dom::EventListener;
use card_core::CardScene;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod menu;
mod pointer;

#[derive(Clone)]
pub struct Wiring {
    pub window: web::Window,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<CardScene>>,
}

pub fn wire_all(w: &Wiring) -> Vec<EventListener> {
    let mut listeners = pointer::wire(w);
    listeners.extend(menu::wire(w));
    log::info!("[events] {} listeners attached", listeners.len());
    listeners
}
