#![cfg(target_arch = "wasm32")]
use card_core::{CardScene, Catalog, PointerTracker, Tuning};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod texture;
mod timeline;

use constants::{CANVAS_ID, CONFIG_SCRIPT_ID};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// Tuning from the optional inline JSON block; bad input falls back to defaults.
fn load_tuning(document: &web::Document) -> Tuning {
    let Some(text) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return Tuning::default();
    };
    match Tuning::from_json(&text) {
        Ok(t) => {
            log::info!("[config] tuning loaded from #{}", CONFIG_SCRIPT_ID);
            t
        }
        Err(e) => {
            log::error!("[config] ignoring #{}: {}", CONFIG_SCRIPT_ID, e);
            Tuning::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("card-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let tuning = load_tuning(&document);
    let catalog = Catalog::projects();
    overlay::build_catalog(&document, &catalog)?;
    let scene = Rc::new(RefCell::new(CardScene::new(catalog, tuning)));
    overlay::sync(&document, &scene.borrow());

    let listeners = events::wire_all(&events::Wiring {
        window: window.clone(),
        document: document.clone(),
        canvas: canvas.clone(),
        scene: scene.clone(),
    });
    let tracker = PointerTracker::attach(&input::DomPointerSource::window(&window));

    // A broken timeline only costs the authored animation.
    let sequence = match timeline::start_authored_sequence() {
        Ok(seq) => Some(seq),
        Err(e) => {
            log::error!("[timeline] init failed: {}", e);
            None
        }
    };

    let gpu = frame::init_gpu(&canvas).await;

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        tracker,
        sequence,
        canvas,
        gpu,
        images: texture::ImageLoader::new(),
        _listeners: listeners,
        started: now,
        last_instant: now,
        last_position: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
