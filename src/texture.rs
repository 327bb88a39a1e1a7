use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A decoded image tagged with the selection revision that asked for it.
pub struct LoadedImage {
    pub revision: u64,
    pub image: web::HtmlImageElement,
}

/// Loads card images in the browser and hands finished ones to the frame
/// loop. Only the latest request's image is ever handed out.
#[derive(Default)]
pub struct ImageLoader {
    requested: Rc<Cell<Option<u64>>>,
    ready: Rc<RefCell<Option<LoadedImage>>>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `url` for `revision`; a no-op if that revision was
    /// already requested.
    pub fn request(&mut self, revision: u64, url: &str) {
        if self.requested.get() == Some(revision) {
            return;
        }
        self.requested.set(Some(revision));
        let image = match web::HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                log::error!("[texture] cannot create image: {:?}", e);
                return;
            }
        };
        let slot = self.ready.clone();
        let latest = self.requested.clone();
        let loaded = image.clone();
        let onload = Closure::once_into_js(move || {
            if latest.get() != Some(revision) {
                log::debug!("[texture] dropping stale revision {}", revision);
                return;
            }
            log::debug!("[texture] revision {} decoded", revision);
            *slot.borrow_mut() = Some(LoadedImage {
                revision,
                image: loaded,
            });
        });
        image.set_onload(Some(onload.unchecked_ref()));
        let src = url.to_string();
        let onerror = Closure::once_into_js(move || {
            log::warn!("[texture] failed to load {}; keeping placeholder", src);
        });
        image.set_onerror(Some(onerror.unchecked_ref()));
        image.set_src(url);
        log::info!("[texture] loading {} (revision {})", url, revision);
    }

    /// The finished image of the latest request, if it has arrived.
    pub fn take_ready(&mut self) -> Option<LoadedImage> {
        self.ready
            .borrow_mut()
            .take()
            .filter(|loaded| Some(loaded.revision) == self.requested.get())
    }
}
