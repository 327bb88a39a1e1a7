use crate::dom::EventListener;
use crate::input::DomPointerSource;
use crate::render;
use crate::texture::ImageLoader;
use crate::timeline::MainSequence;
use card_core::{CardScene, PointerTracker, Sequencer};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<CardScene>>,
    pub tracker: PointerTracker<DomPointerSource>,
    pub sequence: Option<Rc<RefCell<MainSequence>>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub images: ImageLoader,
    // Detached when the context goes away
    pub _listeners: Vec<EventListener>,
    pub started: Instant,
    pub last_instant: Instant,
    pub last_position: Option<f64>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let elapsed = (now - self.started).as_secs_f32();

        let w = self.canvas.width();
        let h = self.canvas.height();
        let pointer = self.tracker.latest();

        let mut scene = self.scene.borrow_mut();
        scene.set_viewport(w as f32, h as f32);
        let frame = *scene.frame(pointer, elapsed, dt_sec);
        let wanted = frame.uniforms.texture;
        let url = scene.active_item().image_ref.clone();
        let camera = *scene.camera();
        drop(scene);

        self.poll_sequence();

        self.images.request(wanted.revision, &url);
        if let Some(g) = &mut self.gpu {
            if g.bound_texture() != Some(wanted) {
                if let Some(loaded) = self.images.take_ready() {
                    if loaded.revision == wanted.revision {
                        g.set_texture_from_image(&loaded.image, wanted);
                    }
                }
            }
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&frame, &camera) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    // Playback runs on its own clock; this only notices the loop wrapping.
    fn poll_sequence(&mut self) {
        let Some(seq) = &self.sequence else {
            return;
        };
        let position = seq.borrow().position();
        if let (Some(prev), Some(cur)) = (self.last_position, position) {
            if cur < prev {
                log::debug!("[timeline] loop wrapped {:.2} -> {:.2}", prev, cur);
            }
        }
        self.last_position = position;
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(window: &web::Window, tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(cb) = tick.borrow().as_ref() {
        _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let Some(w) = web::window() {
            request_frame(&w, &tick_clone);
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        request_frame(&w, &tick);
    }
}
