use crate::audio::WebAudio;
use crate::core::{KeyDown, Stage, VisualSurface};
use crate::surface::DomSurface;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The page session: the stage plus the browser-backed collaborators it
/// drives. Lives in one `Rc<RefCell<_>>` shared by the event handlers and
/// the animation loop; the event loop serialises every borrow.
pub struct Show {
    pub stage: Stage,
    pub audio: WebAudio,
    pub surface: DomSurface,
    origin: Instant,
}

impl Show {
    pub fn new(stage: Stage, audio: WebAudio, surface: DomSurface) -> Self {
        Self {
            stage,
            audio,
            surface,
            origin: Instant::now(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    pub fn begin(&mut self) {
        let now = self.now_ms();
        self.surface.cue_step(0);
        self.stage.start_ambient(now);
    }

    pub fn key_down(&mut self, key: char) -> KeyDown {
        self.audio.resume();
        let now = self.now_ms();
        self.stage
            .key_down(key, now, &mut self.audio, &mut self.surface)
    }

    pub fn key_up(&mut self, key: char) {
        self.stage.key_up(key, &mut self.audio);
    }

    pub fn reset(&mut self) {
        if self.stage.phase().in_finale() {
            log::debug!("[keys] reset during finale, scheduled effects continue");
        }
        self.stage.reset(&mut self.audio, &mut self.surface);
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let now_ms = now.duration_since(self.origin).as_secs_f64() * 1000.0;
        self.stage.tick(now_ms, &mut self.audio, &mut self.surface);
        self.surface.animate(now);
    }
}

pub fn start_loop(show: Rc<RefCell<Show>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        show.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
