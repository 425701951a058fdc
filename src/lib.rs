#![cfg(target_arch = "wasm32")]
use crate::audio::WebAudio;
use crate::core::{BackdropMode, Script, Stage, VisualSurface};
use crate::frame::Show;
use crate::surface::DomSurface;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod background;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod surface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neon-keys starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn session_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

async fn init() -> anyhow::Result<()> {
    // One session per page load.
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if background::init(&window, &document) == BackdropMode::MobileNotice {
        return Ok(());
    }

    let script = Script::nothing_quite_like_you()?;
    let step_count = script.phrase.len();
    let seed = session_seed();

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let audio = WebAudio::new(audio_ctx.clone(), &document)?;
    {
        let slot = audio.clip_slot();
        spawn_local(async move {
            if let Err(e) = audio::load_clip(audio_ctx, constants::CLIP_URL, slot).await {
                log::error!("[audio] error loading clip: {:?}", e);
            }
        });
    }

    let surface = DomSurface::new(document.clone(), step_count, seed.rotate_left(17))?;
    surface.add_screws();
    log::info!(
        "[keys] phrase of {} steps, {} keys on the page",
        step_count,
        surface.step_count()
    );

    let show = Rc::new(RefCell::new(Show::new(
        Stage::new(script, seed),
        audio,
        surface,
    )));
    show.borrow_mut().begin();

    events::wire_keyboard(show.clone());
    events::wire_reset_button(&document, show.clone());
    events::wire_audio_unlock(&document, show.clone());
    frame::start_loop(show);
    Ok(())
}
