use crate::constants::RESET_BUTTON_ID;
use crate::core::{key_char, KeyDown};
use crate::dom;
use crate::frame::Show;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, show: &Rc<RefCell<Show>>) {
    // Auto-repeat from a held key must not advance the phrase again.
    if ev.repeat() {
        return;
    }
    let Some(key) = key_char(&ev.key()) else {
        show.borrow().audio.resume();
        return;
    };
    match show.borrow_mut().key_down(key) {
        KeyDown::Ignored => {}
        KeyDown::Advanced { step } => log::debug!("[keys] step {} matched", step),
        KeyDown::Completed { first, .. } => log::info!("[keys] phrase complete (first={})", first),
    }
}

pub fn handle_keyup(ev: &web::KeyboardEvent, show: &Rc<RefCell<Show>>) {
    if let Some(key) = key_char(&ev.key()) {
        show.borrow_mut().key_up(key);
    }
}

pub fn wire_keyboard(show: Rc<RefCell<Show>>) {
    let Some(window) = web::window() else {
        return;
    };
    let show_down = show.clone();
    let keydown = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &show_down);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();

    let keyup = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keyup(&ev, &show);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
    keyup.forget();
}

pub fn wire_reset_button(document: &web::Document, show: Rc<RefCell<Show>>) {
    dom::add_click_listener_by_id(document, RESET_BUTTON_ID, move || {
        log::info!("[keys] melody reset");
        show.borrow_mut().reset();
    });
}

// Browsers only let audio start after a user gesture.
pub fn wire_audio_unlock(document: &web::Document, show: Rc<RefCell<Show>>) {
    dom::add_click_listener(document, move || {
        show.borrow().audio.resume();
    });
}
