use crate::constants::*;
use crate::core::{is_mobile, BackdropMode, StageError};
use crate::dom;
use crate::overlay;
use wasm_bindgen::JsCast;
use web_sys as web;

const CSS_FALLBACK_KEYFRAMES: &str =
    "@keyframes wave { 0% { background-position: 0 0; } 100% { background-position: 80px 80px; } }";
const CSS_FALLBACK_GRADIENT: &str = "linear-gradient(45deg, rgba(255,255,255,0.05) 25%, transparent 25%, transparent 50%, rgba(255,255,255,0.05) 50%, rgba(255,255,255,0.05) 75%, transparent 75%, transparent)";

fn webgl_available(document: &web::Document) -> bool {
    let Some(canvas) = document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
    else {
        return false;
    };
    ["webgl", "experimental-webgl"]
        .iter()
        .any(|kind| matches!(canvas.get_context(kind), Ok(Some(_))))
}

fn detect_mobile(window: &web::Window) -> bool {
    let navigator = window.navigator();
    let ua = navigator.user_agent().unwrap_or_default();
    let touch = navigator.max_touch_points() > 0
        || js_sys::Reflect::has(window, &"ontouchstart".into()).unwrap_or(false);
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::MAX);
    is_mobile(&ua, touch, width)
}

fn apply_css_fallback(document: &web::Document) {
    if let Some(canvas) = document
        .get_element_by_id(BACKGROUND_CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        for (prop, value) in [
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("background", CSS_FALLBACK_GRADIENT),
            ("background-size", "4px 4px"),
            ("animation", "wave 20s linear infinite"),
        ] {
            dom::set_style(&canvas, prop, value);
        }
    }
    if let (Ok(style), Some(head)) = (document.create_element("style"), document.head()) {
        style.set_text_content(Some(CSS_FALLBACK_KEYFRAMES));
        _ = head.append_child(&style);
    }
}

fn update_badge(document: &web::Document, webgl: bool) {
    let mode = BackdropMode::choose(webgl, false);
    if let Some(el) = document
        .get_element_by_id(WEBGL_STATUS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        el.set_text_content(Some(mode.badge()));
        let color = if mode == BackdropMode::Shader { "#4CAF50" } else { "#FF5252" };
        dom::set_style(&el, "color", color);
    }
}

/// Pick and apply the background mode. Missing capabilities degrade to
/// simpler visuals and are only logged.
pub fn init(window: &web::Window, document: &web::Document) -> BackdropMode {
    let webgl = webgl_available(document);
    let mode = BackdropMode::choose(webgl, detect_mobile(window));
    match mode {
        BackdropMode::Shader => {}
        BackdropMode::CssFallback => {
            log::warn!("[backdrop] {}, using CSS fallback", StageError::UnsupportedCapability("WebGL"));
            overlay::show_webgl_help(document);
            apply_css_fallback(document);
        }
        BackdropMode::MobileNotice => {
            log::info!("[backdrop] mobile device, showing notice");
            overlay::show_mobile_notice(document);
            if !webgl {
                apply_css_fallback(document);
            }
        }
    }
    update_badge(document, webgl);
    mode
}
