use crate::constants::*;
use crate::dom;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", "display:block");
    }
}

#[inline]
pub fn hide(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

fn hide_keyboard(document: &web::Document) {
    if let Some(wrapper) = dom::query_html(document, KEY_WRAPPER_SELECTOR) {
        dom::set_display(&wrapper, "none");
    }
}

/// No WebGL: hide the keyboard and explain how to enable it.
pub fn show_webgl_help(document: &web::Document) {
    hide_keyboard(document);
    if document.get_element_by_id(WEBGL_HELP_ID).is_none() {
        return;
    }
    show(document, WEBGL_HELP_ID);
    for el in dom::query_all_html(document, ".key") {
        _ = el.class_list().remove_3("active", "pressed", "invisible");
        dom::set_style(&el, "opacity", "0");
    }
    if let Some(container) = dom::query_html(document, CONTAINER_SELECTOR) {
        dom::set_style(&container, "opacity", "0");
    }
}

/// Phones and tablets get a notice instead of the keyboard.
pub fn show_mobile_notice(document: &web::Document) {
    hide_keyboard(document);
    hide(document, RESET_BUTTON_ID);
    hide(document, START_AUDIO_ID);
    if let Some(label) = dom::query_html(document, VOLUME_LABEL_SELECTOR) {
        dom::set_display(&label, "none");
    }
    show(document, MOBILE_NOTICE_ID);
}
