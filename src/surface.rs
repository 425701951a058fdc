use crate::constants::*;
use crate::core::{SampleId, VisualSurface};
use crate::dom;
use fnv::FnvHashMap;
use instant::Instant;
use rand::prelude::*;
use std::time::Duration;
use web_sys as web;

// A full-screen flashing layer that lives for `duration`.
struct GlitchOverlay {
    el: web::HtmlElement,
    started: Instant,
    duration: Duration,
}

struct Narrative {
    end_text: web::HtmlElement,
    text: web::HtmlElement,
}

/// DOM implementation of [`VisualSurface`]. Steps are the `.key` elements
/// whose `data-key` is their phrase index; pads use `data-key="kick"` and
/// `data-key="snare"`.
pub struct DomSurface {
    document: web::Document,
    body: web::HtmlElement,
    steps: Vec<web::HtmlElement>,
    pads: FnvHashMap<SampleId, web::HtmlElement>,
    shake_targets: Vec<web::HtmlElement>,
    flicker: Option<web::HtmlElement>,
    glitches: Vec<GlitchOverlay>,
    fade: Option<web::HtmlElement>,
    narrative: Option<Narrative>,
    rng: StdRng,
}

impl DomSurface {
    pub fn new(document: web::Document, step_count: usize, seed: u64) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?;
        let mut steps = Vec::with_capacity(step_count);
        for i in 0..step_count {
            match dom::query_html(&document, &format!(".key[data-key=\"{}\"]", i)) {
                Some(el) => steps.push(el),
                None => {
                    log::warn!("[surface] only {} of {} step keys present", i, step_count);
                    break;
                }
            }
        }
        let mut pads = FnvHashMap::default();
        for (id, name) in [(SampleId::Kick, "kick"), (SampleId::Snare, "snare")] {
            if let Some(el) = dom::query_html(&document, &format!(".key[data-key=\"{}\"]", name)) {
                pads.insert(id, el);
            }
        }
        let mut shake_targets: Vec<web::HtmlElement> =
            dom::query_html(&document, CONTAINER_SELECTOR).into_iter().collect();
        shake_targets.extend(dom::query_all_html(&document, ".key"));

        let flicker = dom::create_div(&document, "screen-flicker");
        if let Some(f) = &flicker {
            _ = body.append_child(f);
        }
        Ok(Self {
            document,
            body,
            steps,
            pads,
            shake_targets,
            flicker,
            glitches: Vec::new(),
            fade: None,
            narrative: None,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn all_keys(&self) -> impl Iterator<Item = &web::HtmlElement> {
        self.steps.iter().chain(self.pads.values())
    }

    /// Decorate the keyboard frame with its four corner screws.
    pub fn add_screws(&self) {
        if let Some(wrapper) = dom::query_html(&self.document, KEY_WRAPPER_SELECTOR) {
            for pos in SCREW_POSITIONS {
                if let Some(screw) = dom::create_div(&self.document, &format!("screw screw-{}", pos)) {
                    _ = wrapper.append_child(&screw);
                }
            }
        }
    }

    /// Advance running glitch overlays; called once per animation frame.
    pub fn animate(&mut self, now: Instant) {
        let rng = &mut self.rng;
        self.glitches.retain(|g| {
            if now.duration_since(g.started) >= g.duration {
                dom::set_style(&g.el, "transition", "opacity 0.1s");
                dom::set_style(&g.el, "opacity", "0");
                let el = g.el.clone();
                dom::set_timeout(GLITCH_REMOVE_MS, move || el.remove());
                return false;
            }
            let opacity = if rng.gen_bool(GLITCH_FLASH_CHANCE) { "1" } else { "0" };
            dom::set_style(&g.el, "opacity", opacity);
            if rng.gen_bool(GLITCH_COLOR_CHANCE) {
                let hue: u16 = rng.gen_range(0..360);
                dom::set_style(&g.el, "background-color", &format!("hsl({}, 150%, 80%)", hue));
                dom::set_style(&g.el, "mix-blend-mode", "difference");
            } else {
                dom::set_style(&g.el, "background-color", "black");
                dom::set_style(&g.el, "mix-blend-mode", "normal");
            }
            true
        });
    }
}

impl VisualSurface for DomSurface {
    fn step_count(&self) -> usize {
        self.steps.len()
    }

    fn highlight_step(&mut self, index: usize) {
        if let Some(el) = self.steps.get(index) {
            _ = el.class_list().add_1("pressed");
        }
    }

    fn cue_step(&mut self, index: usize) {
        for (i, el) in self.steps.iter().enumerate() {
            if i == index {
                _ = el.class_list().add_1("active");
                dom::set_style(el, "opacity", "1");
            } else {
                _ = el.class_list().remove_1("active");
            }
        }
    }

    fn dim_step(&mut self, index: usize) {
        if let Some(el) = self.steps.get(index) {
            _ = el.class_list().remove_2("pressed", "active");
            _ = el.class_list().add_1("invisible");
        }
    }

    fn reveal_all_steps(&mut self) {
        for el in self.all_keys() {
            _ = el.class_list().remove_3("active", "pressed", "invisible");
            dom::set_style(el, "opacity", "1");
        }
    }

    fn reset_steps(&mut self) {
        for el in self.all_keys() {
            _ = el.class_list().remove_3("active", "pressed", "invisible");
            dom::set_style(el, "opacity", "0");
        }
    }

    fn tap_pad(&mut self, pad: SampleId) {
        if let Some(el) = self.pads.get(&pad) {
            dom::flash_class(el, "pressed", PAD_FLASH_MS);
        }
    }

    fn apply_glitch_pulse(&mut self, duration_ms: u32) {
        if let Some(el) = dom::create_div(&self.document, "glitch-overlay") {
            _ = self.body.append_child(&el);
            dom::set_style(&el, "opacity", "1");
            self.glitches.push(GlitchOverlay {
                el,
                started: Instant::now(),
                duration: Duration::from_millis(duration_ms as u64),
            });
        }
    }

    fn set_ambient_intensity(&mut self, value: f32) {
        let v = value.clamp(0.0, 1.0).to_string();
        dom::set_style(&self.body, "--iridescent-opacity", &v);
        if let Some(layer) = dom::query_html(&self.document, IRIDESCENT_SELECTOR) {
            dom::set_style(&layer, "opacity", &v);
        }
    }

    fn pulse_thumping(&mut self, on: bool) {
        for el in self.all_keys() {
            if on {
                _ = el.class_list().add_1("thumping");
            } else {
                _ = el.class_list().remove_1("thumping");
            }
        }
    }

    fn mark_volume_active(&mut self) {
        if let Some(el) = dom::query_html(&self.document, VOLUME_LABEL_SELECTOR) {
            _ = el.class_list().add_1("active");
        }
    }

    fn begin_narrative(&mut self, text: &str) {
        if let Some(fade) = dom::create_div(&self.document, "fade-out") {
            _ = self.body.append_child(&fade);
            self.fade = Some(fade);
        }
        let (Some(end_text), Some(content)) = (
            dom::create_div(&self.document, "end-text"),
            dom::create_div(&self.document, "text-content"),
        ) else {
            return;
        };
        content.set_text_content(Some(text));
        _ = end_text.append_child(&content);
        _ = self.body.append_child(&end_text);
        self.narrative = Some(Narrative {
            end_text,
            text: content,
        });
    }

    fn set_blackout(&mut self, opacity: f32) {
        if let Some(fade) = &self.fade {
            dom::set_style(fade, "opacity", &opacity.clamp(0.0, 1.0).to_string());
        }
    }

    fn set_narrative_visible(&mut self, visible: bool) {
        if let Some(n) = &self.narrative {
            if visible {
                dom::set_style(&n.end_text, "opacity", "1");
            } else {
                dom::set_style(&n.end_text, "transition", "opacity 2s");
                dom::set_style(&n.end_text, "opacity", "0");
            }
        }
    }

    fn shake_narrative(&mut self) {
        if let Some(n) = &self.narrative {
            dom::flash_class(&n.text, "screen-shake", TEXT_SHAKE_MS);
        }
    }

    fn teardown_narrative(&mut self) {
        if let Some(n) = self.narrative.take() {
            n.end_text.remove();
        }
        if let Some(fade) = &self.fade {
            dom::set_style(fade, "transition", "none");
        }
    }

    fn flicker_bulbs(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(el) = self.steps.get(i) {
                dom::flash_class(el, "bad-bulb", BULB_FLASH_MS);
            }
        }
    }

    fn flicker_screen(&mut self, hue: Option<u16>) {
        for el in &self.shake_targets {
            dom::flash_class(el, "screen-shake", SCREEN_SHAKE_MS);
        }
        let Some(f) = &self.flicker else {
            return;
        };
        match hue {
            Some(h) => {
                dom::set_style(f, "background-color", &format!("hsl({}, 100%, 50%)", h));
                dom::set_style(f, "mix-blend-mode", "difference");
                dom::set_style(f, "opacity", "0.5");
            }
            None => {
                dom::set_style(f, "background-color", "black");
                dom::set_style(f, "mix-blend-mode", "normal");
                dom::set_style(f, "opacity", "0.2");
            }
        }
        dom::set_display(f, "block");
        let f = f.clone();
        dom::set_timeout(SCREEN_FLASH_MS, move || {
            let style = f.style();
            _ = style.set_property("display", "none");
            for prop in ["background-color", "mix-blend-mode", "opacity"] {
                _ = style.remove_property(prop);
            }
        });
    }
}
