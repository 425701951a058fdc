// Host-side tests for constants and their timing relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
fn default_melody_covers_the_phrase() {
    assert_eq!(DEFAULT_PHRASE.chars().count(), DEFAULT_MELODY.len());
    assert!(DEFAULT_PHRASE.chars().all(|c| c.is_ascii_uppercase()));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn finale_delays_are_ordered() {
    // The glitch lands before the reset that arms the clip.
    assert!(COMPLETE_GLITCH_DELAY_MS < COMPLETE_RESET_DELAY_MS);
    assert!(CLIP_GLITCH_DELAY_MS < CLIP_START_DELAY_MS);

    // Text comes in after the blackout and leaves before the window closes.
    assert!(BLACKOUT_DELAY_MS < TEXT_IN_DELAY_MS);
    assert!(TEXT_IN_DELAY_MS < TEXT_OUT_DELAY_MS);
    assert!(TEXT_OUT_DELAY_MS < NARRATIVE_WINDOW_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ambient_ranges_are_sane() {
    assert!(BULB_MIN_KEYS >= 1 && BULB_MIN_KEYS <= BULB_MAX_KEYS);
    assert!(BULB_MIN_MS > 0 && FLICKER_MIN_MS > 0);
    assert!(CRACKLE_MIN_MS > 0 && TEXT_SHAKE_MIN_MS > 0);
    assert!((0.0..=1.0).contains(&FLICKER_COLOR_CHANCE));
    assert!((0.0..=1.0).contains(&GLITCH_FLASH_CHANCE));
    assert!((0.0..=1.0).contains(&GLITCH_COLOR_CHANCE));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn audio_levels_stay_below_unity() {
    assert!(CLIP_FADE_FROM_GAIN > 0.0 && CLIP_FADE_FROM_GAIN < 1.0);
    assert!(CLIP_OFFSET_SEC >= 0.0 && CLIP_FADE_SEC > 0.0);
    assert!(SYNTH_LEVEL > 0.0 && SYNTH_LEVEL <= 1.0);
    assert!(SYNTH_SUSTAIN > 0.0 && SYNTH_SUSTAIN <= 1.0);
    assert!(MASTER_GAIN <= 1.0 && DRY_GAIN <= 1.0 && REVERB_WET <= 1.0);
    // Feedback at or above one never dies out.
    assert!(DELAY_FEEDBACK < 1.0);
    assert!(SYNTH_PORTAMENTO_SEC < SYNTH_DECAY_SEC);
}

#[test]
fn screws_cover_four_corners() {
    assert_eq!(SCREW_POSITIONS.len(), 4);
    assert!(SCREW_POSITIONS.iter().all(|p| p.contains('-')));
}
