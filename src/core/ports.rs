use super::error::StageError;
use super::phrase::Note;

/// Pre-recorded one-shot samples the page can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleId {
    Kick,
    Snare,
    Glitch,
    Crackle,
}

/// How the finale clip is started: where in the clip, and the gain ramp
/// applied from the audible start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRamp {
    pub offset_sec: f64,
    pub from_gain: f32,
    pub fade_sec: f64,
}

/// Sound output used by the stage. The web build drives WebAudio; tests
/// record calls.
pub trait AudioEngine {
    /// Start `note` on the monophonic voice, replacing whatever is sounding.
    fn play_note(&mut self, note: &Note);
    fn release_note(&mut self);
    /// Restart a sample from its beginning.
    fn play_sample(&mut self, id: SampleId);
    /// Total clip length in seconds, or `None` until it has been decoded.
    fn clip_duration(&self) -> Option<f64>;
    /// Start the clip. Returns the number of seconds left to play after the
    /// offset, or `ResourceNotReady` when the clip is still loading.
    fn play_clip(&mut self, ramp: ClipRamp) -> Result<f64, StageError>;
}

/// Everything the stage shows on screen. Indices refer to phrase steps.
pub trait VisualSurface {
    fn step_count(&self) -> usize;
    /// Mark step `index` as just played.
    fn highlight_step(&mut self, index: usize);
    /// Hint that step `index` is the one to type next.
    fn cue_step(&mut self, index: usize);
    /// Grey out a step some time after it was played.
    fn dim_step(&mut self, index: usize);
    fn reveal_all_steps(&mut self);
    fn reset_steps(&mut self);
    fn tap_pad(&mut self, pad: SampleId);

    fn apply_glitch_pulse(&mut self, duration_ms: u32);
    /// Background brightness, `0.0..=1.0`.
    fn set_ambient_intensity(&mut self, value: f32);
    fn pulse_thumping(&mut self, on: bool);
    fn mark_volume_active(&mut self);

    fn begin_narrative(&mut self, text: &str);
    fn set_blackout(&mut self, opacity: f32);
    fn set_narrative_visible(&mut self, visible: bool);
    fn shake_narrative(&mut self);
    /// Remove the narrative text; the blackout stays fully opaque.
    fn teardown_narrative(&mut self);

    fn flicker_bulbs(&mut self, indices: &[usize]);
    /// `Some(hue)` flashes a coloured difference layer, `None` a black one.
    fn flicker_screen(&mut self, hue: Option<u16>);
}
