// Shared fakes for host-side tests.
// The main crate is wasm-only, so the pure-Rust core modules are included directly.

#![allow(dead_code)]

pub mod show {
    pub mod backdrop {
        include!("../../src/core/backdrop.rs");
    }
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod error {
        include!("../../src/core/error.rs");
    }
    pub mod finale {
        include!("../../src/core/finale.rs");
    }
    pub mod keys {
        include!("../../src/core/keys.rs");
    }
    pub mod phrase {
        include!("../../src/core/phrase.rs");
    }
    pub mod ports {
        include!("../../src/core/ports.rs");
    }
    pub mod sequencer {
        include!("../../src/core/sequencer.rs");
    }
    pub mod stage {
        include!("../../src/core/stage.rs");
    }
    pub mod timeline {
        include!("../../src/core/timeline.rs");
    }
}

use show::error::StageError;
use show::finale::FinaleTiming;
use show::phrase::{MelodyTrack, Note, Script, TargetPhrase};
use show::ports::{AudioEngine, ClipRamp, SampleId, VisualSurface};

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCall {
    Note(String),
    Release,
    Sample(SampleId),
    Clip(ClipRamp),
}

/// Records every call. `clip_len` stays `None` until the test "decodes" it.
#[derive(Default)]
pub struct FakeAudio {
    pub calls: Vec<AudioCall>,
    pub clip_len: Option<f64>,
}

impl FakeAudio {
    pub fn with_clip(seconds: f64) -> Self {
        Self {
            calls: Vec::new(),
            clip_len: Some(seconds),
        }
    }

    pub fn notes(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AudioCall::Note(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &AudioCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn clip_starts(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, AudioCall::Clip(_)))
            .count()
    }
}

impl AudioEngine for FakeAudio {
    fn play_note(&mut self, note: &Note) {
        self.calls.push(AudioCall::Note(note.name().to_string()));
    }

    fn release_note(&mut self) {
        self.calls.push(AudioCall::Release);
    }

    fn play_sample(&mut self, id: SampleId) {
        self.calls.push(AudioCall::Sample(id));
    }

    fn clip_duration(&self) -> Option<f64> {
        self.clip_len
    }

    fn play_clip(&mut self, ramp: ClipRamp) -> Result<f64, StageError> {
        let total = self.clip_len.ok_or(StageError::ResourceNotReady)?;
        self.calls.push(AudioCall::Clip(ramp));
        Ok((total - ramp.offset_sec).max(0.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum VisualCall {
    Highlight(usize),
    Cue(usize),
    Dim(usize),
    RevealAll,
    ResetSteps,
    Pad(SampleId),
    Glitch(u32),
    Ambient(f32),
    Thumping(bool),
    VolumeActive,
    BeginNarrative,
    Blackout(f32),
    NarrativeVisible(bool),
    Shake,
    Teardown,
    Bulbs(Vec<usize>),
    Flicker(Option<u16>),
}

pub struct FakeSurface {
    pub steps: usize,
    pub calls: Vec<VisualCall>,
}

impl FakeSurface {
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            calls: Vec::new(),
        }
    }

    pub fn count(&self, call: &VisualCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn position(&self, call: &VisualCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn glitches(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, VisualCall::Glitch(_)))
            .count()
    }
}

impl VisualSurface for FakeSurface {
    fn step_count(&self) -> usize {
        self.steps
    }
    fn highlight_step(&mut self, index: usize) {
        self.calls.push(VisualCall::Highlight(index));
    }
    fn cue_step(&mut self, index: usize) {
        self.calls.push(VisualCall::Cue(index));
    }
    fn dim_step(&mut self, index: usize) {
        self.calls.push(VisualCall::Dim(index));
    }
    fn reveal_all_steps(&mut self) {
        self.calls.push(VisualCall::RevealAll);
    }
    fn reset_steps(&mut self) {
        self.calls.push(VisualCall::ResetSteps);
    }
    fn tap_pad(&mut self, pad: SampleId) {
        self.calls.push(VisualCall::Pad(pad));
    }
    fn apply_glitch_pulse(&mut self, duration_ms: u32) {
        self.calls.push(VisualCall::Glitch(duration_ms));
    }
    fn set_ambient_intensity(&mut self, value: f32) {
        self.calls.push(VisualCall::Ambient(value));
    }
    fn pulse_thumping(&mut self, on: bool) {
        self.calls.push(VisualCall::Thumping(on));
    }
    fn mark_volume_active(&mut self) {
        self.calls.push(VisualCall::VolumeActive);
    }
    fn begin_narrative(&mut self, _text: &str) {
        self.calls.push(VisualCall::BeginNarrative);
    }
    fn set_blackout(&mut self, opacity: f32) {
        self.calls.push(VisualCall::Blackout(opacity));
    }
    fn set_narrative_visible(&mut self, visible: bool) {
        self.calls.push(VisualCall::NarrativeVisible(visible));
    }
    fn shake_narrative(&mut self) {
        self.calls.push(VisualCall::Shake);
    }
    fn teardown_narrative(&mut self) {
        self.calls.push(VisualCall::Teardown);
    }
    fn flicker_bulbs(&mut self, indices: &[usize]) {
        self.calls.push(VisualCall::Bulbs(indices.to_vec()));
    }
    fn flicker_screen(&mut self, hue: Option<u16>) {
        self.calls.push(VisualCall::Flicker(hue));
    }
}

pub fn script(phrase: &str, melody: &[&str]) -> Script {
    Script::new(
        TargetPhrase::new(phrase).unwrap(),
        MelodyTrack::parse(melody).unwrap(),
        FinaleTiming::default(),
    )
    .unwrap()
}
