use super::constants::*;
use super::ports::ClipRamp;
use super::timeline::Timeline;
use smallvec::SmallVec;

/// Timing table for the finale. Every delay is in milliseconds and is
/// measured from the moment its chain fires, not from the previous step.
#[derive(Clone, Debug, PartialEq)]
pub struct FinaleTiming {
    pub glitch_delay_ms: u32,
    pub reset_delay_ms: u32,
    pub glitch_pulse_ms: u32,
    pub clip_glitch_delay_ms: u32,
    pub clip_start_delay_ms: u32,
    pub clip_ramp: ClipRamp,
    pub ambient_bright: f32,
    pub step_dim_delay_ms: u32,
    pub blackout_delay_ms: u32,
    pub text_in_delay_ms: u32,
    pub text_out_delay_ms: u32,
    pub narrative_window_ms: u32,
    pub crackle_window_ms: u32,
}

impl Default for FinaleTiming {
    fn default() -> Self {
        Self {
            glitch_delay_ms: COMPLETE_GLITCH_DELAY_MS,
            reset_delay_ms: COMPLETE_RESET_DELAY_MS,
            glitch_pulse_ms: GLITCH_PULSE_MS,
            clip_glitch_delay_ms: CLIP_GLITCH_DELAY_MS,
            clip_start_delay_ms: CLIP_START_DELAY_MS,
            clip_ramp: ClipRamp {
                offset_sec: CLIP_OFFSET_SEC,
                from_gain: CLIP_FADE_FROM_GAIN,
                fade_sec: CLIP_FADE_SEC,
            },
            ambient_bright: AMBIENT_BRIGHT,
            step_dim_delay_ms: STEP_DIM_DELAY_MS,
            blackout_delay_ms: BLACKOUT_DELAY_MS,
            text_in_delay_ms: TEXT_IN_DELAY_MS,
            text_out_delay_ms: TEXT_OUT_DELAY_MS,
            narrative_window_ms: NARRATIVE_WINDOW_MS,
            crackle_window_ms: CRACKLE_WINDOW_MS,
        }
    }
}

/// A scheduled action. Cues are plain data; the stage interprets them
/// when they come due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    GlitchPulse,
    /// Reset progress and light every step.
    ResetAndReveal,
    /// Check the clip is decoded and, once per session, start the clip chain.
    ArmClip,
    StartClip,
    /// Clip has run out: stop thumping and begin the closing narrative.
    EndClip,
    BeginNarrative,
    Blackout,
    ShowText,
    HideText,
    ShakeText,
    Crackle,
    EndNarrative,
    DimStep(usize),
    BadBulb,
    ScreenFlicker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectStep {
    pub delay_ms: u32,
    pub cue: Cue,
}

/// Ordered list of delayed cues fired together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FinaleChain {
    steps: SmallVec<[EffectStep; 8]>,
}

impl FinaleChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, delay_ms: u32, cue: Cue) -> Self {
        self.steps.push(EffectStep { delay_ms, cue });
        self
    }

    pub fn steps(&self) -> &[EffectStep] {
        &self.steps
    }

    /// Fired the moment the phrase is completed for the first time.
    pub fn completion(t: &FinaleTiming) -> Self {
        Self::new()
            .then(t.glitch_delay_ms, Cue::GlitchPulse)
            .then(t.reset_delay_ms, Cue::ResetAndReveal)
            .then(t.reset_delay_ms, Cue::ArmClip)
    }

    /// Fired when the clip is armed; `remaining_sec` is what is left of the
    /// clip after the start offset.
    pub fn clip(t: &FinaleTiming, remaining_sec: f64) -> Self {
        let remaining_ms = (remaining_sec.max(0.0) * 1000.0).round().min(u32::MAX as f64) as u32;
        Self::new()
            .then(t.clip_glitch_delay_ms, Cue::GlitchPulse)
            .then(t.clip_start_delay_ms, Cue::StartClip)
            // never end before the audible start
            .then(remaining_ms.max(t.clip_start_delay_ms), Cue::EndClip)
    }

    /// Fired when the clip runs out. Ends in the terminal blackout.
    pub fn closing(t: &FinaleTiming) -> Self {
        Self::new()
            .then(0, Cue::BeginNarrative)
            .then(0, Cue::ShakeText)
            .then(t.blackout_delay_ms, Cue::Blackout)
            .then(t.blackout_delay_ms, Cue::Crackle)
            .then(t.text_in_delay_ms, Cue::ShowText)
            .then(t.text_out_delay_ms, Cue::HideText)
            .then(t.narrative_window_ms, Cue::EndNarrative)
    }

    /// Schedule every step relative to `now_ms`.
    pub fn fire(&self, now_ms: f64, timeline: &mut Timeline<Cue>) {
        for step in &self.steps {
            timeline.schedule_after(now_ms, step.delay_ms, step.cue);
        }
    }
}

/// Where the experience is. Completing through Terminal cannot be
/// interrupted; `reset()` only affects Idle/Progressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FinalePhase {
    #[default]
    Idle,
    Progressing,
    Completing,
    ClipFading,
    ClipPlaying,
    Closing,
    Terminal,
}

impl FinalePhase {
    /// True once the finale has started and not yet reached its end.
    pub fn in_finale(self) -> bool {
        matches!(
            self,
            FinalePhase::Completing
                | FinalePhase::ClipFading
                | FinalePhase::ClipPlaying
                | FinalePhase::Closing
        )
    }
}
