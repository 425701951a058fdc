use super::constants::*;
use super::error::StageError;
use super::finale::{Cue, FinaleChain, FinalePhase, FinaleTiming};
use super::keys::drum_for_key;
use super::phrase::Script;
use super::ports::{AudioEngine, SampleId, VisualSurface};
use super::sequencer::{KeyDown, Sequencer, SequencerState};
use super::timeline::Timeline;
use rand::prelude::*;
use smallvec::SmallVec;

/// One page session: the sequencer, the cue timeline it feeds, and the
/// finale bookkeeping. Created once at load; dropped on navigation.
///
/// All methods take the current clock in milliseconds so the stage never
/// reads time itself. The web frame loop passes `performance`-style time,
/// tests pass a virtual clock.
pub struct Stage {
    sequencer: Sequencer,
    timeline: Timeline<Cue>,
    phase: FinalePhase,
    clip_played: bool,
    crackles_since: Option<f64>,
    rng: StdRng,
}

impl Stage {
    pub fn new(script: Script, seed: u64) -> Self {
        Self {
            sequencer: Sequencer::new(script),
            timeline: Timeline::new(),
            phase: FinalePhase::Idle,
            clip_played: false,
            crackles_since: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> FinalePhase {
        self.phase
    }

    pub fn state(&self) -> &SequencerState {
        self.sequencer.state()
    }

    pub fn clip_played(&self) -> bool {
        self.clip_played
    }

    pub fn pending(&self) -> usize {
        self.timeline.len()
    }

    pub fn pending_cues(&self) -> impl Iterator<Item = &Cue> {
        self.timeline.pending()
    }

    fn timing(&self) -> &FinaleTiming {
        &self.sequencer.script().timing
    }

    /// Kick off the self-rescheduling cosmetics (bad bulbs, screen flicker).
    pub fn start_ambient(&mut self, now_ms: f64) {
        self.timeline.schedule_at(now_ms, Cue::BadBulb);
        self.timeline.schedule_at(now_ms, Cue::ScreenFlicker);
    }

    pub fn key_down(
        &mut self,
        key: char,
        now_ms: f64,
        audio: &mut impl AudioEngine,
        visual: &mut impl VisualSurface,
    ) -> KeyDown {
        let outcome = self.sequencer.on_key_down(key, audio, visual);
        match outcome {
            KeyDown::Ignored => {}
            KeyDown::Advanced { step } => {
                self.schedule_dim(now_ms, step);
                if self.phase == FinalePhase::Idle {
                    self.phase = FinalePhase::Progressing;
                }
            }
            KeyDown::Completed { step, first } => {
                self.schedule_dim(now_ms, step);
                if first {
                    log::info!("[finale] phrase complete, starting finale");
                    self.phase = FinalePhase::Completing;
                    FinaleChain::completion(self.timing()).fire(now_ms, &mut self.timeline);
                }
            }
        }
        if let Some(pad) = drum_for_key(key) {
            audio.play_sample(pad);
            visual.tap_pad(pad);
        }
        outcome
    }

    pub fn key_up(&mut self, key: char, audio: &mut impl AudioEngine) {
        self.sequencer.on_key_up(key, audio);
    }

    /// Manual reset. Cues already on the timeline keep firing.
    pub fn reset(&mut self, audio: &mut impl AudioEngine, visual: &mut impl VisualSurface) {
        self.sequencer.reset(audio, visual);
        if self.phase == FinalePhase::Progressing {
            self.phase = FinalePhase::Idle;
        }
    }

    /// Dispatch every cue due at or before `now_ms` in deadline order,
    /// including any that dispatching schedules in the past. Returns how
    /// many ran.
    pub fn tick(
        &mut self,
        now_ms: f64,
        audio: &mut impl AudioEngine,
        visual: &mut impl VisualSurface,
    ) -> usize {
        let mut ran = 0;
        while let Some((at, cue)) = self.timeline.pop_due(now_ms) {
            self.dispatch(at, now_ms, cue, audio, visual);
            ran += 1;
        }
        ran
    }

    fn schedule_dim(&mut self, now_ms: f64, step: usize) {
        let delay = self.timing().step_dim_delay_ms;
        self.timeline.schedule_after(now_ms, delay, Cue::DimStep(step));
    }

    fn jitter(&mut self, min_ms: u32, span_ms: u32) -> u32 {
        min_ms + self.rng.gen_range(0..span_ms.max(1))
    }

    // `at` is the nominal deadline. Finale cues chain from it; ambient cues
    // chain from `now_ms` so a long pause in frames never replays them.
    fn dispatch(
        &mut self,
        at: f64,
        now_ms: f64,
        cue: Cue,
        audio: &mut impl AudioEngine,
        visual: &mut impl VisualSurface,
    ) {
        let t = self.timing().clone();
        match cue {
            Cue::GlitchPulse => visual.apply_glitch_pulse(t.glitch_pulse_ms),
            Cue::ResetAndReveal => {
                self.sequencer.reset(audio, visual);
                visual.reveal_all_steps();
            }
            Cue::ArmClip => self.arm_clip(at, audio, visual),
            Cue::StartClip => {
                match audio.play_clip(t.clip_ramp) {
                    Ok(left) => log::info!("[finale] clip playing, {:.1}s left", left),
                    Err(e) => log::warn!("[finale] clip start failed: {}", e),
                }
                visual.set_ambient_intensity(t.ambient_bright);
                self.phase = FinalePhase::ClipPlaying;
            }
            Cue::EndClip => {
                visual.pulse_thumping(false);
                self.phase = FinalePhase::Closing;
                FinaleChain::closing(&t).fire(at, &mut self.timeline);
            }
            Cue::BeginNarrative => visual.begin_narrative(NARRATIVE_TEXT),
            Cue::Blackout => visual.set_blackout(1.0),
            Cue::ShowText => visual.set_narrative_visible(true),
            Cue::HideText => visual.set_narrative_visible(false),
            Cue::ShakeText => {
                if self.phase == FinalePhase::Closing {
                    visual.shake_narrative();
                    let next = self.jitter(TEXT_SHAKE_MIN_MS, TEXT_SHAKE_JITTER_MS);
                    self.timeline.schedule_after(at, next, Cue::ShakeText);
                }
            }
            Cue::Crackle => {
                let since = *self.crackles_since.get_or_insert(at);
                audio.play_sample(SampleId::Crackle);
                if at - since < t.crackle_window_ms as f64 {
                    let next = self.jitter(CRACKLE_MIN_MS, CRACKLE_JITTER_MS);
                    self.timeline.schedule_after(at, next, Cue::Crackle);
                }
            }
            Cue::EndNarrative => {
                visual.teardown_narrative();
                visual.set_blackout(1.0);
                self.phase = FinalePhase::Terminal;
                log::info!("[finale] done");
            }
            Cue::DimStep(step) => {
                if !self.clip_played {
                    visual.dim_step(step);
                }
            }
            Cue::BadBulb => {
                let steps = visual.step_count();
                if steps > 0 {
                    let count = self.rng.gen_range(BULB_MIN_KEYS..=BULB_MAX_KEYS);
                    let picks: SmallVec<[usize; 8]> =
                        (0..count).map(|_| self.rng.gen_range(0..steps)).collect();
                    visual.flicker_bulbs(&picks);
                }
                let next = self.jitter(BULB_MIN_MS, BULB_JITTER_MS);
                self.timeline.schedule_after(now_ms, next, Cue::BadBulb);
            }
            Cue::ScreenFlicker => {
                let hue = if self.rng.gen_bool(FLICKER_COLOR_CHANCE) {
                    Some(self.rng.gen_range(0..360u16))
                } else {
                    None
                };
                visual.flicker_screen(hue);
                let next = self.jitter(FLICKER_MIN_MS, FLICKER_JITTER_MS);
                self.timeline.schedule_after(now_ms, next, Cue::ScreenFlicker);
            }
        }
    }

    // Plays at most once per session and never retries a clip that was
    // still decoding.
    fn arm_clip(&mut self, at: f64, audio: &mut impl AudioEngine, visual: &mut impl VisualSurface) {
        if self.clip_played {
            log::debug!("[finale] {}", StageError::RedundantTrigger("clip"));
            return;
        }
        let Some(total_sec) = audio.clip_duration() else {
            log::info!("[finale] {}", StageError::ResourceNotReady);
            self.phase = if self.sequencer.cursor() > 0 {
                FinalePhase::Progressing
            } else {
                FinalePhase::Idle
            };
            return;
        };
        audio.play_sample(SampleId::Glitch);
        visual.mark_volume_active();
        visual.pulse_thumping(true);
        self.clip_played = true;
        self.phase = FinalePhase::ClipFading;

        let t = self.timing().clone();
        let remaining = total_sec - t.clip_ramp.offset_sec;
        FinaleChain::clip(&t, remaining).fire(at, &mut self.timeline);
    }
}
