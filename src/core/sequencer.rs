use super::error::StageError;
use super::phrase::Script;
use super::ports::{AudioEngine, VisualSurface};

/// Progress through the phrase. `finale_fired` survives `reset()`; only a
/// fresh session clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequencerState {
    pub cursor: usize,
    /// Step whose note is currently sounding.
    pub active_note: Option<usize>,
    pub completed: bool,
    pub finale_fired: bool,
}

/// What a keydown did to the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDown {
    Ignored,
    Advanced { step: usize },
    /// The last step was matched. `first` is true only for the completion
    /// that gets to fire the finale.
    Completed { step: usize, first: bool },
}

/// Matches typed characters against the phrase and plays the melody.
pub struct Sequencer {
    script: Script,
    state: SequencerState,
}

impl Sequencer {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            state: SequencerState::default(),
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    /// Wrong keys are ignored without losing progress; nothing happens
    /// once the phrase is complete until `reset()`.
    pub fn on_key_down(
        &mut self,
        key: char,
        audio: &mut impl AudioEngine,
        visual: &mut impl VisualSurface,
    ) -> KeyDown {
        if self.state.completed {
            return KeyDown::Ignored;
        }
        let step = self.state.cursor;
        if !self.script.phrase.matches(step, key) {
            return KeyDown::Ignored;
        }
        if let Some(note) = self.script.melody.get(step) {
            audio.play_note(note);
            self.state.active_note = Some(step);
        }
        visual.highlight_step(step);
        self.state.cursor += 1;

        if self.state.cursor == self.script.phrase.len() {
            self.state.completed = true;
            let first = match self.on_phrase_completed() {
                Ok(()) => true,
                Err(e) => {
                    log::debug!("[keys] {}", e);
                    false
                }
            };
            KeyDown::Completed { step, first }
        } else {
            visual.cue_step(self.state.cursor);
            KeyDown::Advanced { step }
        }
    }

    /// Releasing the key of the step just played stops its note.
    pub fn on_key_up(&mut self, key: char, audio: &mut impl AudioEngine) {
        let Some(last) = self.state.cursor.checked_sub(1) else {
            return;
        };
        if self.state.active_note.is_some() && self.script.phrase.matches(last, key) {
            audio.release_note();
            self.state.active_note = None;
        }
    }

    /// Back to the first step. Safe from any state, any number of times.
    pub fn reset(&mut self, audio: &mut impl AudioEngine, visual: &mut impl VisualSurface) {
        self.state.cursor = 0;
        self.state.completed = false;
        if self.state.active_note.take().is_some() {
            audio.release_note();
        }
        visual.reset_steps();
        visual.cue_step(0);
    }

    // One finale per session.
    fn on_phrase_completed(&mut self) -> Result<(), StageError> {
        if self.state.finale_fired {
            return Err(StageError::RedundantTrigger("finale"));
        }
        self.state.finale_fired = true;
        Ok(())
    }
}
