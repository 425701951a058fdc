use super::constants::{DEFAULT_MELODY, DEFAULT_PHRASE};
use super::error::StageError;
use super::finale::FinaleTiming;

/// The secret character sequence. Stored upper-cased; matching ignores case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetPhrase {
    chars: Vec<char>,
}

impl TargetPhrase {
    pub fn new(text: &str) -> Result<Self, StageError> {
        let chars: Vec<char> = text.chars().flat_map(char::to_uppercase).collect();
        if chars.is_empty() {
            return Err(StageError::EmptyPhrase);
        }
        Ok(Self { chars })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// True when `key` is the character expected at `index`, ignoring case.
    pub fn matches(&self, index: usize, key: char) -> bool {
        match self.get(index) {
            Some(expected) => key.to_uppercase().eq(expected.to_uppercase()),
            None => false,
        }
    }
}

/// A pitched note in scientific notation, e.g. `A4` or `G#4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    name: String,
    midi: i32,
}

impl Note {
    pub fn parse(name: &str) -> Result<Self, StageError> {
        let bad = || StageError::BadNote(name.to_string());
        let mut chars = name.chars();
        let pitch_class = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(bad()),
        };
        let rest = chars.as_str();
        let (accidental, octave) = if let Some(o) = rest.strip_prefix('#') {
            (1, o)
        } else if let Some(o) = rest.strip_prefix('b') {
            (-1, o)
        } else {
            (0, rest)
        };
        let octave: i32 = octave.parse().map_err(|_| bad())?;
        Ok(Self {
            name: name.to_string(),
            midi: (octave + 1) * 12 + pitch_class + accidental,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn midi(&self) -> i32 {
        self.midi
    }

    pub fn frequency_hz(&self) -> f32 {
        midi_to_hz(self.midi as f32)
    }
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Notes played in lockstep with the phrase: `notes[i]` sounds when
/// character `i` is matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MelodyTrack {
    notes: Vec<Note>,
}

impl MelodyTrack {
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, StageError> {
        let notes = names
            .iter()
            .map(|n| Note::parse(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { notes })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }
}

/// Everything that distinguishes one variant of the page from another:
/// the phrase, its melody and the finale timing table.
#[derive(Clone, Debug)]
pub struct Script {
    pub phrase: TargetPhrase,
    pub melody: MelodyTrack,
    pub timing: FinaleTiming,
}

impl Script {
    pub fn new(
        phrase: TargetPhrase,
        melody: MelodyTrack,
        timing: FinaleTiming,
    ) -> Result<Self, StageError> {
        if phrase.len() != melody.len() {
            return Err(StageError::LengthMismatch {
                phrase: phrase.len(),
                melody: melody.len(),
            });
        }
        Ok(Self {
            phrase,
            melody,
            timing,
        })
    }

    /// The phrase and melody shipped with the page.
    pub fn nothing_quite_like_you() -> Result<Self, StageError> {
        Self::new(
            TargetPhrase::new(DEFAULT_PHRASE)?,
            MelodyTrack::parse(&DEFAULT_MELODY)?,
            FinaleTiming::default(),
        )
    }
}
