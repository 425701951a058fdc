// Shared tuning constants for the sequencer, the finale and the ambient cosmetics.
// All delays are milliseconds relative to the moment their chain fires.

// Phrase and melody shipped with the page
pub const DEFAULT_PHRASE: &str = "NOTHINGQUITELIKEYOU";
pub const DEFAULT_MELODY: [&str; 19] = [
    "A4", "B4", "G#4", "A4", "G#4", "E4", "F#4", //
    "C#4", "E4", "B4", "G#4", "A4", "G#4", "E4", //
    "A4", "A4", "A4", "G#4", "E4",
];

// Completion chain
pub const COMPLETE_GLITCH_DELAY_MS: u32 = 200;
pub const COMPLETE_RESET_DELAY_MS: u32 = 400; // reset + reveal + arm the clip
pub const GLITCH_PULSE_MS: u32 = 1800;

// Clip chain (relative to arming)
pub const CLIP_GLITCH_DELAY_MS: u32 = 200;
pub const CLIP_START_DELAY_MS: u32 = 2300;
pub const CLIP_OFFSET_SEC: f64 = 50.0; // playback starts this far into the clip
pub const CLIP_FADE_FROM_GAIN: f32 = 0.1;
pub const CLIP_FADE_SEC: f64 = 1.5;
pub const AMBIENT_BRIGHT: f32 = 0.8;

// Step visuals
pub const STEP_DIM_DELAY_MS: u32 = 500;

// Closing narrative (relative to its start)
pub const BLACKOUT_DELAY_MS: u32 = 100;
pub const TEXT_IN_DELAY_MS: u32 = 2000;
pub const TEXT_OUT_DELAY_MS: u32 = 27_800;
pub const NARRATIVE_WINDOW_MS: u32 = 30_000;
pub const TEXT_SHAKE_MIN_MS: u32 = 3900;
pub const TEXT_SHAKE_JITTER_MS: u32 = 500;
pub const CRACKLE_WINDOW_MS: u32 = 30_000;
pub const CRACKLE_MIN_MS: u32 = 1800;
pub const CRACKLE_JITTER_MS: u32 = 4000;

// Ambient cosmetics
pub const BULB_MIN_MS: u32 = 500;
pub const BULB_JITTER_MS: u32 = 1000;
pub const BULB_MIN_KEYS: usize = 2;
pub const BULB_MAX_KEYS: usize = 5;
pub const FLICKER_MIN_MS: u32 = 2000;
pub const FLICKER_JITTER_MS: u32 = 500;
pub const FLICKER_COLOR_CHANCE: f64 = 0.8; // otherwise a black flash

pub const NARRATIVE_TEXT: &str = "Recent studies in the field of neuropharmacology have identified a novel neurotransmitter dubbed \"purple neon\" (C22H28N2O3, colloquially known as \"mood lightning\"). This compound, structurally similar to serotonin but with an unprecedented efficacy, has shown remarkable potential in modulating affective states. Fascinatingly, purple neon exhibits a unique characteristic: it can only manifest when two individuals with complementary neurochemical profiles encounter each other, a phenomenon termed \"dyadic resonance.\" Once activated, the effects are persistent and the neurochemical bond between the two subjects becomes inseparable, leading some researchers to playfully refer to it as \"molecular entanglement of the heart.\" In controlled trials, subjects experiencing purple neon exhibited a 420% increase in reported happiness levels, with side effects limited to an inexplicable affinity for synthwave music and a compulsion to wear reflective sunglasses indoors. The mechanism of action is hypothesized to involve the stimulation of the newly discovered \"radical gnarliness\" receptors in the prefrontal cortex. While further research is needed, preliminary data suggest that purple neon could revolutionize our understanding of interpersonal biochemistry and mood disorders, potentially rendering traditional antidepressants as obsolete as floppy disks in the age of quantum computing.";
