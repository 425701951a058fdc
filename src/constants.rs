// DOM hooks, asset paths and synth tuning for the web front-end.

// Assets
pub const CLIP_URL: &str = "audio.mp3";
pub const GLITCH_SAMPLE_URL: &str = "glitch_short.wav";
pub const CRACKLE_SAMPLE_URL: &str = "crackles.wav";
pub const KICK_SAMPLE_SELECTOR: &str = "audio[data-key=\"kick\"]";
pub const SNARE_SAMPLE_SELECTOR: &str = "audio[data-key=\"snare\"]";

// Elements
pub const RESET_BUTTON_ID: &str = "reset-melody";
pub const BACKGROUND_CANVAS_ID: &str = "holographic-background";
pub const WEBGL_STATUS_ID: &str = "webgl-status";
pub const WEBGL_HELP_ID: &str = "webgl-instructions";
pub const MOBILE_NOTICE_ID: &str = "mobile-message";
pub const START_AUDIO_ID: &str = "start-audio";
pub const KEY_WRAPPER_SELECTOR: &str = ".key-container-wrapper";
pub const CONTAINER_SELECTOR: &str = ".container";
pub const VOLUME_LABEL_SELECTOR: &str = ".volume-label";
pub const IRIDESCENT_SELECTOR: &str = ".iridescent-layer";
pub const SCREW_POSITIONS: [&str; 4] = ["top-left", "top-right", "bottom-left", "bottom-right"];

// Class-flash durations (ms)
pub const PAD_FLASH_MS: i32 = 500;
pub const TEXT_SHAKE_MS: i32 = 500;
pub const BULB_FLASH_MS: i32 = 700;
pub const SCREEN_FLASH_MS: i32 = 100;
pub const SCREEN_SHAKE_MS: i32 = 200;
pub const GLITCH_REMOVE_MS: i32 = 100;

// Glitch overlay
pub const GLITCH_FLASH_CHANCE: f64 = 0.7;
pub const GLITCH_COLOR_CHANCE: f64 = 0.7;

// Synth voice
pub const SYNTH_SUSTAIN: f32 = 0.8;
pub const SYNTH_DECAY_SEC: f64 = 0.8;
pub const SYNTH_PORTAMENTO_SEC: f64 = 0.07;
pub const SYNTH_LEVEL: f32 = 0.3;

// Effects
pub const MASTER_GAIN: f32 = 0.8;
pub const DRY_GAIN: f32 = 0.65;
pub const DELAY_TIME_SEC: f64 = 0.5; // a quarter note at 120 bpm
pub const DELAY_FEEDBACK: f32 = 0.25;
pub const REVERB_DECAY_SEC: f32 = 1.5;
pub const REVERB_WET: f32 = 0.35;
