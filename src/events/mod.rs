pub mod keyboard;

pub use keyboard::{wire_audio_unlock, wire_keyboard, wire_reset_button};
