pub mod backdrop;
pub mod constants;
pub mod error;
pub mod finale;
pub mod keys;
pub mod phrase;
pub mod ports;
pub mod sequencer;
pub mod stage;
pub mod timeline;

pub use backdrop::*;
pub use error::*;
pub use finale::*;
pub use keys::*;
pub use phrase::*;
pub use ports::*;
pub use sequencer::*;
pub use stage::*;
