use thiserror::Error;

/// Everything that can go wrong while building or playing the show.
///
/// None of these are fatal at runtime: the stage logs them and carries on
/// with reduced functionality.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// The finale clip was requested before it finished decoding.
    #[error("audio clip not yet loaded")]
    ResourceNotReady,
    /// A rendering or audio capability the page wanted is absent.
    #[error("{0} is not supported in this browser")]
    UnsupportedCapability(&'static str),
    /// A one-shot effect was asked for a second time.
    #[error("{0} already triggered")]
    RedundantTrigger(&'static str),
    #[error("phrase must contain at least one character")]
    EmptyPhrase,
    #[error("melody has {melody} notes but the phrase has {phrase} characters")]
    LengthMismatch { phrase: usize, melody: usize },
    #[error("unrecognised note name `{0}`")]
    BadNote(String),
}
