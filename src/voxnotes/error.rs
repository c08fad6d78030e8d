use crate::model::NoteId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Note not found: {0}")]
    NotFound(NoteId),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Dictation is not available on this system")]
    CaptureUnavailable,

    #[error("Microphone access is blocked ({0}). Allow microphone access for the capture device and try again.")]
    CapturePermissionDenied(String),

    #[error("Dictation stopped: the transcript stream could not be read ({0})")]
    CaptureInterrupted(String),

    #[error("Failed to write notes: {0}")]
    StoreWrite(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NotesError>;
