//! # Speech boundary
//!
//! Dictation and read-aloud are external capabilities. This module only
//! defines the seams the notebook talks to:
//!
//! - [`dictation`]: events a capture device emits while listening, and the
//!   [`TranscriptSource`](dictation::TranscriptSource) trait that produces them
//! - [`synthesis`]: the [`Synthesizer`](synthesis::Synthesizer) trait and the
//!   [`Narrator`](synthesis::Narrator) front-end that always cancels playback
//!   before speaking
//! - [`command`]: a synthesizer that drives the platform speech command
//!   (`say` / `espeak`)

pub mod command;
pub mod dictation;
pub mod synthesis;

pub use dictation::{CaptureFailure, DictationEvent, LineTranscript, TranscriptSource};
pub use synthesis::{Narrator, Synthesizer, Utterance, Voice};
