use crate::error::Result;
use std::io::{BufRead, ErrorKind};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureFailure {
    /// No capture capability at all. Dictation stays off for the session.
    Unavailable,
    /// The capability exists but access was refused.
    PermissionDenied(String),
    /// The device stopped delivering a readable transcript.
    Interrupted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationEvent {
    Started,
    Fragment(String),
    Ended,
    Failed(CaptureFailure),
}

/// A speech-to-text capture device.
///
/// Events come out in the order the device produced them; `None` means no
/// more events will arrive.
pub trait TranscriptSource {
    /// Begin capture, recognizing speech in `lang` (a BCP 47 tag such as
    /// `en-US`).
    fn start(&mut self, lang: &str) -> Result<()>;
    fn stop(&mut self);
    fn next_event(&mut self) -> Option<DictationEvent>;
}

/// Reads transcript lines from a reader, e.g. the output of an external
/// speech-to-text tool piped into stdin. Each line is one fragment, newline
/// included.
///
/// The tool upstream does the recognizing, so the language is only recorded
/// for the host to show or forward.
pub struct LineTranscript<R: BufRead> {
    reader: R,
    phase: Phase,
    lang: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Starting,
    Listening,
    Ending,
    Done,
}

impl<R: BufRead> LineTranscript<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            phase: Phase::Idle,
            lang: None,
        }
    }

    /// Language requested by the last `start`.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

impl<R: BufRead> TranscriptSource for LineTranscript<R> {
    fn start(&mut self, lang: &str) -> Result<()> {
        if self.phase == Phase::Idle {
            debug!(lang, "transcript capture started");
            self.lang = Some(lang.to_string());
            self.phase = Phase::Starting;
        }
        Ok(())
    }

    fn stop(&mut self) {
        if matches!(self.phase, Phase::Starting | Phase::Listening) {
            self.phase = Phase::Ending;
        }
    }

    fn next_event(&mut self) -> Option<DictationEvent> {
        match self.phase {
            Phase::Idle | Phase::Done => None,
            Phase::Starting => {
                self.phase = Phase::Listening;
                Some(DictationEvent::Started)
            }
            Phase::Ending => {
                self.phase = Phase::Done;
                Some(DictationEvent::Ended)
            }
            Phase::Listening => {
                let mut line = String::new();
                match self.reader.read_line(&mut line) {
                    Ok(0) => {
                        self.phase = Phase::Done;
                        Some(DictationEvent::Ended)
                    }
                    Ok(_) => Some(DictationEvent::Fragment(line)),
                    Err(e) => {
                        self.phase = Phase::Done;
                        let failure = match e.kind() {
                            ErrorKind::PermissionDenied => {
                                CaptureFailure::PermissionDenied(e.to_string())
                            }
                            _ => CaptureFailure::Interrupted(e.to_string()),
                        };
                        Some(DictationEvent::Failed(failure))
                    }
                }
            }
        }
    }
}
