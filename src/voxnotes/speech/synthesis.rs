use crate::error::Result;
use tracing::{debug, warn};

pub const DEFAULT_RATE: f32 = 1.0;
pub const MIN_RATE: f32 = 0.1;
pub const MAX_RATE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` means the engine's default voice.
    pub voice: Option<Voice>,
    pub rate: f32,
}

/// A text-to-speech engine.
pub trait Synthesizer {
    /// The voices currently installed. May change over time.
    fn voices(&self) -> Result<Vec<Voice>>;

    /// Start speaking. Does not need to block until playback ends.
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Stop any playback in progress. Cancelling while silent is a no-op.
    fn cancel(&mut self) -> Result<()>;
}

/// Front-end over a [`Synthesizer`]: caches the voice directory and makes
/// every new request replace whatever is playing.
pub struct Narrator<S: Synthesizer> {
    synth: S,
    voices: Vec<Voice>,
}

impl<S: Synthesizer> Narrator<S> {
    pub fn new(synth: S) -> Self {
        let mut narrator = Self {
            synth,
            voices: Vec::new(),
        };
        if let Err(e) = narrator.refresh_voices() {
            warn!(error = %e, "could not list voices");
        }
        narrator
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Re-read the voice directory, e.g. after it reported a change.
    pub fn refresh_voices(&mut self) -> Result<usize> {
        self.voices = self.synth.voices()?;
        debug!(count = self.voices.len(), "voice list refreshed");
        Ok(self.voices.len())
    }

    pub fn synthesizer_mut(&mut self) -> &mut S {
        &mut self.synth
    }

    /// Cancel current playback, then speak `text`. Blank text is ignored and
    /// returns `Ok(false)`.
    pub fn speak(&mut self, text: &str, voice: Option<&str>, rate: f32) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        self.synth.cancel()?;
        let utterance = Utterance {
            text: text.to_string(),
            voice: voice.and_then(|name| self.find_voice(name)),
            rate: clamp_rate(rate),
        };
        self.synth.speak(&utterance)?;
        Ok(true)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.synth.cancel()
    }

    fn find_voice(&self, name: &str) -> Option<Voice> {
        let found = self
            .voices
            .iter()
            .find(|v| v.name == name)
            .or_else(|| self.voices.iter().find(|v| v.name.eq_ignore_ascii_case(name)))
            .cloned();
        if found.is_none() {
            debug!(voice = name, "unknown voice, using default");
        }
        found
    }
}

pub fn clamp_rate(rate: f32) -> f32 {
    if rate.is_finite() {
        rate.clamp(MIN_RATE, MAX_RATE)
    } else {
        DEFAULT_RATE
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::NotesError;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Speak(Utterance),
        Cancel,
    }

    #[derive(Default)]
    pub(crate) struct RecordingSynth {
        pub voices: Vec<Voice>,
        pub calls: Vec<Call>,
        pub fail_voices: bool,
    }

    impl Synthesizer for RecordingSynth {
        fn voices(&self) -> Result<Vec<Voice>> {
            if self.fail_voices {
                return Err(NotesError::Api("no voice directory".into()));
            }
            Ok(self.voices.clone())
        }

        fn speak(&mut self, utterance: &Utterance) -> Result<()> {
            self.calls.push(Call::Speak(utterance.clone()));
            Ok(())
        }

        fn cancel(&mut self) -> Result<()> {
            self.calls.push(Call::Cancel);
            Ok(())
        }
    }

    fn narrator() -> Narrator<RecordingSynth> {
        Narrator::new(RecordingSynth {
            voices: vec![Voice::new("Alex", "en-US"), Voice::new("Amelie", "fr-CA")],
            ..RecordingSynth::default()
        })
    }

    #[test]
    fn speak_always_cancels_first() {
        let mut narrator = narrator();
        narrator.speak("one", None, 1.0).unwrap();
        narrator.speak("two", None, 1.0).unwrap();

        let calls = &narrator.synthesizer_mut().calls;
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], Call::Cancel);
        assert_eq!(calls[2], Call::Cancel);
        assert!(matches!(&calls[3], Call::Speak(u) if u.text == "two"));
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut narrator = narrator();
        assert!(!narrator.speak(" \n ", None, 1.0).unwrap());
        assert!(narrator.synthesizer_mut().calls.is_empty());
    }

    #[test]
    fn resolves_voice_by_name() {
        let mut narrator = narrator();
        narrator.speak("bonjour", Some("amelie"), 1.0).unwrap();
        let Some(Call::Speak(u)) = narrator.synthesizer_mut().calls.last().cloned() else {
            panic!("expected speak");
        };
        assert_eq!(u.voice, Some(Voice::new("Amelie", "fr-CA")));
    }

    #[test]
    fn unknown_voice_falls_back_to_default() {
        let mut narrator = narrator();
        narrator.speak("hi", Some("Nobody"), 1.0).unwrap();
        let Some(Call::Speak(u)) = narrator.synthesizer_mut().calls.last().cloned() else {
            panic!("expected speak");
        };
        assert_eq!(u.voice, None);
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(clamp_rate(0.0), MIN_RATE);
        assert_eq!(clamp_rate(50.0), MAX_RATE);
        assert_eq!(clamp_rate(f32::NAN), DEFAULT_RATE);
        assert_eq!(clamp_rate(1.5), 1.5);
    }

    #[test]
    fn refresh_picks_up_new_voices() {
        let mut narrator = narrator();
        assert_eq!(narrator.voices().len(), 2);
        narrator
            .synthesizer_mut()
            .voices
            .push(Voice::new("Daniel", "en-GB"));
        assert_eq!(narrator.refresh_voices().unwrap(), 3);
    }

    #[test]
    fn missing_voice_directory_is_tolerated() {
        let narrator = Narrator::new(RecordingSynth {
            fail_voices: true,
            ..RecordingSynth::default()
        });
        assert!(narrator.voices().is_empty());
    }
}
