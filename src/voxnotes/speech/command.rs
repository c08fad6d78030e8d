use super::synthesis::{Synthesizer, Utterance, Voice};
use crate::error::{NotesError, Result};
use std::process::{Child, Command, Stdio};

/// Words per minute at rate 1.0, for both `say` and `espeak`.
const BASE_WPM: f32 = 175.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Say,
    Espeak,
}

/// Speaks through an external program.
/// - macOS: `say`
/// - elsewhere: `espeak` (or `espeak-ng` when configured)
///
/// Playback runs in a child process; [`Synthesizer::cancel`] kills it.
pub struct CommandSynthesizer {
    program: String,
    child: Option<Child>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: None,
        }
    }

    pub fn platform_default() -> Self {
        #[cfg(target_os = "macos")]
        {
            Self::new("say")
        }

        #[cfg(not(target_os = "macos"))]
        {
            Self::new("espeak")
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Block until the current utterance finishes.
    pub fn wait(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            let status = child.wait().map_err(NotesError::Io)?;
            if !status.success() {
                return Err(NotesError::Api(format!(
                    "{} exited with error",
                    self.program
                )));
            }
        }
        Ok(())
    }

    fn flavor(&self) -> Flavor {
        let name = std::path::Path::new(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if name == "say" {
            Flavor::Say
        } else {
            Flavor::Espeak
        }
    }

    fn speak_args(&self, utterance: &Utterance) -> Vec<String> {
        let wpm = (BASE_WPM * utterance.rate).round().max(1.0) as u32;
        let mut args = match self.flavor() {
            Flavor::Say => vec!["-r".to_string(), wpm.to_string()],
            Flavor::Espeak => vec!["-s".to_string(), wpm.to_string()],
        };
        if let Some(voice) = &utterance.voice {
            args.push("-v".to_string());
            args.push(match self.flavor() {
                Flavor::Say => voice.name.clone(),
                Flavor::Espeak => voice.lang.clone(),
            });
        }
        // End of options, so text starting with '-' is not taken as a flag.
        args.push("--".to_string());
        args.push(utterance.text.clone());
        args
    }
}

impl Synthesizer for CommandSynthesizer {
    fn voices(&self) -> Result<Vec<Voice>> {
        let flavor = self.flavor();
        let args: &[&str] = match flavor {
            Flavor::Say => &["-v", "?"],
            Flavor::Espeak => &["--voices"],
        };
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| NotesError::Api(format!("Failed to run {}: {}", self.program, e)))?;
        let listing = String::from_utf8_lossy(&output.stdout);
        Ok(match flavor {
            Flavor::Say => parse_say_voices(&listing),
            Flavor::Espeak => parse_espeak_voices(&listing),
        })
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        let child = Command::new(&self.program)
            .args(self.speak_args(utterance))
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| {
                NotesError::Api(format!(
                    "Failed to spawn {}: {}. Install it or set speech_command.",
                    self.program, e
                ))
            })?;
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            if child.try_wait().map_err(NotesError::Io)?.is_none() {
                child.kill().map_err(NotesError::Io)?;
            }
            let _ = child.wait();
        }
        Ok(())
    }
}

/// Parse `say -v ?` output: `Name   lang_REGION   # sample sentence`.
fn parse_say_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter_map(|line| {
            let entry = line.split('#').next()?.trim();
            let (name, lang) = entry.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Voice::new(name, lang.replace('_', "-")))
        })
        .collect()
}

/// Parse `espeak --voices` output, skipping the header row.
fn parse_espeak_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 4 {
                return None;
            }
            Some(Voice::new(cols[3], cols[1]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_say_listing() {
        let listing = "Alex                en_US    # Most people recognize me by my voice.\n\
                       Bad News            en_US    # The light you see at the end of the tunnel.\n";
        let voices = parse_say_voices(listing);
        assert_eq!(
            voices,
            vec![
                Voice::new("Alex", "en-US"),
                Voice::new("Bad News", "en-US")
            ]
        );
    }

    #[test]
    fn parses_espeak_listing() {
        let listing = "Pty Language       Age/Gender VoiceName          File                 Other Languages\n \
                       5  af              --/M      Afrikaans          gmw/af\n \
                       5  en-us           --/M      English_(America)  gmw/en-US            (en 3)\n";
        let voices = parse_espeak_voices(listing);
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1], Voice::new("English_(America)", "en-us"));
    }

    #[test]
    fn say_args_use_voice_name_and_wpm() {
        let synth = CommandSynthesizer::new("/usr/bin/say");
        let args = synth.speak_args(&Utterance {
            text: "-hello".into(),
            voice: Some(Voice::new("Alex", "en-US")),
            rate: 2.0,
        });
        assert_eq!(args, vec!["-r", "350", "-v", "Alex", "--", "-hello"]);
    }

    #[test]
    fn espeak_args_use_language() {
        let synth = CommandSynthesizer::new("espeak-ng");
        let args = synth.speak_args(&Utterance {
            text: "hi".into(),
            voice: Some(Voice::new("Afrikaans", "af")),
            rate: 1.0,
        });
        assert_eq!(args, vec!["-s", "175", "-v", "af", "--", "hi"]);
    }

    #[test]
    fn cancel_without_playback_is_noop() {
        let mut synth = CommandSynthesizer::new("espeak");
        synth.cancel().unwrap();
        synth.cancel().unwrap();
    }
}
