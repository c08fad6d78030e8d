use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Note;
use crate::speech::{Narrator, Synthesizer};

/// Read `note` aloud. Any playback already running is cancelled first.
pub fn run<S: Synthesizer>(
    narrator: &mut Narrator<S>,
    note: &Note,
    voice: Option<&str>,
    rate: f32,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if narrator.speak(&note.spoken_text(), voice, rate)? {
        result.add_message(CmdMessage::info(format!(
            "Reading: {}",
            note.display_title()
        )));
        result.affected_notes.push(note.clone());
    } else {
        result.add_message(CmdMessage::warning("Nothing to read: the note is empty."));
    }
    Ok(result)
}

/// Voices the synthesizer offers.
pub fn voices<S: Synthesizer>(narrator: &mut Narrator<S>) -> Result<CmdResult> {
    narrator.refresh_voices()?;
    let mut result = CmdResult::default().with_voices(narrator.voices().to_vec());
    if result.voices.is_empty() {
        result.add_message(CmdMessage::info("No voices reported."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::synthesis::tests::{Call, RecordingSynth};
    use crate::speech::Voice;

    fn narrator() -> Narrator<RecordingSynth> {
        Narrator::new(RecordingSynth {
            voices: vec![Voice::new("Alex", "en-US")],
            ..RecordingSynth::default()
        })
    }

    #[test]
    fn speaks_title_then_content() {
        let mut narrator = narrator();
        let note = Note::new("Grocery".into(), "milk".into(), 1);

        run(&mut narrator, &note, Some("alex"), 1.5).unwrap();

        let Some(Call::Speak(u)) = narrator.synthesizer_mut().calls.last().cloned() else {
            panic!("expected a speak call");
        };
        assert_eq!(u.text, "Grocery\nmilk");
        assert_eq!(u.voice, Some(Voice::new("Alex", "en-US")));
        assert_eq!(u.rate, 1.5);
    }

    #[test]
    fn empty_note_is_not_spoken() {
        let mut narrator = narrator();
        let note = Note::new(String::new(), "  ".into(), 1);

        let result = run(&mut narrator, &note, None, 1.0).unwrap();
        assert!(result.affected_notes.is_empty());
        assert!(!narrator
            .synthesizer_mut()
            .calls
            .iter()
            .any(|c| matches!(c, Call::Speak(_))));
    }

    #[test]
    fn lists_voices() {
        let mut narrator = narrator();
        let result = voices(&mut narrator).unwrap();
        assert_eq!(result.voices, vec![Voice::new("Alex", "en-US")]);
    }
}
