use crate::commands::CmdResult;
use crate::error::{NotesError, Result};
use crate::model::NoteId;
use crate::notebook::Notebook;
use crate::store::KvStore;

/// Full notes for `ids`, in the order asked, each with its display index.
pub fn run<K: KvStore>(nb: &Notebook<K>, ids: &[NoteId]) -> Result<CmdResult> {
    let listed = nb.view("");
    let mut picked = Vec::with_capacity(ids.len());
    for id in ids {
        let entry = listed
            .iter()
            .find(|l| &l.note.id == id)
            .ok_or_else(|| NotesError::NotFound(id.clone()))?;
        picked.push(entry.clone());
    }
    Ok(CmdResult::default().with_listed_notes(picked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::notebook::tests::notebook;

    #[test]
    fn views_in_requested_order() {
        let (mut nb, clock) = notebook();
        let a = create::run(&mut nb, "A".into(), "".into()).unwrap();
        clock.advance(1);
        let b = create::run(&mut nb, "B".into(), "".into()).unwrap();
        let ids = vec![
            a.affected_notes[0].id.clone(),
            b.affected_notes[0].id.clone(),
        ];

        let result = run(&nb, &ids).unwrap();
        assert_eq!(result.listed_notes[0].note.title, "A");
        assert_eq!(result.listed_notes[0].index, 2);
        assert_eq!(result.listed_notes[1].index, 1);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (nb, _clock) = notebook();
        let err = run(&nb, &[NoteId::from("nope")]).unwrap_err();
        assert!(matches!(err, NotesError::NotFound(_)));
    }
}
