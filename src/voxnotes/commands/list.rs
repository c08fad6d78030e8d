use crate::commands::CmdResult;
use crate::error::Result;
use crate::notebook::Notebook;
use crate::store::KvStore;

pub fn run<K: KvStore>(nb: &Notebook<K>, query: Option<&str>) -> Result<CmdResult> {
    let listed = nb.view(query.unwrap_or(""));
    Ok(CmdResult::default().with_listed_notes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::notebook::tests::notebook;

    #[test]
    fn lists_newest_first() {
        let (mut nb, clock) = notebook();
        create::run(&mut nb, "Grocery".into(), "milk".into()).unwrap();
        clock.advance(5);
        create::run(&mut nb, "Work".into(), "deploy app".into()).unwrap();

        let result = run(&nb, None).unwrap();
        let titles: Vec<_> = result
            .listed_notes
            .iter()
            .map(|l| l.note.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Work", "Grocery"]);
        assert_eq!(result.listed_notes[1].index, 2);
    }

    #[test]
    fn search_keeps_unfiltered_index() {
        let (mut nb, clock) = notebook();
        create::run(&mut nb, "Grocery".into(), "milk".into()).unwrap();
        clock.advance(5);
        create::run(&mut nb, "Work".into(), "deploy app".into()).unwrap();

        let result = run(&nb, Some("MILK")).unwrap();
        assert_eq!(result.listed_notes.len(), 1);
        assert_eq!(result.listed_notes[0].index, 2);
    }

    #[test]
    fn empty_notebook_lists_nothing() {
        let (nb, _clock) = notebook();
        assert!(run(&nb, None).unwrap().listed_notes.is_empty());
    }
}
