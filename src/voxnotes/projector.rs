//! # List Projection
//!
//! Derives the read-only list shown to the user from the note collection and
//! a search query. It is a pure function: same notes and query, same output.
//!
//! ## Ordering
//!
//! Notes are sorted by `updated`, newest first. The sort is stable, so notes
//! with equal timestamps keep their collection order.
//!
//! ## Display indexes
//!
//! Every note gets a 1-based index from its position in the *unfiltered*
//! sorted list. Filtering never renumbers, so `3` names the same note whether
//! or not a search is active:
//!
//! ```text
//! list            search "milk"
//! 1. Work         2. Grocery
//! 2. Grocery
//! 3. Ideas
//! ```

use crate::model::Note;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedNote {
    pub index: usize,
    pub note: Note,
}

/// All notes matching `query`, newest first.
pub fn project(notes: &[Note], query: &str) -> Vec<ListedNote> {
    let needle = query.trim().to_lowercase();

    sorted(notes)
        .into_iter()
        .enumerate()
        .filter(|(_, note)| matches(note, &needle))
        .map(|(i, note)| ListedNote {
            index: i + 1,
            note: note.clone(),
        })
        .collect()
}

/// Look up a note by its display index.
pub fn by_index(notes: &[Note], index: usize) -> Option<&Note> {
    if index == 0 {
        return None;
    }
    sorted(notes).into_iter().nth(index - 1)
}

fn sorted(notes: &[Note]) -> Vec<&Note> {
    let mut refs: Vec<&Note> = notes.iter().collect();
    refs.sort_by(|a, b| b.updated.cmp(&a.updated));
    refs
}

fn matches(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteId;

    fn note(id: &str, title: &str, content: &str, updated: i64) -> Note {
        Note {
            id: NoteId::from(id),
            title: title.into(),
            content: content.into(),
            updated,
        }
    }

    fn sample() -> Vec<Note> {
        vec![
            note("g", "Grocery", "milk", 100),
            note("w", "Work", "deploy app", 200),
        ]
    }

    fn ids(listed: &[ListedNote]) -> Vec<&str> {
        listed.iter().map(|l| l.note.id.as_str()).collect()
    }

    #[test]
    fn query_filters_by_content() {
        let listed = project(&sample(), "milk");
        assert_eq!(ids(&listed), vec!["g"]);
    }

    #[test]
    fn empty_query_returns_all_newest_first() {
        let listed = project(&sample(), "");
        assert_eq!(ids(&listed), vec!["w", "g"]);
        assert_eq!(listed[0].index, 1);
        assert_eq!(listed[1].index, 2);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let listed = project(&sample(), "  WORK ");
        assert_eq!(ids(&listed), vec!["w"]);
        let listed = project(&sample(), "DePlOy");
        assert_eq!(ids(&listed), vec!["w"]);
    }

    #[test]
    fn filtering_keeps_unfiltered_indexes() {
        let listed = project(&sample(), "grocery");
        assert_eq!(listed[0].index, 2);
    }

    #[test]
    fn ties_keep_collection_order() {
        let notes = vec![
            note("a", "A", "", 5),
            note("b", "B", "", 5),
            note("c", "C", "", 9),
        ];
        assert_eq!(ids(&project(&notes, "")), vec!["c", "a", "b"]);
    }

    #[test]
    fn projection_is_idempotent() {
        let notes = sample();
        assert_eq!(project(&notes, "a"), project(&notes, "a"));
    }

    #[test]
    fn no_match_is_empty() {
        assert!(project(&sample(), "zzz").is_empty());
    }

    #[test]
    fn by_index_follows_display_order() {
        let notes = sample();
        assert_eq!(by_index(&notes, 1).map(|n| n.id.as_str()), Some("w"));
        assert_eq!(by_index(&notes, 2).map(|n| n.id.as_str()), Some("g"));
        assert!(by_index(&notes, 0).is_none());
        assert!(by_index(&notes, 3).is_none());
    }
}
