use crate::commands::{count_label, CmdMessage, CmdResult};
use crate::error::Result;
use crate::notebook::Notebook;
use crate::store::KvStore;

/// Delete every note. The caller is responsible for confirmation.
pub fn run<K: KvStore>(nb: &mut Notebook<K>) -> Result<CmdResult> {
    let removed = nb.delete_all()?;
    let mut result = CmdResult::default();
    if removed == 0 {
        result.add_message(CmdMessage::info("No notes to delete."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Deleted {}",
            count_label(removed)
        )));
    }
    Ok(result)
}
