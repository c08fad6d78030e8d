use crate::commands::{count_label, CmdMessage, CmdResult};
use crate::error::Result;
use crate::notebook::Notebook;
use crate::store::KvStore;

/// Serialize the whole collection. Writing it out is the caller's job.
pub fn run<K: KvStore>(nb: &Notebook<K>) -> Result<CmdResult> {
    let payload = nb.export()?;
    let mut result = CmdResult::default()
        .with_affected_notes(nb.notes().to_vec())
        .with_export(payload);
    result.add_message(CmdMessage::success(format!(
        "Exported {}",
        count_label(nb.notes().len())
    )));
    Ok(result)
}
