use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Theme;
use crate::notebook::Notebook;
use crate::store::KvStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

pub fn run<K: KvStore>(nb: &mut Notebook<K>, action: ThemeAction) -> Result<CmdResult> {
    let theme = match action {
        ThemeAction::Show => return Ok(CmdResult::default().with_theme(nb.theme())),
        ThemeAction::Set(theme) => {
            nb.set_theme(theme)?;
            theme
        }
        ThemeAction::Toggle => nb.toggle_theme()?,
    };
    let mut result = CmdResult::default().with_theme(theme);
    result.add_message(CmdMessage::success(format!("Theme set to {}", theme)));
    Ok(result)
}
