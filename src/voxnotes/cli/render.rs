use chrono::Utc;
use colored::{ColoredString, Colorize};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use voxnotes::api::{CmdMessage, MessageLevel};
use voxnotes::model::Theme;
use voxnotes::projector::ListedNote;
use voxnotes::speech::Voice;

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PREVIEW_CHARS: usize = 60;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Index color follows the theme so it stays readable on both backgrounds.
fn accent(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.blue(),
        Theme::Dark => text.yellow(),
    }
}

pub(super) fn print_notes(notes: &[ListedNote], theme: Theme) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }
    for line in notes.iter().map(|l| format_line(l, theme)) {
        println!("{}", line);
    }
}

fn format_line(listed: &ListedNote, theme: Theme) -> String {
    let idx_str = format!("{}. ", listed.index);
    let left_prefix = "  ";
    let note = &listed.note;

    let preview = content_preview(&note.content);
    let title_content = if preview.is_empty() {
        note.display_title().to_string()
    } else {
        format!("{}  {}", note.display_title(), preview)
    };

    let fixed_width = left_prefix.width() + idx_str.width() + 2 + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let title_display = truncate_to_width(&title_content, available);
    let padding = available.saturating_sub(title_display.width());

    format!(
        "{}{}{}{}  {}",
        left_prefix,
        accent(&idx_str, theme),
        title_display,
        " ".repeat(padding),
        format_time_ago(note.updated).dimmed()
    )
}

/// First stretch of the content on one line.
fn content_preview(content: &str) -> String {
    content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

pub(super) fn print_full_notes(notes: &[ListedNote], theme: Theme) {
    for (i, listed) in notes.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}  {}",
            accent(&listed.index.to_string(), theme),
            listed.note.display_title().bold(),
            listed.note.id.short().dimmed()
        );
        println!("--------------------------------");
        println!("{}", listed.note.content);
        println!(
            "{}",
            format!(
                "{} chars, updated {}",
                listed.note.content.chars().count(),
                format_time_ago(listed.note.updated).trim()
            )
            .dimmed()
        );
    }
}

pub(super) fn print_voices(voices: &[Voice]) {
    for voice in voices {
        println!("{:<28} {}", voice.name, voice.lang.dimmed());
    }
}

pub(super) fn print_text_list(lines: &[String], empty_message: &str) {
    if lines.is_empty() {
        println!("{}", empty_message.dimmed());
    }
    for line in lines {
        println!("{}", line);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(updated_ms: i64) -> String {
    let elapsed = Utc::now().timestamp_millis().saturating_sub(updated_ms);
    let duration = std::time::Duration::from_millis(elapsed.max(0) as u64);

    let time_str = if duration.as_secs() < 60 {
        "just now".to_string()
    } else {
        Formatter::new().convert(duration)
    };

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnotes::model::Note;

    #[test]
    fn truncates_wide_titles() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 10), "abc");
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn preview_is_single_line() {
        assert_eq!(content_preview("milk\neggs\n"), "milk eggs");
    }

    #[test]
    fn recent_notes_read_just_now() {
        let now = Utc::now().timestamp_millis();
        assert_eq!(format_time_ago(now).trim(), "just now");
        assert_eq!(format_time_ago(now + 5_000).trim(), "just now");
    }

    #[test]
    fn line_fits_width() {
        colored::control::set_override(false);
        let listed = ListedNote {
            index: 12,
            note: Note::new("x".repeat(200), String::new(), 0),
        };
        let line = format_line(&listed, Theme::Light);
        assert!(line.width() <= LINE_WIDTH);
        assert!(line.starts_with("  12. xxx"));
    }
}
