//! # CLI Layer
//!
//! This module is **one possible UI client** for voxnotes. It is the only
//! place that reads the terminal, prints, or picks an exit code.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments to typed commands via clap
//! 2. **Context Setup**: data directory, config, logging and the `NotesApi`
//! 3. **API Dispatch**: one `handle_*` per subcommand
//! 4. **Output Formatting**: `CmdResult` to terminal output (see `render`)
//!
//! Business rules do not live here; handlers only gather input (editor,
//! stdin, files) and print what the API returns.

use super::render::{print_full_notes, print_messages, print_notes, print_text_list, print_voices};
use super::setup::{Cli, Commands, ThemeArg};
use clap::Parser;
use directories::ProjectDirs;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use voxnotes::api::{ConfigAction, NotesApi, ThemeAction};
use voxnotes::autosave::AutosaveScheduler;
use voxnotes::clock::SystemClock;
use voxnotes::config::NotesConfig;
use voxnotes::editor::{edit_content, EditorContent};
use voxnotes::error::{NotesError, Result};
use voxnotes::model::Theme;
use voxnotes::speech::command::CommandSynthesizer;
use voxnotes::speech::{LineTranscript, Narrator};
use voxnotes::store::fs::FileKv;
use voxnotes::store::NoteStore;
use voxnotes::transfer::DEFAULT_EXPORT_FILENAME;

const HOME_ENV: &str = "VOXNOTES_HOME";
const LOG_ENV: &str = "VOXNOTES_LOG";

struct AppContext {
    api: NotesApi<FileKv>,
    config: NotesConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::New {
            no_editor,
            title,
            content,
        }) => handle_new(&mut ctx, title, content, no_editor),
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::Search { term }) => handle_list(&mut ctx, Some(term.join(" "))),
        Some(Commands::View { selectors }) => handle_view(&mut ctx, selectors),
        Some(Commands::Edit { selector }) => handle_edit(&mut ctx, selector),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::Dictate { selector }) => handle_dictate(&mut ctx, selector),
        Some(Commands::Speak {
            selector,
            voice,
            rate,
        }) => handle_speak(&mut ctx, selector, voice, rate),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Export { file }) => handle_export(&mut ctx, file),
        Some(Commands::Import { file }) => handle_import(&mut ctx, file),
        Some(Commands::Voices) => handle_voices(&mut ctx),
        Some(Commands::Theme { mode }) => handle_theme(&mut ctx, mode),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("voxnotes=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("com", "voxnotes", "voxnotes")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotesError::Store("Could not determine data directory".to_string()))
}

fn init_context() -> Result<AppContext> {
    let dir = data_dir()?;
    debug!(dir = %dir.display(), "using data directory");

    let config = NotesConfig::load(&dir)?;
    let store =
        NoteStore::new(FileKv::new(dir.clone())).with_keys(&config.notes_key, &config.theme_key);
    let mut notebook = voxnotes::notebook::Notebook::load(
        store,
        Box::new(SystemClock),
        AutosaveScheduler::new(config.autosave_interval_ms),
    );
    notebook.open_most_recent();

    Ok(AppContext {
        api: NotesApi::new(notebook, dir),
        config,
    })
}

fn handle_new(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    no_editor: bool,
) -> Result<()> {
    let mut content = content.unwrap_or_default();
    let mut open_editor = !no_editor;

    // Piped input becomes the content and skips the editor.
    if content.is_empty() && !io::stdin().is_terminal() {
        let mut buffer = String::new();
        if io::stdin().read_to_string(&mut buffer).is_ok() && !buffer.trim().is_empty() {
            content = buffer;
            open_editor = false;
        }
    }

    let mut draft = EditorContent::new(title.unwrap_or_default(), content);
    if open_editor {
        draft = edit_content(&draft)?;
    }

    let result = ctx.api.create_note(draft.title, draft.content)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.list_notes(search.as_deref())?;
    print_notes(&result.listed_notes, ctx.api.notebook().theme());
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.view_notes(&selectors)?;
    print_full_notes(&result.listed_notes, ctx.api.notebook().theme());
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, selector: String) -> Result<()> {
    let id = ctx.api.resolve(&selector)?;
    let note = ctx
        .api
        .notebook()
        .find(&id)
        .cloned()
        .ok_or_else(|| NotesError::NotFound(id.clone()))?;

    let edited = edit_content(&EditorContent::new(note.title, note.content))?;
    let result = ctx
        .api
        .edit_note(id.as_str(), edited.title, edited.content)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_notes(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_dictate(ctx: &mut AppContext, selector: Option<String>) -> Result<()> {
    let stdin = io::stdin();
    let lang = ctx.config.dictation_lang.clone();
    if stdin.is_terminal() {
        eprintln!(
            "Listening ({})... one line per phrase, Ctrl-D to finish.",
            lang
        );
    }
    let mut source = LineTranscript::new(stdin.lock());
    let result = ctx
        .api
        .dictate(&mut source, &SystemClock, selector.as_deref(), &lang)?;
    print_messages(&result.messages);
    Ok(())
}

fn narrator(config: &NotesConfig) -> Narrator<CommandSynthesizer> {
    let synth = match &config.speech_command {
        Some(program) => CommandSynthesizer::new(program.clone()),
        None => CommandSynthesizer::platform_default(),
    };
    Narrator::new(synth)
}

fn handle_speak(
    ctx: &mut AppContext,
    selector: String,
    voice: Option<String>,
    rate: Option<f32>,
) -> Result<()> {
    let mut narrator = narrator(&ctx.config);
    let voice = voice.or_else(|| ctx.config.voice.clone());
    let rate = rate.unwrap_or(ctx.config.speech_rate);

    let result = ctx
        .api
        .speak(&mut narrator, &selector, voice.as_deref(), rate)?;
    print_messages(&result.messages);
    narrator.synthesizer_mut().wait()
}

fn handle_voices(ctx: &mut AppContext) -> Result<()> {
    let mut narrator = narrator(&ctx.config);
    let result = ctx.api.voices(&mut narrator)?;
    print_voices(&result.voices);
    print_messages(&result.messages);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().map_err(NotesError::Io)?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(NotesError::Io)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let count = ctx.api.notebook().notes().len();
    if count > 0 && !yes && !confirm(&format!("Delete all {} notes?", count))? {
        println!("Aborted.");
        return Ok(());
    }
    let result = ctx.api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILENAME));
    let result = ctx.api.export_notes()?;
    if let Some(payload) = &result.export {
        fs::write(&path, payload).map_err(NotesError::Io)?;
    }
    print_messages(&result.messages);
    println!("{}", path.display());
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: PathBuf) -> Result<()> {
    let text = fs::read_to_string(&file).map_err(NotesError::Io)?;
    let result = ctx.api.import_notes(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, mode: Option<ThemeArg>) -> Result<()> {
    let action = match mode {
        None => ThemeAction::Show,
        Some(ThemeArg::Light) => ThemeAction::Set(Theme::Light),
        Some(ThemeArg::Dark) => ThemeAction::Set(Theme::Dark),
        Some(ThemeArg::Toggle) => ThemeAction::Toggle,
    };
    let result = ctx.api.theme(action)?;
    if result.messages.is_empty() {
        if let Some(theme) = result.theme {
            println!("{}", theme);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        let lines: Vec<String> = result
            .config
            .iter()
            .flat_map(|config| config.entries())
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect();
        print_text_list(&lines, "No configuration values.");
    }
    print_messages(&result.messages);
    Ok(())
}
