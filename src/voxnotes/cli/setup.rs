use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "voxnotes", bin_name = "voxnotes", version = get_version())]
#[command(about = "Voice notes: write, dictate, search and listen", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "n", display_order = 1)]
    New {
        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,

        title: Option<String>,

        content: Option<String>,
    },

    /// List notes, newest first
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only notes whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search notes
    #[command(display_order = 3)]
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// View one or more notes
    #[command(alias = "v", display_order = 10)]
    View {
        /// List indexes or id prefixes (e.g. 1 3 4f2a)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Edit a note in the editor
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// List index or id prefix
        selector: String,
    },

    /// Delete one or more notes
    #[command(alias = "rm", display_order = 12)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Dictate into a note from a transcript stream on stdin
    #[command(alias = "d", display_order = 13)]
    Dictate {
        /// Note to append to (default: a new note)
        selector: Option<String>,
    },

    /// Read a note aloud
    #[command(display_order = 14)]
    Speak {
        selector: String,

        /// Voice name (see `voxnotes voices`)
        #[arg(long)]
        voice: Option<String>,

        /// Speaking rate, 0.1 to 10
        #[arg(long)]
        rate: Option<f32>,
    },

    /// Delete every note
    #[command(display_order = 20)]
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export all notes to a JSON file
    #[command(display_order = 21)]
    Export {
        /// Output path (default: notes-export.json)
        file: Option<PathBuf>,
    },

    /// Import notes from a JSON export
    #[command(display_order = 22)]
    Import { file: PathBuf },

    /// List the voices available for `speak`
    #[command(display_order = 30)]
    Voices,

    /// Show or change the theme
    #[command(display_order = 31)]
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },

    /// Get or set configuration
    #[command(display_order = 32)]
    Config {
        /// Configuration key (e.g., autosave-interval)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
