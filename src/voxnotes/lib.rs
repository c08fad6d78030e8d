//! # Voxnotes Architecture
//!
//! Voxnotes is a **UI-agnostic voice-notes library**: persisted notes,
//! search, dictation into notes and reading notes aloud. The terminal client
//! is one client of it, not the application itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves selectors (display index or id prefix → id)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per user action, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Notebook (notebook.rs)                                     │
//! │  - Owns repository, editor session, autosave, theme         │
//! │  - Notifies subscribers after every change                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository + Storage (repository.rs, store/)               │
//! │  - In-memory collection, persisted whole after each change  │
//! │  - KvStore trait: FileKv (production), MemoryKv (testing)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The editing model
//!
//! The editor session holds a *copy* of the note being edited. Nothing the
//! user types reaches the repository until a commit, either an explicit save
//! or an autosave tick. Autosave only commits a draft that has text in it,
//! so an idle tick never creates a blank note.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never calls
//! `std::process::exit`. Time comes from a [`clock::Clock`], and speech goes
//! through the traits in [`speech`], so every rule is testable with
//! in-memory doubles.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per command
//! - [`notebook`]: The state owner and change notifications
//! - [`repository`]: The note collection and its invariants
//! - [`session`]: Editor session state machine
//! - [`autosave`]: Periodic commit trigger
//! - [`projector`]: Sorted, filtered list view with display indexes
//! - [`transfer`]: JSON export and import validation
//! - [`store`]: Key-value substrate and the note store adapter
//! - [`speech`]: Dictation and read-aloud boundaries
//! - [`model`]: Core data types (`Note`, `NoteId`, `Theme`)
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`clock`]: Time sources
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod autosave;
pub mod clock;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod notebook;
pub mod projector;
pub mod repository;
pub mod session;
pub mod speech;
pub mod store;
pub mod transfer;
