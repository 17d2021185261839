// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive menu.
//
// Module responsibilities:
// - `book`: The book record and how it is stored and displayed.
// - `collection`: The in-memory list of books, backed by a JSON file
//   that is rewritten after every change.
// - `input`: Pure helpers that turn raw answers into values, kept
//   apart from prompting so they can be tested without a terminal.
// - `config`: Storage and export paths read from the environment.
// - `error`: Error type shared by the collection operations.
// - `ui`: Terminal menu and prompts; delegates all work to `collection`.
pub mod book;
pub mod collection;
pub mod config;
pub mod error;
pub mod input;
pub mod ui;
