// Library root
// -----------
// This crate exposes the pieces of the `thoth` command-line client. The
// binary (`main.rs`) only parses arguments and hands them to `cli::run`.
//
// Module responsibilities:
// - `config`: Locates the credential file and resolves the API key.
// - `api`: Blocking HTTP client for the Thoth REST endpoints and the
//   request payloads they take.
// - `format`: Renders API responses as indented JSON or readable text.
// - `cli`: Command-line definitions and the dispatch to the client.
// - `ui`: Spinner and prompts drawn on stderr.
// - `trace`: Logging setup.
pub mod api;
pub mod cli;
pub mod config;
pub mod format;
pub mod trace;
pub mod ui;
