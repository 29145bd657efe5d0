// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive form.
//
// Module responsibilities:
// - `config`: Loads the API key and endpoint once at start-up.
// - `query`: The five canned GraphQL operations and their request bodies.
// - `api`: Posts request bodies to the endpoint and returns raw JSON.
// - `form`: Field visibility, input conversion and dispatch, with no
//   terminal code so it can be tested headless.
// - `ui`: The terminal-based form built on `form`.
// - `error`: The error type shared by the modules above.
pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod query;
pub mod ui;
