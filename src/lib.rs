// Library root
// ------------
// The binary (`main.rs`) only parses arguments and wires collaborators
// together; everything it drives lives here.
//
// Module responsibilities:
// - `response`: classify the service's HTML (share id, throttled, other).
// - `api`: the `Uploader` trait and its reqwest implementation.
// - `validate`: existence and size checks before an upload.
// - `upload`: the per-item retry state machine.
// - `session`: walks all items, keeps the tally, writes the clipboard.
// - `ui`: user-facing output and the quiet / url-only modes.
// - `clipboard`, `config`, `cli`, `error`, `item`: supporting pieces.
pub mod api;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod item;
pub mod response;
pub mod session;
pub mod ui;
pub mod upload;
pub mod validate;
