//! Editor and live preview server for code snippets.
//!
//! Serves a paste-and-preview editor, a JSON API over detection and compilation,
//! and live-updating preview pages for snippet files on disk.

pub mod pages;
pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{
    router, CompileRequest, CompileResponse, DetectRequest, DevServer, DevServerConfig,
    ServerError, ServerState, SharedState, SnippetSummary,
};
pub use watcher::{Debouncer, FileWatcher, WatchEvent};
pub use websocket::{live_client_script, LiveHub, LiveMessage};
