//! Typed REST client for the Atelier app-builder backend.
//!
//! Wraps the whole backend operation surface (projects, chat, tasks, files,
//! stats, packages, GitHub proxy, errors, preview builds, doc scraping) and
//! exposes the chunked chat response as a cancellable text stream.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod streaming;

pub use api::WorkspaceApi;
pub use client::AtelierClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use streaming::{decode_text_stream, ChatStream, StreamHandle, TextStream};
