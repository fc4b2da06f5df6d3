//! # Atelier
//!
//! Client SDK for the Atelier AI app builder.
//!
//! ## Overview
//!
//! Atelier wraps the app-builder backend behind a typed async client and a
//! shared workspace state, so an embedding UI can:
//!
//! - **Chat with the builder agent** over a cancellable text stream
//! - **Mirror the task board** with optimistic, rollback-on-failure moves
//! - **Browse generated files** as a deterministic tree
//! - **Build and open previews** of the generated application
//! - **Watch runtime and build errors** via background polling
//! - **Export to GitHub** with a create-then-push flow
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atelier::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> atelier::Result<()> {
//!     // Connect to the backend
//!     let config = ClientConfig::load()?;
//!     let api: Arc<dyn WorkspaceApi> = Arc::new(AtelierClient::new(&config)?);
//!
//!     // Resolve the active project, reusing the persisted session
//!     let store = WorkspaceStore::new();
//!     let session = FileSession::new();
//!     let Some(project_id) = initialize_project(api.as_ref(), &session, &store).await
//!     else {
//!         return Ok(());
//!     };
//!
//!     // Stream a chat message; the store's transcript updates live
//!     let chat = ChatFlow::new(Arc::clone(&api), store.clone());
//!     chat.send("Build me a todo app").await;
//!
//!     // Keep error state fresh in the background
//!     let _watcher = ErrorWatcher::spawn(api, store.clone(), project_id);
//!
//!     for message in store.messages() {
//!         println!("{}", message.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Atelier is organized into focused crates:
//!
//! - **`atelier-types`**: Data model shared between client and flows
//! - **`atelier-client`**: Typed REST client with streaming chat decoding
//! - **`atelier-workspace`**: Workspace store, file tree and UI flows
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use atelier_types::{
    BuildOutcome, ChatMessage, ChatRole, CommitInfo, ErrorDetail, ErrorKind, ErrorReport,
    ErrorSummary, FeatureSpec, FilePatch, InstalledPackage, InstalledPackages, IntegrationSpec,
    NewFile, NewProject, NewTask, OpenErrors, PackageManager, Project, ProjectFile, ProjectInit,
    ProjectPatch, ProjectStats, ProjectStatus, ProjectSummary, PushFile, RateLimit, Repo,
    RepoSpec, ScrapedDocs, ScrapedEndpoint, Task, TaskPatch, TaskPriority, TaskStatus,
};

pub use atelier_client::{
    AtelierClient, ChatStream, ClientConfig, ClientError, Result, StreamHandle, WorkspaceApi,
};

pub use atelier_workspace::{
    build_file_tree, initialize_project, ChatFlow, ErrorWatcher, FileNode, FileSession,
    GithubPushFlow, MemorySession, Notice, NoticeLevel, PreviewFlow, PreviewState, PushReport,
    PushTarget, ReloadTicket, Resource, SessionStore, TaskBoard, WorkspaceStore,
    CHAT_FAILURE_TEXT, DEFAULT_POLL_INTERVAL,
};
