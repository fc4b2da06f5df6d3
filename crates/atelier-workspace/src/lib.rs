//! Client-side workspace state and flows for the Atelier app builder.
//!
//! A [`WorkspaceStore`] holds the active project's chat transcript, task
//! board, file list, open errors and derived stats; the flow types drive
//! backend operations through a [`WorkspaceApi`](atelier_client::WorkspaceApi)
//! and reconcile their results into the store. Mutations apply
//! optimistically and roll back on rejection; full-list reloads that race
//! a local mutation are discarded.

pub mod file_tree;
pub mod flows;
pub mod session;
pub mod store;

pub use file_tree::{build_file_tree, FileNode};
pub use flows::{
    ChatFlow, ErrorWatcher, GithubPushFlow, PreviewFlow, PreviewState, PushReport, PushTarget,
    TaskBoard, CHAT_FAILURE_TEXT, DEFAULT_POLL_INTERVAL,
};
pub use session::{initialize_project, FileSession, MemorySession, SessionStore};
pub use store::{Notice, NoticeLevel, ReloadTicket, Resource, WorkspaceStore};
