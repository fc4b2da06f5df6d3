//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use atelier::prelude::*;
//! ```

pub use crate::{
    AtelierClient, ClientConfig, ClientError, WorkspaceApi,
    ChatStream, StreamHandle,
    ChatMessage, ChatRole, Project, ProjectFile, ProjectInit, ProjectStats,
    Task, TaskPatch, TaskPriority, TaskStatus, NewTask,
    OpenErrors, ErrorDetail, ErrorKind,
    Repo, RepoSpec, PushFile, BuildOutcome,
    WorkspaceStore, Notice, NoticeLevel,
    ChatFlow, TaskBoard, PreviewFlow, PreviewState, ErrorWatcher,
    GithubPushFlow, PushTarget, PushReport,
    build_file_tree, FileNode,
    initialize_project, FileSession, MemorySession, SessionStore,
};
