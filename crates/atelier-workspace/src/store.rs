use std::sync::{Arc, Mutex, MutexGuard};

use atelier_types::{
    ChatMessage, FilePatch, OpenErrors, ProjectFile, ProjectStats, Task, TaskPatch,
};
use uuid::Uuid;

/// Resource families whose full-list reloads are reconciled against
/// optimistic mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Messages,
    Tasks,
    Files,
}

/// Snapshot of a resource's mutation sequence, taken when a reload request
/// is issued. A reload response is only applied if no optimistic mutation
/// landed after the ticket was taken; stale responses are discarded instead
/// of clobbering newer local state.
#[derive(Debug, Clone, Copy)]
pub struct ReloadTicket {
    resource: Resource,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient user-facing notification, drained by the embedding UI.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Default)]
struct WorkspaceState {
    project_id: Option<Uuid>,
    messages: Vec<ChatMessage>,
    tasks: Vec<Task>,
    files: Vec<ProjectFile>,
    open_errors: OpenErrors,
    stats: ProjectStats,
    selected_file: Option<Uuid>,
    chat_busy: bool,
    error_panel_expanded: bool,
    errors_seen: bool,
    notices: Vec<Notice>,
    message_seq: u64,
    task_seq: u64,
    file_seq: u64,
}

/// Single source of truth for the active project's chat, tasks, files,
/// errors, selection and loading flags.
///
/// Created by the composition root and handed to views and flows by clone;
/// all clones share state. Mutators are synchronous and atomic, so readers
/// never observe a torn update.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceStore {
    state: Arc<Mutex<WorkspaceState>>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, WorkspaceState> {
        // A panicked mutator leaves plain data behind, never a broken
        // invariant, so recover from poisoning.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ------------------------------------------------------------------
    // Project identity
    // ------------------------------------------------------------------

    pub fn set_project(&self, project_id: Uuid) {
        self.state().project_id = Some(project_id);
    }

    pub fn project_id(&self) -> Option<Uuid> {
        self.state().project_id
    }

    // ------------------------------------------------------------------
    // Chat messages
    // ------------------------------------------------------------------

    /// Append a message. No deduplication by id is enforced here.
    pub fn add_message(&self, message: ChatMessage) {
        let mut state = self.state();
        state.messages.push(message);
        state.message_seq += 1;
    }

    /// Replace the whole message list unconditionally.
    pub fn set_messages(&self, messages: Vec<ChatMessage>) {
        self.state().messages = messages;
    }

    /// Replace a message's content in place (streaming accumulation).
    /// Returns false if the message is gone.
    pub fn update_message_content(&self, message_id: Uuid, content: &str) -> bool {
        let mut state = self.state();
        match state.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.content = content.to_string();
                state.message_seq += 1;
                true
            }
            None => false,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state().messages.clone()
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub fn add_task(&self, task: Task) {
        let mut state = self.state();
        state.tasks.push(task);
        state.task_seq += 1;
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        self.state().tasks = tasks;
    }

    /// Shallow-merge a patch into the task with the given id.
    /// Returns the pre-patch task so callers can roll back.
    pub fn update_task(&self, task_id: Uuid, patch: &TaskPatch) -> Option<Task> {
        let mut state = self.state();
        let task = state.tasks.iter_mut().find(|t| t.id == task_id)?;
        let previous = task.clone();
        patch.apply_to(task);
        state.task_seq += 1;
        Some(previous)
    }

    /// Replace a task wholesale (backend-confirmed record or rollback).
    pub fn replace_task(&self, task: Task) -> bool {
        let mut state = self.state();
        match state.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                state.task_seq += 1;
                true
            }
            None => false,
        }
    }

    /// Remove a task, returning its position and the record for restore.
    pub fn remove_task(&self, task_id: Uuid) -> Option<(usize, Task)> {
        let mut state = self.state();
        let index = state.tasks.iter().position(|t| t.id == task_id)?;
        let task = state.tasks.remove(index);
        state.task_seq += 1;
        Some((index, task))
    }

    /// Restore a previously removed task at its original position.
    pub fn insert_task(&self, index: usize, task: Task) {
        let mut state = self.state();
        let index = index.min(state.tasks.len());
        state.tasks.insert(index, task);
        state.task_seq += 1;
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    pub fn task(&self, task_id: Uuid) -> Option<Task> {
        self.state().tasks.iter().find(|t| t.id == task_id).cloned()
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    pub fn add_file(&self, file: ProjectFile) {
        let mut state = self.state();
        state.files.push(file);
        state.file_seq += 1;
    }

    pub fn set_files(&self, files: Vec<ProjectFile>) {
        self.state().files = files;
    }

    /// Shallow-merge a patch into the file with the given id.
    pub fn update_file(&self, file_id: Uuid, patch: &FilePatch) -> Option<ProjectFile> {
        let mut state = self.state();
        let file = state.files.iter_mut().find(|f| f.id == file_id)?;
        let previous = file.clone();
        patch.apply_to(file);
        state.file_seq += 1;
        Some(previous)
    }

    pub fn remove_file(&self, file_id: Uuid) -> Option<(usize, ProjectFile)> {
        let mut state = self.state();
        let index = state.files.iter().position(|f| f.id == file_id)?;
        let file = state.files.remove(index);
        state.file_seq += 1;
        Some((index, file))
    }

    pub fn files(&self) -> Vec<ProjectFile> {
        self.state().files.clone()
    }

    pub fn select_file(&self, file_id: Option<Uuid>) {
        self.state().selected_file = file_id;
    }

    pub fn selected_file(&self) -> Option<ProjectFile> {
        let state = self.state();
        let id = state.selected_file?;
        state.files.iter().find(|f| f.id == id).cloned()
    }

    // ------------------------------------------------------------------
    // Reload reconciliation
    // ------------------------------------------------------------------

    /// Take a ticket before issuing a full-list reload request.
    pub fn begin_reload(&self, resource: Resource) -> ReloadTicket {
        let state = self.state();
        let seq = match resource {
            Resource::Messages => state.message_seq,
            Resource::Tasks => state.task_seq,
            Resource::Files => state.file_seq,
        };
        ReloadTicket { resource, seq }
    }

    /// Apply a task reload unless an optimistic mutation raced it.
    /// Returns whether the response was applied.
    pub fn complete_tasks_reload(&self, ticket: ReloadTicket, tasks: Vec<Task>) -> bool {
        debug_assert_eq!(ticket.resource, Resource::Tasks);
        let mut state = self.state();
        if state.task_seq != ticket.seq {
            tracing::debug!("discarding stale task reload");
            return false;
        }
        state.tasks = tasks;
        true
    }

    pub fn complete_files_reload(&self, ticket: ReloadTicket, files: Vec<ProjectFile>) -> bool {
        debug_assert_eq!(ticket.resource, Resource::Files);
        let mut state = self.state();
        if state.file_seq != ticket.seq {
            tracing::debug!("discarding stale file reload");
            return false;
        }
        state.files = files;
        true
    }

    pub fn complete_messages_reload(
        &self,
        ticket: ReloadTicket,
        messages: Vec<ChatMessage>,
    ) -> bool {
        debug_assert_eq!(ticket.resource, Resource::Messages);
        let mut state = self.state();
        if state.message_seq != ticket.seq {
            tracing::debug!("discarding stale message reload");
            return false;
        }
        state.messages = messages;
        true
    }

    // ------------------------------------------------------------------
    // Errors, stats, flags
    // ------------------------------------------------------------------

    /// Replace the open-error list and summary wholesale. The panel
    /// auto-expands the first time any error is observed, and only then.
    pub fn set_open_errors(&self, open: OpenErrors) {
        let mut state = self.state();
        if open.has_errors() && !state.errors_seen {
            state.errors_seen = true;
            state.error_panel_expanded = true;
        }
        state.open_errors = open;
    }

    pub fn open_errors(&self) -> OpenErrors {
        self.state().open_errors.clone()
    }

    pub fn error_panel_expanded(&self) -> bool {
        self.state().error_panel_expanded
    }

    pub fn set_error_panel_expanded(&self, expanded: bool) {
        self.state().error_panel_expanded = expanded;
    }

    pub fn set_stats(&self, stats: ProjectStats) {
        self.state().stats = stats;
    }

    pub fn stats(&self) -> ProjectStats {
        self.state().stats
    }

    pub fn set_chat_busy(&self, busy: bool) {
        self.state().chat_busy = busy;
    }

    pub fn chat_busy(&self) -> bool {
        self.state().chat_busy
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    pub fn push_notice(&self, level: NoticeLevel, text: impl Into<String>) {
        self.state().notices.push(Notice {
            level,
            text: text.into(),
        });
    }

    /// Drain pending notices in the order they were raised.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state().notices)
    }
}
