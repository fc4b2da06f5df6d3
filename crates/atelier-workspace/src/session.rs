use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use atelier_client::WorkspaceApi;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::WorkspaceStore;

/// Persistence of the active project id across application runs.
pub trait SessionStore: Send + Sync {
    /// Previously stored project id, if any. Unreadable or malformed
    /// session data reads as absent.
    fn load_project_id(&self) -> Option<Uuid>;

    fn store_project_id(&self, project_id: Uuid) -> io::Result<()>;

    fn clear(&self) -> io::Result<()>;
}

#[derive(Serialize, Deserialize)]
struct SessionData {
    project_id: Uuid,
}

/// Session persisted as JSON under the user's config directory
/// (`~/.config/atelier/session.json` on Linux).
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    /// Session file at the platform config location. Falls back to the
    /// current directory when no config dir is known.
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("atelier").join("session.json"),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSession {
    fn load_project_id(&self) -> Option<Uuid> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let data: SessionData = serde_json::from_str(&raw).ok()?;
        Some(data.project_id)
    }

    fn store_project_id(&self, project_id: Uuid) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = SessionData { project_id };
        let raw = serde_json::to_string_pretty(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, raw)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory session for tests and ephemeral embeddings.
#[derive(Default)]
pub struct MemorySession {
    project_id: Mutex<Option<Uuid>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn load_project_id(&self) -> Option<Uuid> {
        *self.project_id.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn store_project_id(&self, project_id: Uuid) -> io::Result<()> {
        *self.project_id.lock().unwrap_or_else(|e| e.into_inner()) = Some(project_id);
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.project_id.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Resolve the active project at startup.
///
/// A persisted project id is adopted as-is, with no network round-trip.
/// Only when the session is empty does this call the backend's project
/// initialization, then persists the returned id for the next run.
/// Returns `None` when initialization fails; the store is left untouched
/// in that case.
pub async fn initialize_project(
    api: &dyn WorkspaceApi,
    session: &dyn SessionStore,
    store: &WorkspaceStore,
) -> Option<Uuid> {
    if let Some(project_id) = session.load_project_id() {
        tracing::debug!(%project_id, "resuming persisted project");
        store.set_project(project_id);
        return Some(project_id);
    }

    match api.init_project().await {
        Ok(init) => {
            if let Err(e) = session.store_project_id(init.project_id) {
                tracing::warn!(error = %e, "failed to persist session");
            }
            store.set_project(init.project_id);
            Some(init.project_id)
        }
        Err(e) => {
            tracing::warn!(error = %e, "project initialization failed");
            None
        }
    }
}
