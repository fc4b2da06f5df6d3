//! Domain data model shared by the Atelier client and workspace store.
//!
//! Everything here mirrors the backend's record shapes: projects, chat
//! messages, tasks, generated files, error reports, GitHub resources,
//! installed packages and scraped API docs.

pub mod chat;
pub mod errors;
pub mod file;
pub mod github;
pub mod packages;
pub mod preview;
pub mod project;
pub mod scrape;
pub mod task;

pub use chat::{ChatMessage, ChatRole};
pub use errors::{ErrorDetail, ErrorKind, ErrorReport, ErrorSummary, OpenErrors};
pub use file::{FilePatch, NewFile, ProjectFile};
pub use github::{CommitInfo, PushFile, RateLimit, Repo, RepoSpec};
pub use packages::{InstalledPackage, InstalledPackages, PackageManager};
pub use preview::BuildOutcome;
pub use project::{
    FeatureSpec, IntegrationSpec, NewProject, Project, ProjectInit, ProjectPatch, ProjectStats,
    ProjectStatus, ProjectSummary,
};
pub use scrape::{ScrapedDocs, ScrapedEndpoint};
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
