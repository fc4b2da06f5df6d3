pub mod chat;
pub mod errors;
pub mod github;
pub mod preview;
pub mod task_board;

pub use chat::{ChatFlow, CHAT_FAILURE_TEXT};
pub use errors::{ErrorWatcher, DEFAULT_POLL_INTERVAL};
pub use github::{GithubPushFlow, PushReport, PushTarget};
pub use preview::{PreviewFlow, PreviewState};
pub use task_board::TaskBoard;
