pub mod backend;
pub mod config;
pub mod sync;
pub mod types;

// Re-export commonly used types
pub use backend::{todoist::TodoistBackend, TaskRepository};
pub use config::{ClientConfig, ConfigError};
pub use sync::{BatchRejection, Command};
pub use types::{Label, SpecialLabels, Task};
