pub mod backend;
pub mod dashboard;
pub mod directory;
pub mod notify;

pub use backend::{BackendError, Collaborators};
pub use dashboard::{ActionError, Dashboard, LoadError, Redirect};
pub use directory::Directory;
pub use notify::Notifier;
