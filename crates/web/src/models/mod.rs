//! Domain models.

pub mod session;
pub mod task;
pub mod user;

pub use session::{CurrentUser, Flash, FlashLevel, keys as session_keys};
pub use task::{Comment, NewTask, Task, TaskFilter};
pub use user::User;
