pub mod controller;
pub mod intent;
pub mod model;
pub mod render;
pub mod session;

pub use controller::TaskListController;
pub use intent::{Intent, ListFilter, ParseError, TaskRef};
pub use model::{EditState, Stats, Task, TaskId, TaskText};
pub use render::Format;
pub use session::{Session, Step};
