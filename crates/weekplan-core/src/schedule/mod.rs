//! Schedule types: time-boxed items shown on the week grid and the todos
//! that task items point at.

mod item;
mod todo;

pub use item::{ItemKind, ScheduledItem};
pub use todo::Todo;
