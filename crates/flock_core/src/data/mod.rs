//! Content tables: the static templates every game object is built from.
//!
//! Templates are plain data deserialized from RON. They are shared
//! read-only between the objects built from them and never mutated.

mod content;
mod template;

pub use content::{ContentTables, ObjectData};
pub use template::{ObjectTemplate, TemplateKind};
