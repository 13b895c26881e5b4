//! Block graph resolution into form fields.

mod index;
mod resolver;

pub use index::BlockIndex;
pub use resolver::{KeyValueResolver, Resolution, ResolveStats, ResolveWarning, resolve_fields};
