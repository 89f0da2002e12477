//! Configuration sections.

mod render;
mod storage;

pub use render::RenderConfig;
pub use storage::StorageConfig;
