//! Cache naming and freshness for rewritten SVGs.

mod key;
pub mod mtime;

pub use key::LinkCacheKey;
pub use mtime::{get_mtime, is_fresh};
