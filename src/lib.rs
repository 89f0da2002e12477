//! svgthumb - SVG thumbnail post-processing.
//!
//! Rescales finished SVG renditions to a requested thumbnail size, optionally
//! bakes a hyperlink into them, caches the result under a checksum-derived
//! name and produces `<object>` embedding markup.

pub mod cache;
pub mod config;
pub mod logger;
pub mod render;
pub mod source;
pub mod storage;
pub mod svg;
pub mod utils;
