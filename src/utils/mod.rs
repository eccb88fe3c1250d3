//! Utility modules for the static site generator.

pub mod fs;
pub mod mime;
pub mod path;
