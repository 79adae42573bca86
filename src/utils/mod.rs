//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `slugify` - Application slug generation
//! - `template` - `{{placeholder}}` rendering

pub mod io;
pub mod slugify;
pub mod template;
