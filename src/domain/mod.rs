//! Domain layer: entities of a job dispatcher session
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;

pub use entities::*;
