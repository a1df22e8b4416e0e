//! Application services
//!
//! Concrete service implementations that orchestrate job operations.
//! Services depend on I/O boundary traits (JobClient, FileSystem)
//! but are themselves concrete structs, not traits.

mod job;

pub use job::{JobService, Retrieval, SavedResult, SubmitOutcome};
