//! Application layer: services and use cases
//!
//! This layer orchestrates job operations and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod input;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use input::load_data;
