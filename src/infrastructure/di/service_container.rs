//! Service container for dependency injection
//!
//! Wires up the job service with its dependencies.

use std::sync::Arc;

use crate::application::services::JobService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, JobClient};

/// Container holding the application services of one invocation.
pub struct ServiceContainer {
    /// Effective settings (config file, environment and CLI overrides)
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Remote job dispatcher
    pub client: Arc<dyn JobClient>,
}

impl ServiceContainer {
    /// Create a container from an already connected client.
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        client: Arc<dyn JobClient>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            client,
        }
    }

    pub fn job_service(&self) -> JobService {
        JobService::new(Arc::clone(&self.client), Arc::clone(&self.fs))
    }
}
