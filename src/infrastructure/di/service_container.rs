//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::TreeService;
use crate::application::ApplicationError;
use crate::config::Settings;
use crate::domain::BrickArena;
use crate::infrastructure::fixture::FixtureStore;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Fixture loading and saving
    pub fixtures: FixtureStore,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let fixtures = FixtureStore::new(fs);

        Self { settings, fixtures }
    }

    /// The configured fixture file.
    pub fn data_file(&self) -> InfraResult<PathBuf> {
        self.settings.data_file.clone().ok_or_else(|| {
            ApplicationError::Config {
                message: "no data file configured (use --data or set data_file)".to_string(),
            }
            .into()
        })
    }

    /// Load the bricks of the configured data file.
    pub fn load_arena(&self) -> InfraResult<BrickArena> {
        let path = self.data_file()?;
        self.fixtures.load(&path)
    }

    /// Write the bricks back to the configured data file.
    pub fn save_arena(&self, arena: &BrickArena) -> InfraResult<()> {
        let path = self.data_file()?;
        self.fixtures.save(&path, arena)
    }

    /// Tree service over the bricks of the configured data file.
    pub fn tree_service(&self) -> InfraResult<TreeService> {
        let arena = self.load_arena()?;
        debug!("tree_service: {} bricks, max_level={}", arena.len(), self.settings.max_level);
        Ok(TreeService::new(Arc::new(arena), self.settings.max_level))
    }
}
