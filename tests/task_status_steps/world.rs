//! Shared world state for task status BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use synergysphere::{
    config::EngineConfig,
    engine::Engine,
    project::domain::ProjectId,
    store::adapters::memory::InMemoryEntityStore,
    task::{
        domain::{Task, TaskId},
        services::TaskLifecycleError,
    },
};

/// Engine type used by the BDD world.
pub type TestEngine = Engine<InMemoryEntityStore, DefaultClock>;

/// Scenario world for task status behaviour tests.
pub struct TaskStatusWorld {
    pub config: EngineConfig,
    pub engine: Option<TestEngine>,
    pub project_id: Option<ProjectId>,
    pub task_ids: Vec<TaskId>,
    pub last_move_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskStatusWorld {
    /// Creates a world with the default configuration and no engine yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            engine: None,
            project_id: None,
            task_ids: Vec::new(),
            last_move_result: None,
        }
    }

    /// Returns the engine built by the project step.
    ///
    /// # Errors
    ///
    /// Returns an error if no project has been set up yet.
    pub fn engine(&self) -> Result<&TestEngine, eyre::Report> {
        self.engine
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing engine in scenario world"))
    }

    /// Returns the project created by the project step.
    ///
    /// # Errors
    ///
    /// Returns an error if no project has been set up yet.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Resolves a one-based task position from the feature file.
    ///
    /// # Errors
    ///
    /// Returns an error if the position does not name a created task.
    pub fn task_id(&self, position: usize) -> Result<TaskId, eyre::Report> {
        position
            .checked_sub(1)
            .and_then(|index| self.task_ids.get(index))
            .copied()
            .ok_or_else(|| eyre::eyre!("no task at position {position}"))
    }

    /// Builds the engine from the configured policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected.
    pub fn start_engine(&mut self) -> Result<&TestEngine, eyre::Report> {
        let engine = Engine::new(
            Arc::new(InMemoryEntityStore::new()),
            Arc::new(DefaultClock),
            self.config.clone(),
        )?;
        Ok(self.engine.insert(engine))
    }
}

impl Default for TaskStatusWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskStatusWorld {
    TaskStatusWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
