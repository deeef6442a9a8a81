//! Shared test helpers for in-memory engine integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use synergysphere::{
    config::EngineConfig,
    engine::Engine,
    project::{
        domain::{Project, User},
        services::{CreateProjectRequest, RegisterUserRequest},
    },
    store::adapters::memory::InMemoryEntityStore,
};

/// Engine type exercised by the integration tests.
pub type TestEngine = Engine<InMemoryEntityStore, DefaultClock>;

/// Builds an engine over an empty store with `config`.
///
/// # Errors
///
/// Returns an error if the configuration is rejected.
pub fn engine_with(config: EngineConfig) -> eyre::Result<TestEngine> {
    Ok(Engine::new(
        Arc::new(InMemoryEntityStore::new()),
        Arc::new(DefaultClock),
        config,
    )?)
}

/// Provides an engine with the default configuration.
#[fixture]
pub fn engine() -> TestEngine {
    Engine::new(
        Arc::new(InMemoryEntityStore::new()),
        Arc::new(DefaultClock),
        EngineConfig::default(),
    )
    .expect("default configuration is valid")
}

/// Registers two teammates and a project they both belong to.
///
/// # Errors
///
/// Returns an error if registration or project creation fails.
pub async fn team_project(engine: &TestEngine) -> eyre::Result<(User, User, Project)> {
    let alex = engine
        .projects()
        .register_user(RegisterUserRequest::new(
            "Alex Chen",
            "alex.chen@synergysphere.com",
        ))
        .await?;
    let sarah = engine
        .projects()
        .register_user(RegisterUserRequest::new(
            "Sarah Johnson",
            "sarah.johnson@synergysphere.com",
        ))
        .await?;
    let project = engine
        .projects()
        .create_project(
            CreateProjectRequest::new("Website Redesign").with_members([alex.id(), sarah.id()]),
        )
        .await?;
    Ok((alex, sarah, project))
}
