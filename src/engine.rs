//! Wiring of all services over one shared store, clock and configuration.

use crate::{
    WriteLock,
    config::{ConfigError, EngineConfig},
    notification::services::NotificationInbox,
    project::services::{DiscussionService, ProjectAggregator, ProjectService},
    store::{
        fixtures::{DemoHandles, FixtureError, seed_demo},
        ports::EntityStore,
    },
    task::services::TaskLifecycleService,
};
use mockable::Clock;
use std::sync::Arc;

/// The project/task state engine.
///
/// All mutating services share one write lock, so mutations are applied one
/// at a time while aggregate reads proceed against the store concurrently.
pub struct Engine<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    tasks: TaskLifecycleService<S, C>,
    projects: ProjectService<S, C>,
    discussions: DiscussionService<S, C>,
    aggregator: ProjectAggregator<S>,
    inbox: NotificationInbox<S>,
}

impl<S, C> Engine<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    /// Builds an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] for out-of-range
    /// completion thresholds.
    pub fn new(store: Arc<S>, clock: Arc<C>, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let shared_config = Arc::new(config);
        let write_lock = WriteLock::default();

        Ok(Self {
            tasks: TaskLifecycleService::new(Arc::clone(&store), Arc::clone(&clock))
                .with_config(shared_config)
                .sharing_write_lock(Arc::clone(&write_lock)),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock))
                .sharing_write_lock(Arc::clone(&write_lock)),
            discussions: DiscussionService::new(Arc::clone(&store), clock)
                .sharing_write_lock(Arc::clone(&write_lock)),
            aggregator: ProjectAggregator::new(Arc::clone(&store)),
            inbox: NotificationInbox::new(Arc::clone(&store)).sharing_write_lock(write_lock),
            store,
        })
    }

    /// Loads the demo workspace into the engine's store.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the store rejects a record.
    pub async fn seed_demo(&self) -> Result<DemoHandles, FixtureError> {
        seed_demo(&*self.store).await
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the task lifecycle service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskLifecycleService<S, C> {
        &self.tasks
    }

    /// Returns the user and project service.
    #[must_use]
    pub const fn projects(&self) -> &ProjectService<S, C> {
        &self.projects
    }

    /// Returns the discussion service.
    #[must_use]
    pub const fn discussions(&self) -> &DiscussionService<S, C> {
        &self.discussions
    }

    /// Returns the read-side aggregator.
    #[must_use]
    pub const fn aggregator(&self) -> &ProjectAggregator<S> {
        &self.aggregator
    }

    /// Returns the notification inbox.
    #[must_use]
    pub const fn inbox(&self) -> &NotificationInbox<S> {
        &self.inbox
    }
}
