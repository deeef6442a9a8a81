//! `SynergySphere`: project and task state engine for a team dashboard.
//!
//! The engine owns users, projects, tasks, discussions and notifications,
//! governs how tasks move between board columns, derives project statistics
//! from live task data and turns state changes into advisory notifications.
//! Presentation layers call into it through plain async methods.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure records and rules with no infrastructure dependencies
//! - **Ports**: The [`store::ports::EntityStore`] trait
//! - **Adapters**: The process-local [`store::adapters::memory::InMemoryEntityStore`]
//! - **Services**: Orchestration of validation, mutation and notification
//!
//! # Modules
//!
//! - [`store`]: Entity store port, in-memory adapter and demo fixtures
//! - [`task`]: Task lifecycle, transitions and overdue evaluation
//! - [`project`]: Users, projects, discussions and the project aggregator
//! - [`notification`]: Notification derivation and the inbox
//! - [`engine`]: One-stop wiring of every service
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mockable::DefaultClock;
//! use synergysphere::{
//!     config::EngineConfig,
//!     engine::Engine,
//!     project::services::CreateProjectRequest,
//!     session::Session,
//!     store::adapters::memory::InMemoryEntityStore,
//!     task::{domain::TaskStatus, services::CreateTaskRequest},
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().build()?.block_on(async {
//! let engine = Engine::new(
//!     Arc::new(InMemoryEntityStore::new()),
//!     Arc::new(DefaultClock),
//!     EngineConfig::default(),
//! )?;
//! let session = Session::anonymous();
//! let project = engine
//!     .projects()
//!     .create_project(CreateProjectRequest::new("Launch"))
//!     .await?;
//! let task = engine
//!     .tasks()
//!     .create_task(&session, CreateTaskRequest::new(project.id(), "Write docs"))
//!     .await?;
//! engine
//!     .tasks()
//!     .change_status(&session, task.id(), TaskStatus::Done)
//!     .await?;
//! assert_eq!(engine.aggregator().progress_percentage(project.id()).await?, 100);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod engine;
mod ids;
pub mod notification;
pub mod project;
pub mod session;
pub mod store;
pub mod task;

#[cfg(test)]
mod test_support;

/// Lock serialising read-modify-write mutations across services.
pub(crate) type WriteLock = std::sync::Arc<tokio::sync::Mutex<()>>;
