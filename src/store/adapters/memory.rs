//! Process-local entity store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    notification::domain::{Notification, NotificationId},
    project::domain::{Discussion, DiscussionId, Project, ProjectId, User, UserId},
    store::ports::{Entity, EntityStore, StoreError, StoreResult},
    task::domain::{Task, TaskId},
};

/// Thread-safe in-memory entity store.
///
/// State lives for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityStore {
    state: Arc<RwLock<InMemoryState>>,
}

/// Records keyed by identifier with their first-insertion order.
#[derive(Debug)]
struct Collection<K, V> {
    records: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, V: Clone> Collection<K, V> {
    /// Inserts or replaces; returns `true` for a fresh key.
    fn put(&mut self, key: K, value: V) -> bool {
        let fresh = self.records.insert(key, value).is_none();
        if fresh {
            self.order.push(key);
        }
        fresh
    }

    fn get(&self, key: &K) -> Option<V> {
        self.records.get(key).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    fn ordered(&self) -> Vec<V> {
        self.select(&self.order)
    }

    fn select(&self, keys: &[K]) -> Vec<V> {
        keys.iter()
            .filter_map(|key| self.records.get(key).cloned())
            .collect()
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: Collection<UserId, User>,
    projects: Collection<ProjectId, Project>,
    tasks: Collection<TaskId, Task>,
    discussions: Collection<DiscussionId, Discussion>,
    notifications: Collection<NotificationId, Notification>,
    project_tasks: HashMap<ProjectId, Vec<TaskId>>,
    project_discussions: HashMap<ProjectId, Vec<DiscussionId>>,
}

impl InMemoryEntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Moves `id` into the index bucket for `owner`, dropping any stale entry.
fn reindex<K: Copy + Eq + Hash, I: Copy + Eq>(
    index: &mut HashMap<K, Vec<I>>,
    previous_owner: Option<K>,
    owner: K,
    id: I,
) {
    if previous_owner == Some(owner) {
        return;
    }
    if let Some(old) = previous_owner {
        if let Some(ids) = index.get_mut(&old) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                index.remove(&old);
            }
        }
    }
    index.entry(owner).or_default().push(id);
}

fn store_task(state: &mut InMemoryState, task: Task) -> StoreResult<()> {
    let project_id = task.project_id();
    if !state.projects.contains(&project_id) {
        return Err(StoreError::DanglingProject(project_id));
    }
    let previous_owner = state.tasks.records.get(&task.id()).map(Task::project_id);
    reindex(&mut state.project_tasks, previous_owner, project_id, task.id());
    state.tasks.put(task.id(), task);
    Ok(())
}

fn store_discussion(state: &mut InMemoryState, discussion: Discussion) -> StoreResult<()> {
    let project_id = discussion.project_id();
    if !state.projects.contains(&project_id) {
        return Err(StoreError::DanglingProject(project_id));
    }
    let previous_owner = state
        .discussions
        .records
        .get(&discussion.id())
        .map(Discussion::project_id);
    reindex(
        &mut state.project_discussions,
        previous_owner,
        project_id,
        discussion.id(),
    );
    state.discussions.put(discussion.id(), discussion);
    Ok(())
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn upsert(&self, entity: Entity) -> StoreResult<()> {
        let mut state = self.write()?;
        match entity {
            Entity::User(user) => {
                state.users.put(user.id(), user);
            }
            Entity::Project(project) => {
                state.projects.put(project.id(), project);
            }
            Entity::Task(task) => store_task(&mut state, task)?,
            Entity::Discussion(discussion) => store_discussion(&mut state, discussion)?,
            Entity::Notification(notification) => {
                state.notifications.put(notification.id(), notification);
            }
        }
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id))
    }

    async fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id))
    }

    async fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id))
    }

    async fn get_discussion(&self, id: DiscussionId) -> StoreResult<Option<Discussion>> {
        Ok(self.read()?.discussions.get(&id))
    }

    async fn get_notification(&self, id: NotificationId) -> StoreResult<Option<Notification>> {
        Ok(self.read()?.notifications.get(&id))
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.read()?.projects.ordered())
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.read()?.tasks.ordered())
    }

    async fn list_tasks_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .project_tasks
            .get(&project_id)
            .map(|ids| state.tasks.select(ids))
            .unwrap_or_default())
    }

    async fn list_discussions_by_project(
        &self,
        project_id: ProjectId,
    ) -> StoreResult<Vec<Discussion>> {
        let state = self.read()?;
        Ok(state
            .project_discussions
            .get(&project_id)
            .map(|ids| state.discussions.select(ids))
            .unwrap_or_default())
    }

    async fn list_notifications(&self) -> StoreResult<Vec<Notification>> {
        Ok(self.read()?.notifications.ordered())
    }
}
