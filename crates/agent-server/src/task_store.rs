//! In-memory task store

use std::collections::HashMap;

use tokio::sync::RwLock;

use agent_core::Task;

/// Tasks keyed by ID
///
/// The store lives for the whole process and is never evicted; a task reused
/// by ID keeps accumulating history.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Modify the task `id`, creating it with `init` first if absent
    ///
    /// Runs under one write lock; returns the updated task.
    pub async fn upsert(
        &self,
        id: &str,
        init: impl FnOnce() -> Task,
        modify: impl FnOnce(&mut Task),
    ) -> Task {
        let mut tasks = self.tasks.write().await;
        let task = tasks.entry(id.to_string()).or_insert_with(init);
        modify(task);
        task.clone()
    }

    /// Modify an existing task under one write lock
    pub async fn update(&self, id: &str, modify: impl FnOnce(&mut Task)) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(id)?;
        modify(task);
        Some(task.clone())
    }

    pub async fn get(&self, id: &str) -> Option<Task> {
        self.tasks.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }
}
