//! In-memory todo store.
//!
//! # Design
//! A single `RwLock<Vec<TodoItem>>` guards every item. Mutations hold the
//! write guard across the whole check-then-apply sequence, so the duplicate
//! check in `add` and the append can never interleave with another writer.
//! Reads hold the read guard only long enough to clone results out.
//!
//! Lookups for update and delete go by task text, compared ignoring case.
//! All list results come back in storage order, which is insertion order
//! because deletion removes without reordering.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{fold_case, Priority, Status, TodoItem};

/// Shared handle to the todo collection. Clones point at the same items.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: Arc<RwLock<Vec<TodoItem>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new item and returns its id.
    ///
    /// `priority` defaults to `medium` when absent.
    #[tracing::instrument(skip(self))]
    pub async fn add(
        &self,
        task: &str,
        priority: Option<&str>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Uuid, StoreError> {
        if task.is_empty() {
            return Err(StoreError::empty_task());
        }
        let priority = match priority {
            Some(p) => p.parse::<Priority>()?,
            None => Priority::default(),
        };

        let mut items = self.items.write().await;
        if items.iter().any(|item| item.matches_task(task)) {
            return Err(StoreError::duplicate());
        }

        let now = Utc::now();
        let item = TodoItem {
            id: Uuid::new_v4(),
            task: task.to_string(),
            status: Status::ToBeStarted,
            priority,
            due_date,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        let id = item.id;
        items.push(item);
        tracing::debug!(%id, "todo added");
        Ok(id)
    }

    /// Sets the status of the item matching `task_key` and returns the updated item.
    ///
    /// Moving to `COMPLETED` stamps `completed_at`. Moving away later leaves it set.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, task_key: &str, status: &str) -> Result<TodoItem, StoreError> {
        let status = status.parse::<Status>()?;

        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.matches_task(task_key))
            .ok_or_else(StoreError::not_found)?;

        let now = Utc::now();
        item.status = status;
        item.updated_at = now;
        if status == Status::Completed {
            item.completed_at = Some(now);
        }
        tracing::debug!(id = %item.id, %status, "todo status updated");
        Ok(item.clone())
    }

    /// Removes the first item matching `task_key` and returns it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, task_key: &str) -> Result<TodoItem, StoreError> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.matches_task(task_key))
            .ok_or_else(StoreError::not_found)?;
        let removed = items.remove(index);
        tracing::debug!(id = %removed.id, "todo deleted");
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    pub async fn by_priority(&self, priority: &str) -> Result<Vec<TodoItem>, StoreError> {
        let priority = priority.parse::<Priority>()?;
        Ok(self.filter(|item| item.priority == priority).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn by_status(&self, status: &str) -> Result<Vec<TodoItem>, StoreError> {
        let status = status.parse::<Status>()?;
        Ok(self.filter(|item| item.status == status).await)
    }

    /// Items whose task contains `query`, ignoring case. An empty query matches nothing.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<TodoItem> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = fold_case(query);
        self.filter(|item| item.task_contains(&needle)).await
    }

    /// Snapshot of every item. Later mutations do not affect the returned list.
    pub async fn all(&self) -> Vec<TodoItem> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<TodoItem>
    where
        F: Fn(&TodoItem) -> bool,
    {
        self.items
            .read()
            .await
            .iter()
            .filter(|&item| predicate(item))
            .cloned()
            .collect()
    }
}
