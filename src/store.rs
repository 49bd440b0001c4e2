use tokio::sync::Mutex;
use tracing::debug;

use crate::{error::AppError, model::Todo};

#[derive(Debug, Default)]
struct TodoState {
    todos: Vec<Todo>,
    // Wider than `Todo::id`; ids past `i32::MAX` are refused
    next_id: i64,
}

/// In-memory todo collection. Ids start at 0 and are never reused, even after
/// the todo holding them is deleted.
#[derive(Debug, Default)]
pub struct TodoStore {
    state: Mutex<TodoState>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    // All todos in insertion order
    pub async fn list(&self) -> Vec<Todo> {
        self.state.lock().await.todos.clone()
    }

    pub async fn create(&self, text: String) -> Result<Todo, AppError> {
        let mut state = self.state.lock().await;
        let id = i32::try_from(state.next_id).map_err(|_| AppError::IdsExhausted)?;
        let todo = Todo { id, text };
        state.next_id += 1;
        state.todos.push(todo.clone());
        debug!(id, "created todo");
        Ok(todo)
    }

    pub async fn update(&self, id: i32, text: String) -> Result<Todo, AppError> {
        let mut state = self.state.lock().await;
        let todo = state
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(AppError::NotFound(id))?;
        todo.text = text;
        debug!(id, "updated todo");
        Ok(todo.clone())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        if !state.todos.iter().any(|todo| todo.id == id) {
            return Err(AppError::NotFound(id));
        }
        state.todos.retain(|todo| todo.id != id);
        debug!(id, "deleted todo");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = TodoStore::new();
        let first = store.create("buy milk".into()).await.unwrap();
        let second = store.create("walk dog".into()).await.unwrap();

        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(store.list().await, vec![first, second]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = TodoStore::new();
        store.create("a".into()).await.unwrap();
        let b = store.create("b".into()).await.unwrap();
        store.delete(b.id).await.unwrap();

        let c = store.create("c".into()).await.unwrap();
        assert_eq!(c.id, 2);
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_list_unchanged() {
        let store = TodoStore::new();
        store.create("keep me".into()).await.unwrap();
        let before = store.list().await;

        assert_eq!(store.delete(42).await, Err(AppError::NotFound(42)));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn update_changes_only_the_matching_text() {
        let store = TodoStore::new();
        let a = store.create("a".into()).await.unwrap();
        let b = store.create("b".into()).await.unwrap();

        let updated = store.update(b.id, "b2".into()).await.unwrap();
        assert_eq!(updated, Todo { id: b.id, text: "b2".into() });
        assert_eq!(store.list().await, vec![a, updated]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = TodoStore::new();
        assert_eq!(
            store.update(3, "nope".into()).await,
            Err(AppError::NotFound(3))
        );
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn scenario_create_create_delete() {
        let store = TodoStore::new();
        store.create("buy milk".into()).await.unwrap();
        store.create("walk dog".into()).await.unwrap();
        assert_eq!(store.delete(0).await, Ok(true));
        assert_eq!(
            store.list().await,
            vec![Todo { id: 1, text: "walk dog".into() }]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_unique_ids() {
        let store = Arc::new(TodoStore::new());
        let handles = (0..50).map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(format!("todo {i}")).await })
        });

        let ids: HashSet<i32> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap().id)
            .collect();

        assert_eq!(ids, (0..50).collect());
        assert_eq!(store.list().await.len(), 50);
    }

    #[tokio::test]
    async fn create_stops_once_ids_run_out() {
        let store = TodoStore {
            state: Mutex::new(TodoState {
                todos: Vec::new(),
                next_id: i64::from(i32::MAX),
            }),
        };

        let last = store.create("last".into()).await.unwrap();
        assert_eq!(last.id, i32::MAX);
        assert_eq!(
            store.create("one too many".into()).await,
            Err(AppError::IdsExhausted)
        );
        assert_eq!(store.list().await, vec![last]);
    }
}
