//! Todo persistence port and its store-backed adapter.

use std::convert::Infallible;

use common::Eff;
use store::{InMemoryStore, Store};

use super::entity::Todo;
use super::value_objects::TodoId;

/// Persistence for todos.
///
/// `save` is last-write-wins by id, and a `find_by_id` run after a `save`
/// observes it. None of the operations can fail.
pub trait TodoRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: &TodoId) -> Eff<Option<Todo>, Infallible>;

    fn find_all(&self) -> Eff<Vec<Todo>, Infallible>;

    fn save(&self, todo: Todo) -> Eff<Todo, Infallible>;
}

/// [`TodoRepository`] over any [`Store`] of todos.
#[derive(Debug, Clone, Default)]
pub struct StoreTodoRepository<S> {
    store: S,
}

/// Repository backed by an in-process store.
pub type InMemoryTodoRepository = StoreTodoRepository<InMemoryStore<Todo>>;

impl<S> StoreTodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl InMemoryTodoRepository {
    /// Creates a repository over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl<S> TodoRepository for StoreTodoRepository<S>
where
    S: Store<Todo> + Clone + 'static,
{
    fn find_by_id(&self, id: &TodoId) -> Eff<Option<Todo>, Infallible> {
        let store = self.store.clone();
        let id = id.clone();
        Eff::new(move || async move { Ok(store.get(id.as_str()).await) })
    }

    fn find_all(&self) -> Eff<Vec<Todo>, Infallible> {
        let store = self.store.clone();
        Eff::new(move || async move { Ok(store.all().await) })
    }

    fn save(&self, todo: Todo) -> Eff<Todo, Infallible> {
        let store = self.store.clone();
        Eff::new(move || async move {
            tracing::debug!(todo_id = %todo.id(), status = %todo.status(), "saving todo");
            Ok(store.put(todo).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::entity::{complete, create_todo};
    use crate::todo::value_objects::{Priority, Title};
    use store::StoreExt;

    fn sample(title: &str) -> Todo {
        create_todo(
            TodoId::generate(),
            Title::create(title).unwrap(),
            None,
            Priority::default(),
        )
        .into()
    }

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemoryTodoRepository::in_memory();
        let todo = sample("Buy milk");

        let saved = repo.save(todo.clone()).run().await.unwrap();
        assert_eq!(saved, todo);

        let found = repo.find_by_id(todo.id()).run().await.unwrap();
        assert_eq!(found, Some(todo));

        let missing = TodoId::parse("todo-x").unwrap();
        assert_eq!(repo.find_by_id(&missing).run().await.unwrap(), None);
    }

    #[tokio::test]
    async fn nothing_happens_until_run() {
        let repo = InMemoryTodoRepository::in_memory();
        let pending = repo.save(sample("Buy milk"));

        assert!(repo.store().is_empty().await);
        pending.run().await.unwrap();
        assert_eq!(repo.store().len().await, 1);
    }

    #[tokio::test]
    async fn save_is_idempotent_and_last_write_wins() {
        let repo = InMemoryTodoRepository::in_memory();
        let todo = sample("Buy milk");

        repo.save(todo.clone()).run().await.unwrap();
        repo.save(todo.clone()).run().await.unwrap();
        assert_eq!(repo.find_all().run().await.unwrap(), vec![todo.clone()]);

        let Todo::Active(active) = todo else {
            unreachable!()
        };
        let completed: Todo = complete(active).into();
        repo.save(completed.clone()).run().await.unwrap();

        assert_eq!(repo.find_all().run().await.unwrap(), vec![completed]);
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let repo = InMemoryTodoRepository::in_memory();
        let first = sample("first");
        let second = sample("second");

        repo.save(first.clone()).run().await.unwrap();
        repo.save(second.clone()).run().await.unwrap();

        assert_eq!(repo.find_all().run().await.unwrap(), vec![first, second]);
    }
}
