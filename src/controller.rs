//! Todo List Controller
//!
//! Owns the pending input text and the status of the list query, issues the
//! todo query and mutations, and keeps the cached list consistent after each
//! mutation. View-agnostic: the UI subscribes through `on_change`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::confirm::{Confirm, DELETE_PROMPT};
use crate::graphql::{
    AddTodo, AddTodoVariables, ClientError, DeleteTodo, DeleteTodoVariables, FetchPolicy, GetTodos, GraphqlClient,
    NoVariables, ToggleTodo, ToggleTodoVariables, Transport,
};
use crate::models::TodoItem;

/// What the list view renders
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Error(String),
    Ready(Vec<TodoItem>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank after trimming; nothing was sent
    Ignored,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Confirmation declined; nothing was sent
    Cancelled,
    Deleted,
}

#[derive(Debug, Clone, PartialEq)]
enum QueryStatus {
    Loading,
    Failed(String),
    Loaded,
}

/// Cache step applied after a successful mutation
#[derive(Debug)]
enum Reconcile {
    /// Replace cached rows in place by id
    Patch(Vec<TodoItem>),
    /// Drop a row from the cached list and evict its entity
    Remove(TodoItem),
    /// Re-run the list query over the network
    Refetch,
}

type Listener = Box<dyn Fn() + Send + Sync>;

pub struct TodoListController<T> {
    client: Arc<GraphqlClient<T>>,
    input: Mutex<String>,
    status: Mutex<QueryStatus>,
    listener: Option<Listener>,
}

impl<T: Transport> TodoListController<T> {
    pub fn new(client: Arc<GraphqlClient<T>>) -> Self {
        Self {
            client,
            input: Mutex::new(String::new()),
            status: Mutex::new(QueryStatus::Loading),
            listener: None,
        }
    }

    /// Called after every change to the input, the status or the cached list.
    pub fn on_change(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    #[cfg(test)]
    pub fn client(&self) -> &Arc<GraphqlClient<T>> {
        &self.client
    }

    pub fn state(&self) -> ListState {
        match &*self.status.lock() {
            QueryStatus::Loading => ListState::Loading,
            QueryStatus::Failed(message) => ListState::Error(message.clone()),
            QueryStatus::Loaded => match self.client.read_query::<GetTodos>(&NoVariables) {
                Ok(Some(data)) => ListState::Ready(data.todos),
                Ok(None) => ListState::Loading,
                Err(e) => ListState::Error(e.to_string()),
            },
        }
    }

    pub fn input(&self) -> String {
        self.input.lock().clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        *self.input.lock() = text.into();
    }

    /// List todos, served from the cache when already loaded.
    pub async fn load(&self) -> Result<(), ClientError> {
        self.fetch(FetchPolicy::CacheFirst).await
    }

    /// Create a todo from the pending input. The raw text is sent; the
    /// trimmed text only decides whether anything is sent at all.
    pub async fn submit(&self) -> Result<SubmitOutcome, ClientError> {
        let text = self.input();
        if text.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        log::debug!("[TODOS] creating {:?}", text);
        if let Err(e) = self.client.mutate::<AddTodo>(AddTodoVariables { text }).await {
            log::warn!("[TODOS] create failed: {}", e);
            return Err(e);
        }

        self.set_input(String::new());
        self.notify();
        self.reconcile(Reconcile::Refetch).await?;
        Ok(SubmitOutcome::Created)
    }

    /// Flip `done` on the server and patch the cached row with the result.
    pub async fn toggle(&self, item: &TodoItem) -> Result<(), ClientError> {
        let variables = ToggleTodoVariables {
            id: item.id.clone(),
            done: !item.done,
        };
        log::debug!("[TODOS] toggling {} to done={}", variables.id, variables.done);

        let data = self.client.mutate::<ToggleTodo>(variables).await.map_err(|e| {
            log::warn!("[TODOS] toggle of {} failed: {}", item.id, e);
            e
        })?;
        let rows = data.update_todos.map(|r| r.returning).unwrap_or_default();
        self.reconcile(Reconcile::Patch(rows)).await
    }

    /// Delete a todo once `confirm` agrees, then drop it from the cached list.
    pub async fn delete(&self, item: &TodoItem, confirm: &dyn Confirm) -> Result<DeleteOutcome, ClientError> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        log::debug!("[TODOS] deleting {}", item.id);
        if let Err(e) = self.client.mutate::<DeleteTodo>(DeleteTodoVariables { id: item.id.clone() }).await {
            log::warn!("[TODOS] delete of {} failed: {}", item.id, e);
            return Err(e);
        }

        self.reconcile(Reconcile::Remove(item.clone())).await?;
        Ok(DeleteOutcome::Deleted)
    }

    async fn reconcile(&self, step: Reconcile) -> Result<(), ClientError> {
        match step {
            Reconcile::Patch(rows) => {
                self.client.update_query::<GetTodos, _>(&NoVariables, |data| {
                    for row in rows {
                        if let Some(cached) = data.todos.iter_mut().find(|todo| todo.id == row.id) {
                            *cached = row;
                        }
                    }
                })?;
            }
            Reconcile::Remove(item) => {
                self.client
                    .update_query::<GetTodos, _>(&NoVariables, |data| data.todos.retain(|todo| todo.id != item.id))?;
                self.client.evict(&item.cache_key());
            }
            Reconcile::Refetch => return self.fetch(FetchPolicy::NetworkOnly).await,
        }
        self.notify();
        Ok(())
    }

    async fn fetch(&self, policy: FetchPolicy) -> Result<(), ClientError> {
        self.set_status(QueryStatus::Loading);

        match self.client.query::<GetTodos>(NoVariables, policy).await {
            Ok(data) => {
                log::debug!("[TODOS] loaded {} todos", data.todos.len());
                self.set_status(QueryStatus::Loaded);
                Ok(())
            }
            Err(e) => {
                log::warn!("[TODOS] fetching todos failed: {}", e);
                self.set_status(QueryStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn set_status(&self, status: QueryStatus) {
        *self.status.lock() = status;
        self.notify();
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener();
        }
    }
}
