//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::confirm::Confirm;
use crate::controller::TodoListController;
use crate::graphql::{GraphqlClient, HttpTransport};

/// The long-lived client placed in context at startup
pub type Client = GraphqlClient<HttpTransport>;

/// App-wide state provided via context
#[derive(Clone)]
pub struct AppContext {
    /// Bumped whenever the controller reports a change
    pub revision: ReadSignal<u32>,
    /// List view controller
    pub todos: Arc<TodoListController<HttpTransport>>,
    /// Confirmation used before deleting
    confirm: Arc<dyn Confirm + Send + Sync>,
}

impl AppContext {
    pub fn new(
        revision: (ReadSignal<u32>, WriteSignal<u32>),
        client: Arc<Client>,
        confirm: Arc<dyn Confirm + Send + Sync>,
    ) -> Self {
        let set_revision = revision.1;
        let todos = TodoListController::new(client)
            .on_change(move || set_revision.update(|v| *v = v.wrapping_add(1)));
        Self {
            revision: revision.0,
            todos: Arc::new(todos),
            confirm,
        }
    }

    pub fn confirm(&self) -> Arc<dyn Confirm + Send + Sync> {
        Arc::clone(&self.confirm)
    }
}
