//! GraphQL CheckList App
//!
//! Root component: loading / error / ready views over the todo list.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{TodoForm, TodoList};
use crate::confirm::{AlwaysConfirm, BrowserConfirm, Confirm};
use crate::context::{AppContext, Client};
use crate::controller::ListState;

/// Which page the root renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Error,
    Ready,
}

fn phase_of(state: &ListState) -> Phase {
    match state {
        ListState::Loading => Phase::Loading,
        ListState::Error(message) => {
            log::debug!("[APP] showing error view: {}", message);
            Phase::Error
        }
        ListState::Ready(_) => Phase::Ready,
    }
}

#[component]
pub fn App(confirm_deletes: bool) -> impl IntoView {
    let client = use_context::<Arc<Client>>().expect("GraphQL client should be provided");
    let (revision, set_revision) = signal(0u32);
    let confirm: Arc<dyn Confirm + Send + Sync> = if confirm_deletes {
        Arc::new(BrowserConfirm)
    } else {
        Arc::new(AlwaysConfirm)
    };

    // Provide context to all children
    let ctx = AppContext::new((revision, set_revision), client, confirm);
    provide_context(ctx.clone());

    // List todos on mount
    let todos = Arc::clone(&ctx.todos);
    Effect::new(move |_| {
        let todos = Arc::clone(&todos);
        spawn_local(async move {
            let _ = todos.load().await;
        });
    });

    let state = Memo::new(move |_| {
        let _ = revision.get();
        ctx.todos.state()
    });
    let phase = Memo::new(move |_| state.with(phase_of));
    let todos = Memo::new(move |_| match state.get() {
        ListState::Ready(todos) => todos,
        _ => Vec::new(),
    });

    // Only a phase change rebuilds the page; list updates stay inside TodoList
    move || match phase.get() {
        Phase::Loading => view! { <div>"Loading todos..."</div> }.into_any(),
        Phase::Error => view! { <div>"Error fetching todos"</div> }.into_any(),
        Phase::Ready => view! {
            <div class="vh-100 code flex flex-column items-center bg-purple white pa3 fl-1">
                <h1 class="f2-l">
                    "GraphQL CheckList " <span role="img" aria-label="Checkmark">"✅"</span>
                </h1>

                <TodoForm />

                <TodoList todos=todos />
            </div>
        }
        .into_any(),
    }
}
