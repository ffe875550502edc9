//! Todo Form Component
//!
//! Single text input creating a todo on submit.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;

#[component]
pub fn TodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let revision = ctx.revision;

    let todos = Arc::clone(&ctx.todos);
    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let todos = Arc::clone(&todos);
        spawn_local(async move {
            let _ = todos.submit().await;
        });
    };

    let shown = Arc::clone(&ctx.todos);
    let typed = Arc::clone(&ctx.todos);

    view! {
        <form class="mb3" on:submit=create_todo>
            <input
                class="pa2 f4 b--dashed"
                type="text"
                placeholder="Write your todo"
                prop:value=move || {
                    let _ = revision.get();
                    shown.input()
                }
                on:input=move |ev| typed.set_input(event_target_value(&ev))
            />
            <button class="pa2 f4 bg-green" type="submit">"Create"</button>
        </form>
    }
}
