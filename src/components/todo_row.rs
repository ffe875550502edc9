//! Todo Row Component
//!
//! Double-click the text to toggle, click × to delete.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::models::TodoItem;

/// CSS classes of a todo's text; done todos are struck through
fn text_class(done: bool) -> &'static str {
    if done {
        "pointer list pa1 f3 strike"
    } else {
        "pointer list pa1 f3"
    }
}

#[component]
pub fn TodoRow(todo: TodoItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let text = todo.text.clone();
    let class = text_class(todo.done);

    let todos = Arc::clone(&ctx.todos);
    let toggled = todo.clone();
    let toggle_todo = move |_| {
        let todos = Arc::clone(&todos);
        let item = toggled.clone();
        spawn_local(async move {
            let _ = todos.toggle(&item).await;
        });
    };

    let todos = Arc::clone(&ctx.todos);
    let delete_todo = move |_| {
        let todos = Arc::clone(&todos);
        let confirm = ctx.confirm();
        let item = todo.clone();
        spawn_local(async move {
            let _ = todos.delete(&item, confirm.as_ref()).await;
        });
    };

    view! {
        <p on:dblclick=toggle_todo>
            <span class=class>{text}</span>
            <button class="bg-transparent f4 bn ph3" on:click=delete_todo>
                " " <span class="red">"×"</span>
            </button>
        </p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_class() {
        assert_eq!(text_class(false), "pointer list pa1 f3");
        assert!(text_class(true).ends_with(" strike"));
    }
}
