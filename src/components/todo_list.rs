//! Todo List Component

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::models::TodoItem;

/// One row per todo, in server order. Rows are keyed on their content, so
/// an edit re-creates only the affected row.
#[component]
pub fn TodoList(#[prop(into)] todos: Signal<Vec<TodoItem>>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center flex-column">
            <For
                each=move || todos.get()
                key=|todo| (todo.id.clone(), todo.text.clone(), todo.done)
                children=|todo| view! { <TodoRow todo=todo /> }
            />
        </div>
    }
}
