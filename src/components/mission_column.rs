//! Mission Column Component
//!
//! The ordered mission board with filter tabs and drag-to-reorder.
//! Reordering is local only; the next load restores server order.

use leptos::prelude::*;
use mission_sync::{TaskFilter, TaskRecord};

use crate::components::{EditModal, MissionCard};
use crate::store::{use_app_store, AppStateStoreFields};

use leptos_dragdrop::*;

pub fn filter_label(filter: TaskFilter) -> &'static str {
    match filter {
        TaskFilter::All => "すべて",
        TaskFilter::Active => "未完了",
        TaskFilter::Completed => "完了",
    }
}

pub fn filter_class(selected: bool) -> &'static str {
    if selected { "filter-btn active" } else { "filter-btn" }
}

#[component]
pub fn MissionColumn(dnd: SortableDnd) -> impl IntoView {
    let store = use_app_store();

    let (filter, set_filter) = signal(TaskFilter::All);
    let (editing, set_editing) = signal(None::<TaskRecord>);

    let visible_tasks = move || {
        let current = filter.get();
        let missions = store.missions().read();
        missions.filtered(current)
    };

    let summary = move || {
        let missions = store.missions().read();
        format!(
            "{} missions, {} completed",
            missions.tasks.len(),
            missions.completed_tasks().len()
        )
    };

    view! {
        <div class="mission-column">
            <div class="filter-tabs">
                {TaskFilter::ALL.iter().map(|&option| view! {
                    <button
                        type="button"
                        class=move || filter_class(filter.get() == option)
                        on:click=move |_| set_filter.set(option)
                    >
                        {filter_label(option)}
                    </button>
                }).collect_view()}
            </div>

            <Show when=move || store.missions().read().loading>
                <p class="loading">"Loading..."</p>
            </Show>

            <div class="mission-list">
                <For
                    each=visible_tasks
                    key=|task| (task.id, task.title.clone(), task.description.clone(), task.is_completed)
                    children=move |task| {
                        let id = task.id;

                        let on_mousedown = make_on_mousedown(dnd, id);
                        let on_mouseenter = make_on_item_mouseenter(dnd, id);
                        let on_mouseleave = make_on_mouseleave(dnd);

                        let item_class = move || {
                            let mut c = String::from("mission-wrapper");
                            if dnd.is_dragging(id) { c.push_str(" dragging"); }
                            if dnd.is_over(id) { c.push_str(" drop-target"); }
                            c
                        };

                        view! {
                            <div
                                class=item_class
                                on:mousedown=on_mousedown
                                on:mouseenter=on_mouseenter
                                on:mouseleave=on_mouseleave
                            >
                                <MissionCard task=task set_editing=set_editing />
                            </div>
                        }
                    }
                />
            </div>

            <p class="item-count">{summary}</p>

            <EditModal editing=editing set_editing=set_editing />
        </div>
    }
}
