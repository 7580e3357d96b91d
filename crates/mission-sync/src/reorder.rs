//! Drag Reorder
//!
//! Turns a drag-end gesture into a single-element move within the list.
//! Positions are resolved by id against the current list, never cached from
//! drag start.

use crate::domain::{Entity, TaskId};

/// End of a drag gesture: what was dragged and what it was dropped over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub active: TaskId,
    pub over: Option<TaskId>,
}

impl DragEnd {
    pub fn new(active: TaskId, over: Option<TaskId>) -> Self {
        Self { active, over }
    }
}

/// Move the element at `from` to `to`, shifting everything in between
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
}

/// Apply a drag-end; returns whether the order changed
pub fn apply_drag_end<T>(items: &mut [T], event: &DragEnd) -> bool
where
    T: Entity<Id = TaskId>,
{
    let Some(over) = event.over else {
        return false;
    };
    if over == event.active {
        return false;
    }

    let position = |id: TaskId| items.iter().position(|item| item.id() == id);
    let (Some(from), Some(to)) = (position(event.active), position(over)) else {
        log::debug!("[REORDER] Stale drag {:?}, ignoring", event);
        return false;
    };

    array_move(items, from, to);
    true
}
