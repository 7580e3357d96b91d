//! Leptos DragDrop Utilities
//!
//! Sortable single-list drag-and-drop on plain mouse events. A press only
//! becomes a drag once the pointer leaves a small dead zone, so clicks on a
//! row still work.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Movement in pixels before a press turns into a drag
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Emitted on mouseup after a real drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragEndEvent {
    /// Row being dragged
    pub active: u32,
    /// Row under the pointer at release, if any
    pub over: Option<u32>,
}

/// Mousedown that has not moved far enough yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Press {
    id: u32,
    x: i32,
    y: i32,
}

impl Press {
    fn moved_past_threshold(&self, x: i32, y: i32) -> bool {
        exceeds_threshold(x - self.x, y - self.y)
    }
}

/// Shared drag state for one sortable list
#[derive(Clone, Copy)]
pub struct SortableDnd {
    dragging: RwSignal<Option<u32>>,
    over: RwSignal<Option<u32>>,
    press: RwSignal<Option<Press>>,
}

impl SortableDnd {
    pub fn new() -> Self {
        Self {
            dragging: RwSignal::new(None),
            over: RwSignal::new(None),
            press: RwSignal::new(None),
        }
    }

    /// Tracked: `id` is the row being dragged
    pub fn is_dragging(&self, id: u32) -> bool {
        self.dragging.get() == Some(id)
    }

    /// Tracked: `id` is the current drop target
    pub fn is_over(&self, id: u32) -> bool {
        self.over.get() == Some(id)
    }

    fn press(&self, id: u32, x: i32, y: i32) {
        self.press.set(Some(Press { id, x, y }));
    }

    fn pointer_moved(&self, x: i32, y: i32) {
        if self.dragging.get_untracked().is_some() {
            return;
        }
        if let Some(press) = self.press.get_untracked() {
            if press.moved_past_threshold(x, y) {
                self.dragging.set(Some(press.id));
            }
        }
    }

    fn enter(&self, id: u32) {
        if let Some(active) = self.dragging.get_untracked() {
            self.over.set(target_on_enter(active, id));
        }
    }

    fn leave(&self) {
        if self.dragging.get_untracked().is_some() {
            self.over.set(None);
        }
    }

    /// Reset everything; returns the finished drag, if one was running
    fn release(&self) -> Option<DragEndEvent> {
        let event = finish_drag(self.dragging.get_untracked(), self.over.get_untracked());
        self.press.set(None);
        self.dragging.set(None);
        self.over.set(None);
        event
    }
}

impl Default for SortableDnd {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a pointer offset from the mousedown point starts a drag
pub fn exceeds_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

/// Drop target after the pointer enters `item_id` while `dragging` is held
pub fn target_on_enter(dragging: u32, item_id: u32) -> Option<u32> {
    (dragging != item_id).then_some(item_id)
}

/// A click that never moved has no drag to report
pub fn finish_drag(dragging: Option<u32>, over: Option<u32>) -> Option<DragEndEvent> {
    dragging.map(|active| DragEndEvent { active, over })
}

fn is_form_control(target: &web_sys::EventTarget) -> bool {
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
}

/// Mousedown handler for a row; presses on form controls are ignored
pub fn make_on_mousedown(dnd: SortableDnd, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if ev.target().is_some_and(|t| is_form_control(&t)) {
            return;
        }
        dnd.press(item_id, ev.client_x(), ev.client_y());
    }
}

pub fn make_on_item_mouseenter(dnd: SortableDnd, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| dnd.enter(item_id)
}

pub fn make_on_mouseleave(dnd: SortableDnd) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| dnd.leave()
}

fn add_document_listener(event: &str, handler: Closure<dyn FnMut(web_sys::MouseEvent)>) {
    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
    }
    // document listeners live as long as the page
    handler.forget();
}

/// Bind document mousemove/mouseup; `on_drag_end` fires only after a real drag
pub fn bind_document_listeners<F>(dnd: SortableDnd, on_drag_end: F)
where
    F: Fn(DragEndEvent) + 'static,
{
    add_document_listener(
        "mousemove",
        Closure::new(move |ev: web_sys::MouseEvent| dnd.pointer_moved(ev.client_x(), ev.client_y())),
    );
    add_document_listener(
        "mouseup",
        Closure::new(move |_ev: web_sys::MouseEvent| {
            if let Some(event) = dnd.release() {
                on_drag_end(event);
            }
        }),
    );
}
