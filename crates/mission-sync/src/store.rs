//! Task List Store
//!
//! The single in-memory, ordered copy of the user's missions. Every mutation
//! goes to the backend first and only touches the local list after the call
//! succeeds, so a failure never needs a rollback.
//!
//! The store is a cheap `Clone` handle. UI code subscribes to snapshots
//! instead of reaching into shared globals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{NewTask, TaskId, TaskRecord};
use crate::error::{GatewayError, StoreError};
use crate::gateway::{GatewayResult, TaskGateway};
use crate::reorder::{apply_drag_end, DragEnd};
use crate::session::{stored_token, TokenStorage};

/// Which missions a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Active, TaskFilter::Completed];

    pub fn matches(&self, task: &TaskRecord) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.is_completed,
            TaskFilter::Completed => task.is_completed,
        }
    }
}

/// Everything a view needs to render the list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    pub tasks: Vec<TaskRecord>,
    pub loading: bool,
    pub error: Option<StoreError>,
}

impl StoreSnapshot {
    pub fn filtered(&self, filter: TaskFilter) -> Vec<TaskRecord> {
        self.tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
    }

    pub fn active_tasks(&self) -> Vec<TaskRecord> {
        self.filtered(TaskFilter::Active)
    }

    pub fn completed_tasks(&self) -> Vec<TaskRecord> {
        self.filtered(TaskFilter::Completed)
    }
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&StoreSnapshot) + Send + Sync>;

struct Inner {
    state: Mutex<StoreSnapshot>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

pub struct TaskListStore<G> {
    gateway: Arc<G>,
    tokens: Arc<dyn TokenStorage>,
    inner: Arc<Inner>,
}

impl<G> Clone for TaskListStore<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            tokens: Arc::clone(&self.tokens),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: TaskGateway> TaskListStore<G> {
    pub fn new(gateway: Arc<G>, tokens: Arc<dyn TokenStorage>) -> Self {
        Self {
            gateway,
            tokens,
            inner: Arc::new(Inner {
                state: Mutex::new(StoreSnapshot::default()),
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
            }),
        }
    }

    // ========================
    // Subscription
    // ========================

    /// Call `listener` with a fresh snapshot after every state change
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.lock().retain(|(sid, _)| *sid != id);
    }

    // ========================
    // Readers
    // ========================

    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.state.lock().clone()
    }

    pub fn tasks(&self) -> Vec<TaskRecord> {
        self.inner.state.lock().tasks.clone()
    }

    pub fn error(&self) -> Option<StoreError> {
        self.inner.state.lock().error
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().loading
    }

    // ========================
    // Operations
    // ========================

    /// Replace the whole list with the server's
    pub async fn load(&self) -> Result<(), StoreError> {
        let token = self.token()?;
        self.update_state(|s| s.loading = true);
        let result = self.gateway.fetch_all(&token).await;
        self.apply_fetch(result, StoreError::FetchFailed)
    }

    /// Create a mission, then reload so the server-assigned id and position show up
    pub async fn add(&self, title: &str, description: &str) -> Result<(), StoreError> {
        let token = self.token()?;
        let task = NewTask::new(title, description).ok_or(StoreError::EmptyTitle)?;

        if let Err(e) = self.gateway.add(&token, &task).await {
            return self.fail(StoreError::AddFailed, &e);
        }
        self.update_state(|s| s.loading = true);
        let result = self.gateway.fetch_all(&token).await;
        self.apply_fetch(result, StoreError::AddFailed)
    }

    /// Overwrite a mission; the submitted record replaces the local entry.
    /// A mission already completed locally stays completed.
    pub async fn update(&self, record: TaskRecord) -> Result<(), StoreError> {
        let token = self.token()?;
        if let Err(e) = self.gateway.update(&token, &record).await {
            return self.fail(StoreError::UpdateFailed, &e);
        }
        self.update_state(|s| {
            if let Some(existing) = s.tasks.iter_mut().find(|t| t.id == record.id) {
                let completed = existing.is_completed;
                *existing = record;
                existing.is_completed |= completed;
            }
            s.error = None;
        });
        Ok(())
    }

    /// Change title and description of the current local record
    pub async fn edit(&self, id: TaskId, title: &str, description: &str) -> Result<(), StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let current = self.inner.state.lock().tasks.iter().find(|t| t.id == id).cloned();
        let Some(current) = current else {
            log::warn!("[STORE] Task {} is no longer listed", id);
            self.update_state(|s| s.error = Some(StoreError::UpdateFailed));
            return Err(StoreError::UpdateFailed);
        };
        self.update(current.edited(title, description)).await
    }

    pub async fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        let token = self.token()?;
        if let Err(e) = self.gateway.delete(&token, id).await {
            return self.fail(StoreError::DeleteFailed, &e);
        }
        self.update_state(|s| {
            s.tasks.retain(|t| t.id != id);
            s.error = None;
        });
        Ok(())
    }

    /// Mark a mission done; the flag flips locally whatever the response body says
    pub async fn mark_complete(&self, id: TaskId) -> Result<(), StoreError> {
        let token = self.token()?;
        if let Err(e) = self.gateway.complete(&token, id).await {
            return self.fail(StoreError::StatusChangeFailed, &e);
        }
        self.update_state(|s| {
            if let Some(existing) = s.tasks.iter_mut().find(|t| t.id == id) {
                existing.is_completed = true;
            }
            s.error = None;
        });
        Ok(())
    }

    /// Local-only move; returns whether the order changed
    pub fn reorder(&self, event: DragEnd) -> bool {
        let snapshot = {
            let mut state = self.inner.state.lock();
            if !apply_drag_end(&mut state.tasks, &event) {
                return false;
            }
            state.clone()
        };
        log::debug!("[STORE] Moved task {} over {:?}", event.active, event.over);
        self.publish(&snapshot);
        true
    }

    /// Forget everything, e.g. on logout
    pub fn clear(&self) {
        self.update_state(|s| *s = StoreSnapshot::default());
    }

    pub fn dismiss_error(&self) {
        self.update_state(|s| s.error = None);
    }

    // ========================
    // Internals
    // ========================

    fn token(&self) -> Result<String, StoreError> {
        stored_token(self.tokens.as_ref()).ok_or_else(|| {
            log::info!("[STORE] No session token, navigation required");
            StoreError::NavigationRequired
        })
    }

    fn apply_fetch(
        &self,
        result: GatewayResult<Vec<TaskRecord>>,
        on_request_failure: StoreError,
    ) -> Result<(), StoreError> {
        let tasks = match result {
            Ok(tasks) => tasks,
            Err(e) => {
                let error = if e.is_invalid_payload() {
                    StoreError::InvalidDataFormat
                } else {
                    on_request_failure
                };
                log::warn!("[STORE] {:?}: {}", error, e);
                self.update_state(|s| {
                    s.loading = false;
                    s.error = Some(error);
                });
                return Err(error);
            }
        };
        log::debug!("[STORE] Loaded {} tasks", tasks.len());
        self.update_state(|s| {
            s.tasks = tasks;
            s.loading = false;
            s.error = None;
        });
        Ok(())
    }

    /// Record a failed mutation; `loading` belongs to fetches and is left alone
    fn fail(&self, error: StoreError, cause: &GatewayError) -> Result<(), StoreError> {
        log::warn!("[STORE] {:?}: {}", error, cause);
        self.update_state(|s| s.error = Some(error));
        Err(error)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut StoreSnapshot) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.inner.state.lock();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.publish(&snapshot);
        result
    }

    /// Listeners run outside both locks so they may call back into the store
    fn publish(&self, snapshot: &StoreSnapshot) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}
