//! Remote Gateways
//!
//! Abstract interfaces for the backend calls. Each method issues exactly one
//! request and never touches local state; retries are the caller's business.

mod http;

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{LoginRequest, LoginResponse, NewTask, SignupRequest, TaskId, TaskRecord, User};
use crate::error::{GatewayError, Operation};

pub use http::HttpGateway;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Authenticated task CRUD
///
/// Futures are `?Send` so implementations can sit on the browser's fetch.
#[async_trait(?Send)]
pub trait TaskGateway: Send + Sync {
    /// Fetch the full task list
    async fn fetch_all(&self, token: &str) -> GatewayResult<Vec<TaskRecord>>;

    /// Create a task; the server assigns the id
    async fn add(&self, token: &str, task: &NewTask) -> GatewayResult<()>;

    /// Overwrite a task with the full record
    async fn update(&self, token: &str, task: &TaskRecord) -> GatewayResult<()>;

    /// Delete a task by id
    async fn delete(&self, token: &str, id: TaskId) -> GatewayResult<()>;

    /// Mark a task as completed
    async fn complete(&self, token: &str, id: TaskId) -> GatewayResult<()>;
}

/// Login, signup and current-user lookups
#[async_trait(?Send)]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginResponse>;

    async fn guest_login(&self) -> GatewayResult<LoginResponse>;

    /// Register an account; the caller logs in separately
    async fn signup(&self, request: &SignupRequest) -> GatewayResult<()>;

    async fn current_user(&self, token: &str) -> GatewayResult<User>;
}

/// Validate a fetch-all payload: a JSON array of unique, well-formed records
pub fn decode_task_list(value: Value) -> GatewayResult<Vec<TaskRecord>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(GatewayError::invalid_payload(
                Operation::FetchTasks,
                format!("expected an array, got {}", json_kind(&other)),
            ))
        }
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let task: TaskRecord = serde_json::from_value(item).map_err(|e| {
            GatewayError::invalid_payload(Operation::FetchTasks, format!("element {}: {}", index, e))
        })?;
        if !seen.insert(task.id) {
            return Err(GatewayError::invalid_payload(
                Operation::FetchTasks,
                format!("duplicate task id {}", task.id),
            ));
        }
        tasks.push(task);
    }
    Ok(tasks)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
