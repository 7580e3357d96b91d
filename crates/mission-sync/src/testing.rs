//! Scripted in-memory backend for store and session tests.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::{LoginRequest, LoginResponse, NewTask, SignupRequest, TaskId, TaskRecord, User, UserId};
use crate::error::{GatewayError, Operation};
use crate::gateway::{decode_task_list, AuthGateway, GatewayResult, TaskGateway};

#[derive(Default)]
pub struct FakeGateway {
    server: Mutex<Vec<TaskRecord>>,
    failing: Mutex<HashSet<Operation>>,
    fetch_payload: Mutex<Option<Value>>,
    auth_fails: Mutex<bool>,
    calls: Mutex<Vec<String>>,
    tokens: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn with_tasks(tasks: Vec<TaskRecord>) -> Self {
        let gateway = Self::default();
        *gateway.server.lock() = tasks;
        gateway
    }

    /// Make every call of `operation` fail until `recover` is called
    pub fn fail(&self, operation: Operation) {
        self.failing.lock().insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.failing.lock().remove(&operation);
    }

    pub fn fail_auth(&self, fails: bool) {
        *self.auth_fails.lock() = fails;
    }

    /// Serve this raw JSON from `fetch_all` instead of the server list
    pub fn set_fetch_payload(&self, payload: Value) {
        *self.fetch_payload.lock() = Some(payload);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().clone()
    }

    pub fn server_tasks(&self) -> Vec<TaskRecord> {
        self.server.lock().clone()
    }

    fn record(&self, operation: Operation, token: &str, call: String) -> GatewayResult<()> {
        self.calls.lock().push(call);
        self.tokens.lock().push(token.to_string());
        if self.failing.lock().contains(&operation) {
            return Err(GatewayError::request_failed(operation, "scripted failure"));
        }
        Ok(())
    }

    fn login_as(&self, operation: Operation, name: &str) -> GatewayResult<LoginResponse> {
        if *self.auth_fails.lock() {
            return Err(GatewayError::request_failed(operation, "401 Unauthorized"));
        }
        Ok(LoginResponse {
            token: format!("token-{}", name),
            user: User {
                id: UserId("1".to_string()),
                name: name.to_string(),
                email: None,
                image: None,
            },
        })
    }
}

#[async_trait(?Send)]
impl TaskGateway for FakeGateway {
    async fn fetch_all(&self, token: &str) -> GatewayResult<Vec<TaskRecord>> {
        self.record(Operation::FetchTasks, token, "fetch_all".to_string())?;
        // a real request is never ready on first poll
        tokio::task::yield_now().await;
        if let Some(payload) = self.fetch_payload.lock().clone() {
            return decode_task_list(payload);
        }
        Ok(self.server.lock().clone())
    }

    async fn add(&self, token: &str, task: &NewTask) -> GatewayResult<()> {
        self.record(Operation::AddTask, token, format!("add:{}", task.title))?;
        let mut server = self.server.lock();
        let id: TaskId = server.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        server.push(TaskRecord::new(id, task.title.clone(), task.description.clone()));
        Ok(())
    }

    async fn update(&self, token: &str, task: &TaskRecord) -> GatewayResult<()> {
        self.record(Operation::UpdateTask, token, format!("update:{}", task.id))?;
        if let Some(existing) = self.server.lock().iter_mut().find(|t| t.id == task.id) {
            *existing = task.clone();
        }
        Ok(())
    }

    async fn delete(&self, token: &str, id: TaskId) -> GatewayResult<()> {
        self.record(Operation::DeleteTask, token, format!("delete:{}", id))?;
        self.server.lock().retain(|t| t.id != id);
        Ok(())
    }

    async fn complete(&self, token: &str, id: TaskId) -> GatewayResult<()> {
        self.record(Operation::CompleteTask, token, format!("complete:{}", id))?;
        if let Some(existing) = self.server.lock().iter_mut().find(|t| t.id == id) {
            existing.is_completed = true;
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthGateway for FakeGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginResponse> {
        self.calls.lock().push(format!("login:{}", request.name));
        self.login_as(Operation::Login, &request.name)
    }

    async fn guest_login(&self) -> GatewayResult<LoginResponse> {
        self.calls.lock().push("guest_login".to_string());
        self.login_as(Operation::GuestLogin, "guest")
    }

    async fn signup(&self, request: &SignupRequest) -> GatewayResult<()> {
        self.calls.lock().push(format!("signup:{}", request.name));
        if *self.auth_fails.lock() {
            return Err(GatewayError::request_failed(Operation::Signup, "409 Conflict"));
        }
        Ok(())
    }

    async fn current_user(&self, token: &str) -> GatewayResult<User> {
        self.calls.lock().push(format!("current_user:{}", token));
        if *self.auth_fails.lock() {
            return Err(GatewayError::request_failed(Operation::CurrentUser, "401 Unauthorized"));
        }
        Ok(User {
            id: UserId("1".to_string()),
            name: "current".to_string(),
            email: None,
            image: None,
        })
    }
}
