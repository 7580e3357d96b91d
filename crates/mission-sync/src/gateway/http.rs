//! HTTP Gateway
//!
//! `reqwest` implementation of the gateways. Requests are built separately
//! from being sent so their shape can be checked without a server.

use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{decode_task_list, AuthGateway, GatewayResult, TaskGateway};
use crate::config::ClientConfig;
use crate::domain::{LoginRequest, LoginResponse, NewTask, SignupRequest, TaskId, TaskRecord, User};
use crate::error::{GatewayError, Operation};

#[derive(Serialize)]
struct IdArgs {
    id: TaskId,
}

/// Gateway talking to the REST backend
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================
    // Request Builders
    // ========================

    pub fn fetch_all_request(&self, token: &str) -> reqwest::Result<Request> {
        self.client
            .get(self.config.url(&self.config.endpoints.tasks))
            .bearer_auth(token)
            .build()
    }

    pub fn add_request(&self, token: &str, task: &NewTask) -> reqwest::Result<Request> {
        self.client
            .post(self.config.url(&self.config.endpoints.tasks))
            .bearer_auth(token)
            .json(task)
            .build()
    }

    pub fn update_request(&self, token: &str, task: &TaskRecord) -> reqwest::Result<Request> {
        self.client
            .post(self.config.url(&self.config.endpoints.tasks))
            .bearer_auth(token)
            .json(task)
            .build()
    }

    pub fn delete_request(&self, token: &str, id: TaskId) -> reqwest::Result<Request> {
        self.client
            .delete(self.config.url(&self.config.endpoints.tasks))
            .bearer_auth(token)
            .json(&IdArgs { id })
            .build()
    }

    pub fn complete_request(&self, token: &str, id: TaskId) -> reqwest::Result<Request> {
        self.client
            .post(self.config.url(&self.config.endpoints.complete_task))
            .bearer_auth(token)
            .json(&IdArgs { id })
            .build()
    }

    pub fn login_request(&self, path: &str, credentials: &LoginRequest) -> reqwest::Result<Request> {
        self.client
            .post(self.config.url(path))
            .json(credentials)
            .build()
    }

    pub fn signup_request(&self, account: &SignupRequest) -> reqwest::Result<Request> {
        self.client
            .post(self.config.url(&self.config.endpoints.signup))
            .json(account)
            .build()
    }

    pub fn current_user_request(&self, token: &str) -> reqwest::Result<Request> {
        self.client
            .get(self.config.url(&self.config.endpoints.current_user))
            .bearer_auth(token)
            .build()
    }

    // ========================
    // Dispatch
    // ========================

    /// Send one request; transport errors and non-2xx map to `RequestFailed`
    async fn send(&self, operation: Operation, request: reqwest::Result<Request>) -> GatewayResult<Response> {
        let request = request.map_err(|e| GatewayError::request_failed(operation, e))?;
        log::debug!("[GATEWAY] {} {} {}", operation, request.method(), request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| GatewayError::request_failed(operation, e))?;
        response
            .error_for_status()
            .map_err(|e| GatewayError::request_failed(operation, e))
    }

    async fn send_unit(&self, operation: Operation, request: reqwest::Result<Request>) -> GatewayResult<()> {
        self.send(operation, request).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: reqwest::Result<Request>,
    ) -> GatewayResult<T> {
        let response = self.send(operation, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::invalid_payload(operation, e))
    }
}

#[async_trait(?Send)]
impl TaskGateway for HttpGateway {
    async fn fetch_all(&self, token: &str) -> GatewayResult<Vec<TaskRecord>> {
        let body: Value = self
            .send_json(Operation::FetchTasks, self.fetch_all_request(token))
            .await?;
        decode_task_list(body)
    }

    async fn add(&self, token: &str, task: &NewTask) -> GatewayResult<()> {
        self.send_unit(Operation::AddTask, self.add_request(token, task)).await
    }

    async fn update(&self, token: &str, task: &TaskRecord) -> GatewayResult<()> {
        self.send_unit(Operation::UpdateTask, self.update_request(token, task)).await
    }

    async fn delete(&self, token: &str, id: TaskId) -> GatewayResult<()> {
        self.send_unit(Operation::DeleteTask, self.delete_request(token, id)).await
    }

    async fn complete(&self, token: &str, id: TaskId) -> GatewayResult<()> {
        self.send_unit(Operation::CompleteTask, self.complete_request(token, id)).await
    }
}

#[async_trait(?Send)]
impl AuthGateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginResponse> {
        let built = self.login_request(&self.config.endpoints.login, request);
        self.send_json(Operation::Login, built).await
    }

    async fn guest_login(&self) -> GatewayResult<LoginResponse> {
        let credentials = self.config.guest.as_ref().ok_or_else(|| {
            GatewayError::request_failed(Operation::GuestLogin, "guest login is not configured")
        })?;
        let built = self.login_request(&self.config.endpoints.guest_login, credentials);
        self.send_json(Operation::GuestLogin, built).await
    }

    async fn signup(&self, request: &SignupRequest) -> GatewayResult<()> {
        self.send_unit(Operation::Signup, self.signup_request(request))
            .await
    }

    async fn current_user(&self, token: &str) -> GatewayResult<User> {
        self.send_json(Operation::CurrentUser, self.current_user_request(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use reqwest::Method;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn gateway() -> HttpGateway {
        let config = ClientConfig::default()
            .with_base_url("http://backend.test")
            .unwrap();
        HttpGateway::new(config)
    }

    fn json_body(request: &Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    fn bearer(request: &Request) -> &str {
        request.headers().get(AUTHORIZATION).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_fetch_all_request() {
        let request = gateway().fetch_all_request("tok").unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "http://backend.test/api/todo");
        assert_eq!(bearer(&request), "Bearer tok");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_add_request() {
        let task = NewTask::new("Title", "Body").unwrap();
        let request = gateway().add_request("tok", &task).unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/api/todo");
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(json_body(&request), json!({"title": "Title", "description": "Body"}));
    }

    #[test]
    fn test_update_request_sends_full_record() {
        let mut task = TaskRecord::new(9, "Title", "Body");
        task.priority = Some(2);
        let request = gateway().update_request("tok", &task).unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/api/todo");
        assert_eq!(
            json_body(&request),
            json!({"id": 9, "title": "Title", "description": "Body", "is_completed": false, "priority": 2})
        );
    }

    #[test]
    fn test_delete_request() {
        let request = gateway().delete_request("tok", 4).unwrap();
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.url().path(), "/api/todo");
        assert_eq!(bearer(&request), "Bearer tok");
        assert_eq!(json_body(&request), json!({"id": 4}));
    }

    #[test]
    fn test_complete_request() {
        let request = gateway().complete_request("tok", 4).unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/api/todo/complete");
        assert_eq!(json_body(&request), json!({"id": 4}));
    }

    #[test]
    fn test_login_request_has_no_bearer() {
        let gw = gateway();
        let credentials = LoginRequest {
            name: "alice".to_string(),
            password: "secret".to_string(),
        };
        let request = gw
            .login_request(&gw.config().endpoints.login, &credentials)
            .unwrap();
        assert_eq!(request.url().path(), "/api/auth/login");
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(json_body(&request), json!({"name": "alice", "password": "secret"}));
    }

    #[test]
    fn test_signup_request() {
        let account = SignupRequest::new("alice", "alice@example.com", "secret").unwrap();
        let request = gateway().signup_request(&account).unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/api/auth/signup");
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(
            json_body(&request),
            json!({"name": "alice", "email": "alice@example.com", "password": "secret"})
        );
    }

    #[test]
    fn test_current_user_request() {
        let request = gateway().current_user_request("tok").unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().path(), "/api/auth/current_user");
        assert_eq!(bearer(&request), "Bearer tok");
    }

    /// Serve a single canned HTTP response and return the gateway pointing at it
    async fn serve_once(status_line: &'static str, body: &'static str) -> HttpGateway {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        let config = ClientConfig::default()
            .with_base_url(format!("http://{}", addr))
            .unwrap();
        HttpGateway::new(config)
    }

    #[tokio::test]
    async fn test_fetch_all_decodes_array() {
        let gw = serve_once("200 OK", r#"[{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]"#).await;
        let tasks = gw.fetch_all("tok").await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].title, "B");
    }

    #[tokio::test]
    async fn test_fetch_all_rejects_non_array() {
        let gw = serve_once("200 OK", r#"{"todos": []}"#).await;
        let err = gw.fetch_all("tok").await.unwrap_err();
        assert!(err.is_invalid_payload());
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let gw = serve_once("500 Internal Server Error", "").await;
        let err = gw.fetch_all("tok").await.unwrap_err();
        assert_eq!(err.operation(), Operation::FetchTasks);
        assert!(!err.is_invalid_payload());
        assert_eq!(err.to_string(), "Failed to fetch tasks");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_request_failed() {
        let gw = serve_once("401 Unauthorized", "").await;
        let err = gw.current_user("expired").await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::RequestFailed { operation: Operation::CurrentUser, .. }
        ));
    }

    #[tokio::test]
    async fn test_login_decodes_token() {
        let gw = serve_once("200 OK", r#"{"token": "jwt", "id": "7", "name": "alice"}"#).await;
        let credentials = LoginRequest {
            name: "alice".to_string(),
            password: "secret".to_string(),
        };
        let response = gw.login(&credentials).await.unwrap();
        assert_eq!(response.token, "jwt");
        assert_eq!(response.user.id.to_string(), "7");
    }

    #[tokio::test]
    async fn test_signup_conflict_is_request_failed() {
        let gw = serve_once("409 Conflict", "").await;
        let account = SignupRequest::new("alice", "alice@example.com", "secret").unwrap();
        let err = gw.signup(&account).await.unwrap_err();
        assert_eq!(err.operation(), Operation::Signup);
    }

    #[tokio::test]
    async fn test_signup_accepts_empty_body() {
        let gw = serve_once("200 OK", "").await;
        let account = SignupRequest::new("alice", "alice@example.com", "secret").unwrap();
        assert_eq!(gw.signup(&account).await, Ok(()));
    }

    #[tokio::test]
    async fn test_guest_login_requires_credentials() {
        let mut config = ClientConfig::default();
        config.guest = None;
        let gw = HttpGateway::new(config);
        let err = gw.guest_login().await.unwrap_err();
        assert_eq!(err.operation(), Operation::GuestLogin);
    }
}
