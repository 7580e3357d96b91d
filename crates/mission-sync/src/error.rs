//! Error Types
//!
//! One enum per layer. Store and session errors render as the user-facing
//! message shown in the board; gateway errors keep the transport detail for logs.

use std::fmt;

use thiserror::Error;

/// Backend operation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchTasks,
    AddTask,
    UpdateTask,
    DeleteTask,
    CompleteTask,
    Login,
    GuestLogin,
    Signup,
    CurrentUser,
}

impl Operation {
    /// Fixed message for a failed request of this kind
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchTasks => "Failed to fetch tasks",
            Operation::AddTask => "Failed to add task",
            Operation::UpdateTask => "Failed to update task",
            Operation::DeleteTask => "Failed to delete task",
            Operation::CompleteTask => "Failed to change task status",
            Operation::Login => "Failed to log in",
            Operation::GuestLogin => "Failed to log in as guest",
            Operation::Signup => "Failed to sign up",
            Operation::CurrentUser => "Failed to fetch current user",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FetchTasks => "fetch_tasks",
            Operation::AddTask => "add_task",
            Operation::UpdateTask => "update_task",
            Operation::DeleteTask => "delete_task",
            Operation::CompleteTask => "complete_task",
            Operation::Login => "login",
            Operation::GuestLogin => "guest_login",
            Operation::Signup => "signup",
            Operation::CurrentUser => "current_user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single gateway call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Transport failure or non-2xx status
    #[error("{}", .operation.failure_message())]
    RequestFailed { operation: Operation, detail: String },

    /// 2xx response whose body does not match the expected schema
    #[error("Malformed payload for {operation}: {detail}")]
    InvalidPayload { operation: Operation, detail: String },
}

impl GatewayError {
    pub fn request_failed(operation: Operation, detail: impl fmt::Display) -> Self {
        GatewayError::RequestFailed {
            operation,
            detail: detail.to_string(),
        }
    }

    pub fn invalid_payload(operation: Operation, detail: impl fmt::Display) -> Self {
        GatewayError::InvalidPayload {
            operation,
            detail: detail.to_string(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            GatewayError::RequestFailed { operation, .. } => *operation,
            GatewayError::InvalidPayload { operation, .. } => *operation,
        }
    }

    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, GatewayError::InvalidPayload { .. })
    }
}

/// Errors surfaced by the task list store
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("データ形式が正しくありません。Array型を期待しています。")]
    InvalidDataFormat,

    #[error("ミッションの取得に失敗しました。")]
    FetchFailed,

    #[error("ミッションの追加に失敗しました。")]
    AddFailed,

    #[error("ミッションの更新に失敗しました。")]
    UpdateFailed,

    #[error("ミッションの削除に失敗しました。")]
    DeleteFailed,

    #[error("ミッションのステータスの変更に失敗しました。")]
    StatusChangeFailed,

    /// No session token; the caller should send the user to the login page
    #[error("ユーザーはログインしていません。")]
    NavigationRequired,

    #[error("ミッション名を入力してください。")]
    EmptyTitle,
}

/// Errors from login, logout and session restore
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("ログインに失敗しました。")]
    LoginFailed,

    #[error("登録に失敗しました。")]
    SignupFailed,

    #[error("名前、メールアドレス、パスワードを入力してください。")]
    MissingSignupFields,

    #[error("現在のユーザーの取得に失敗しました： [{0}]")]
    LoadUserFailed(String),

    #[error("トークンを保存できませんでした： [{0}]")]
    TokenStorage(String),
}

/// Errors while building a client configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),
}
