//! Mission Sync
//!
//! Client-side core of the mission board:
//! - domain: task and user records, validated on decode
//! - gateway: REST calls (trait + `reqwest` implementation)
//! - store: the ordered in-memory mission list with subscriptions
//! - reorder: drag-end to list move
//! - session: login state and token persistence
//! - config: backend location and endpoint paths

pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod reorder;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::{ClientConfig, Endpoints};
pub use domain::{Entity, LoginRequest, LoginResponse, NewTask, SignupRequest, TaskId, TaskRecord, User, UserId};
pub use error::{ConfigError, GatewayError, Operation, SessionError, StoreError};
pub use gateway::{AuthGateway, GatewayResult, HttpGateway, TaskGateway};
pub use reorder::{apply_drag_end, array_move, DragEnd};
pub use session::{stored_token, MemoryTokenStorage, Session, TokenStorage};
pub use store::{StoreSnapshot, SubscriptionId, TaskFilter, TaskListStore};
