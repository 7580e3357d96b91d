//! Domain Layer
//!
//! Records exchanged with the backend, validated at the network boundary.

mod entity;
mod task;
mod user;

pub use entity::Entity;
pub use task::{NewTask, TaskId, TaskRecord};
pub use user::{LoginRequest, LoginResponse, SignupRequest, User, UserId};
