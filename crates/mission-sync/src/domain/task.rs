//! Task Record
//!
//! A single mission as the backend returns it. Required fields are enforced on
//! decode; the optional metadata is carried through untouched.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Server-assigned task identifier
pub type TaskId = u32;

/// A mission record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskRecord")]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,

    // Metadata below is not interpreted by the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,
}

/// Wire shape before validation
#[derive(Deserialize)]
struct RawTaskRecord {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    user_id: Option<i32>,
    #[serde(default)]
    game_id: Option<i32>,
    #[serde(default)]
    status: Option<i32>,
    #[serde(default)]
    priority: Option<i32>,
    #[serde(default)]
    difficulty: Option<i32>,
    #[serde(default)]
    deadline: Option<NaiveDateTime>,
    #[serde(default)]
    created_at: Option<NaiveDateTime>,
    #[serde(default)]
    updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    deleted_at: Option<NaiveDateTime>,
}

impl TryFrom<RawTaskRecord> for TaskRecord {
    type Error = String;

    fn try_from(raw: RawTaskRecord) -> Result<Self, Self::Error> {
        if raw.title.trim().is_empty() {
            return Err(format!("task {} has an empty title", raw.id));
        }
        Ok(Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            is_completed: raw.is_completed,
            user_id: raw.user_id,
            game_id: raw.game_id,
            status: raw.status,
            priority: raw.priority,
            difficulty: raw.difficulty,
            deadline: raw.deadline,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            deleted_at: raw.deleted_at,
        })
    }
}

impl TaskRecord {
    /// Create a record with no metadata
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_completed: false,
            user_id: None,
            game_id: None,
            status: None,
            priority: None,
            difficulty: None,
            deadline: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Copy of this record with new title and description
    pub fn edited(&self, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..self.clone()
        }
    }
}

impl Entity for TaskRecord {
    type Id = TaskId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Body of the create call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

impl NewTask {
    /// Returns `None` when the title is blank
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Option<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return None;
        }
        Some(Self {
            title,
            description: description.into(),
        })
    }
}
