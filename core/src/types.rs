//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Field names go over the wire in camelCase (`isImportant`, `isCompleted`).
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned task identifier. The client never invents one.
pub type TaskId = u64;

/// A single task returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_important: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
}

/// Optional fields may arrive as `null`; read that the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request payload for creating a new task: a `Task` without its `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub is_completed: bool,
}

/// Partial patch for an existing task. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl Task {
    /// The editable fields of this task, detached from its id.
    pub fn fields(&self) -> CreateTask {
        CreateTask {
            name: self.name.clone(),
            info: self.info.clone(),
            is_important: self.is_important,
            is_completed: self.is_completed,
        }
    }
}

impl From<CreateTask> for UpdateTask {
    fn from(fields: CreateTask) -> Self {
        Self {
            name: Some(fields.name),
            info: Some(fields.info),
            is_important: Some(fields.is_important),
            is_completed: Some(fields.is_completed),
        }
    }
}
