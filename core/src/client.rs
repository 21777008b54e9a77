//! Task endpoints of the remote API.
//!
//! # Design
//! `TaskClient` knows the four task routes and nothing about how bytes move.
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; the
//! async operations glue the two together through `HttpAgent`. Hosts that
//! want to run the round-trip themselves can call the halves directly.

use tracing::{debug, info};

use crate::error::TransportError;
use crate::http::{
    check_status, decode_or_default, HttpAgent, HttpMethod, HttpRequest, HttpResponse, Transport,
};
use crate::types::{CreateTask, Task, TaskId, UpdateTask};

/// Client for the `/tasks` resource.
#[derive(Debug, Clone)]
pub struct TaskClient<T> {
    agent: HttpAgent<T>,
}

impl<T: Transport> TaskClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            agent: HttpAgent::new(base_url, transport),
        }
    }

    pub fn agent(&self) -> &HttpAgent<T> {
        &self.agent
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        self.agent.request(HttpMethod::Get, "/tasks", None)
    }

    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(input).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(self.agent.request(HttpMethod::Post, "/tasks", Some(body)))
    }

    pub fn build_update_task(
        &self,
        id: TaskId,
        input: &UpdateTask,
    ) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(input).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(self.agent.request(HttpMethod::Patch, &format!("/tasks/{id}"), Some(body)))
    }

    pub fn build_delete_task(&self, id: TaskId) -> HttpRequest {
        self.agent.request(HttpMethod::Delete, &format!("/tasks/{id}"), None)
    }

    /// An unreadable body yields an empty list.
    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, TransportError> {
        check_status(&response)?;
        Ok(decode_or_default(&response.body))
    }

    /// Shared by create and update. An unreadable body yields `None`.
    pub fn parse_task(&self, response: HttpResponse) -> Result<Option<Task>, TransportError> {
        check_status(&response)?;
        Ok(decode_or_default(&response.body))
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), TransportError> {
        check_status(&response)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, TransportError> {
        let response = self.agent.send(self.build_list_tasks()).await?;
        let tasks = self.parse_list_tasks(response)?;
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    pub async fn create_task(&self, input: &CreateTask) -> Result<Option<Task>, TransportError> {
        let response = self.agent.send(self.build_create_task(input)?).await?;
        let task = self.parse_task(response)?;
        info!(id = task.as_ref().map(|t| t.id), name = %input.name, "created task");
        Ok(task)
    }

    pub async fn update_task(
        &self,
        id: TaskId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, TransportError> {
        let response = self.agent.send(self.build_update_task(id, input)?).await?;
        let task = self.parse_task(response)?;
        info!(id, "updated task");
        Ok(task)
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<(), TransportError> {
        let response = self.agent.send(self.build_delete_task(id)).await?;
        self.parse_delete_task(response)?;
        info!(id, "deleted task");
        Ok(())
    }
}
