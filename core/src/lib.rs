//! Client core for the task service.
//!
//! # Overview
//! Everything between a user's click and the task list they see, minus the
//! actual socket I/O. The host supplies a `Transport`; the core builds
//! requests, interprets responses, filters, renders and tracks the edit
//! session.
//!
//! # Design
//! - `TaskClient` knows the four `/tasks` endpoints and delegates the
//!   round-trip to `HttpAgent`, which owns the base URL and the transport.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `TaskApp` owns all UI state and serializes actions through `&mut self`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod render;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

pub use app::{Action, AppState, TaskApp};
pub use client::TaskClient;
pub use error::{TaskError, TransportError, ValidationError};
pub use filter::FilterCriteria;
pub use http::{HttpAgent, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use render::{CardAction, TaskCard, TaskListView};
pub use session::EditSession;
pub use types::{CreateTask, Task, TaskId, UpdateTask};
