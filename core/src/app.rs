//! Application state and the controller that drives it.
//!
//! # Design
//! `AppState` holds every piece of on-screen state: the add form, the
//! filter bar, the edit session and the visible list, plus the last failure
//! notice. A front-end writes user input straight into it and then hands an
//! `Action` to `TaskApp::dispatch`. Each action takes `&mut self`, so actions
//! run one after another and the last render to start is the last to finish.
//!
//! The service stays the only source of truth: every mutation is followed by
//! a full re-fetch, never a local patch of the list.

use tracing::{debug, warn};

use crate::client::TaskClient;
use crate::error::{TaskError, TransportError, ValidationError};
use crate::filter::{self, FilterCriteria};
use crate::http::Transport;
use crate::render::{CardAction, TaskListView};
use crate::session::EditSession;
use crate::types::{CreateTask, TaskId};

/// Everything a user can see or type into.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub add_form: CreateTask,
    pub filter_bar: FilterCriteria,
    pub edit: EditSession,
    pub list: TaskListView,
    /// Failure of the most recent action, cleared by the next success.
    pub notice: Option<TaskError>,
}

impl AppState {
    /// The creation payload from the add form, with name and info trimmed.
    pub fn add_payload(&self) -> Result<CreateTask, ValidationError> {
        let name = self.add_form.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankName);
        }
        Ok(CreateTask {
            name: name.to_string(),
            info: self.add_form.info.trim().to_string(),
            is_important: self.add_form.is_important,
            is_completed: self.add_form.is_completed,
        })
    }
}

/// A user intent bound to a button in the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Re-fetch and show the full, unfiltered list.
    Refresh,
    ApplyFilter,
    Add,
    Edit(TaskId),
    Save,
    Cancel,
    Delete(TaskId),
}

impl From<CardAction> for Action {
    fn from(action: CardAction) -> Self {
        match action {
            CardAction::Edit(id) => Action::Edit(id),
            CardAction::Delete(id) => Action::Delete(id),
        }
    }
}

/// Input controller and render cycle over one `TaskClient`.
pub struct TaskApp<T> {
    client: TaskClient<T>,
    state: AppState,
}

impl<T: Transport> TaskApp<T> {
    pub fn new(client: TaskClient<T>) -> Self {
        Self {
            client,
            state: AppState::default(),
        }
    }

    pub fn client(&self) -> &TaskClient<T> {
        &self.client
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Run `action` and record its outcome in the notice slot. The error is
    /// also returned so callers can react to it.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), TaskError> {
        debug!(?action, "dispatching");
        let result = match action {
            Action::Refresh => self.render(false).await.map_err(TaskError::from),
            Action::ApplyFilter => self.render(true).await.map_err(TaskError::from),
            Action::Add => self.add().await,
            Action::Edit(id) => {
                self.edit(id);
                Ok(())
            }
            Action::Save => self.save().await,
            Action::Cancel => {
                self.state.edit.close();
                Ok(())
            }
            Action::Delete(id) => self.delete(id).await,
        };
        match &result {
            Ok(()) => self.state.notice = None,
            Err(err) => {
                warn!(?action, error = %err, "action failed");
                self.state.notice = Some(err.clone());
            }
        }
        result
    }

    /// Fetch the full list, narrow it through the filter bar when asked, and
    /// replace the visible list. A failed fetch leaves the old list in place.
    pub async fn render(&mut self, apply_filter: bool) -> Result<(), TransportError> {
        let tasks = self.client.list_tasks().await?;
        let tasks = if apply_filter {
            filter::apply(tasks, &self.state.filter_bar)
        } else {
            tasks
        };
        debug!(shown = tasks.len(), apply_filter, "rendering task list");
        self.state.list = TaskListView::rebuild(tasks, apply_filter);
        Ok(())
    }

    async fn add(&mut self) -> Result<(), TaskError> {
        let payload = self.state.add_payload()?;
        self.client.create_task(&payload).await?;
        self.state.add_form = CreateTask::default();
        self.render(false).await?;
        Ok(())
    }

    fn edit(&mut self, id: TaskId) {
        match self.state.list.find(id).cloned() {
            Some(task) => self.state.edit.begin(&task),
            None => warn!(id, "edit requested for a task that is not shown"),
        }
    }

    async fn save(&mut self) -> Result<(), TaskError> {
        let Some((id, patch)) = self.state.edit.pending_update()? else {
            debug!("save with no open edit session");
            return Ok(());
        };
        self.client.update_task(id, &patch).await?;
        self.state.edit.close();
        self.render(false).await?;
        Ok(())
    }

    async fn delete(&mut self, id: TaskId) -> Result<(), TaskError> {
        let apply_filter = self.state.list.filtered();
        self.client.delete_task(id).await?;
        self.render(apply_filter).await?;
        Ok(())
    }
}
