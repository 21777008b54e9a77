//! Single-slot edit session behind the edit surface.
//!
//! `Idle` until a card's edit action fires, then `Editing` with the task's
//! fields staged for change. Save and cancel both return to `Idle`; the edit
//! surface is shown exactly while the session is `Editing`.

use tracing::debug;

use crate::error::ValidationError;
use crate::types::{CreateTask, Task, TaskId, UpdateTask};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: TaskId, staged: CreateTask },
}

impl EditSession {
    /// Open a session seeded from `task`. An unsaved prior session is
    /// dropped without asking.
    pub fn begin(&mut self, task: &Task) {
        if let EditSession::Editing { id, .. } = self {
            debug!(discarded = *id, "replacing open edit session");
        }
        *self = EditSession::Editing {
            id: task.id,
            staged: task.fields(),
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        match self {
            EditSession::Editing { id, .. } => Some(*id),
            EditSession::Idle => None,
        }
    }

    pub fn staged(&self) -> Option<&CreateTask> {
        match self {
            EditSession::Editing { staged, .. } => Some(staged),
            EditSession::Idle => None,
        }
    }

    pub fn staged_mut(&mut self) -> Option<&mut CreateTask> {
        match self {
            EditSession::Editing { staged, .. } => Some(staged),
            EditSession::Idle => None,
        }
    }

    /// The update to send on save, or `None` when idle. The staged name must
    /// not be blank; the session is left untouched either way.
    pub fn pending_update(&self) -> Result<Option<(TaskId, UpdateTask)>, ValidationError> {
        match self {
            EditSession::Idle => Ok(None),
            EditSession::Editing { staged, .. } if staged.name.trim().is_empty() => {
                Err(ValidationError::BlankName)
            }
            EditSession::Editing { id, staged } => {
                Ok(Some((*id, UpdateTask::from(staged.clone()))))
            }
        }
    }

    /// Back to `Idle`, discarding anything staged.
    pub fn close(&mut self) {
        *self = EditSession::Idle;
    }
}
