//! The visible task list and how each card reads.
//!
//! # Design
//! `TaskListView` is the only client-side copy of the task collection and is
//! replaced wholesale on every render. It remembers whether it was produced
//! with the filter applied so that card actions re-render in the same mode.

use std::fmt;

use crate::types::{Task, TaskId};

/// The two actions every card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit(TaskId),
    Delete(TaskId),
}

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub task: Task,
}

impl TaskCard {
    pub fn importance_label(&self) -> &'static str {
        if self.task.is_important {
            "Important"
        } else {
            "Standard"
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.task.is_completed {
            "Completed"
        } else {
            "In progress"
        }
    }

    pub fn actions(&self) -> [CardAction; 2] {
        [CardAction::Edit(self.task.id), CardAction::Delete(self.task.id)]
    }
}

impl fmt::Display for TaskCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] [{}] {}",
            self.task.id,
            self.importance_label(),
            self.status_label(),
            self.task.name
        )?;
        if !self.task.info.is_empty() {
            write!(f, "\n    {}", self.task.info)?;
        }
        Ok(())
    }
}

/// The list as currently shown, in the order the service returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListView {
    cards: Vec<TaskCard>,
    filtered: bool,
}

impl TaskListView {
    pub fn rebuild(tasks: Vec<Task>, filtered: bool) -> Self {
        Self {
            cards: tasks.into_iter().map(|task| TaskCard { task }).collect(),
            filtered,
        }
    }

    pub fn cards(&self) -> &[TaskCard] {
        &self.cards
    }

    /// Whether the filter was applied when this list was built.
    pub fn filtered(&self) -> bool {
        self.filtered
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.cards.iter().map(|card| &card.task).find(|task| task.id == id)
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.cards.iter().map(|card| card.task.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for TaskListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return write!(f, "(no tasks)");
        }
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
