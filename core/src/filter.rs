//! Narrowing a task list to the filter bar's criteria.

use crate::types::Task;

/// Live state of the filter bar. All rules are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub important_only: bool,
    /// Checked means completed tasks are hidden, not that only completed
    /// tasks are shown.
    pub hide_completed: bool,
    pub name_contains: String,
}

impl FilterCriteria {
    /// The search term as it is compared: trimmed and lowercased. `None` when
    /// nothing is left.
    pub fn search_term(&self) -> Option<String> {
        let term = self.name_contains.trim().to_lowercase();
        (!term.is_empty()).then_some(term)
    }

    fn matches(&self, task: &Task, term: Option<&str>) -> bool {
        if self.important_only && !task.is_important {
            return false;
        }
        if self.hide_completed && task.is_completed {
            return false;
        }
        match term {
            Some(term) => task.name.to_lowercase().contains(term),
            None => true,
        }
    }
}

/// Keep the tasks matching `criteria`, in their original order.
pub fn apply(tasks: Vec<Task>, criteria: &FilterCriteria) -> Vec<Task> {
    let term = criteria.search_term();
    tasks
        .into_iter()
        .filter(|task| criteria.matches(task, term.as_deref()))
        .collect()
}
