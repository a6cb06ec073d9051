//! Ordered task queue with an identity-tracked current pointer.
//!
//! The current task is tracked by [`TaskId`] rather than by position, so
//! deletes and reorders elsewhere in the list never move the pointer onto a
//! different task. The numeric index is derived on demand.

use super::task::{validate_duration, validate_label, Task, TaskId};
use crate::error::InputError;

/// Outcome of `move_next`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The pointer moved to another task
    Moved,
    /// Already at the last task (or the queue is empty); the task manager should open
    AtEnd,
    /// Nothing to do
    Unchanged,
}

/// A task removed from the queue together with where the pointer landed
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub task: Task,
    pub was_current: bool,
    /// The current task after the removal (None when the queue is now empty)
    pub next: Option<TaskId>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    current: Option<TaskId>,
}

impl TaskQueue {
    /// Build a queue whose current task is the first one
    pub fn new(tasks: Vec<Task>) -> Self {
        let current = tasks.first().map(|t| t.id);
        Self { tasks, current }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn current_id(&self) -> Option<TaskId> {
        self.current
    }

    pub fn current(&self) -> Option<&Task> {
        let id = self.current?;
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Position of the current task; 0 when the queue is empty
    pub fn current_index(&self) -> usize {
        self.current
            .and_then(|id| self.position(id))
            .unwrap_or(0)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn can_move_prev(&self) -> bool {
        !self.is_empty() && self.current_index() > 0
    }

    pub fn can_move_next(&self) -> bool {
        !self.is_empty() && self.current_index() + 1 < self.len()
    }

    /// Sum of every queued task's nominal duration
    pub fn total_queued_secs(&self) -> u64 {
        self.tasks.iter().map(|t| t.duration_secs as u64).sum()
    }

    /// Append a new task. The pointer only moves when the queue was empty.
    pub fn add(&mut self, label: &str, duration_secs: u32) -> Result<TaskId, InputError> {
        let task = Task::new(label, duration_secs)?;
        let id = task.id;
        self.push(task);
        Ok(id)
    }

    /// Append an already-built task
    pub fn push(&mut self, task: Task) {
        if self.current.is_none() {
            self.current = Some(task.id);
        }
        self.tasks.push(task);
    }

    /// Remove the task at `index`.
    ///
    /// Removing the current task moves the pointer to the task now at
    /// `min(index, len - 1)`, or clears it when nothing remains.
    pub fn delete(&mut self, index: usize) -> Result<Removal, InputError> {
        self.check_index(index)?;
        let task = self.tasks.remove(index);
        let was_current = self.current == Some(task.id);

        if was_current {
            self.current = if self.tasks.is_empty() {
                None
            } else {
                let next_index = index.min(self.tasks.len() - 1);
                Some(self.tasks[next_index].id)
            };
        }

        Ok(Removal {
            task,
            was_current,
            next: self.current,
        })
    }

    /// Consume the current task after it ran to zero
    pub fn complete_current(&mut self) -> Result<Removal, InputError> {
        let id = self.current.ok_or(InputError::EmptyQueue)?;
        let index = self.position(id).ok_or(InputError::EmptyQueue)?;
        self.delete(index)
    }

    /// Move the task at `from` so it ends up at `to` (clamped to the last slot)
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), InputError> {
        self.check_index(from)?;
        let to = to.min(self.tasks.len() - 1);
        if from == to {
            return Ok(());
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(())
    }

    /// Rename the current task in place
    pub fn edit_current_label(&mut self, label: &str) -> Result<(), InputError> {
        let label = validate_label(label)?;
        let id = self.current.ok_or(InputError::EmptyQueue)?;
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(InputError::EmptyQueue)?;
        task.label = label;
        Ok(())
    }

    /// Change the label and duration of any task in place
    pub fn edit(&mut self, index: usize, label: &str, duration_secs: u32) -> Result<(), InputError> {
        self.check_index(index)?;
        let label = validate_label(label)?;
        validate_duration(duration_secs)?;
        let task = &mut self.tasks[index];
        task.label = label;
        task.duration_secs = duration_secs;
        Ok(())
    }

    /// Step back one task; returns whether the pointer moved
    pub fn move_prev(&mut self) -> bool {
        if !self.can_move_prev() {
            return false;
        }
        let index = self.current_index() - 1;
        self.current = Some(self.tasks[index].id);
        true
    }

    /// Step forward one task
    pub fn move_next(&mut self) -> Navigation {
        if self.can_move_next() {
            let index = self.current_index() + 1;
            self.current = Some(self.tasks[index].id);
            Navigation::Moved
        } else {
            Navigation::AtEnd
        }
    }

    /// Point at the task at `index`
    pub fn select(&mut self, index: usize) -> Result<Navigation, InputError> {
        self.check_index(index)?;
        let id = self.tasks[index].id;
        if self.current == Some(id) {
            return Ok(Navigation::Unchanged);
        }
        self.current = Some(id);
        Ok(Navigation::Moved)
    }

    fn check_index(&self, index: usize) -> Result<(), InputError> {
        if index >= self.tasks.len() {
            return Err(InputError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }
}
