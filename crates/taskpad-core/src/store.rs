use std::collections::HashSet;
use std::fmt;

use taskpad_shared::TaskDto;
use tracing::{debug, info, warn};

use crate::ids::{IdGenerator, RandomIds};
use crate::task::{Task, TaskId};
use crate::validation::TaskFields;

/// The ordered task collection. Insertion order is the only order; nothing
/// here ever sorts.
pub struct TaskStore {
    tasks: Vec<Task>,
    // Every id handed out, deleted tasks included. Ids are never reissued.
    issued: HashSet<TaskId>,
    ids: Box<dyn IdGenerator>,
}

impl TaskStore {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            tasks: Vec::new(),
            issued: HashSet::new(),
            ids,
        }
    }

    #[tracing::instrument(skip(self, fields))]
    pub fn create(&mut self, fields: TaskFields) -> Task {
        let mut id = self.ids.next_id();
        while !self.issued.insert(id) {
            warn!(id = %id, "id generator repeated an id; drawing a random one");
            id = TaskId::random();
        }

        let task = Task::new(id, fields);
        self.tasks.push(task.clone());
        info!(id = %id, count = self.tasks.len(), "created task");
        task
    }

    /// Replaces the fields of `id` in place. Returns `false` (and changes
    /// nothing) when no such task exists.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn update(&mut self, id: TaskId, fields: TaskFields) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            warn!("update for unknown task ignored");
            return false;
        };

        task.replace_fields(fields);
        info!("updated task");
        true
    }

    /// Removes `id`, returning the removed task. Deleting an absent id is a
    /// no-op, so repeated deletes are harmless.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let Some(idx) = self.tasks.iter().position(|task| task.id() == id) else {
            debug!("delete for absent task ignored");
            return None;
        };

        let removed = self.tasks.remove(idx);
        info!(count = self.tasks.len(), "deleted task");
        Some(removed)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn to_dtos(&self) -> Vec<TaskDto> {
        self.tasks.iter().map(TaskDto::from).collect()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(Box::new(RandomIds))
    }
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("issued", &self.issued.len())
            .finish_non_exhaustive()
    }
}
