use std::fmt;

use serde::{Deserialize, Serialize};
use taskpad_shared::{TaskDto, TaskIdArg};
use uuid::Uuid;

use crate::validation::TaskFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for TaskId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<TaskIdArg> for TaskId {
    fn from(arg: TaskIdArg) -> Self {
        Self(arg.id)
    }
}

/// A stored task. Only [`crate::store::TaskStore`] builds or mutates these,
/// and only from [`TaskFields`], so every field is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    duration: String,
}

impl Task {
    pub(crate) fn new(id: TaskId, fields: TaskFields) -> Self {
        let (title, description, duration) = fields.into_parts();
        Self {
            id,
            title,
            description,
            duration,
        }
    }

    pub(crate) fn replace_fields(&mut self, fields: TaskFields) {
        let (title, description, duration) = fields.into_parts();
        self.title = title;
        self.description = description;
        self.duration = duration;
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        TaskDto {
            id: task.id.as_uuid(),
            title: task.title.clone(),
            description: task.description.clone(),
            duration: task.duration.clone(),
        }
    }
}
