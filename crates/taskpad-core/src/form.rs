use taskpad_shared::{FieldErrorsDto, FormDto, FormModeDto, TaskPatch};
use tracing::{debug, info, warn};

use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::validation::{FieldErrors, FieldName, REQUIRED_MESSAGE, TaskFields};

/// Raw text the user has typed. Independent of any stored task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub duration: String,
}

impl FormFields {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Title => &self.title,
            FieldName::Description => &self.description,
            FieldName::Duration => &self.duration,
        }
    }

    pub fn set(&mut self, field: FieldName, value: String) {
        match field {
            FieldName::Title => self.title = value,
            FieldName::Description => self.description = value,
            FieldName::Duration => self.duration = value,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.duration.is_empty()
    }

    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_string(),
            description: task.description().to_string(),
            duration: task.duration().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(TaskId),
}

impl FormMode {
    pub fn editing_task_id(self) -> Option<TaskId> {
        match self {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, FormMode::Editing(_))
    }

    pub fn heading(self) -> &'static str {
        match self {
            FormMode::Creating => "Add New Task",
            FormMode::Editing(_) => "Edit Task",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            FormMode::Creating => "Add a new task to your list.",
            FormMode::Editing(_) => "Modify the task details below.",
        }
    }
}

impl From<FormMode> for FormModeDto {
    fn from(mode: FormMode) -> Self {
        match mode {
            FormMode::Creating => FormModeDto::Creating,
            FormMode::Editing(id) => FormModeDto::Editing(id.as_uuid()),
        }
    }
}

/// Side effects the renderer is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScrollToForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(TaskId),
    Updated(TaskId),
    /// The edited task vanished before the submit landed; the form was reset
    /// and the store left alone.
    Discarded(TaskId),
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_) | SubmitOutcome::Updated(_))
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    fields: FormFields,
    errors: FieldErrors,
    mode: FormMode,
    required_message: String,
}

impl FormController {
    pub fn new(required_message: impl Into<String>) -> Self {
        Self {
            fields: FormFields::default(),
            errors: FieldErrors::default(),
            mode: FormMode::Creating,
            required_message: required_message.into(),
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn editing_task_id(&self) -> Option<TaskId> {
        self.mode.editing_task_id()
    }

    /// Typing into a field clears that field's stale error and nothing else.
    #[tracing::instrument(skip_all, fields(field = %field))]
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields.set(field, value.into());
        if self.errors.clear(field) {
            debug!("cleared stale field error");
        }
    }

    /// Applies every field present in `patch` as if typed one by one.
    /// Returns `false` when the patch carried nothing.
    pub fn apply_patch(&mut self, patch: TaskPatch) -> bool {
        let edits = [
            (FieldName::Title, patch.title),
            (FieldName::Description, patch.description),
            (FieldName::Duration, patch.duration),
        ];

        let mut touched = false;
        for (field, value) in edits {
            if let Some(value) = value {
                self.set_field(field, value);
                touched = true;
            }
        }
        touched
    }

    /// Switches to editing `task`, even when another task is already being
    /// edited. Unsaved input is replaced by the task's values.
    #[tracing::instrument(skip_all, fields(id = %task.id()))]
    pub fn begin_edit(&mut self, task: &Task) -> Effect {
        if let FormMode::Editing(previous) = self.mode
            && previous != task.id()
        {
            debug!(previous = %previous, "switching edit target");
        }

        self.mode = FormMode::Editing(task.id());
        self.fields = FormFields::from_task(task);
        self.errors.clear_all();
        debug!("edit started");
        Effect::ScrollToForm
    }

    #[tracing::instrument(skip(self))]
    pub fn discard_edit(&mut self) {
        self.reset();
        debug!("form reset to create mode");
    }

    /// Validates every field, then creates or updates through `store`.
    /// A rejected submit keeps the typed values and the edit target.
    #[tracing::instrument(skip_all, fields(mode = ?self.mode))]
    pub fn submit(&mut self, store: &mut TaskStore) -> SubmitOutcome {
        let validated = TaskFields::validate(
            self.fields.title.as_str(),
            self.fields.description.as_str(),
            self.fields.duration.as_str(),
            &self.required_message,
        );

        let fields = match validated {
            Ok(fields) => fields,
            Err(errors) => {
                debug!(failing = ?errors.failing_fields(), "submit rejected");
                self.errors = errors.clone();
                return SubmitOutcome::Rejected(errors);
            }
        };

        let outcome = match self.mode {
            FormMode::Creating => SubmitOutcome::Created(store.create(fields).id()),
            FormMode::Editing(id) => {
                if store.update(id, fields) {
                    SubmitOutcome::Updated(id)
                } else {
                    warn!(id = %id, "edited task no longer exists");
                    SubmitOutcome::Discarded(id)
                }
            }
        };

        self.reset();
        info!(?outcome, "submit committed");
        outcome
    }

    /// Returns to create mode if the task being edited is no longer in
    /// `store`. Returns `true` when that happened.
    pub fn reconcile(&mut self, store: &TaskStore) -> bool {
        match self.mode {
            FormMode::Editing(id) if !store.contains(id) => {
                debug!(id = %id, "edited task deleted; leaving edit mode");
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn to_dto(&self) -> FormDto {
        FormDto {
            mode: self.mode.into(),
            heading: self.mode.heading().to_string(),
            blurb: self.mode.blurb().to_string(),
            title: self.fields.title.clone(),
            description: self.fields.description.clone(),
            duration: self.fields.duration.clone(),
            errors: FieldErrorsDto::from(&self.errors),
        }
    }

    fn reset(&mut self) {
        self.fields = FormFields::default();
        self.errors.clear_all();
        self.mode = FormMode::Creating;
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(REQUIRED_MESSAGE)
    }
}
