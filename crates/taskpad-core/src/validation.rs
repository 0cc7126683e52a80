use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use taskpad_shared::{FieldErrorsDto, TaskCreate};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const FILL_ALL_FIELDS_MESSAGE: &str = "Please fill in all fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Title,
    Description,
    Duration,
}

impl FieldName {
    pub const ALL: [FieldName; 3] = [FieldName::Title, FieldName::Description, FieldName::Duration];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Description => "description",
            FieldName::Duration => "duration",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rejected submit is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Per-field messages next to each blank input.
    #[default]
    Inline,
    /// One blocking notification with the generic message. Per-field
    /// messages are still recorded on the form; a renderer that wants the
    /// alert alone should not draw `errors` under this policy.
    Notification,
}

impl FromStr for ValidationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "notification" | "modal" => Ok(Self::Notification),
            other => Err(anyhow!("unknown validation policy: {other}")),
        }
    }
}

/// Per-field validation messages; an absent entry means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    title: Option<String>,
    description: Option<String>,
    duration: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: FieldName, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    pub fn clear(&mut self, field: FieldName) -> bool {
        self.slot_mut(field).take().is_some()
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FieldName::ALL.iter().all(|field| self.slot(*field).is_none())
    }

    pub fn failing_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|field| self.slot(*field).is_some())
            .collect()
    }

    fn slot(&self, field: FieldName) -> &Option<String> {
        match field {
            FieldName::Title => &self.title,
            FieldName::Description => &self.description,
            FieldName::Duration => &self.duration,
        }
    }

    fn slot_mut(&mut self, field: FieldName) -> &mut Option<String> {
        match field {
            FieldName::Title => &mut self.title,
            FieldName::Description => &mut self.description,
            FieldName::Duration => &mut self.duration,
        }
    }
}

impl From<&FieldErrors> for FieldErrorsDto {
    fn from(errors: &FieldErrors) -> Self {
        FieldErrorsDto {
            title: errors.title.clone(),
            description: errors.description.clone(),
            duration: errors.duration.clone(),
        }
    }
}

/// Field values that passed the required-field check. This is the only
/// input [`crate::store::TaskStore`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    title: String,
    description: String,
    duration: String,
}

impl TaskFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        duration: impl Into<String>,
    ) -> Result<Self, FieldErrors> {
        Self::validate(title, description, duration, REQUIRED_MESSAGE)
    }

    /// Checks every field independently, so the returned errors name all
    /// blank fields at once. Values are stored as typed; only the check trims.
    pub fn validate(
        title: impl Into<String>,
        description: impl Into<String>,
        duration: impl Into<String>,
        required_message: &str,
    ) -> Result<Self, FieldErrors> {
        let fields = Self {
            title: title.into(),
            description: description.into(),
            duration: duration.into(),
        };

        let mut errors = FieldErrors::default();
        for field in FieldName::ALL {
            if fields.get(field).trim().is_empty() {
                errors.set(field, required_message);
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Title => &self.title,
            FieldName::Description => &self.description,
            FieldName::Duration => &self.duration,
        }
    }

    pub(crate) fn into_parts(self) -> (String, String, String) {
        (self.title, self.description, self.duration)
    }
}

impl TryFrom<TaskCreate> for TaskFields {
    type Error = FieldErrors;

    fn try_from(create: TaskCreate) -> Result<Self, Self::Error> {
        Self::new(create.title, create.description, create.duration)
    }
}

#[cfg(test)]
mod tests {
    use taskpad_shared::TaskCreate;

    use super::{FieldErrors, FieldName, REQUIRED_MESSAGE, TaskFields, ValidationPolicy};

    #[test]
    fn whitespace_only_fields_are_blank() {
        let errors = TaskFields::new("  ", "\t\n", "10 minutes").expect_err("should reject");
        assert_eq!(
            errors.failing_fields(),
            vec![FieldName::Title, FieldName::Description]
        );
        assert_eq!(errors.get(FieldName::Title), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get(FieldName::Duration), None);
    }

    #[test]
    fn all_blank_fields_are_reported_together() {
        let errors = TaskFields::validate("", "", "", "required!").expect_err("should reject");
        assert_eq!(errors.failing_fields(), FieldName::ALL.to_vec());
        assert_eq!(errors.get(FieldName::Duration), Some("required!"));
    }

    #[test]
    fn accepted_values_keep_surrounding_whitespace() {
        let fields = TaskFields::new(" Buy milk ", "2 liters", "10 minutes").expect("valid");
        assert_eq!(fields.get(FieldName::Title), " Buy milk ");
    }

    #[test]
    fn clearing_one_error_leaves_the_others() {
        let mut errors = FieldErrors::default();
        errors.set(FieldName::Title, REQUIRED_MESSAGE);
        errors.set(FieldName::Duration, REQUIRED_MESSAGE);

        assert!(errors.clear(FieldName::Title));
        assert!(!errors.clear(FieldName::Title));
        assert_eq!(errors.failing_fields(), vec![FieldName::Duration]);
    }

    #[test]
    fn task_create_converts_through_validation() {
        let create = TaskCreate {
            title: "Stretch".to_string(),
            description: String::new(),
            duration: "5 minutes".to_string(),
        };
        let errors = TaskFields::try_from(create).expect_err("description is blank");
        assert_eq!(errors.failing_fields(), vec![FieldName::Description]);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!(
            "Notification".parse::<ValidationPolicy>().expect("parse"),
            ValidationPolicy::Notification
        );
        assert_eq!(
            " inline ".parse::<ValidationPolicy>().expect("parse"),
            ValidationPolicy::Inline
        );
        assert!("popup".parse::<ValidationPolicy>().is_err());
    }
}
