use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:          Uuid,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub duration:    String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskCreate {
  pub title:       String,
  pub description: String,
  pub duration:    String
}

/// Field edits sent by the renderer.
/// `None` leaves a field as typed.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskPatch {
  #[serde(default)]
  pub title:       Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub duration:    Option<String>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskIdArg {
  pub id: Uuid
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(
  tag = "mode",
  content = "task_id",
  rename_all = "lowercase"
)]
pub enum FormModeDto {
  Creating,
  Editing(Uuid)
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
  Eq,
)]
pub struct FieldErrorsDto {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub duration:    Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct FormDto {
  pub mode:        FormModeDto,
  pub heading:     String,
  pub blurb:       String,
  pub title:       String,
  pub description: String,
  pub duration:    String,
  #[serde(default)]
  pub errors:      FieldErrorsDto
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct NotificationDto {
  pub message: String
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
  Eq,
)]
pub struct SignalsDto {
  pub is_empty:               bool,
  pub show_scroll_affordance: bool,
  pub show_notification:      bool
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct SessionSnapshot {
  pub tasks:         Vec<TaskDto>,
  pub form:          FormDto,
  pub signals:       SignalsDto,
  pub notification:  Option<NotificationDto>,
  pub empty_message: Option<String>
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::{
    FormModeDto,
    TaskCreate,
    TaskIdArg,
    TaskPatch
  };

  #[test]
  fn form_mode_serializes_with_tag() {
    let creating = serde_json::to_value(
      FormModeDto::Creating
    )
    .expect("serialize creating");
    assert_eq!(
      creating,
      serde_json::json!({ "mode": "creating" })
    );

    let id = Uuid::nil();
    let editing = serde_json::to_value(
      FormModeDto::Editing(id)
    )
    .expect("serialize editing");
    assert_eq!(
      editing["mode"],
      serde_json::json!("editing")
    );
    assert_eq!(
      editing["task_id"],
      serde_json::json!(id.to_string())
    );
  }

  #[test]
  fn task_create_reads_plain_object() {
    let create: TaskCreate =
      serde_json::from_str(
        r#"{"title":"Buy milk","description":"2 liters","duration":"10 minutes"}"#
      )
      .expect("decode create");
    assert_eq!(create.title, "Buy milk");
    assert_eq!(
      create.duration,
      "10 minutes"
    );
  }

  #[test]
  fn task_patch_fields_are_optional() {
    let patch: TaskPatch =
      serde_json::from_str(
        r#"{"title":"Buy oat milk"}"#
      )
      .expect("decode patch");
    assert_eq!(
      patch.title.as_deref(),
      Some("Buy oat milk")
    );
    assert!(patch.description.is_none());
    assert!(patch.duration.is_none());
  }

  #[test]
  fn task_id_arg_carries_a_uuid() {
    let id = Uuid::from_u128(42);
    let arg: TaskIdArg =
      serde_json::from_value(
        serde_json::json!({ "id": id })
      )
      .expect("decode id arg");
    assert_eq!(arg.id, id);
  }
}
