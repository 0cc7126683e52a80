use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::str::FromStr;

use anyhow::{
  Context,
  anyhow
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::ids::{
  IdGenerator,
  RandomIds,
  SequentialIds
};
use crate::validation::{
  FILL_ALL_FIELDS_MESSAGE,
  REQUIRED_MESSAGE,
  ValidationPolicy
};

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct Config {
  pub validation:   ValidationConfig,
  pub ids:          IdsConfig,
  pub logging:      LoggingConfig,
  #[serde(skip)]
  pub loaded_files: Vec<PathBuf>
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct ValidationConfig {
  pub policy:               ValidationPolicy,
  pub required_message:     String,
  pub notification_message: String
}

impl Default for ValidationConfig {
  fn default() -> Self {
    Self {
      policy:               ValidationPolicy::Inline,
      required_message:     REQUIRED_MESSAGE
        .to_string(),
      notification_message:
        FILL_ALL_FIELDS_MESSAGE
          .to_string()
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
  #[default]
  Random,
  Sequential
}

impl FromStr for IdStrategy {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "random" | "uuid" => {
        Ok(Self::Random)
      }
      | "sequential" | "counter" => {
        Ok(Self::Sequential)
      }
      | other => Err(anyhow!(
        "unknown id strategy: {other}"
      ))
    }
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct IdsConfig {
  pub strategy: IdStrategy
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct LoggingConfig {
  pub filter: String
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      filter: "info".to_string()
    }
  }
}

impl Config {
  /// Reads `path` as TOML. No path, or a
  /// path that does not exist, yields
  /// the defaults.
  #[tracing::instrument(skip(path))]
  pub fn load(
    path: Option<&Path>
  ) -> anyhow::Result<Self> {
    let Some(path) = path else {
      warn!(
        "no config file given; using \
         defaults"
      );
      return Ok(Self::default());
    };

    if !path.exists() {
      warn!(file = %path.display(), "config file does not exist; using defaults");
      return Ok(Self::default());
    }

    info!(file = %path.display(), "loading config");
    let text = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;

    let mut cfg =
      Self::from_toml_str(&text)
        .with_context(|| {
          format!(
            "failed to parse {}",
            path.display()
          )
        })?;
    cfg
      .loaded_files
      .push(path.to_path_buf());
    Ok(cfg)
  }

  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let cfg: Self = toml::from_str(text)
      .map_err(anyhow::Error::new)?;
    debug!(?cfg, "parsed config");
    Ok(cfg)
  }

  /// Applies dotted `key=value`
  /// overrides on top of whatever was
  /// loaded. Unknown keys are skipped.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = key.trim();
      debug!(key = %key, value = %value, "applying override");
      match key {
        | "validation.policy" => {
          self.validation.policy =
            value.parse()?;
        }
        | "validation.required_message" => {
          self
            .validation
            .required_message = value;
        }
        | "validation.notification_message" => {
          self
            .validation
            .notification_message =
            value;
        }
        | "ids.strategy" => {
          self.ids.strategy =
            value.parse()?;
        }
        | "logging.filter" => {
          self.logging.filter = value;
        }
        | other => {
          warn!(key = %other, "unknown config override; skipping");
        }
      }
    }
    Ok(())
  }

  pub fn id_generator(
    &self
  ) -> Box<dyn IdGenerator> {
    match self.ids.strategy {
      | IdStrategy::Random => {
        Box::new(RandomIds)
      }
      | IdStrategy::Sequential => {
        Box::new(SequentialIds::new())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::{
    Config,
    IdStrategy
  };
  use crate::validation::{
    FILL_ALL_FIELDS_MESSAGE,
    REQUIRED_MESSAGE,
    ValidationPolicy
  };

  #[test]
  fn defaults_match_the_widget() {
    let cfg = Config::default();
    assert_eq!(
      cfg.validation.policy,
      ValidationPolicy::Inline
    );
    assert_eq!(
      cfg.validation.required_message,
      REQUIRED_MESSAGE
    );
    assert_eq!(
      cfg
        .validation
        .notification_message,
      FILL_ALL_FIELDS_MESSAGE
    );
    assert_eq!(
      cfg.ids.strategy,
      IdStrategy::Random
    );
    assert_eq!(cfg.logging.filter, "info");
  }

  #[test]
  fn partial_toml_keeps_other_defaults() {
    let cfg = Config::from_toml_str(
      "[validation]\npolicy = \
       \"notification\"\n"
    )
    .expect("parse config");
    assert_eq!(
      cfg.validation.policy,
      ValidationPolicy::Notification
    );
    assert_eq!(
      cfg.validation.required_message,
      REQUIRED_MESSAGE
    );
    assert_eq!(
      cfg.ids.strategy,
      IdStrategy::Random
    );
  }

  #[test]
  fn bad_enum_value_is_an_error() {
    assert!(
      Config::from_toml_str(
        "[ids]\nstrategy = \"dice\"\n"
      )
      .is_err()
    );
  }

  #[test]
  fn load_reads_file_and_records_it() {
    let mut file =
      tempfile::NamedTempFile::new()
        .expect("tempfile");
    writeln!(
      file,
      "[ids]\nstrategy = \"sequential\"\n\n\
       [logging]\nfilter = \"debug\""
    )
    .expect("write config");

    let cfg =
      Config::load(Some(file.path()))
        .expect("load config");
    assert_eq!(
      cfg.ids.strategy,
      IdStrategy::Sequential
    );
    assert_eq!(
      cfg.logging.filter,
      "debug"
    );
    assert_eq!(
      cfg.loaded_files,
      vec![file.path().to_path_buf()]
    );
  }

  #[test]
  fn missing_file_falls_back_to_defaults()
  {
    let dir =
      tempfile::tempdir().expect("tempdir");
    let path =
      dir.path().join("taskpad.toml");
    let cfg =
      Config::load(Some(path.as_path()))
        .expect("load config");
    assert_eq!(cfg, Config::default());
  }

  #[test]
  fn overrides_apply_and_validate() {
    let mut cfg = Config::default();
    cfg
      .apply_overrides([
        (
          "validation.policy".to_string(),
          "notification".to_string()
        ),
        (
          "validation.required_message"
            .to_string(),
          "Required".to_string()
        ),
        (
          "colour".to_string(),
          "on".to_string()
        )
      ])
      .expect("apply overrides");
    assert_eq!(
      cfg.validation.policy,
      ValidationPolicy::Notification
    );
    assert_eq!(
      cfg.validation.required_message,
      "Required"
    );

    assert!(
      cfg
        .apply_overrides([(
          "ids.strategy".to_string(),
          "dice".to_string()
        )])
        .is_err()
    );
  }
}
