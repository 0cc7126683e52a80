pub mod config;
pub mod events;
pub mod form;
pub mod ids;
pub mod logging;
pub mod notification;
pub mod session;
pub mod signals;
pub mod store;
pub mod task;
pub mod validation;

use std::path::Path;

use anyhow::Context;
use tracing::{
  debug,
  info
};

pub use crate::config::Config;
pub use crate::events::Change;
pub use crate::form::{
  Effect,
  FormController,
  FormMode,
  SubmitOutcome
};
pub use crate::session::Session;
pub use crate::signals::{
  ViewSignals,
  ViewportSample
};
pub use crate::store::TaskStore;
pub use crate::task::{
  Task,
  TaskId
};
pub use crate::validation::FieldName;

/// Loads configuration, installs
/// logging, and hands back a fresh
/// session for the renderer to drive.
#[tracing::instrument(skip_all)]
pub fn bootstrap<I>(
  config_path: Option<&Path>,
  overrides: I
) -> anyhow::Result<Session>
where
  I: IntoIterator<
    Item = (String, String)
  >
{
  let mut cfg = Config::load(
    config_path
  )
  .context(
    "failed to load taskpad config"
  )?;
  cfg.apply_overrides(overrides)?;

  logging::init_tracing(
    &cfg.logging.filter
  )?;

  debug!(loaded = ?cfg.loaded_files, "config resolved");
  info!(
    policy = ?cfg.validation.policy,
    ids = ?cfg.ids.strategy,
    "starting taskpad session"
  );

  Ok(Session::new(&cfg))
}
