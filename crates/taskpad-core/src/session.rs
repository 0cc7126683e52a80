use anyhow::Context;
use taskpad_shared::{SessionSnapshot, TaskPatch};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::events::{Change, SubscriptionId, Subscribers};
use crate::form::{Effect, FormController, SubmitOutcome};
use crate::ids::IdGenerator;
use crate::notification::{Notification, NotificationSlot};
use crate::signals::{ViewSignals, ViewportSample};
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::validation::{FieldName, ValidationPolicy};

/// Everything the rendering side reads, plus the gestures it may invoke.
///
/// Each gesture runs to completion, restores the edit-target invariant, and
/// then tells subscribers what changed. Listeners receive each [`Change`]
/// together with a [`SessionSnapshot`] taken after that point, so a renderer
/// can redraw from the callback without borrowing the session again.
#[derive(Debug)]
pub struct Session {
    store: TaskStore,
    form: FormController,
    notification: NotificationSlot,
    viewport: Option<ViewportSample>,
    policy: ValidationPolicy,
    notification_message: String,
    subscribers: Subscribers,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self::with_id_generator(config, config.id_generator())
    }

    pub fn with_id_generator(config: &Config, ids: Box<dyn IdGenerator>) -> Self {
        debug!(policy = ?config.validation.policy, "starting session");
        Self {
            store: TaskStore::new(ids),
            form: FormController::new(config.validation.required_message.clone()),
            notification: NotificationSlot::default(),
            viewport: None,
            policy: config.validation.policy,
            notification_message: config.validation.notification_message.clone(),
            subscribers: Subscribers::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.list()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.current()
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn signals(&self) -> ViewSignals {
        ViewSignals::derive(&self.store, &self.notification, self.viewport.as_ref())
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change, &SessionSnapshot) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.form.set_field(field, value);
        self.finish(vec![Change::FormChanged]);
    }

    /// Applies a batch of field edits. An empty patch publishes nothing.
    pub fn patch_form(&mut self, patch: TaskPatch) {
        if self.form.apply_patch(patch) {
            self.finish(vec![Change::FormChanged]);
        }
    }

    /// Starts editing `id`. Returns the scroll request for the renderer, or
    /// `None` when no such task exists.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn begin_edit(&mut self, id: TaskId) -> Option<Effect> {
        let Some(task) = self.store.get(id) else {
            warn!("edit requested for unknown task");
            return None;
        };

        let effect = self.form.begin_edit(task);
        self.finish(vec![Change::EditStarted(id), Change::FormChanged]);
        Some(effect)
    }

    pub fn discard_edit(&mut self) {
        let was_editing = self.form.mode().is_editing();
        self.form.discard_edit();

        let mut changes = vec![Change::FormChanged];
        if was_editing {
            changes.push(Change::EditEnded);
        }
        self.finish(changes);
    }

    #[tracing::instrument(skip(self))]
    pub fn submit(&mut self) -> SubmitOutcome {
        let was_editing = self.form.mode().is_editing();
        let outcome = self.form.submit(&mut self.store);

        let mut changes = Vec::new();
        match &outcome {
            SubmitOutcome::Created(id) => changes.push(Change::TaskCreated(*id)),
            SubmitOutcome::Updated(id) => changes.push(Change::TaskUpdated(*id)),
            SubmitOutcome::Discarded(_) => {}
            SubmitOutcome::Rejected(_) => {
                changes.push(Change::SubmitRejected);
                if self.policy == ValidationPolicy::Notification {
                    self.notification.raise(self.notification_message.clone());
                    changes.push(Change::NotificationRaised);
                }
            }
        }
        changes.push(Change::FormChanged);
        if was_editing && !self.form.mode().is_editing() {
            changes.push(Change::EditEnded);
        }

        self.finish(changes);
        outcome
    }

    /// Removes `id`. If it was the task being edited, the form drops back to
    /// create mode before anyone is notified.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn delete_task(&mut self, id: TaskId) {
        if self.store.delete(id).is_none() {
            return;
        }
        self.finish(vec![Change::TaskDeleted(id)]);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification.raise(message);
        self.finish(vec![Change::NotificationRaised]);
    }

    pub fn acknowledge_notification(&mut self) {
        if self.notification.acknowledge().is_some() {
            self.finish(vec![Change::NotificationCleared]);
        }
    }

    pub fn mount(&mut self, sample: ViewportSample) {
        info!(
            scroll_height = sample.scroll_height,
            viewport_height = sample.viewport_height,
            "session mounted"
        );
        self.on_scroll(sample);
    }

    pub fn on_scroll(&mut self, sample: ViewportSample) {
        if self.viewport == Some(sample) {
            return;
        }
        self.viewport = Some(sample);
        self.finish(vec![Change::ViewportChanged]);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let signals = self.signals();
        SessionSnapshot {
            tasks: self.store.to_dtos(),
            form: self.form.to_dto(),
            signals: signals.into(),
            notification: self.notification.to_dto(),
            empty_message: signals.empty_message().map(str::to_string),
        }
    }

    pub fn snapshot_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(&self.snapshot()).context("failed to serialize session snapshot")
    }

    fn finish(&mut self, mut changes: Vec<Change>) {
        if self.form.reconcile(&self.store) {
            changes.push(Change::FormChanged);
            changes.push(Change::EditEnded);
        }
        if self.subscribers.is_empty() {
            return;
        }
        let state = self.snapshot();
        self.subscribers.publish(&changes, &state);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
