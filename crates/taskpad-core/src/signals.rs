use taskpad_shared::SignalsDto;

use crate::notification::NotificationSlot;
use crate::store::TaskStore;

pub const EMPTY_STATE_MESSAGE: &str =
  "No tasks yet. Add some tasks to get \
   started!";

/// One reading of the document's scroll
/// geometry, taken on mount and on every
/// scroll event.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
)]
pub struct ViewportSample {
  pub scroll_height:   f64,
  pub viewport_height: f64,
  pub scroll_offset:   f64
}

impl ViewportSample {
  pub fn new(
    scroll_height: f64,
    viewport_height: f64,
    scroll_offset: f64
  ) -> Self {
    Self {
      scroll_height,
      viewport_height,
      scroll_offset
    }
  }

  pub fn is_scrollable(&self) -> bool {
    self.scroll_height
      > self.viewport_height
  }

  pub fn shows_scroll_affordance(
    &self
  ) -> bool {
    self.is_scrollable()
      && self.scroll_offset > 0.0
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct ViewSignals {
  pub is_empty:               bool,
  pub show_scroll_affordance: bool,
  pub show_notification:      bool
}

impl ViewSignals {
  /// Pure derivation; no viewport
  /// sample yet means no scroll
  /// affordance.
  pub fn derive(
    store: &TaskStore,
    notification: &NotificationSlot,
    viewport: Option<&ViewportSample>
  ) -> Self {
    Self {
      is_empty:               store
        .is_empty(),
      show_scroll_affordance: viewport
        .is_some_and(|sample| {
          sample
            .shows_scroll_affordance()
        }),
      show_notification:      notification
        .is_visible()
    }
  }

  pub fn empty_message(
    &self
  ) -> Option<&'static str> {
    self
      .is_empty
      .then_some(EMPTY_STATE_MESSAGE)
  }
}

impl From<ViewSignals> for SignalsDto {
  fn from(signals: ViewSignals) -> Self {
    SignalsDto {
      is_empty:               signals
        .is_empty,
      show_scroll_affordance: signals
        .show_scroll_affordance,
      show_notification:      signals
        .show_notification
    }
  }
}
