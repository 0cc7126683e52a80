use std::fmt;

use taskpad_shared::SessionSnapshot;
use tracing::trace;

use crate::task::TaskId;

/// What changed after a session operation. Delivered in mutation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    TaskCreated(TaskId),
    TaskUpdated(TaskId),
    TaskDeleted(TaskId),
    FormChanged,
    EditStarted(TaskId),
    EditEnded,
    SubmitRejected,
    NotificationRaised,
    NotificationCleared,
    ViewportChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listeners get the change plus the state as it stood once the whole
/// operation finished, so they never need to reach back into the session.
type Listener = Box<dyn FnMut(&Change, &SessionSnapshot)>;

#[derive(Default)]
pub struct Subscribers {
    next: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change, &SessionSnapshot) + 'static,
    {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, changes: &[Change], state: &SessionSnapshot) {
        for change in changes {
            trace!(?change, listeners = self.listeners.len(), "publishing change");
            for (_, listener) in &mut self.listeners {
                listener(change, state);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .finish()
    }
}
