use taskpad_shared::NotificationDto;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Holds at most one notification. Raising replaces whatever is shown;
/// there is no queue.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn raise(&mut self, message: impl Into<String>) -> Option<Notification> {
        let next = Notification::new(message);
        debug!(message = %next.message, replacing = self.current.is_some(), "raising notification");
        self.current.replace(next)
    }

    pub fn acknowledge(&mut self) -> Option<Notification> {
        let cleared = self.current.take();
        if cleared.is_some() {
            debug!("notification acknowledged");
        }
        cleared
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn to_dto(&self) -> Option<NotificationDto> {
        self.current.as_ref().map(|notification| NotificationDto {
            message: notification.message.clone(),
        })
    }
}
