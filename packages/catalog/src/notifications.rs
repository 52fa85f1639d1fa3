//! Transient user-facing notices ("toasts").

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
}

/// Queue of notices waiting to be shown.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error | NoticeLevel::Warning => tracing::warn!("{}", message),
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!("{}", message),
        }
        self.entries.push(Notification {
            level,
            message: message.to_string(),
        });
    }

    /// Hand all pending notices to the caller.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_order_and_empties() {
        let mut notifications = Notifications::default();
        notifications.push(NoticeLevel::Error, "Failed to fetch product details");
        notifications.push(NoticeLevel::Warning, "Showing cached data.");

        let drained = notifications.drain();
        let levels: Vec<NoticeLevel> = drained.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Error, NoticeLevel::Warning]);
        assert!(notifications.drain().is_empty());
    }
}
