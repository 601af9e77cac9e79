//! Status line shown under the panels.

use std::time::{Duration, Instant};

/// How long a message stays visible
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(6);

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub shown_at: Instant,
}

/// Last presenter error, shown until it expires or is replaced
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Option<StatusMessage>,
}

impl StatusLine {
    pub fn error(&mut self, text: impl Into<String>) {
        self.current = Some(StatusMessage { text: text.into(), shown_at: Instant::now() });
    }

    /// The message to display at `now`, expiring old ones
    pub fn visible(&mut self, now: Instant) -> Option<&StatusMessage> {
        if self
            .current
            .as_ref()
            .is_some_and(|m| now.duration_since(m.shown_at) >= STATUS_TIMEOUT)
        {
            self.current = None;
        }
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let mut status = StatusLine::default();
        status.error("category 'Food' is still used");

        let shown_at = status.visible(Instant::now()).unwrap().shown_at;
        assert_eq!(status.visible(shown_at).unwrap().text, "category 'Food' is still used");
        assert!(status.visible(shown_at + STATUS_TIMEOUT).is_none());
    }
}
