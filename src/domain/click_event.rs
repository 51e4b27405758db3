//! Click event model for asynchronous click counting.

/// A pending click-count increment, passed from the resolver to the
/// background worker via a bounded channel.
///
/// Carries only what the increment needs: the link id, plus the code for log
/// lines. Decoupling the DB write from the redirect path means a slow or
/// failed increment can never delay or fail the redirect itself; a full
/// queue drops the event (accepted loss, never corruption).
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub short_code: String,
}

impl ClickEvent {
    pub fn new(link_id: i64, short_code: impl Into<String>) -> Self {
        Self {
            link_id,
            short_code: short_code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new(42, "my-post");

        assert_eq!(event.link_id, 42);
        assert_eq!(event.short_code, "my-post");
    }

    #[test]
    fn test_click_event_clone() {
        let event = ClickEvent::new(7, "abc123");
        let cloned = event.clone();

        assert_eq!(cloned.link_id, event.link_id);
        assert_eq!(cloned.short_code, event.short_code);
    }
}
