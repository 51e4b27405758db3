//! Background worker applying click-count increments.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Consumes click events and applies the atomic increment for each.
///
/// Runs until the sending side is dropped. Increment failures are logged and
/// swallowed: a lost count is accepted, a failed redirect is not.
pub async fn run_click_worker<R>(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<R>)
where
    R: LinkRepository + 'static,
{
    while let Some(event) = rx.recv().await {
        if let Err(e) = repository.increment_clicks(event.link_id).await {
            warn!(
                code = %event.short_code,
                link_id = event.link_id,
                "click increment failed: {e}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_worker_applies_increment_per_event() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_clicks()
            .withf(|id| *id == 5)
            .times(3)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        for _ in 0..3 {
            tx.send(ClickEvent::new(5, "abc123")).await.unwrap();
        }
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_increment_failure() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_clicks()
            .times(2)
            .returning(|_| Err(AppError::unavailable("down", json!({}))));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        tx.send(ClickEvent::new(1, "a1")).await.unwrap();
        tx.send(ClickEvent::new(2, "b2")).await.unwrap();
        drop(tx);

        // Both events were consumed despite the failures.
        worker.await.unwrap();
    }
}
