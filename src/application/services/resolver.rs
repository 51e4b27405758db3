//! Short-code resolution: lookup, lazy QR repair, decoupled click counting.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::qr::qr_data_url;

/// Seconds a consumer-facing redirect page counts down before navigating.
/// Served as data; `GET /{code}` itself redirects immediately.
pub const COUNTDOWN_SECONDS: u8 = 5;

/// The result of resolving a short code: the destination plus the display
/// metadata a redirect page needs.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    /// Click count as read; the increment for this resolution lands later.
    pub click_count: i64,
    pub qr_code: Option<String>,
}

/// Resolves short codes against the store.
///
/// The click increment is enqueued with `try_send` and applied by the
/// background worker: a slow or failed increment never delays or fails the
/// redirect, and a full queue drops the event. The QR backfill is a
/// read-then-best-effort-repair: the image is synthesized inline, the store
/// write happens in a spawned task, and failures of either are logged only.
pub struct RedirectResolver<R: LinkRepository> {
    repository: Arc<R>,
    click_tx: mpsc::Sender<ClickEvent>,
    base_url: String,
}

impl<R: LinkRepository + 'static> RedirectResolver<R> {
    pub fn new(repository: Arc<R>, click_tx: mpsc::Sender<ClickEvent>, base_url: String) -> Self {
        Self {
            repository,
            click_tx,
            base_url,
        }
    }

    /// Resolves a short code to its destination and display metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes; nothing is mutated
    /// and no click event is enqueued in that case.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "This short link could not be found",
                    json!({ "code": code }),
                )
            })?;

        let short_url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            link.short_code
        );

        let qr_code = match link.metadata.qr_code {
            Some(qr) => Some(qr),
            None => self.backfill_qr(link.id, &short_url),
        };

        let _ = self
            .click_tx
            .try_send(ClickEvent::new(link.id, link.short_code.clone()));

        Ok(Resolution {
            id: link.id,
            short_code: link.short_code,
            original_url: link.original_url,
            short_url,
            click_count: link.click_count,
            qr_code,
        })
    }

    /// Synthesizes the missing QR image and repairs the record off the
    /// response path. Returns the fresh image even when the write-back loses.
    fn backfill_qr(&self, link_id: i64, short_url: &str) -> Option<String> {
        let qr = match qr_data_url(short_url) {
            Ok(qr) => qr,
            Err(e) => {
                warn!(link_id, "QR synthesis failed: {e}");
                return None;
            }
        };

        let repository = self.repository.clone();
        let stored = qr.clone();
        tokio::spawn(async move {
            if let Err(e) = repository.set_qr_code(link_id, &stored).await {
                warn!(link_id, "QR backfill write failed: {e}");
            }
        });

        Some(qr)
    }
}
