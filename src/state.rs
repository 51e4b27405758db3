use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    AuthService, BulkImportProcessor, DailyQuota, LinkService, RedirectResolver,
};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::persistence::{PgApiKeyRepository, PgLinkRepository};

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub links: Arc<LinkService<PgLinkRepository>>,
    pub resolver: Arc<RedirectResolver<PgLinkRepository>>,
    pub bulk: Arc<BulkImportProcessor<PgLinkRepository>>,
    pub auth: Arc<AuthService<PgApiKeyRepository>>,
    pub quota: Arc<DailyQuota>,
    pub click_tx: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Wires repositories and services over a shared pool and click channel.
    pub fn new(
        pool: PgPool,
        click_tx: mpsc::Sender<ClickEvent>,
        quota: Arc<DailyQuota>,
        base_url: String,
        token_signing_secret: String,
    ) -> Self {
        let pool_arc = Arc::new(pool.clone());
        let link_repository = Arc::new(PgLinkRepository::new(pool_arc.clone()));
        let api_key_repository = Arc::new(PgApiKeyRepository::new(pool_arc));

        let links = Arc::new(LinkService::new(
            link_repository.clone(),
            quota.clone(),
            base_url.clone(),
        ));
        let resolver = Arc::new(RedirectResolver::new(
            link_repository.clone(),
            click_tx.clone(),
            base_url.clone(),
        ));
        let bulk = Arc::new(BulkImportProcessor::new(
            link_repository,
            quota.clone(),
            base_url,
        ));
        let auth = Arc::new(AuthService::new(api_key_repository, token_signing_secret));

        Self {
            db: pool,
            links,
            resolver,
            bulk,
            auth,
            quota,
            click_tx,
        }
    }
}
