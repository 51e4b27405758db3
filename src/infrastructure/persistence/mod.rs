mod pg_api_key_repository;
mod pg_link_repository;

pub use pg_api_key_repository::PgApiKeyRepository;
pub use pg_link_repository::PgLinkRepository;
