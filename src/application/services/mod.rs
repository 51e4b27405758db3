mod alias_allocator;
mod auth_service;
mod bulk_import;
mod link_service;
mod quota;
mod resolver;

pub use alias_allocator::AliasAllocator;
pub use auth_service::AuthService;
pub use bulk_import::{BulkImportProcessor, BulkOutcome, BulkReport, BulkSummary};
pub use link_service::LinkService;
pub use quota::{DailyQuota, QuotaKind};
pub use resolver::{COUNTDOWN_SECONDS, RedirectResolver, Resolution};
