//! Short-code allocation against the link store.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::alias::{generate_code, normalize_alias, validate_alias};

/// Collision retry bound for randomly generated codes.
const MAX_ATTEMPTS: usize = 5;

/// Allocates short codes, either validating a requested alias or generating
/// a random one, with uniqueness checked against the store.
///
/// The existence checks here are an optimization, not the guarantee: two
/// concurrent allocations can both pass before either persists. The store's
/// unique constraint arbitrates at create time, and the loser observes
/// [`AppError::AliasTaken`] exactly as if the check had caught it.
pub struct AliasAllocator<R: LinkRepository> {
    repository: Arc<R>,
}

impl<R: LinkRepository> AliasAllocator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Allocates a short code.
    ///
    /// A requested alias is normalized (trimmed, internal whitespace runs
    /// collapsed to hyphens) and validated; a blank request falls back to
    /// random generation, matching anonymous use of the custom-alias field.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidFormat`] - normalized alias outside `[a-zA-Z0-9-]{2,50}`
    /// - [`AppError::AliasTaken`] - requested alias already stored
    /// - [`AppError::AllocationExhausted`] - all random attempts collided
    pub async fn allocate(&self, requested: Option<&str>) -> Result<String, AppError> {
        if let Some(raw) = requested {
            let alias = normalize_alias(raw);

            if !alias.is_empty() {
                validate_alias(&alias)?;

                if self.repository.find_by_code(&alias).await?.is_some() {
                    return Err(AppError::alias_taken(
                        "Alias already exists, please choose a different custom alias",
                        json!({ "alias": alias }),
                    ));
                }

                return Ok(alias);
            }
        }

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::allocation_exhausted(
            "Could not generate a unique link, please try again",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }
}
