//! Bulk caption import: many links from `Caption;URL` lines.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::application::services::quota::{DailyQuota, QuotaKind};
use crate::domain::entities::{LinkMetadata, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, ErrorInfo};
use crate::utils::alias::{derive_alias, validate_alias};
use crate::utils::csv_export::{CsvRow, export_links_csv};
use crate::utils::qr::qr_data_url;
use crate::utils::url_validator::validate_original_url;

/// Provenance marker stored in the metadata of bulk-created links.
const BULK_SOURCE: &str = "bulk";

/// Per-line outcome of a bulk import.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BulkOutcome {
    Success {
        caption: String,
        original_url: String,
        alias: String,
        short_url: String,
        qr_code: String,
    },
    Error {
        line: String,
        error: ErrorInfo,
    },
}

/// Aggregate counters for a bulk run.
///
/// `skipped` counts lines never attempted because the daily quota ran out
/// mid-batch; they receive no per-line outcome.
#[derive(Debug, Clone, Serialize)]
pub struct BulkSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Full result of a bulk import.
#[derive(Debug, Serialize)]
pub struct BulkReport {
    pub summary: BulkSummary,
    pub outcomes: Vec<BulkOutcome>,
}

impl BulkReport {
    /// CSV of the successful rows:
    /// `Caption,Original URL,Alias,Shortened URL`, fields quoted.
    pub fn to_csv(&self) -> Result<String, AppError> {
        let rows: Vec<CsvRow> = self
            .outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                BulkOutcome::Success {
                    caption,
                    original_url,
                    alias,
                    short_url,
                    ..
                } => Some(CsvRow {
                    caption: caption.clone(),
                    original_url: original_url.clone(),
                    alias: alias.clone(),
                    short_url: short_url.clone(),
                }),
                BulkOutcome::Error { .. } => None,
            })
            .collect();

        export_links_csv(&rows)
            .map_err(|e| AppError::internal("CSV export failed", json!({ "reason": e.to_string() })))
    }
}

/// A staged line awaiting the batched insert.
struct Staged {
    caption: String,
    original_url: String,
    alias: String,
    short_url: String,
    qr_code: String,
}

enum LineResult {
    Failed(BulkOutcome),
    Pending(Staged),
}

/// Processes `Caption;URL` batches: per-line validation, deterministic alias
/// derivation, one existence pre-filter query, per-item quota admission, and
/// a single all-or-nothing batched insert.
pub struct BulkImportProcessor<R: LinkRepository> {
    repository: Arc<R>,
    quota: Arc<DailyQuota>,
    base_url: String,
}

impl<R: LinkRepository> BulkImportProcessor<R> {
    pub fn new(repository: Arc<R>, quota: Arc<DailyQuota>, base_url: String) -> Self {
        Self {
            repository,
            quota,
            base_url,
        }
    }

    /// Runs a bulk import.
    ///
    /// Lines are processed in input order. A line yields an error outcome for
    /// a malformed format, an invalid URL, an unusable derived alias, or an
    /// alias collision (against the store or an earlier line of this batch).
    /// The first quota denial stops the loop; the remaining lines are not
    /// attempted and get no outcomes. Staged lines are persisted in one
    /// transaction; a store-level batch failure surfaces as the returned
    /// error with nothing persisted and no partial success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] / [`AppError::AliasTaken`] when the
    /// batched insert itself fails.
    pub async fn process(
        &self,
        input: &str,
        owner_id: Option<i64>,
        quota_key: &str,
    ) -> Result<BulkReport, AppError> {
        let lines: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let taken = self.prefilter_existing(&lines).await?;

        let mut results: Vec<LineResult> = Vec::with_capacity(lines.len());
        let mut staged_links: Vec<NewLink> = Vec::new();
        let mut seen_in_batch: HashSet<String> = HashSet::new();
        let mut skipped = 0;

        for (index, line) in lines.iter().enumerate() {
            let staged = match self.stage_line(line, &taken, &seen_in_batch) {
                Ok(staged) => staged,
                Err(outcome) => {
                    results.push(LineResult::Failed(outcome));
                    continue;
                }
            };

            if self
                .quota
                .check_and_reserve(quota_key, QuotaKind::Bulk)
                .is_err()
            {
                skipped = lines.len() - index;
                break;
            }

            seen_in_batch.insert(staged.alias.clone());
            staged_links.push(NewLink {
                short_code: staged.alias.clone(),
                original_url: staged.original_url.clone(),
                owner_id,
                metadata: LinkMetadata {
                    qr_code: Some(staged.qr_code.clone()),
                    caption: Some(staged.caption.clone()),
                    source: Some(BULK_SOURCE.to_string()),
                    extra: serde_json::Map::new(),
                },
            });
            results.push(LineResult::Pending(staged));
        }

        let persisted_codes: HashSet<String> = if staged_links.is_empty() {
            HashSet::new()
        } else {
            self.repository
                .create_batch(staged_links)
                .await?
                .into_iter()
                .map(|link| link.short_code)
                .collect()
        };

        Ok(Self::finalize(results, &persisted_codes, lines.len(), skipped))
    }

    /// One query answering "which of this batch's derived aliases already
    /// exist", so the loop does not hit the store per line.
    async fn prefilter_existing(&self, lines: &[&str]) -> Result<HashSet<String>, AppError> {
        let candidates: Vec<String> = lines
            .iter()
            .filter_map(|line| {
                let (caption, _) = split_line(line)?;
                let alias = derive_alias(caption);
                (!alias.is_empty()).then_some(alias)
            })
            .collect();

        if candidates.is_empty() {
            return Ok(HashSet::new());
        }

        self.repository.existing_codes(&candidates).await
    }

    /// Validates one line and prepares its staged record.
    fn stage_line(
        &self,
        line: &str,
        taken: &HashSet<String>,
        seen_in_batch: &HashSet<String>,
    ) -> Result<Staged, BulkOutcome> {
        let Some((caption, url_field)) = split_line(line) else {
            return Err(line_error(
                line,
                AppError::invalid_format(
                    "Invalid format, expected exactly one semicolon: Caption;URL",
                    json!({}),
                ),
            ));
        };

        let original_url = validate_original_url(url_field)
            .map_err(|e| line_error(line, AppError::invalid_url(e.to_string(), json!({}))))?;

        let alias = derive_alias(caption);
        if validate_alias(&alias).is_err() {
            return Err(line_error(
                line,
                AppError::invalid_format(
                    "Caption does not produce a usable alias",
                    json!({ "derived": alias }),
                ),
            ));
        }

        if taken.contains(&alias) || seen_in_batch.contains(&alias) {
            return Err(line_error(
                line,
                AppError::alias_exists("Alias already exists", json!({ "alias": alias })),
            ));
        }

        let short_url = format!("{}/{}", self.base_url.trim_end_matches('/'), alias);
        let qr_code = qr_data_url(&short_url).map_err(|e| {
            line_error(
                line,
                AppError::internal("QR generation failed", json!({ "reason": e.to_string() })),
            )
        })?;

        Ok(Staged {
            caption: caption.to_string(),
            original_url,
            alias,
            short_url,
            qr_code,
        })
    }

    /// Converts pending lines to successes or `PersistFailed` depending on
    /// whether their alias came back from the batched insert.
    fn finalize(
        results: Vec<LineResult>,
        persisted_codes: &HashSet<String>,
        total: usize,
        skipped: usize,
    ) -> BulkReport {
        let mut successful = 0;
        let mut failed = 0;

        let outcomes: Vec<BulkOutcome> = results
            .into_iter()
            .map(|result| match result {
                LineResult::Failed(outcome) => {
                    failed += 1;
                    outcome
                }
                LineResult::Pending(staged) if persisted_codes.contains(&staged.alias) => {
                    successful += 1;
                    BulkOutcome::Success {
                        caption: staged.caption,
                        original_url: staged.original_url,
                        alias: staged.alias,
                        short_url: staged.short_url,
                        qr_code: staged.qr_code,
                    }
                }
                LineResult::Pending(staged) => {
                    failed += 1;
                    line_error(
                        &format!("{};{}", staged.caption, staged.original_url),
                        AppError::persist_failed(
                            "Failed to save link",
                            json!({ "alias": staged.alias }),
                        ),
                    )
                }
            })
            .collect();

        BulkReport {
            summary: BulkSummary {
                total,
                successful,
                failed,
                skipped,
            },
            outcomes,
        }
    }
}

/// Splits a line into caption and URL on its single semicolon; `None` unless
/// there is exactly one.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split(';');
    let caption = fields.next()?.trim();
    let url = fields.next()?.trim();

    if fields.next().is_some() {
        return None;
    }

    Some((caption, url))
}

fn line_error(line: &str, error: AppError) -> BulkOutcome {
    BulkOutcome::Error {
        line: line.to_string(),
        error: error.to_error_info(),
    }
}
