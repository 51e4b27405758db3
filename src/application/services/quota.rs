//! Per-identity daily creation quotas.

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use serde_json::json;

use crate::error::AppError;

/// Which creation path a reservation counts against. The two counters are
/// independent: exhausting bulk leaves single-link creation untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaKind {
    Single,
    Bulk,
}

#[derive(Debug)]
struct DayCount {
    date: NaiveDate,
    count: u32,
}

/// Keyed daily counter gating link creation.
///
/// Keys are the authenticated owner id when present, otherwise the client
/// IP. A stored date older than today resets the window implicitly. State is
/// process-local and advisory: no cross-instance coordination, per the
/// accepted softness of the quota.
pub struct DailyQuota {
    counters: DashMap<(String, QuotaKind), DayCount>,
    single_limit: u32,
    bulk_limit: u32,
}

impl DailyQuota {
    pub fn new(single_limit: u32, bulk_limit: u32) -> Self {
        Self {
            counters: DashMap::new(),
            single_limit,
            bulk_limit,
        }
    }

    pub fn limit(&self, kind: QuotaKind) -> u32 {
        match kind {
            QuotaKind::Single => self.single_limit,
            QuotaKind::Bulk => self.bulk_limit,
        }
    }

    /// Reserves one creation slot for `identity` today.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LimitReached`] when today's count already equals
    /// the limit; the count is not modified in that case.
    pub fn check_and_reserve(&self, identity: &str, kind: QuotaKind) -> Result<(), AppError> {
        self.check_and_reserve_at(identity, kind, Utc::now().date_naive())
    }

    /// Remaining slots for `identity` today. Never goes below zero.
    pub fn remaining(&self, identity: &str, kind: QuotaKind) -> u32 {
        self.remaining_at(identity, kind, Utc::now().date_naive())
    }

    /// True when no slots remain for `identity` today.
    pub fn is_exhausted(&self, identity: &str, kind: QuotaKind) -> bool {
        self.remaining(identity, kind) == 0
    }

    fn check_and_reserve_at(
        &self,
        identity: &str,
        kind: QuotaKind,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        let limit = self.limit(kind);

        let mut entry = self
            .counters
            .entry((identity.to_string(), kind))
            .or_insert(DayCount {
                date: today,
                count: 0,
            });

        if entry.date != today {
            entry.date = today;
            entry.count = 0;
        }

        if entry.count >= limit {
            return Err(AppError::limit_reached(
                format!("Daily limit reached ({limit} per day)"),
                json!({ "limit": limit }),
            ));
        }

        entry.count += 1;
        Ok(())
    }

    fn remaining_at(&self, identity: &str, kind: QuotaKind, today: NaiveDate) -> u32 {
        let limit = self.limit(kind);

        match self.counters.get(&(identity.to_string(), kind)) {
            Some(entry) if entry.date == today => limit.saturating_sub(entry.count),
            _ => limit,
        }
    }
}
