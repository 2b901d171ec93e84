//! PostgreSQL implementation of the UsageStore port.
//!
//! Maps the closed feature enums onto named integer columns (one column per
//! counter, no dynamic field lookup) and keeps every mutation to a single
//! statement so the database serializes it: upsert-returning for
//! get-or-create, `SET col = col + $n` for increments, and a guarded
//! `UPDATE ... WHERE used < cap` for trial consumption.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::access::{
    DailyQuota, QuotaCounters, QuotaFeature, TrialCounters, TrialFeature, TrialState,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{StoreError, UsageStore};

/// Usage store backed by the `quota_usage` and `trial_usage` tables.
pub struct PgUsageStore {
    pool: PgPool,
}

impl PgUsageStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn counter(user_id: UserId, raw: i32) -> Result<u32, StoreError> {
    u32::try_from(raw).map_err(|_| StoreError::CorruptRecord {
        user_id: user_id.as_i64(),
        reason: format!("negative counter value {}", raw),
    })
}

#[async_trait]
impl UsageStore for PgUsageStore {
    async fn get_or_create_daily(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<DailyQuota, StoreError> {
        // The no-op DO UPDATE makes RETURNING yield the row in both the
        // insert and the conflict case.
        let row: (i32, i32, i32, i32) = sqlx::query_as(
            r#"
            INSERT INTO quota_usage (user_id, usage_date)
            VALUES ($1, $2)
            ON CONFLICT (user_id, usage_date)
            DO UPDATE SET usage_date = quota_usage.usage_date
            RETURNING quick_chat, code_chat, convert, pptx
            "#,
        )
        .bind(user_id.as_i64())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(DailyQuota {
            user_id,
            usage_date: date,
            counters: QuotaCounters {
                quick_chat: counter(user_id, row.0)?,
                code_chat: counter(user_id, row.1)?,
                convert: counter(user_id, row.2)?,
                pptx: counter(user_id, row.3)?,
            },
        })
    }

    async fn add_daily_usage(
        &self,
        user_id: UserId,
        date: NaiveDate,
        feature: QuotaFeature,
        amount: u32,
    ) -> Result<(), StoreError> {
        // One fixed statement per feature; the enum is closed, so this is
        // the whole set of write paths into the counters.
        let sql = match feature {
            QuotaFeature::QuickChat => {
                r#"
                INSERT INTO quota_usage (user_id, usage_date, quick_chat)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, usage_date)
                DO UPDATE SET quick_chat = quota_usage.quick_chat + $3
                "#
            }
            QuotaFeature::CodeChat => {
                r#"
                INSERT INTO quota_usage (user_id, usage_date, code_chat)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, usage_date)
                DO UPDATE SET code_chat = quota_usage.code_chat + $3
                "#
            }
            QuotaFeature::Convert => {
                r#"
                INSERT INTO quota_usage (user_id, usage_date, convert)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, usage_date)
                DO UPDATE SET convert = quota_usage.convert + $3
                "#
            }
            QuotaFeature::Pptx => {
                r#"
                INSERT INTO quota_usage (user_id, usage_date, pptx)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, usage_date)
                DO UPDATE SET pptx = quota_usage.pptx + $3
                "#
            }
        };

        sqlx::query(sql)
            .bind(user_id.as_i64())
            .bind(date)
            .bind(amount as i32)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn get_or_create_trial(
        &self,
        user_id: UserId,
        now: Timestamp,
    ) -> Result<TrialState, StoreError> {
        let row: (DateTime<Utc>, i32, i32, i32) = sqlx::query_as(
            r#"
            INSERT INTO trial_usage (user_id, last_reset_at)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET user_id = trial_usage.user_id
            RETURNING last_reset_at, image_gen_used, image_edit_used, pptx_used
            "#,
        )
        .bind(user_id.as_i64())
        .bind(*now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(TrialState {
            user_id,
            last_reset_at: Timestamp::from_datetime(row.0),
            used: TrialCounters {
                image_gen: counter(user_id, row.1)?,
                image_edit: counter(user_id, row.2)?,
                pptx: counter(user_id, row.3)?,
            },
        })
    }

    async fn reset_trial(&self, user_id: UserId, now: Timestamp) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO trial_usage (user_id, last_reset_at)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET
                last_reset_at = $2,
                image_gen_used = 0,
                image_edit_used = 0,
                pptx_used = 0
            "#,
        )
        .bind(user_id.as_i64())
        .bind(*now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn consume_trial(
        &self,
        user_id: UserId,
        feature: TrialFeature,
        cap: u32,
        now: Timestamp,
    ) -> Result<bool, StoreError> {
        // Ensure the row exists, then increment under a guard in one
        // statement; zero rows affected means the cap was already reached.
        sqlx::query(
            r#"
            INSERT INTO trial_usage (user_id, last_reset_at)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_i64())
        .bind(*now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let sql = match feature {
            TrialFeature::ImageGen => {
                r#"
                UPDATE trial_usage
                SET image_gen_used = image_gen_used + 1
                WHERE user_id = $1 AND image_gen_used < $2
                "#
            }
            TrialFeature::ImageEdit => {
                r#"
                UPDATE trial_usage
                SET image_edit_used = image_edit_used + 1
                WHERE user_id = $1 AND image_edit_used < $2
                "#
            }
            TrialFeature::Pptx => {
                r#"
                UPDATE trial_usage
                SET pptx_used = pptx_used + 1
                WHERE user_id = $1 AND pptx_used < $2
                "#
            }
        };

        let result = sqlx::query(sql)
            .bind(user_id.as_i64())
            .bind(cap as i32)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() == 1)
    }
}
