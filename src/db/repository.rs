//! Repository for price cache database operations

use chrono::Utc;
use sqlx::PgPool;

use super::models::PriceCacheRow;
use super::DbError;
use crate::model::price::CacheEntry;

/// Repository for cached price quotes
#[derive(Clone)]
pub struct PriceCacheRepository {
    pool: PgPool,
}

impl PriceCacheRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a live cache entry by key. Expired entries are invisible even if
    /// still physically stored; there is no background sweep.
    pub async fn get(&self, cache_key: &str) -> Result<Option<CacheEntry>, DbError> {
        let row: Option<PriceCacheRow> = sqlx::query_as(
            r#"
            SELECT * FROM price_cache WHERE cache_key = $1 AND expires_at > $2
            "#,
        )
        .bind(cache_key)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PriceCacheRow::into_domain))
    }

    /// Insert or overwrite a cache entry. Last write wins; concurrent writes
    /// to the same key are harmless.
    pub async fn upsert(&self, entry: &CacheEntry) -> Result<(), DbError> {
        let purchase_link = entry.purchase_link.as_ref().map(|u| u.to_string());

        sqlx::query(
            r#"
            INSERT INTO price_cache (
                cache_key, part_name, year, make, model, source,
                price_low, price_median, price_high,
                purchase_link, raw_payload, fetched_at, expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (cache_key) DO UPDATE SET
                part_name = EXCLUDED.part_name,
                year = EXCLUDED.year,
                make = EXCLUDED.make,
                model = EXCLUDED.model,
                source = EXCLUDED.source,
                price_low = EXCLUDED.price_low,
                price_median = EXCLUDED.price_median,
                price_high = EXCLUDED.price_high,
                purchase_link = EXCLUDED.purchase_link,
                raw_payload = EXCLUDED.raw_payload,
                fetched_at = EXCLUDED.fetched_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(&entry.cache_key)
        .bind(&entry.part_name)
        .bind(entry.year as i32)
        .bind(&entry.make)
        .bind(&entry.model)
        .bind(entry.source.as_str())
        .bind(entry.price_low)
        .bind(entry.price_median)
        .bind(entry.price_high)
        .bind(&purchase_link)
        .bind(&entry.raw_payload)
        .bind(entry.fetched_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(key = %entry.cache_key, "Upserted price cache entry");
        Ok(())
    }

    /// Delete expired entries. Not required for correctness (reads apply lazy
    /// expiry); available for housekeeping.
    pub async fn sweep_expired(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM price_cache WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            tracing::debug!(deleted = deleted, "Swept expired price cache entries");
        }

        Ok(deleted)
    }
}
