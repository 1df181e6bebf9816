//! Process-wide OAuth token cache
//!
//! The marketplace issues short-lived client-credentials tokens. All
//! concurrent price resolutions share one cached token; the refresh path runs
//! under a mutex so a burst of resolutions discovering a stale token at the
//! same time produces exactly one token request.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use super::MarketplaceError;

/// Tokens are considered expired this many seconds early, so an in-flight
/// request never carries a token that lapses mid-call.
const EXPIRY_SAFETY_MARGIN_SECS: i64 = 60;

/// An issued bearer token with its absolute expiry.
#[derive(Debug, Clone)]
pub struct BearerToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl BearerToken {
    /// Build from a token response's relative lifetime.
    pub fn with_lifetime(access_token: String, expires_in_secs: i64) -> Self {
        Self {
            access_token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SAFETY_MARGIN_SECS) < self.expires_at
    }
}

/// Shared token cache with single-flight refresh.
#[derive(Default)]
pub struct TokenCache {
    inner: Mutex<Option<BearerToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token while it is fresh; otherwise run `refresh`
    /// and cache its result. Callers waiting on the lock re-check freshness
    /// after acquiring it, so only the first of a stale burst refreshes.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, MarketplaceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<BearerToken, MarketplaceError>>,
    {
        let mut guard = self.inner.lock().await;

        if let Some(token) = guard.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
            tracing::debug!("Cached marketplace token expired, refreshing");
        }

        let token = refresh().await?;
        let access_token = token.access_token.clone();
        *guard = Some(token);

        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn counted_refresh(
        counter: Arc<AtomicUsize>,
        lifetime_secs: i64,
    ) -> Result<BearerToken, MarketplaceError> {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Ok(BearerToken::with_lifetime(format!("token-{}", n), lifetime_secs))
    }

    #[tokio::test]
    async fn test_fresh_token_is_reused() {
        let cache = TokenCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let first = cache
            .get_or_refresh(|| counted_refresh(Arc::clone(&counter), 7200))
            .await
            .unwrap();
        let second = cache
            .get_or_refresh(|| counted_refresh(Arc::clone(&counter), 7200))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_token_inside_safety_margin_is_refreshed() {
        let cache = TokenCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        // 30s lifetime is already within the 60s margin
        cache
            .get_or_refresh(|| counted_refresh(Arc::clone(&counter), 30))
            .await
            .unwrap();
        cache
            .get_or_refresh(|| counted_refresh(Arc::clone(&counter), 7200))
            .await
            .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_stale_discoveries_refresh_once() {
        let cache = Arc::new(TokenCache::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let counter = Arc::clone(&counter);
                tokio::spawn(async move {
                    cache
                        .get_or_refresh(|| counted_refresh(counter, 7200))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let tokens: Vec<String> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(tokens.iter().all(|t| t == &tokens[0]));
    }

    #[tokio::test]
    async fn test_refresh_failure_is_propagated_and_not_cached() {
        let cache = TokenCache::new();

        let err = cache
            .get_or_refresh(|| async { Err(MarketplaceError::Auth("denied".into())) })
            .await;
        assert!(err.is_err());

        // A later successful refresh still works
        let counter = Arc::new(AtomicUsize::new(0));
        let token = cache
            .get_or_refresh(|| counted_refresh(counter, 7200))
            .await
            .unwrap();
        assert_eq!(token, "token-0");
    }
}
