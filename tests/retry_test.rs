use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use forage::search::retry::{RetryConfig, RetryingSearch};
use forage::{ForageError, RecipeSearch, Result};

/// Mock collaborator that fails N times then succeeds.
struct FailThenSucceed {
    fail_count: AtomicU32,
    fail_with: fn() -> ForageError,
    total_calls: AtomicU32,
}

impl FailThenSucceed {
    fn new(failures: u32, fail_with: fn() -> ForageError) -> Self {
        Self {
            fail_count: AtomicU32::new(failures),
            fail_with,
            total_calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.total_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RecipeSearch for FailThenSucceed {
    fn name(&self) -> &str {
        "mock-retry"
    }

    async fn search(&self, _ingredients: &str, count: u32) -> Result<Vec<Value>> {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        let remaining = self.fail_count.load(Ordering::Relaxed);
        if remaining > 0 {
            self.fail_count.fetch_sub(1, Ordering::Relaxed);
            return Err((self.fail_with)());
        }
        Ok((1..=count).map(|i| json!({"title": format!("r{i}")})).collect())
    }
}

fn fast_config(max_attempts: u32) -> RetryConfig {
    RetryConfig::new()
        .max_attempts(max_attempts)
        .initial_delay(Duration::from_millis(1))
}

#[tokio::test]
async fn retries_on_transient_error_then_succeeds() {
    let inner = Arc::new(FailThenSucceed::new(2, || ForageError::RateLimited {
        retry_after: None,
    }));
    let search = RetryingSearch::new(inner.clone(), fast_config(3));

    let result = search.search("beef,cheese", 2).await;

    assert!(result.is_ok());
    assert_eq!(inner.call_count(), 3); // 2 failures + 1 success
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let inner = Arc::new(FailThenSucceed::new(10, || {
        ForageError::Http("timeout".into())
    }));
    let search = RetryingSearch::new(inner.clone(), fast_config(3));

    let result = search.search("beef", 1).await;

    assert!(result.is_err());
    assert_eq!(inner.call_count(), 3);
}

#[tokio::test]
async fn does_not_retry_permanent_errors() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForageError::AuthenticationFailed));
    let search = RetryingSearch::new(inner.clone(), fast_config(5));

    let result = search.search("beef", 1).await;

    assert!(matches!(result, Err(ForageError::AuthenticationFailed)));
    assert_eq!(inner.call_count(), 1); // no retry
}

#[tokio::test]
async fn server_errors_are_transient() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForageError::Api {
        status: 503,
        message: "unavailable".into(),
    }));
    let search = RetryingSearch::new(inner.clone(), fast_config(3));

    let result = search.search("beef", 1).await;

    assert!(result.is_ok());
    assert_eq!(inner.call_count(), 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForageError::Api {
        status: 404,
        message: "not found".into(),
    }));
    let search = RetryingSearch::new(inner.clone(), fast_config(5));

    let result = search.search("beef", 1).await;

    assert!(result.is_err());
    assert_eq!(inner.call_count(), 1);
}

#[tokio::test]
async fn respects_retry_after_duration() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForageError::RateLimited {
        retry_after: Some(Duration::from_millis(50)),
    }));
    let search = RetryingSearch::new(inner.clone(), fast_config(2));

    let start = std::time::Instant::now();
    let result = search.search("beef", 1).await;
    let elapsed = start.elapsed();

    assert!(result.is_ok());
    // Should have waited at least the retry_after hint, not 1ms
    assert!(elapsed >= Duration::from_millis(40)); // some tolerance
}

#[tokio::test]
async fn disabled_config_no_retry() {
    let inner = Arc::new(FailThenSucceed::new(1, || ForageError::RateLimited {
        retry_after: None,
    }));
    let search = RetryingSearch::new(inner.clone(), RetryConfig::disabled());

    let result = search.search("beef", 1).await;

    assert!(result.is_err());
    assert_eq!(inner.call_count(), 1);
}
