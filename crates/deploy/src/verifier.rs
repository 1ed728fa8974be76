//! Post-deploy reachability check.
//!
//! The registry accepts a page before the CDN serves it. The verifier polls
//! the public URL a fixed number of times; an unreachable site after the
//! last attempt is reported as still propagating, never as a failed deploy.

use std::time::Duration;

use tracing::{debug, info};
use worldbuilder_protocol::types::{VerificationStatus, VerifyDeploymentResponse};

use crate::backend::SiteBackend;
use crate::types::VerificationOutcome;

/// Retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyPolicy {
    /// Total number of attempts (at least one is always made).
    pub attempts: u32,
    /// Wait between consecutive attempts.
    pub interval: Duration,
}

impl Default for VerifyPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            interval: Duration::from_secs(2),
        }
    }
}

/// Requests `url` until it answers 2xx or the budget is spent.
pub async fn verify(
    backend: &dyn SiteBackend,
    url: &str,
    policy: &VerifyPolicy,
) -> VerificationOutcome {
    let attempts = policy.attempts.max(1);

    for attempt in 1..=attempts {
        match backend.status(url).await {
            Ok(status) if (200..300).contains(&status) => {
                info!(url, attempt, "deployment reachable");
                return VerificationOutcome {
                    reached: true,
                    attempts_used: attempt,
                };
            }
            Ok(status) => debug!(url, attempt, status, "deployment not reachable yet"),
            Err(e) => debug!(url, attempt, error = %e, "status check failed"),
        }

        if attempt < attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    info!(url, attempts, "deployment still propagating");
    VerificationOutcome {
        reached: false,
        attempts_used: attempts,
    }
}

/// Standalone verification of an already deployed URL.
///
/// Only a missing URL is `failed`; an unreachable site is `pending`.
pub async fn verify_deployment(
    backend: &dyn SiteBackend,
    url: &str,
    policy: &VerifyPolicy,
) -> VerifyDeploymentResponse {
    let url = url.trim();
    if url.is_empty() {
        return VerifyDeploymentResponse {
            status: VerificationStatus::Failed,
            message: "Missing deploymentUrl parameter".to_string(),
        };
    }

    let outcome = verify(backend, url, policy).await;
    VerifyDeploymentResponse {
        status: outcome.status(),
        message: outcome.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use tokio::time::Instant;

    const URL: &str = "https://space-game.app.worldbuilder.space";

    #[tokio::test(start_paused = true)]
    async fn first_success_skips_waiting() {
        let backend = MockBackend::new().with_statuses(vec![Ok(200)]);
        let start = Instant::now();

        let outcome = verify(&backend, URL, &VerifyPolicy::default()).await;

        assert!(outcome.reached);
        assert_eq!(outcome.attempts_used, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(backend.status_check_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt() {
        let backend = MockBackend::new().with_statuses(vec![Ok(404), Err("dns".into()), Ok(204)]);
        let start = Instant::now();

        let outcome = verify(&backend, URL, &VerifyPolicy::default()).await;

        assert!(outcome.reached);
        assert_eq!(outcome.attempts_used, 3);
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_budget_is_unreached() {
        let backend = MockBackend::new().with_statuses(vec![Ok(403), Ok(403), Ok(403), Ok(200)]);
        let start = Instant::now();

        let outcome = verify(&backend, URL, &VerifyPolicy::default()).await;

        assert!(!outcome.reached);
        assert_eq!(outcome.attempts_used, 3);
        // Two waits between three attempts, none after the last.
        assert_eq!(start.elapsed(), Duration::from_secs(4));
        assert_eq!(backend.status_check_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_checks_once() {
        let backend = MockBackend::new().with_statuses(vec![Ok(500)]);
        let policy = VerifyPolicy {
            attempts: 0,
            interval: Duration::from_secs(2),
        };

        let outcome = verify(&backend, URL, &policy).await;

        assert!(!outcome.reached);
        assert_eq!(outcome.attempts_used, 1);
        assert_eq!(backend.status_check_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn deployment_response_maps_outcome() {
        let backend = MockBackend::new().with_statuses(vec![Ok(200)]);
        let resp = verify_deployment(&backend, URL, &VerifyPolicy::default()).await;
        assert_eq!(resp.status, VerificationStatus::Success);
        assert_eq!(resp.message, "Deployment verified and accessible");

        let backend = MockBackend::new().with_statuses(vec![Ok(404), Ok(404), Ok(404)]);
        let resp = verify_deployment(&backend, URL, &VerifyPolicy::default()).await;
        assert_eq!(resp.status, VerificationStatus::Pending);
    }

    #[tokio::test]
    async fn blank_url_fails_without_requests() {
        let backend = MockBackend::new();
        let resp = verify_deployment(&backend, "  ", &VerifyPolicy::default()).await;
        assert_eq!(resp.status, VerificationStatus::Failed);
        assert_eq!(resp.message, "Missing deploymentUrl parameter");
        assert_eq!(backend.status_check_count(), 0);
    }
}
