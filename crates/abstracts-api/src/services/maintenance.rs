use std::time::Duration;

use abstracts_services::PasswordIdentityProvider;
use tokio::task::JoinHandle;

use super::FormRegistry;

/// Periodically evict idle form sessions and purge expired sign-in sessions.
///
/// The first sweep runs one `period` after start.
pub fn start_maintenance(
    forms: FormRegistry,
    identity: Option<PasswordIdentityProvider>,
    period: Duration,
) -> JoinHandle<()> {
    tracing::info!(
        period_secs = period.as_secs(),
        "Form session eviction and session purge enabled"
    );

    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;

            let evicted = forms.evict_idle();
            if evicted > 0 {
                tracing::info!(evicted, active = forms.len(), "Evicted idle form sessions");
            }

            if let Some(identity) = &identity {
                match identity.purge_expired().await {
                    Ok(0) => {}
                    Ok(purged) => tracing::info!(purged, "Purged expired sessions"),
                    Err(e) => tracing::warn!(error = %e, "Failed to purge expired sessions"),
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FormLimits;
    use abstracts_services::test_helpers::{
        workflow_context, MockIdentityProvider, MockStorage, MockSubmissionStore,
    };

    #[tokio::test]
    async fn test_sweeps_idle_forms() {
        let ctx = workflow_context(
            &MockStorage::new(),
            &MockSubmissionStore::new(),
            &MockIdentityProvider::new(),
        );
        let limits = FormLimits {
            idle_timeout: Duration::ZERO,
            parked_ttl: Duration::ZERO,
            max_sessions: 4,
        };
        let forms = FormRegistry::new(ctx, limits);
        let (_, workflow) = forms.create().unwrap();

        let handle = start_maintenance(forms.clone(), None, Duration::from_millis(20));
        assert_eq!(forms.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(forms.is_empty());
        assert!(workflow.is_cancelled());

        handle.abort();
    }
}
