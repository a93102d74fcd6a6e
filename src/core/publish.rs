//! Publish Simulation
//!
//! Publishing a campaign to staging or production is modelled as a remote
//! call with a fixed artificial delay. A batch either succeeds for every
//! environment or fails as a whole; there is no cancellation, timeout or
//! retry. Failures are caught in one place, logged, and the in-flight flags
//! are cleared.

use std::collections::HashSet;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Default artificial delay per environment
pub const DEFAULT_PUBLISH_DELAY: Duration = Duration::from_millis(1500);

// ============================================================================
// Types
// ============================================================================

/// Target environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for publish operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("No environments selected")]
    NoEnvironments,

    #[error("Already publishing to {0}")]
    AlreadyInFlight(Environment),

    #[error("Publishing to {environment} failed: {message}")]
    Backend {
        environment: Environment,
        message: String,
    },
}

pub type PublishResult<T> = Result<T, PublishError>;

/// Outcome of a successful batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishReport {
    pub campaign: String,
    pub environments: Vec<Environment>,
    pub published_at: DateTime<Utc>,
    #[serde(skip)]
    pub elapsed: Duration,
}

// ============================================================================
// Backend
// ============================================================================

/// Where a campaign is published to
#[async_trait]
pub trait PublishBackend: Send + Sync {
    async fn publish(&self, campaign: &str, environment: Environment) -> PublishResult<()>;
}

/// Backend that always succeeds after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLISH_DELAY)
    }
}

#[async_trait]
impl PublishBackend for SimulatedBackend {
    async fn publish(&self, campaign: &str, environment: Environment) -> PublishResult<()> {
        tracing::debug!(campaign, %environment, delay_ms = self.delay.as_millis() as u64, "Publishing");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

// ============================================================================
// Publisher
// ============================================================================

/// Runs publish batches and tracks per-environment state
pub struct Publisher<B: PublishBackend> {
    backend: B,
    in_flight: RwLock<HashSet<Environment>>,
    published: RwLock<HashSet<Environment>>,
}

impl<B: PublishBackend> Publisher<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: RwLock::new(HashSet::new()),
            published: RwLock::new(HashSet::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_publishing(&self, environment: Environment) -> bool {
        self.in_flight
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&environment)
    }

    pub fn any_in_flight(&self) -> bool {
        !self
            .in_flight
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn is_published(&self, environment: Environment) -> bool {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&environment)
    }

    /// Publish `campaign` to every environment in `environments` concurrently.
    pub async fn publish(
        &self,
        campaign: &str,
        environments: &[Environment],
    ) -> PublishResult<PublishReport> {
        let environments = dedup(environments);
        if environments.is_empty() {
            return Err(PublishError::NoEnvironments);
        }
        self.begin(&environments)?;

        let started = Instant::now();
        let result = futures::future::try_join_all(
            environments
                .iter()
                .map(|env| self.backend.publish(campaign, *env)),
        )
        .await;

        self.finish(&environments, result.is_ok());

        match result {
            Ok(_) => {
                let report = PublishReport {
                    campaign: campaign.to_string(),
                    environments,
                    published_at: Utc::now(),
                    elapsed: started.elapsed(),
                };
                tracing::info!(
                    campaign,
                    environments = ?report.environments,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "Campaign published"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(campaign, error = %e, "Publish failed");
                Err(e)
            }
        }
    }

    /// Mark the batch in flight, rejecting it if any environment already is.
    fn begin(&self, environments: &[Environment]) -> PublishResult<()> {
        let mut in_flight = self.in_flight.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(busy) = environments.iter().find(|env| in_flight.contains(*env)) {
            return Err(PublishError::AlreadyInFlight(*busy));
        }
        in_flight.extend(environments.iter().copied());
        Ok(())
    }

    fn finish(&self, environments: &[Environment], succeeded: bool) {
        {
            let mut in_flight = self.in_flight.write().unwrap_or_else(PoisonError::into_inner);
            for env in environments {
                in_flight.remove(env);
            }
        }
        if succeeded {
            self.published
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(environments.iter().copied());
        }
    }
}

fn dedup(environments: &[Environment]) -> Vec<Environment> {
    let mut unique = Vec::with_capacity(environments.len());
    for env in environments {
        if !unique.contains(env) {
            unique.push(*env);
        }
    }
    unique
}
