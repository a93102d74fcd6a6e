//! Campaign Stores
//!
//! Session-scoped state shared by the landing page and every wizard step:
//! - [`CampaignNameStore`]: the active campaign's display name
//! - [`CampaignListStore`]: append-only registry of campaigns created this session
//!
//! Both are plain structs meant to be created once and handed around behind
//! an `Arc`, never reached through a global.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Name shown before any campaign has been created.
pub const DEFAULT_CAMPAIGN_NAME: &str = "Campaign #1";

/// Prefix for generated campaign names (`Campaign #N`).
pub const DEFAULT_NAME_PREFIX: &str = "Campaign #";

// ============================================================================
// Types
// ============================================================================

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Live,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Live => "live",
        }
    }
}

/// Campaign summary record as listed on the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub created: DateTime<Utc>,
    pub referrals: u32,
}

// ============================================================================
// Name Store
// ============================================================================

/// Holds the active campaign's display name.
///
/// Writes are visible to every reader and subscriber immediately.
#[derive(Debug)]
pub struct CampaignNameStore {
    name: watch::Sender<String>,
}

impl CampaignNameStore {
    pub fn new() -> Self {
        Self::with_name(DEFAULT_CAMPAIGN_NAME)
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        let (name, _) = watch::channel(name.into());
        Self { name }
    }

    pub fn get(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set(&self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!(campaign_name = %name, "Campaign name updated");
        self.name.send_replace(name);
    }

    /// Observe name changes (header editor, step views).
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.name.subscribe()
    }
}

impl Default for CampaignNameStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// List Store
// ============================================================================

/// Append-only registry of campaigns created during the session.
pub struct CampaignListStore {
    campaigns: RwLock<Vec<Campaign>>,
    names: Arc<CampaignNameStore>,
    name_prefix: String,
}

impl CampaignListStore {
    pub fn new(names: Arc<CampaignNameStore>) -> Self {
        Self::with_prefix(names, DEFAULT_NAME_PREFIX)
    }

    pub fn with_prefix(names: Arc<CampaignNameStore>, name_prefix: impl Into<String>) -> Self {
        Self {
            campaigns: RwLock::new(Vec::new()),
            names,
            name_prefix: name_prefix.into(),
        }
    }

    /// Append a new draft campaign and make it the active name.
    pub fn add(&self, name: impl Into<String>) -> Campaign {
        let name = name.into();
        self.insert(move |_| name)
    }

    /// The landing page's "create campaign" action: `Campaign #N` where N is
    /// the 1-based creation order.
    pub fn create_default(&self) -> Campaign {
        self.insert(|number| format!("{}{}", self.name_prefix, number))
    }

    /// Number and name the campaign under one write guard so concurrent
    /// creators never share a number.
    fn insert(&self, name_for: impl FnOnce(usize) -> String) -> Campaign {
        let campaign = {
            let mut campaigns = self.campaigns.write().unwrap_or_else(PoisonError::into_inner);
            let number = campaigns.len() + 1;
            let campaign = Campaign {
                id: number.to_string(),
                name: name_for(number),
                status: CampaignStatus::Draft,
                created: Utc::now(),
                referrals: 0,
            };
            campaigns.push(campaign.clone());
            campaign
        };

        self.names.set(campaign.name.clone());
        tracing::info!(campaign_id = %campaign.id, name = %campaign.name, "Campaign created");
        campaign
    }

    /// All campaigns in insertion order.
    pub fn list(&self) -> Vec<Campaign> {
        self.campaigns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<Campaign> {
        self.campaigns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.campaigns.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The name store this list writes through to.
    pub fn names(&self) -> &Arc<CampaignNameStore> {
        &self.names
    }
}
