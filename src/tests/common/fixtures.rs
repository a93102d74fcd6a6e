//! Test Fixtures
//!
//! Helpers for creating campaign stores, step lists and journeys.

use std::sync::Arc;

use crate::core::campaign::wizard::{StepId, WizardStepDef};
use crate::core::campaign::{CampaignListStore, CampaignNameStore};
use crate::core::journey::{Communication, JourneyBuilder, JourneyKind};

// =============================================================================
// Store Fixtures
// =============================================================================

/// Name store plus a list store writing through to it.
pub fn create_test_stores() -> (Arc<CampaignNameStore>, CampaignListStore) {
    let names = Arc::new(CampaignNameStore::new());
    let list = CampaignListStore::new(Arc::clone(&names));
    (names, list)
}

// =============================================================================
// Step Fixtures
// =============================================================================

pub fn step_defs(ids: &[StepId]) -> Vec<WizardStepDef> {
    ids.iter().copied().map(WizardStepDef::from).collect()
}

// =============================================================================
// Journey Fixtures
// =============================================================================

/// Referrer journey with its seeded triggers.
pub fn create_referrer_journey() -> JourneyBuilder {
    JourneyBuilder::new(JourneyKind::Referrer)
}

/// Email draft with a subject so it passes validation.
pub fn create_test_email(title: &str) -> Communication {
    Communication::email("", title, "", format!("{title} subject"), "Hello")
}
