//! Campaign Management Module
//!
//! Provides the session-scoped campaign stores, the builder wizard's step
//! navigation, and the layout shell that ties the steps together.

pub mod store;

// Step configuration and navigation
pub mod wizard;

// Shell composing navigation, step forms and the name editor
pub mod layout;

pub use layout::{ActiveStep, CampaignLayout, StepForms};
pub use store::{Campaign, CampaignListStore, CampaignNameStore, CampaignStatus};
