//! Campaign Builder Wizard Navigation
//!
//! The builder is a linear, resumable flow through a configured list of steps.
//!
//! # Overview
//!
//! The canonical step set (`journeys` preset) is:
//! 1. Rewards - Trigger event and payouts
//! 2. How it looks - Template and customization
//! 3. Referrer journey - Messages sent to referrers
//! 4. Referee journey - Messages sent to invitees
//! 5. Summary - Review and publish
//!
//! The `communications` preset folds both journeys into a single
//! Communications step. Which preset is used is configuration.
//!
//! # Rules
//!
//! - Completion is positional: every step before the current one is completed
//! - Exactly one step is current
//! - Forward navigation moves at most one step; backward may jump to any completed step

mod types;
mod navigation;

pub use types::*;
pub use navigation::*;
