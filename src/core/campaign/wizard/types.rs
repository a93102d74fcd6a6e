//! Wizard Domain Types
//!
//! Defines the step vocabulary of the campaign builder:
//! - [`StepId`]: the fixed set of step tokens
//! - [`WizardStepDef`]: a configured step (id, label, route)
//! - [`StepPreset`]: the known step orderings
//! - [`StepStatus`]: completed / current / upcoming
//! - [`WizardError`]: navigation errors

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Step Identity
// ============================================================================

/// Step token. The set is fixed; which tokens a wizard uses, and in what
/// order, is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    Rewards,
    HowItLooks,
    ReferrerJourney,
    RefereeJourney,
    Communications,
    Summary,
}

impl StepId {
    pub const ALL: [StepId; 6] = [
        StepId::Rewards,
        StepId::HowItLooks,
        StepId::ReferrerJourney,
        StepId::RefereeJourney,
        StepId::Communications,
        StepId::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Rewards => "rewards",
            StepId::HowItLooks => "how-it-looks",
            StepId::ReferrerJourney => "referrer-journey",
            StepId::RefereeJourney => "referee-journey",
            StepId::Communications => "communications",
            StepId::Summary => "summary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepId::Rewards => "Rewards",
            StepId::HowItLooks => "How it looks",
            StepId::ReferrerJourney => "Referrer journey",
            StepId::RefereeJourney => "Referee journey",
            StepId::Communications => "Communications",
            StepId::Summary => "Summary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StepId::Rewards => "Trigger event and payouts",
            StepId::HowItLooks => "Template and customization",
            StepId::ReferrerJourney => "Messages sent to referrers",
            StepId::RefereeJourney => "Messages sent to invitees",
            StepId::Communications => "Reward emails and invitation message",
            StepId::Summary => "Review and publish",
        }
    }

    /// Route of the page hosting this step. Rewards is the builder root.
    pub fn route(&self) -> &'static str {
        match self {
            StepId::Rewards => "/campaign-builder",
            StepId::HowItLooks => "/campaign-builder/how-it-looks",
            StepId::ReferrerJourney => "/campaign-builder/referrer-journey",
            StepId::RefereeJourney => "/campaign-builder/referee-journey",
            StepId::Communications => "/campaign-builder/communications",
            StepId::Summary => "/campaign-builder/summary",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StepId {
    type Error = WizardError;

    /// Accepts either the step token or its route.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        StepId::ALL
            .into_iter()
            .find(|step| step.as_str() == value || step.route() == value)
            .ok_or_else(|| WizardError::UnknownStep(value.to_string()))
    }
}

// ============================================================================
// Configured Steps
// ============================================================================

/// A step as configured for one wizard instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardStepDef {
    pub id: StepId,
    pub label: String,
    pub route: String,
}

impl WizardStepDef {
    /// Whether `key` names this step by token or by route.
    pub fn matches(&self, key: &str) -> bool {
        self.id.as_str() == key || self.route == key
    }
}

impl From<StepId> for WizardStepDef {
    fn from(id: StepId) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            route: id.route().to_string(),
        }
    }
}

/// Known step orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepPreset {
    /// Rewards, How it looks, Referrer journey, Referee journey, Summary
    #[default]
    Journeys,
    /// Rewards, How it looks, Communications, Summary
    Communications,
}

impl StepPreset {
    pub fn step_ids(&self) -> Vec<StepId> {
        match self {
            StepPreset::Journeys => vec![
                StepId::Rewards,
                StepId::HowItLooks,
                StepId::ReferrerJourney,
                StepId::RefereeJourney,
                StepId::Summary,
            ],
            StepPreset::Communications => vec![
                StepId::Rewards,
                StepId::HowItLooks,
                StepId::Communications,
                StepId::Summary,
            ],
        }
    }

    pub fn steps(&self) -> Vec<WizardStepDef> {
        self.step_ids().into_iter().map(WizardStepDef::from).collect()
    }
}

// ============================================================================
// Step Status
// ============================================================================

/// Visual state of a step relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

impl StepStatus {
    /// Status of the step at `index` when `current` is the active index.
    pub fn at(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while configuring or navigating the wizard
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Unknown step: {0}")]
    UnknownStep(String),

    #[error("Step configured more than once: {0}")]
    DuplicateStep(String),

    #[error("Wizard has no steps configured")]
    NoSteps,

    #[error("Invalid step transition: cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

// ============================================================================
// Step Transition Logic
// ============================================================================

/// Validates a move between two positions of the configured step list.
///
/// Staying put and going back any distance are always allowed; going forward
/// is limited to the next step so nothing is skipped.
pub fn validate_step_transition(
    steps: &[WizardStepDef],
    from: usize,
    to: usize,
) -> Result<(), WizardError> {
    let name = |i: usize| {
        steps
            .get(i)
            .map(|s| s.id.to_string())
            .unwrap_or_else(|| format!("#{i}"))
    };

    if from >= steps.len() || to >= steps.len() {
        return Err(WizardError::InvalidTransition {
            from: name(from),
            to: name(to),
        });
    }

    if to <= from + 1 {
        return Ok(());
    }

    Err(WizardError::InvalidTransition {
        from: name(from),
        to: name(to),
    })
}

/// Checks the configured list: non-empty, each step at most once.
pub fn validate_step_config(steps: &[WizardStepDef]) -> Result<(), WizardError> {
    if steps.is_empty() {
        return Err(WizardError::NoSteps);
    }
    for (i, step) in steps.iter().enumerate() {
        if steps[..i].iter().any(|earlier| earlier.id == step.id) {
            return Err(WizardError::DuplicateStep(step.id.to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
