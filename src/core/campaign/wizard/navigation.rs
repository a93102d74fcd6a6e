//! Step navigation model.

use super::types::{
    validate_step_config, validate_step_transition, StepId, StepPreset, StepStatus,
    WizardError, WizardStepDef,
};

/// Ordered wizard steps plus the current-step marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNavigator {
    steps: Vec<WizardStepDef>,
    current: usize,
}

impl StepNavigator {
    /// Build a navigator positioned on the step matching `current` (token or route).
    pub fn new(steps: Vec<WizardStepDef>, current: &str) -> Result<Self, WizardError> {
        validate_step_config(&steps)?;
        let current = steps
            .iter()
            .position(|s| s.matches(current))
            .ok_or_else(|| WizardError::UnknownStep(current.to_string()))?;
        Ok(Self { steps, current })
    }

    /// Build a navigator positioned on the first step.
    pub fn start(steps: Vec<WizardStepDef>) -> Result<Self, WizardError> {
        validate_step_config(&steps)?;
        Ok(Self { steps, current: 0 })
    }

    pub fn from_preset(preset: StepPreset) -> Self {
        Self {
            steps: preset.steps(),
            current: 0,
        }
    }

    pub fn steps(&self) -> &[WizardStepDef] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &WizardStepDef {
        &self.steps[self.current]
    }

    pub fn current_id(&self) -> StepId {
        self.current().id
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.matches(key))
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.steps.iter().any(|s| s.id == id)
    }

    pub fn status(&self, index: usize) -> StepStatus {
        StepStatus::at(index, self.current)
    }

    pub fn is_completed(&self, index: usize) -> bool {
        index < self.current
    }

    pub fn is_current(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn is_upcoming(&self, index: usize) -> bool {
        index > self.current
    }

    /// Every configured step with its status, in order.
    pub fn statuses(&self) -> Vec<(&WizardStepDef, StepStatus)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step, self.status(i)))
            .collect()
    }

    pub fn can_advance(&self) -> bool {
        self.current + 1 < self.steps.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Move to the next step.
    pub fn advance(&mut self) -> Result<&WizardStepDef, WizardError> {
        self.move_to(self.current + 1)
    }

    /// Move to the previous step.
    pub fn go_back(&mut self) -> Result<&WizardStepDef, WizardError> {
        if self.current == 0 {
            return Err(WizardError::InvalidTransition {
                from: self.current_id().to_string(),
                to: "(none)".to_string(),
            });
        }
        self.move_to(self.current - 1)
    }

    /// Move to the step named by `key` (token or route).
    ///
    /// Unknown keys leave the navigator where it is.
    pub fn go_to(&mut self, key: &str) -> Result<&WizardStepDef, WizardError> {
        let target = self
            .index_of(key)
            .ok_or_else(|| WizardError::UnknownStep(key.to_string()))?;
        self.move_to(target)
    }

    /// Percentage of steps completed (0-100)
    pub fn progress_percent(&self) -> u8 {
        ((self.current as f32 / self.steps.len() as f32) * 100.0) as u8
    }

    fn move_to(&mut self, target: usize) -> Result<&WizardStepDef, WizardError> {
        validate_step_transition(&self.steps, self.current, target)?;
        if target != self.current {
            tracing::debug!(
                from = %self.steps[self.current].id,
                to = %self.steps[target].id,
                "Wizard step changed"
            );
        }
        self.current = target;
        Ok(&self.steps[self.current])
    }
}
