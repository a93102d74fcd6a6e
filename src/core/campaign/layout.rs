//! Campaign Layout Shell
//!
//! Hosts one builder session: the step navigator, every step's local form
//! state and the campaign name editor shown in the header. Forms live for
//! the whole session, so moving between steps never loses edits.

use std::sync::Arc;

use super::store::CampaignNameStore;
use super::wizard::{StepId, StepNavigator, WizardError, WizardStepDef};
use crate::core::appearance::{AppearanceStep, CustomizeState, HandoffResult, HandoffStore};
use crate::core::communications::CommunicationsForm;
use crate::core::editor::Editor;
use crate::core::journey::{JourneyBuilder, JourneyKind};
use crate::core::rewards::RewardsForm;
use crate::core::summary::{CampaignSummary, DeveloperInvite};

/// Local form state of every step
#[derive(Debug, Clone)]
pub struct StepForms {
    pub rewards: RewardsForm,
    pub appearance: AppearanceStep,
    /// Present once the customize screen has been opened
    pub customize: Option<CustomizeState>,
    pub referrer: JourneyBuilder,
    pub referee: JourneyBuilder,
    pub communications: CommunicationsForm,
    pub invite: DeveloperInvite,
}

impl Default for StepForms {
    fn default() -> Self {
        Self {
            rewards: RewardsForm::default(),
            appearance: AppearanceStep::default(),
            customize: None,
            referrer: JourneyBuilder::new(JourneyKind::Referrer),
            referee: JourneyBuilder::new(JourneyKind::Referee),
            communications: CommunicationsForm::default(),
            invite: DeveloperInvite::default(),
        }
    }
}

/// The form belonging to the current step
#[derive(Debug)]
pub enum ActiveStep<'a> {
    Rewards(&'a RewardsForm),
    Appearance {
        picker: &'a AppearanceStep,
        customize: Option<&'a CustomizeState>,
    },
    Journey(&'a JourneyBuilder),
    Communications(&'a CommunicationsForm),
    Summary(CampaignSummary),
}

/// One campaign builder session
pub struct CampaignLayout {
    navigator: StepNavigator,
    forms: StepForms,
    name_editor: Editor<String>,
    names: Arc<CampaignNameStore>,
    handoff: Arc<dyn HandoffStore>,
}

impl CampaignLayout {
    /// Start a session on the first configured step.
    pub fn new(
        steps: Vec<WizardStepDef>,
        names: Arc<CampaignNameStore>,
        handoff: Arc<dyn HandoffStore>,
    ) -> Result<Self, WizardError> {
        Ok(Self::with_navigator(StepNavigator::start(steps)?, names, handoff))
    }

    /// Start a session on the step named by `current` (token or route).
    pub fn resume(
        steps: Vec<WizardStepDef>,
        current: &str,
        names: Arc<CampaignNameStore>,
        handoff: Arc<dyn HandoffStore>,
    ) -> Result<Self, WizardError> {
        Ok(Self::with_navigator(
            StepNavigator::new(steps, current)?,
            names,
            handoff,
        ))
    }

    fn with_navigator(
        navigator: StepNavigator,
        names: Arc<CampaignNameStore>,
        handoff: Arc<dyn HandoffStore>,
    ) -> Self {
        Self {
            navigator,
            forms: StepForms::default(),
            name_editor: Editor::Closed,
            names,
            handoff,
        }
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn forms(&self) -> &StepForms {
        &self.forms
    }

    pub fn forms_mut(&mut self) -> &mut StepForms {
        &mut self.forms
    }

    pub fn current_step(&self) -> StepId {
        self.navigator.current_id()
    }

    pub fn active_step(&self) -> ActiveStep<'_> {
        match self.current_step() {
            StepId::Rewards => ActiveStep::Rewards(&self.forms.rewards),
            StepId::HowItLooks => ActiveStep::Appearance {
                picker: &self.forms.appearance,
                customize: self.forms.customize.as_ref(),
            },
            StepId::ReferrerJourney => ActiveStep::Journey(&self.forms.referrer),
            StepId::RefereeJourney => ActiveStep::Journey(&self.forms.referee),
            StepId::Communications => ActiveStep::Communications(&self.forms.communications),
            StepId::Summary => ActiveStep::Summary(self.summary()),
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn advance(&mut self) -> Result<StepId, WizardError> {
        self.navigator.advance().map(|s| s.id)
    }

    pub fn back(&mut self) -> Result<StepId, WizardError> {
        self.navigator.go_back().map(|s| s.id)
    }

    pub fn go_to(&mut self, key: &str) -> Result<StepId, WizardError> {
        self.navigator.go_to(key).map(|s| s.id)
    }

    // ------------------------------------------------------------------------
    // Campaign name
    // ------------------------------------------------------------------------

    pub fn campaign_name(&self) -> String {
        self.names.get()
    }

    pub fn names(&self) -> &Arc<CampaignNameStore> {
        &self.names
    }

    /// Open the header's name dialog seeded with the current name.
    pub fn open_name_editor(&mut self) {
        self.name_editor.open(self.names.get());
    }

    pub fn is_editing_name(&self) -> bool {
        self.name_editor.is_open()
    }

    pub fn name_draft(&self) -> Option<&str> {
        self.name_editor.draft().map(String::as_str)
    }

    pub fn name_draft_mut(&mut self) -> Option<&mut String> {
        self.name_editor.draft_mut()
    }

    /// Commit the name dialog. Blank names are rejected and the dialog stays
    /// open.
    pub fn save_name(&mut self) -> bool {
        let Some(name) = self.name_editor.draft().map(|d| d.trim().to_string()) else {
            return false;
        };
        if name.is_empty() {
            tracing::debug!("Blank campaign name rejected");
            return false;
        }
        self.name_editor.close();
        self.names.set(name);
        true
    }

    pub fn cancel_name_edit(&mut self) {
        self.name_editor.close();
    }

    // ------------------------------------------------------------------------
    // Appearance handoff
    // ------------------------------------------------------------------------

    /// Hand the previewed template to the customize screen and open it.
    pub fn use_selected_template(&mut self) -> HandoffResult<bool> {
        if !self.forms.appearance.use_selected(self.handoff.as_ref())? {
            return Ok(false);
        }
        self.open_customize()?;
        Ok(true)
    }

    /// Open the customize screen with no template.
    pub fn start_from_scratch(&mut self) -> HandoffResult<()> {
        self.forms.appearance.from_scratch(self.handoff.as_ref())?;
        self.open_customize()
    }

    fn open_customize(&mut self) -> HandoffResult<()> {
        self.forms.customize = Some(CustomizeState::load(self.handoff.as_ref())?);
        Ok(())
    }

    /// Summary of the whole session in step order
    pub fn summary(&self) -> CampaignSummary {
        CampaignSummary::build(&self.names.get(), self.navigator.steps(), &self.forms)
    }
}
