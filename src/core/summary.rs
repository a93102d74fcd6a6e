//! Summary Step
//!
//! Read-only digest of every other step, built from live form state in the
//! configured step order, plus the "invite developers" dialog.

use serde::{Deserialize, Serialize};

use crate::core::campaign::wizard::{StepId, WizardStepDef};
use crate::core::campaign::StepForms;
use crate::core::editor::Editor;
use crate::core::journey::JourneyBuilder;

/// One labelled line of a summary card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

impl SummaryItem {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Summary card for one step, with the route that edits it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    pub title: String,
    pub step: StepId,
    pub route: String,
    pub items: Vec<SummaryItem>,
}

/// Full summary page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub campaign_name: String,
    pub sections: Vec<SummarySection>,
}

impl CampaignSummary {
    /// Build one section per configured step except the summary itself.
    pub fn build(campaign_name: &str, steps: &[WizardStepDef], forms: &StepForms) -> Self {
        let sections = steps
            .iter()
            .filter(|step| step.id != StepId::Summary)
            .map(|step| SummarySection {
                title: step.label.clone(),
                step: step.id,
                route: step.route.clone(),
                items: section_items(step.id, forms),
            })
            .collect();

        Self {
            campaign_name: campaign_name.to_string(),
            sections,
        }
    }

    pub fn headline(&self) -> String {
        format!(
            "You can now publish {} to a staging or production environment.",
            self.campaign_name
        )
    }

    pub fn section(&self, step: StepId) -> Option<&SummarySection> {
        self.sections.iter().find(|s| s.step == step)
    }
}

fn section_items(step: StepId, forms: &StepForms) -> Vec<SummaryItem> {
    match step {
        StepId::Rewards => vec![
            SummaryItem::new("Payout Trigger", forms.rewards.trigger.describe()),
            SummaryItem::new("Referrer Payout", forms.rewards.describe_referrer()),
            SummaryItem::new("Referee Payout", forms.rewards.referee.describe()),
        ],
        StepId::HowItLooks => {
            let template = forms
                .appearance
                .chosen()
                .map(|choice| choice.describe())
                .unwrap_or_else(|| "No template selected".to_string());
            let mut items = vec![SummaryItem::new("Template", template)];
            if let Some(selected) = forms.customize.as_ref().and_then(|c| c.selected()) {
                items.push(SummaryItem::new("Last edited component", selected.name.clone()));
            }
            items
        }
        StepId::ReferrerJourney => journey_items("Referrer Messaging", &forms.referrer),
        StepId::RefereeJourney => journey_items("Referee Messaging", &forms.referee),
        StepId::Communications => vec![
            SummaryItem::new(
                "Referrer Reward Email",
                forms.communications.referrer_email.describe(),
            ),
            SummaryItem::new(
                "Invitee Reward Email",
                forms.communications.invitee_email.describe(),
            ),
            SummaryItem::new(
                "Invitation Message",
                forms
                    .communications
                    .invitation_message
                    .lines()
                    .next()
                    .unwrap_or_default(),
            ),
        ],
        StepId::Summary => Vec::new(),
    }
}

fn journey_items(label: &str, journey: &JourneyBuilder) -> Vec<SummaryItem> {
    let triggers = journey
        .triggers()
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>();
    let messaging = if triggers.is_empty() {
        "No triggers".to_string()
    } else {
        triggers.join(", ")
    };
    vec![
        SummaryItem::new(label, messaging),
        SummaryItem::new(
            "Communications",
            format!("{} messages", journey.communication_count()),
        ),
    ]
}

// ============================================================================
// Invite Developers
// ============================================================================

/// Error type for the developer invite dialog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InviteError {
    #[error("Invite dialog is not open")]
    NotOpen,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

/// "Invite developers" dialog on the summary page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeveloperInvite {
    editor: Editor<String>,
    sent: Vec<String>,
}

impl DeveloperInvite {
    pub fn open(&mut self) {
        self.editor.open(String::new());
    }

    pub fn is_open(&self) -> bool {
        self.editor.is_open()
    }

    pub fn email(&self) -> Option<&str> {
        self.editor.draft().map(String::as_str)
    }

    pub fn email_mut(&mut self) -> Option<&mut String> {
        self.editor.draft_mut()
    }

    pub fn cancel(&mut self) {
        self.editor.close();
    }

    /// Addresses invited so far
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Send the invite. Invalid addresses keep the dialog open.
    pub fn send(&mut self) -> Result<String, InviteError> {
        let email = self
            .editor
            .draft()
            .map(|e| e.trim().to_string())
            .ok_or(InviteError::NotOpen)?;
        if !looks_like_email(&email) {
            return Err(InviteError::InvalidEmail(email));
        }
        self.editor.close();
        tracing::info!(email = %email, "Developer invite sent");
        self.sent.push(email.clone());
        Ok(email)
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
