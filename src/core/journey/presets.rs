//! Seeded journeys.

use serde::{Deserialize, Serialize};

use super::types::{Communication, Trigger, TriggerType};

/// Which party a journey is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyKind {
    Referrer,
    Referee,
}

impl JourneyKind {
    pub fn title(&self) -> &'static str {
        match self {
            JourneyKind::Referrer => "Referrer Journey",
            JourneyKind::Referee => "Referee Journey",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            JourneyKind::Referrer => "Design the communication flow for users who refer others.",
            JourneyKind::Referee => {
                "Design the communication flow for users who were referred by others."
            }
        }
    }

    /// Type given to triggers created with "add trigger"
    pub fn default_trigger_type(&self) -> TriggerType {
        match self {
            JourneyKind::Referrer => TriggerType::SystemEvent,
            JourneyKind::Referee => TriggerType::CustomEvent,
        }
    }

    /// Built-in triggers a fresh journey starts with
    pub fn seed(&self) -> Vec<Trigger> {
        match self {
            JourneyKind::Referrer => referrer_seed(),
            JourneyKind::Referee => referee_seed(),
        }
    }
}

fn referrer_seed() -> Vec<Trigger> {
    vec![
        Trigger::new("1", "First Share", TriggerType::SystemEvent)
            .locked()
            .with_communication(Communication::email(
                "1-1",
                "Share Confirmation",
                "Sent immediately after first share",
                "Thanks for sharing!",
                "Hey {referrer_name}!\n\nThank you for sharing our platform. We appreciate your support!",
            )),
        Trigger::new("2", "Sign Up", TriggerType::SystemEvent).with_communication(
            Communication::email(
                "2-1",
                "Welcome Email",
                "Sent immediately after sign up",
                "Welcome to our platform!",
                "Hey {referrer_name}!\n\nWelcome to our platform. We're excited to have you on board!",
            ),
        ),
        Trigger::new("3", "Reward Earned", TriggerType::SystemEvent)
            .locked()
            .with_communication(Communication::email(
                "3-1",
                "Reward Notification",
                "Sent when a reward is earned",
                "You've earned a reward!",
                "Congratulations {user}! You've earned a reward for your successful referral.",
            )),
    ]
}

fn referee_seed() -> Vec<Trigger> {
    vec![
        Trigger::new("1", "Invite Message", TriggerType::SystemEvent)
            .locked()
            .with_communication(Communication::text(
                "1-1",
                "Invite Message",
                "Sent to potential referees",
                "Hey! I'm loving this platform. If you sign up using this code {referral_code} you'll get a special reward!",
            )),
        Trigger::new("2", "New Reward", TriggerType::SystemEvent)
            .locked()
            .with_communication(Communication::email(
                "2-1",
                "Reward Notification",
                "Sent when a reward is earned",
                "You've earned a reward!",
                "Congratulations! You've earned a reward for signing up through a referral.",
            )),
    ]
}
