//! Journey Domain Types
//!
//! Triggers and the communications they fire, plus the errors raised while
//! editing them.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Triggers
// ============================================================================

/// Kind of event a trigger listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerType {
    #[serde(rename = "User Event")]
    UserEvent,
    #[serde(rename = "System Event")]
    SystemEvent,
    #[serde(rename = "Custom Event")]
    CustomEvent,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::UserEvent => "User Event",
            TriggerType::SystemEvent => "System Event",
            TriggerType::CustomEvent => "Custom Event",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            TriggerType::UserEvent,
            TriggerType::SystemEvent,
            TriggerType::CustomEvent,
        ]
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named event that fires an ordered list of communications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    pub name: String,
    pub trigger_type: TriggerType,
    /// Free-text event name, only meaningful for [`TriggerType::CustomEvent`]
    pub custom_type: Option<String>,
    /// Built-in trigger: not editable, not deletable, communications frozen
    pub locked: bool,
    pub communications: Vec<Communication>,
}

impl Trigger {
    pub fn new(id: impl Into<String>, name: impl Into<String>, trigger_type: TriggerType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trigger_type,
            custom_type: None,
            locked: false,
            communications: Vec::new(),
        }
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn with_communication(mut self, communication: Communication) -> Self {
        self.communications.push(communication);
        self
    }

    pub fn communication(&self, id: &str) -> Option<&Communication> {
        self.communications.iter().find(|c| c.id == id)
    }

    /// Display string for the trigger type, e.g. `Custom Event (cart_abandoned)`
    pub fn type_label(&self) -> String {
        match (&self.trigger_type, &self.custom_type) {
            (TriggerType::CustomEvent, Some(custom)) if !custom.is_empty() => {
                format!("{} ({custom})", self.trigger_type)
            }
            (trigger_type, _) => trigger_type.to_string(),
        }
    }
}

// ============================================================================
// Communications
// ============================================================================

/// Delivery channel of a communication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Push,
    Text,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Push => "push",
            Channel::Text => "text",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Push => "Push Notification",
            Channel::Text => "Text Message",
        }
    }
}

/// Channel-specific message content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Payload {
    Email {
        subject: String,
        body: String,
        button_url: String,
    },
    Push {
        body: String,
    },
    Text {
        body: String,
    },
}

impl Payload {
    pub fn channel(&self) -> Channel {
        match self {
            Payload::Email { .. } => Channel::Email,
            Payload::Push { .. } => Channel::Push,
            Payload::Text { .. } => Channel::Text,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Payload::Email { body, .. } | Payload::Push { body } | Payload::Text { body } => body,
        }
    }

    pub fn body_mut(&mut self) -> &mut String {
        match self {
            Payload::Email { body, .. } | Payload::Push { body } | Payload::Text { body } => body,
        }
    }
}

/// A single message sent when its trigger fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    /// Empty until the communication is first saved
    pub id: String,
    pub title: String,
    pub description: String,
    pub payload: Payload,
}

impl Communication {
    /// Empty email draft, as opened by "add communication"
    pub fn blank() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            payload: Payload::Email {
                subject: String::new(),
                body: String::new(),
                button_url: String::new(),
            },
        }
    }

    pub fn email(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            payload: Payload::Email {
                subject: subject.into(),
                body: body.into(),
                button_url: String::new(),
            },
        }
    }

    pub fn text(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            payload: Payload::Text { body: body.into() },
        }
    }

    pub fn channel(&self) -> Channel {
        self.payload.channel()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Switch channel. The body carries over; email-only fields are dropped
    /// when leaving email and start empty when entering it.
    pub fn set_channel(&mut self, channel: Channel) {
        if self.channel() == channel {
            return;
        }
        let body = std::mem::take(self.payload.body_mut());
        self.payload = match channel {
            Channel::Email => Payload::Email {
                subject: String::new(),
                body,
                button_url: String::new(),
            },
            Channel::Push => Payload::Push { body },
            Channel::Text => Payload::Text { body },
        };
    }

    /// Channel-dependent required fields
    pub fn validate(&self) -> Result<(), JourneyError> {
        match &self.payload {
            Payload::Email { subject, .. } if subject.trim().is_empty() => {
                Err(JourneyError::MissingField("subject"))
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised when committing journey edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    #[error("Required field missing: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_requires_subject() {
        let mut comm = Communication::blank();
        assert_eq!(comm.validate(), Err(JourneyError::MissingField("subject")));

        if let Payload::Email { subject, .. } = &mut comm.payload {
            *subject = "Welcome".to_string();
        }
        assert!(comm.validate().is_ok());
    }

    #[test]
    fn test_push_and_text_need_no_subject() {
        let mut comm = Communication::blank();
        comm.set_channel(Channel::Push);
        assert!(comm.validate().is_ok());
        comm.set_channel(Channel::Text);
        assert!(comm.validate().is_ok());
    }

    #[test]
    fn test_set_channel_keeps_body() {
        let mut comm = Communication::email("1", "Welcome", "", "Hi", "Hello there");
        comm.set_channel(Channel::Text);
        assert_eq!(comm.payload, Payload::Text { body: "Hello there".to_string() });

        comm.set_channel(Channel::Email);
        assert_eq!(comm.payload.body(), "Hello there");
        assert_eq!(comm.validate(), Err(JourneyError::MissingField("subject")));
    }

    #[test]
    fn test_trigger_type_serde_labels() {
        let json = serde_json::to_string(&TriggerType::CustomEvent).unwrap();
        assert_eq!(json, "\"Custom Event\"");
    }

    #[test]
    fn test_type_label_includes_custom_name() {
        let mut trigger = Trigger::new("1", "Checkout", TriggerType::CustomEvent);
        assert_eq!(trigger.type_label(), "Custom Event");
        trigger.custom_type = Some("cart_abandoned".to_string());
        assert_eq!(trigger.type_label(), "Custom Event (cart_abandoned)");
    }
}
