//! Journey builder state machine.
//!
//! Each trigger and communication goes through
//! `unedited -> editing -> saved | discarded`. The open dialog is modelled by
//! an [`Editor`]; at most one trigger draft and one communication draft exist.

use chrono::Utc;

use super::presets::JourneyKind;
use super::types::{Communication, JourneyError, Trigger};
use crate::core::editor::Editor;

/// Communication draft scoped to the trigger it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct CommunicationDraft {
    pub trigger_id: String,
    pub communication: Communication,
}

/// Timestamp-based ids that stay unique within one builder even when two
/// are minted in the same millisecond.
#[derive(Debug, Clone, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn next_id(&mut self) -> String {
        let id = Utc::now().timestamp_millis().max(self.last + 1);
        self.last = id;
        id.to_string()
    }
}

/// Ordered set of triggers for one party's journey, plus its dialogs
#[derive(Debug, Clone)]
pub struct JourneyBuilder {
    kind: JourneyKind,
    triggers: Vec<Trigger>,
    trigger_editor: Editor<Trigger>,
    communication_editor: Editor<CommunicationDraft>,
    ids: IdGenerator,
}

impl JourneyBuilder {
    /// Builder seeded with the built-in triggers for `kind`
    pub fn new(kind: JourneyKind) -> Self {
        Self::with_triggers(kind, kind.seed())
    }

    pub fn with_triggers(kind: JourneyKind, triggers: Vec<Trigger>) -> Self {
        Self {
            kind,
            triggers,
            trigger_editor: Editor::Closed,
            communication_editor: Editor::Closed,
            ids: IdGenerator::default(),
        }
    }

    pub fn kind(&self) -> JourneyKind {
        self.kind
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn trigger(&self, id: &str) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.id == id)
    }

    fn unlocked(&self, id: &str) -> Option<&Trigger> {
        match self.trigger(id) {
            Some(trigger) if !trigger.locked => Some(trigger),
            Some(_) => {
                tracing::debug!(trigger_id = id, "Trigger is locked, ignoring");
                None
            }
            None => {
                tracing::debug!(trigger_id = id, "Trigger not found, ignoring");
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Trigger dialog
    // ------------------------------------------------------------------------

    pub fn trigger_draft(&self) -> Option<&Trigger> {
        self.trigger_editor.draft()
    }

    pub fn trigger_draft_mut(&mut self) -> Option<&mut Trigger> {
        self.trigger_editor.draft_mut()
    }

    /// Append a "New Trigger" and open it for editing, closing any open
    /// communication dialog. Returns its id.
    pub fn add_trigger(&mut self) -> String {
        self.communication_editor.close();
        let trigger = Trigger::new(
            self.ids.next_id(),
            "New Trigger",
            self.kind.default_trigger_type(),
        );
        let id = trigger.id.clone();
        tracing::debug!(journey = ?self.kind, trigger_id = %id, "Trigger added");
        self.triggers.push(trigger.clone());
        self.trigger_editor.open(trigger);
        id
    }

    /// Open the trigger dialog with a copy of `id`. No-op when locked or missing.
    pub fn edit_trigger(&mut self, id: &str) -> bool {
        let Some(trigger) = self.unlocked(id).cloned() else {
            return false;
        };
        self.trigger_editor.open(trigger);
        true
    }

    /// Commit the trigger draft over the stored trigger with the same id.
    pub fn save_trigger(&mut self) -> bool {
        let Some(mut draft) = self.trigger_editor.take() else {
            return false;
        };
        if draft.trigger_type != super::types::TriggerType::CustomEvent {
            draft.custom_type = None;
        }
        match self.triggers.iter_mut().find(|t| t.id == draft.id) {
            Some(slot) => {
                tracing::debug!(trigger_id = %draft.id, name = %draft.name, "Trigger saved");
                *slot = draft;
                true
            }
            None => {
                tracing::debug!(trigger_id = %draft.id, "Saved trigger no longer exists");
                false
            }
        }
    }

    pub fn discard_trigger(&mut self) {
        self.trigger_editor.close();
    }

    /// Remove trigger `id`. Locked triggers stay put.
    pub fn delete_trigger(&mut self, id: &str) -> bool {
        if self.unlocked(id).is_none() {
            return false;
        }
        self.triggers.retain(|t| t.id != id);
        if self.trigger_draft().is_some_and(|d| d.id == id) {
            self.trigger_editor.close();
        }
        if self
            .communication_draft()
            .is_some_and(|d| d.trigger_id == id)
        {
            self.communication_editor.close();
        }
        tracing::debug!(trigger_id = id, "Trigger deleted");
        true
    }

    // ------------------------------------------------------------------------
    // Communication dialog
    // ------------------------------------------------------------------------

    pub fn communication_draft(&self) -> Option<&CommunicationDraft> {
        self.communication_editor.draft()
    }

    pub fn communication_draft_mut(&mut self) -> Option<&mut Communication> {
        self.communication_editor
            .draft_mut()
            .map(|d| &mut d.communication)
    }

    /// Open a blank email draft for `trigger_id`.
    pub fn add_communication(&mut self, trigger_id: &str) -> bool {
        if self.unlocked(trigger_id).is_none() {
            return false;
        }
        self.communication_editor.open(CommunicationDraft {
            trigger_id: trigger_id.to_string(),
            communication: Communication::blank(),
        });
        true
    }

    /// Open a copy of an existing communication.
    pub fn edit_communication(&mut self, trigger_id: &str, communication_id: &str) -> bool {
        let Some(communication) = self
            .unlocked(trigger_id)
            .and_then(|t| t.communication(communication_id))
            .cloned()
        else {
            return false;
        };
        self.communication_editor.open(CommunicationDraft {
            trigger_id: trigger_id.to_string(),
            communication,
        });
        true
    }

    /// Commit the communication draft.
    ///
    /// A draft without an id is appended with a fresh id; otherwise the
    /// communication with the same id is replaced in place. Invalid drafts
    /// are rejected and the dialog stays open. `Ok(false)` means there was
    /// nothing to save or the target trigger is gone.
    pub fn save_communication(&mut self) -> Result<bool, JourneyError> {
        let Some(draft) = self.communication_editor.draft() else {
            return Ok(false);
        };
        draft.communication.validate()?;

        let Some(CommunicationDraft {
            trigger_id,
            mut communication,
        }) = self.communication_editor.take()
        else {
            return Ok(false);
        };

        if communication.is_new() {
            communication.id = self.ids.next_id();
        }

        let Some(trigger) = self
            .triggers
            .iter_mut()
            .find(|t| t.id == trigger_id && !t.locked)
        else {
            tracing::debug!(trigger_id = %trigger_id, "Communication target unavailable");
            return Ok(false);
        };

        match trigger
            .communications
            .iter_mut()
            .find(|c| c.id == communication.id)
        {
            Some(slot) => *slot = communication,
            None => trigger.communications.push(communication),
        }
        tracing::debug!(trigger_id = %trigger_id, "Communication saved");
        Ok(true)
    }

    pub fn discard_communication(&mut self) {
        self.communication_editor.close();
    }

    /// Remove a communication from its trigger. No-op when the trigger is locked.
    pub fn delete_communication(&mut self, trigger_id: &str, communication_id: &str) -> bool {
        if self.unlocked(trigger_id).is_none() {
            return false;
        }
        let Some(trigger) = self.triggers.iter_mut().find(|t| t.id == trigger_id) else {
            return false;
        };
        let before = trigger.communications.len();
        trigger.communications.retain(|c| c.id != communication_id);
        let removed = trigger.communications.len() != before;
        if !removed {
            tracing::debug!(trigger_id, communication_id, "Communication not found, ignoring");
        }
        removed
    }

    /// Total number of communications across triggers
    pub fn communication_count(&self) -> usize {
        self.triggers.iter().map(|t| t.communications.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::journey::types::{Channel, Payload, TriggerType};

    fn referrer() -> JourneyBuilder {
        JourneyBuilder::new(JourneyKind::Referrer)
    }

    fn set_subject(builder: &mut JourneyBuilder, value: &str) {
        if let Some(Communication {
            payload: Payload::Email { subject, .. },
            ..
        }) = builder.communication_draft_mut()
        {
            *subject = value.to_string();
        }
    }

    #[test]
    fn test_add_trigger_opens_editor() {
        let mut builder = referrer();
        let id = builder.add_trigger();

        assert_eq!(builder.triggers().len(), 4);
        let added = builder.triggers().last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.name, "New Trigger");
        assert_eq!(added.trigger_type, TriggerType::SystemEvent);
        assert!(added.communications.is_empty());
        assert_eq!(builder.trigger_draft().map(|t| t.id.as_str()), Some(id.as_str()));
    }

    #[test]
    fn test_add_trigger_closes_communication_dialog() {
        let mut builder = referrer();
        assert!(builder.add_communication("2"));
        assert!(builder.communication_draft().is_some());

        let id = builder.add_trigger();
        assert!(builder.communication_draft().is_none());
        assert_eq!(builder.trigger_draft().map(|t| t.id.as_str()), Some(id.as_str()));
        assert_eq!(builder.save_communication(), Ok(false));
    }

    #[test]
    fn test_referee_triggers_default_to_custom_event() {
        let mut builder = JourneyBuilder::new(JourneyKind::Referee);
        builder.add_trigger();
        assert_eq!(
            builder.trigger_draft().unwrap().trigger_type,
            TriggerType::CustomEvent
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut builder = referrer();
        let a = builder.add_trigger();
        let b = builder.add_trigger();
        assert_ne!(a, b);
    }

    #[test]
    fn test_edit_and_save_trigger() {
        let mut builder = referrer();
        assert!(builder.edit_trigger("2"));
        builder.trigger_draft_mut().unwrap().name = "Account Created".to_string();
        assert!(builder.save_trigger());

        assert_eq!(builder.trigger("2").unwrap().name, "Account Created");
        assert!(builder.trigger_draft().is_none());
    }

    #[test]
    fn test_discard_trigger_keeps_stored_value() {
        let mut builder = referrer();
        builder.edit_trigger("2");
        builder.trigger_draft_mut().unwrap().name = "Changed".to_string();
        builder.discard_trigger();

        assert_eq!(builder.trigger("2").unwrap().name, "Sign Up");
        assert!(!builder.save_trigger());
    }

    #[test]
    fn test_save_trigger_drops_custom_type_for_non_custom() {
        let mut builder = referrer();
        builder.edit_trigger("2");
        {
            let draft = builder.trigger_draft_mut().unwrap();
            draft.trigger_type = TriggerType::UserEvent;
            draft.custom_type = Some("stale".to_string());
        }
        builder.save_trigger();
        assert_eq!(builder.trigger("2").unwrap().custom_type, None);
    }

    #[test]
    fn test_locked_trigger_rejects_edit_and_delete() {
        let mut builder = referrer();
        let before = builder.triggers().to_vec();

        assert!(!builder.edit_trigger("1"));
        assert!(builder.trigger_draft().is_none());
        assert!(!builder.delete_trigger("1"));
        assert_eq!(builder.triggers(), before.as_slice());
    }

    #[test]
    fn test_delete_unlocked_trigger_keeps_locked_ones() {
        let mut builder = referrer();
        assert!(builder.delete_trigger("2"));

        let ids: Vec<&str> = builder.triggers().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_missing_trigger_is_noop() {
        let mut builder = referrer();
        assert!(!builder.edit_trigger("404"));
        assert!(!builder.delete_trigger("404"));
        assert!(!builder.add_communication("404"));
    }

    #[test]
    fn test_new_communication_appends_with_fresh_id() {
        let mut builder = referrer();
        assert!(builder.add_communication("2"));
        {
            let draft = builder.communication_draft_mut().unwrap();
            draft.title = "T".to_string();
        }
        set_subject(&mut builder, "Hello");

        assert_eq!(builder.save_communication(), Ok(true));
        let comms = &builder.trigger("2").unwrap().communications;
        assert_eq!(comms.len(), 2);
        assert_eq!(comms[0].id, "2-1");
        assert_eq!(comms[1].title, "T");
        assert!(!comms[1].id.is_empty());
        assert!(builder.communication_draft().is_none());
    }

    #[test]
    fn test_edit_communication_replaces_in_place() {
        let mut builder = referrer();
        builder.add_communication("2");
        set_subject(&mut builder, "Second");
        builder.save_communication().unwrap();

        assert!(builder.edit_communication("2", "2-1"));
        builder.communication_draft_mut().unwrap().title = "Renamed".to_string();
        assert_eq!(builder.save_communication(), Ok(true));

        let comms = &builder.trigger("2").unwrap().communications;
        assert_eq!(comms.len(), 2);
        assert_eq!(comms[0].id, "2-1");
        assert_eq!(comms[0].title, "Renamed");
    }

    #[test]
    fn test_email_without_subject_stays_open() {
        let mut builder = referrer();
        builder.add_communication("2");

        assert_eq!(
            builder.save_communication(),
            Err(JourneyError::MissingField("subject"))
        );
        assert!(builder.communication_draft().is_some());
        assert_eq!(builder.trigger("2").unwrap().communications.len(), 1);

        builder
            .communication_draft_mut()
            .unwrap()
            .set_channel(Channel::Push);
        assert_eq!(builder.save_communication(), Ok(true));
    }

    #[test]
    fn test_locked_trigger_communications_frozen() {
        let mut builder = referrer();
        assert!(!builder.add_communication("1"));
        assert!(!builder.edit_communication("1", "1-1"));
        assert!(!builder.delete_communication("1", "1-1"));
        assert_eq!(builder.trigger("1").unwrap().communications.len(), 1);
    }

    #[test]
    fn test_delete_communication_scoped_to_trigger() {
        let mut builder = referrer();
        assert!(builder.delete_communication("2", "2-1"));
        assert!(builder.trigger("2").unwrap().communications.is_empty());
        assert!(!builder.delete_communication("2", "2-1"));
        assert_eq!(builder.communication_count(), 2);
    }

    #[test]
    fn test_save_without_open_dialog() {
        let mut builder = referrer();
        assert_eq!(builder.save_communication(), Ok(false));
        builder.discard_communication();
        assert!(builder.communication_draft().is_none());
    }
}
