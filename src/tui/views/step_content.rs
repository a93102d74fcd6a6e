//! Active step view: renders the current step's form and applies its keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::appearance::{templates, AppearanceStep, CustomizeState};
use crate::core::campaign::wizard::StepId;
use crate::core::campaign::{ActiveStep, CampaignLayout};
use crate::core::communications::{CommunicationsForm, CommunicationsTab};
use crate::core::journey::{Channel, Communication, JourneyBuilder, Payload, TriggerType};
use crate::core::rewards::{
    Party, PayoutField, PayoutMethod, RewardsForm, RewardsStage, TriggerKind,
};
use crate::core::summary::{CampaignSummary, DeveloperInvite};
use crate::tui::events::NotificationLevel;
use crate::tui::theme;

/// Communication dialog field receiving typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommField {
    #[default]
    Title,
    Subject,
    Body,
}

/// Trigger dialog field receiving typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerField {
    #[default]
    Name,
    CustomType,
}

/// Text field of the rewards and communications forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    CustomEventName,
    Payout(Party, PayoutField),
    RewardLimit,
    EmailSubject(Party),
    EmailBody(Party),
    InvitationMessage,
}

impl FormField {
    pub fn label(&self) -> String {
        match self {
            FormField::CustomEventName => "Event name".to_string(),
            FormField::Payout(Party::Referrer, field) => format!("Referrer {}", field.label()),
            FormField::Payout(Party::Referee, field) => format!("Invitee {}", field.label()),
            FormField::RewardLimit => "Max rewards per referrer".to_string(),
            FormField::EmailSubject(_) => "Subject".to_string(),
            FormField::EmailBody(_) => "Body".to_string(),
            FormField::InvitationMessage => "Invitation message".to_string(),
        }
    }
}

/// Text typed into a form field, applied on Enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub field: FormField,
    pub buffer: String,
}

/// Cursor state of the step views
#[derive(Debug, Clone, Default)]
pub struct StepViewState {
    pub trigger_cursor: usize,
    /// Message under the cursor within the selected trigger
    pub comm_cursor: usize,
    pub component_cursor: usize,
    /// Form field under the cursor on the rewards and communications steps
    pub field_cursor: usize,
    pub comm_field: CommField,
    pub trigger_field: TriggerField,
    pub editing: Option<FieldEdit>,
}

impl StepViewState {
    /// Reset cursors when the active step changes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of offering a key to the active step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Ignored,
    Consumed,
    Notify(String, NotificationLevel),
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Whether the active step has a text dialog open that consumes every key.
pub fn captures_text(layout: &CampaignLayout, view: &StepViewState) -> bool {
    if view.editing.is_some() {
        return true;
    }
    let forms = layout.forms();
    match layout.current_step() {
        StepId::ReferrerJourney => journey_dialog_open(&forms.referrer),
        StepId::RefereeJourney => journey_dialog_open(&forms.referee),
        StepId::Summary => forms.invite.is_open(),
        _ => false,
    }
}

fn journey_dialog_open(builder: &JourneyBuilder) -> bool {
    builder.trigger_draft().is_some() || builder.communication_draft().is_some()
}

// ============================================================================
// Input
// ============================================================================

pub fn handle_key(
    layout: &mut CampaignLayout,
    view: &mut StepViewState,
    key: KeyEvent,
) -> StepOutcome {
    match layout.current_step() {
        StepId::Rewards => rewards_key(&mut layout.forms_mut().rewards, view, key),
        StepId::HowItLooks => appearance_key(layout, view, key),
        StepId::ReferrerJourney => journey_key(&mut layout.forms_mut().referrer, view, key),
        StepId::RefereeJourney => journey_key(&mut layout.forms_mut().referee, view, key),
        StepId::Communications => {
            communications_key(&mut layout.forms_mut().communications, view, key)
        }
        StepId::Summary => summary_key(&mut layout.forms_mut().invite, key),
    }
}

// ── Form fields ─────────────────────────────────────────────────────────────

/// Cursor movement and edit start over a list of form fields.
fn field_list_key(
    view: &mut StepViewState,
    key: KeyEvent,
    fields: &[FormField],
    value: impl Fn(FormField) -> String,
) -> StepOutcome {
    view.field_cursor = view.field_cursor.min(fields.len().saturating_sub(1));
    match key.code {
        KeyCode::Down | KeyCode::Char('j') if !fields.is_empty() => {
            view.field_cursor = (view.field_cursor + 1).min(fields.len() - 1);
            StepOutcome::Consumed
        }
        KeyCode::Up | KeyCode::Char('k') if !fields.is_empty() => {
            view.field_cursor = view.field_cursor.saturating_sub(1);
            StepOutcome::Consumed
        }
        KeyCode::Enter => match fields.get(view.field_cursor) {
            Some(&field) => {
                view.editing = Some(FieldEdit {
                    field,
                    buffer: value(field),
                });
                StepOutcome::Consumed
            }
            None => StepOutcome::Ignored,
        },
        _ => StepOutcome::Ignored,
    }
}

/// Typing into the open field. Enter applies, Alt+Enter inserts a line
/// break, Esc cancels. Rejected input keeps the field open.
fn field_edit_key(
    view: &mut StepViewState,
    key: KeyEvent,
    apply: impl FnOnce(FormField, &str) -> bool,
) -> StepOutcome {
    let Some(edit) = view.editing.as_mut() else {
        return StepOutcome::Ignored;
    };
    match key.code {
        KeyCode::Esc => view.editing = None,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => edit.buffer.push('\n'),
        KeyCode::Enter => {
            let field = edit.field;
            if !apply(field, &edit.buffer) {
                return StepOutcome::Notify(
                    format!("Invalid value for {}", field.label()),
                    NotificationLevel::Warning,
                );
            }
            view.editing = None;
        }
        KeyCode::Backspace => {
            edit.buffer.pop();
        }
        KeyCode::Char(c) => edit.buffer.push(c),
        _ => {}
    }
    StepOutcome::Consumed
}

fn rewards_fields(form: &RewardsForm) -> Vec<FormField> {
    let mut fields = Vec::new();
    if form.trigger.kind() == TriggerKind::Custom {
        fields.push(FormField::CustomEventName);
    }
    fields.extend(
        form.referrer
            .fields()
            .iter()
            .map(|f| FormField::Payout(Party::Referrer, *f)),
    );
    if form.limit.enabled {
        fields.push(FormField::RewardLimit);
    }
    fields.extend(
        form.referee
            .fields()
            .iter()
            .map(|f| FormField::Payout(Party::Referee, *f)),
    );
    fields
}

fn rewards_value(form: &RewardsForm, field: FormField) -> String {
    match field {
        FormField::CustomEventName => form
            .trigger
            .custom_event_name()
            .unwrap_or_default()
            .to_string(),
        FormField::Payout(party, f) => form.payout(party).field_value(f).unwrap_or_default(),
        FormField::RewardLimit => form.limit.max_per_referrer.to_string(),
        _ => String::new(),
    }
}

fn apply_rewards(form: &mut RewardsForm, field: FormField, input: &str) -> bool {
    match field {
        FormField::CustomEventName => form.set_custom_event_name(input.trim()),
        FormField::Payout(party, f) => form.set_payout_field(party, f, input),
        FormField::RewardLimit => form.set_limit_input(input),
        _ => false,
    }
}

fn tab_party(tab: CommunicationsTab) -> Party {
    match tab {
        CommunicationsTab::Referrer => Party::Referrer,
        CommunicationsTab::Invitee => Party::Referee,
    }
}

fn communications_fields(form: &CommunicationsForm) -> Vec<FormField> {
    let party = tab_party(form.tab);
    let mut fields = Vec::new();
    if form.email(party).enabled {
        fields.push(FormField::EmailSubject(party));
        fields.push(FormField::EmailBody(party));
    }
    if form.tab == CommunicationsTab::Referrer {
        fields.push(FormField::InvitationMessage);
    }
    fields
}

fn communications_value(form: &CommunicationsForm, field: FormField) -> String {
    match field {
        FormField::EmailSubject(party) => form.email(party).subject.clone(),
        FormField::EmailBody(party) => form.email(party).body.clone(),
        FormField::InvitationMessage => form.invitation_message.clone(),
        _ => String::new(),
    }
}

fn apply_communications(form: &mut CommunicationsForm, field: FormField, input: &str) -> bool {
    match field {
        FormField::EmailSubject(_) if input.trim().is_empty() => false,
        FormField::EmailSubject(party) => {
            form.email_mut(party).subject = input.trim().to_string();
            true
        }
        FormField::EmailBody(party) => {
            form.email_mut(party).body = input.to_string();
            true
        }
        FormField::InvitationMessage => {
            form.invitation_message = input.to_string();
            true
        }
        _ => false,
    }
}

// ── Steps ───────────────────────────────────────────────────────────────────

fn rewards_key(form: &mut RewardsForm, view: &mut StepViewState, key: KeyEvent) -> StepOutcome {
    if view.editing.is_some() {
        return field_edit_key(view, key, |field, input| apply_rewards(form, field, input));
    }
    let fields = rewards_fields(form);
    let outcome = field_list_key(view, key, &fields, |field| rewards_value(form, field));
    if outcome != StepOutcome::Ignored {
        return outcome;
    }

    match key.code {
        KeyCode::Char('t') => {
            form.select_trigger(cycle(&TriggerKind::all(), form.trigger.kind()));
        }
        KeyCode::Char('r') => {
            form.select_method(
                Party::Referrer,
                cycle(&PayoutMethod::all(), form.referrer.method()),
            );
        }
        KeyCode::Char('f') => {
            form.select_method(
                Party::Referee,
                cycle(&PayoutMethod::all(), form.referee.method()),
            );
        }
        KeyCode::Char('l') => form.set_limit_enabled(!form.limit.enabled),
        KeyCode::Tab => {
            form.next_stage();
        }
        KeyCode::BackTab => {
            form.previous_stage();
        }
        _ => return StepOutcome::Ignored,
    }
    StepOutcome::Consumed
}

fn appearance_key(
    layout: &mut CampaignLayout,
    view: &mut StepViewState,
    key: KeyEvent,
) -> StepOutcome {
    let preview_open = layout.forms().appearance.is_preview_open();
    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            match templates().get(idx) {
                Some(template) => {
                    layout.forms_mut().appearance.select(&template.id);
                    StepOutcome::Consumed
                }
                None => StepOutcome::Ignored,
            }
        }
        KeyCode::Esc if preview_open => {
            layout.forms_mut().appearance.close_preview();
            StepOutcome::Consumed
        }
        KeyCode::Enter if preview_open => match layout.use_selected_template() {
            Ok(_) => {
                view.component_cursor = 0;
                StepOutcome::Notify("Template applied".to_string(), NotificationLevel::Info)
            }
            Err(e) => StepOutcome::Notify(
                format!("Template handoff failed: {e}"),
                NotificationLevel::Error,
            ),
        },
        KeyCode::Char('s') => match layout.start_from_scratch() {
            Ok(()) => {
                view.component_cursor = 0;
                StepOutcome::Consumed
            }
            Err(e) => StepOutcome::Notify(
                format!("Template handoff failed: {e}"),
                NotificationLevel::Error,
            ),
        },
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Up | KeyCode::Char('k') | KeyCode::Char(' ') | KeyCode::Enter => {
            let Some(customize) = layout.forms_mut().customize.as_mut() else {
                return StepOutcome::Ignored;
            };
            customize_key(customize, view, key)
        }
        _ => StepOutcome::Ignored,
    }
}

fn customize_key(
    customize: &mut CustomizeState,
    view: &mut StepViewState,
    key: KeyEvent,
) -> StepOutcome {
    let rows = customize.visible_rows().len();
    let row_id = customize
        .visible_rows()
        .get(view.component_cursor)
        .map(|(_, node)| node.id.clone());
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view.component_cursor = (view.component_cursor + 1).min(rows.saturating_sub(1));
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.component_cursor = view.component_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            if let Some(id) = row_id {
                customize.toggle(&id);
            }
            // Collapsing may hide the row under the cursor
            let rows = customize.visible_rows().len();
            view.component_cursor = view.component_cursor.min(rows.saturating_sub(1));
        }
        KeyCode::Enter => {
            if let Some(id) = row_id {
                customize.select(&id);
            }
        }
        _ => return StepOutcome::Ignored,
    }
    StepOutcome::Consumed
}

fn journey_key(
    builder: &mut JourneyBuilder,
    view: &mut StepViewState,
    key: KeyEvent,
) -> StepOutcome {
    if builder.trigger_draft().is_some() {
        return trigger_dialog_key(builder, view, key);
    }
    if builder.communication_draft().is_some() {
        return communication_dialog_key(builder, view, key);
    }

    let count = builder.triggers().len();
    view.trigger_cursor = view.trigger_cursor.min(count.saturating_sub(1));
    let selected = builder.triggers().get(view.trigger_cursor);
    let selected_id = selected.map(|t| t.id.clone());
    let messages = selected.map_or(0, |t| t.communications.len());
    view.comm_cursor = view.comm_cursor.min(messages.saturating_sub(1));
    let message_id = selected
        .and_then(|t| t.communications.get(view.comm_cursor))
        .map(|c| c.id.clone());
    let locked = || {
        StepOutcome::Notify(
            "Built-in triggers cannot be changed".to_string(),
            NotificationLevel::Warning,
        )
    };

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view.trigger_cursor = (view.trigger_cursor + 1).min(count.saturating_sub(1));
            view.comm_cursor = 0;
            StepOutcome::Consumed
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.trigger_cursor = view.trigger_cursor.saturating_sub(1);
            view.comm_cursor = 0;
            StepOutcome::Consumed
        }
        KeyCode::Tab => {
            view.comm_cursor = (view.comm_cursor + 1).min(messages.saturating_sub(1));
            StepOutcome::Consumed
        }
        KeyCode::BackTab => {
            view.comm_cursor = view.comm_cursor.saturating_sub(1);
            StepOutcome::Consumed
        }
        KeyCode::Char('a') => {
            builder.add_trigger();
            view.trigger_cursor = builder.triggers().len().saturating_sub(1);
            view.comm_cursor = 0;
            view.trigger_field = TriggerField::Name;
            StepOutcome::Consumed
        }
        KeyCode::Enter => match selected_id {
            Some(id) if builder.edit_trigger(&id) => {
                view.trigger_field = TriggerField::Name;
                StepOutcome::Consumed
            }
            Some(_) => locked(),
            None => StepOutcome::Ignored,
        },
        KeyCode::Char('d') => match selected_id {
            Some(id) if builder.delete_trigger(&id) => {
                view.trigger_cursor = view.trigger_cursor.saturating_sub(1);
                view.comm_cursor = 0;
                StepOutcome::Consumed
            }
            Some(_) => locked(),
            None => StepOutcome::Ignored,
        },
        KeyCode::Char('c') => match selected_id {
            Some(id) if builder.add_communication(&id) => {
                view.comm_field = CommField::Title;
                StepOutcome::Consumed
            }
            Some(_) => locked(),
            None => StepOutcome::Ignored,
        },
        KeyCode::Char('o') => {
            let (Some(trigger_id), Some(message_id)) = (selected_id, message_id) else {
                return StepOutcome::Ignored;
            };
            if builder.edit_communication(&trigger_id, &message_id) {
                view.comm_field = CommField::Title;
                StepOutcome::Consumed
            } else {
                locked()
            }
        }
        KeyCode::Char('x') => {
            let (Some(trigger_id), Some(message_id)) = (selected_id, message_id) else {
                return StepOutcome::Ignored;
            };
            if builder.delete_communication(&trigger_id, &message_id) {
                view.comm_cursor = view.comm_cursor.saturating_sub(1);
                StepOutcome::Consumed
            } else {
                locked()
            }
        }
        _ => StepOutcome::Ignored,
    }
}

/// Tab moves between the name and, for custom events, the event type.
/// F2 cycles the trigger type.
fn trigger_dialog_key(
    builder: &mut JourneyBuilder,
    view: &mut StepViewState,
    key: KeyEvent,
) -> StepOutcome {
    match key.code {
        KeyCode::Esc => {
            builder.discard_trigger();
            view.trigger_field = TriggerField::Name;
        }
        KeyCode::Enter => {
            builder.save_trigger();
            view.trigger_field = TriggerField::Name;
        }
        _ => {
            let Some(draft) = builder.trigger_draft_mut() else {
                return StepOutcome::Ignored;
            };
            let custom = draft.trigger_type == TriggerType::CustomEvent;
            match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    view.trigger_field = match view.trigger_field {
                        TriggerField::Name if custom => TriggerField::CustomType,
                        _ => TriggerField::Name,
                    };
                }
                KeyCode::F(2) => {
                    draft.trigger_type = cycle(&TriggerType::all(), draft.trigger_type);
                    if draft.trigger_type != TriggerType::CustomEvent {
                        view.trigger_field = TriggerField::Name;
                    }
                }
                KeyCode::Backspace => {
                    let text = match view.trigger_field {
                        TriggerField::Name => Some(&mut draft.name),
                        TriggerField::CustomType => draft.custom_type.as_mut(),
                    };
                    if let Some(text) = text {
                        text.pop();
                    }
                }
                KeyCode::Char(c) => match view.trigger_field {
                    TriggerField::Name => draft.name.push(c),
                    TriggerField::CustomType => {
                        draft.custom_type.get_or_insert_with(String::new).push(c)
                    }
                },
                _ => {}
            }
        }
    }
    StepOutcome::Consumed
}

fn comm_field_mut(comm: &mut Communication, field: CommField) -> Option<&mut String> {
    match (field, &mut comm.payload) {
        (CommField::Title, _) => Some(&mut comm.title),
        (CommField::Subject, Payload::Email { subject, .. }) => Some(subject),
        (CommField::Subject, _) => None,
        (CommField::Body, payload) => Some(payload.body_mut()),
    }
}

fn next_comm_field(field: CommField, channel: Channel) -> CommField {
    match (field, channel) {
        (CommField::Title, Channel::Email) => CommField::Subject,
        (CommField::Title, _) | (CommField::Subject, _) => CommField::Body,
        (CommField::Body, _) => CommField::Title,
    }
}

fn communication_dialog_key(
    builder: &mut JourneyBuilder,
    view: &mut StepViewState,
    key: KeyEvent,
) -> StepOutcome {
    match key.code {
        KeyCode::Esc => {
            builder.discard_communication();
            StepOutcome::Consumed
        }
        KeyCode::Enter => match builder.save_communication() {
            Ok(true) => StepOutcome::Notify(
                "Communication saved".to_string(),
                NotificationLevel::Success,
            ),
            Ok(false) => StepOutcome::Consumed,
            Err(e) => StepOutcome::Notify(e.to_string(), NotificationLevel::Warning),
        },
        _ => {
            let Some(draft) = builder.communication_draft_mut() else {
                return StepOutcome::Ignored;
            };
            match key.code {
                KeyCode::Tab => view.comm_field = next_comm_field(view.comm_field, draft.channel()),
                KeyCode::F(2) => {
                    let all = [Channel::Email, Channel::Push, Channel::Text];
                    draft.set_channel(cycle(&all, draft.channel()));
                    if draft.channel() != Channel::Email && view.comm_field == CommField::Subject {
                        view.comm_field = CommField::Body;
                    }
                }
                KeyCode::Backspace => {
                    if let Some(text) = comm_field_mut(draft, view.comm_field) {
                        text.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(text) = comm_field_mut(draft, view.comm_field) {
                        text.push(c);
                    }
                }
                _ => {}
            }
            StepOutcome::Consumed
        }
    }
}

fn communications_key(
    form: &mut CommunicationsForm,
    view: &mut StepViewState,
    key: KeyEvent,
) -> StepOutcome {
    if view.editing.is_some() {
        return field_edit_key(view, key, |field, input| {
            apply_communications(form, field, input)
        });
    }
    let fields = communications_fields(form);
    let outcome = field_list_key(view, key, &fields, |field| communications_value(form, field));
    if outcome != StepOutcome::Ignored {
        return outcome;
    }

    let party = tab_party(form.tab);
    match key.code {
        KeyCode::Tab => {
            form.tab = match form.tab {
                CommunicationsTab::Referrer => CommunicationsTab::Invitee,
                CommunicationsTab::Invitee => CommunicationsTab::Referrer,
            };
            view.field_cursor = 0;
            StepOutcome::Consumed
        }
        KeyCode::Char('w') => {
            let enabled = form.email(party).enabled;
            form.set_email_enabled(party, !enabled);
            StepOutcome::Consumed
        }
        KeyCode::Char('t') => {
            if form.request_test_email(party) {
                StepOutcome::Notify(
                    "Test email will be sent to your account email".to_string(),
                    NotificationLevel::Info,
                )
            } else {
                StepOutcome::Notify(
                    "Email disabled, nothing to send".to_string(),
                    NotificationLevel::Warning,
                )
            }
        }
        _ => StepOutcome::Ignored,
    }
}

fn summary_key(invite: &mut DeveloperInvite, key: KeyEvent) -> StepOutcome {
    if !invite.is_open() {
        if key.code == KeyCode::Char('i') {
            invite.open();
            return StepOutcome::Consumed;
        }
        return StepOutcome::Ignored;
    }
    match key.code {
        KeyCode::Esc => invite.cancel(),
        KeyCode::Enter => {
            return match invite.send() {
                Ok(email) => StepOutcome::Notify(
                    format!("Invite sent to {email}"),
                    NotificationLevel::Success,
                ),
                Err(e) => StepOutcome::Notify(e.to_string(), NotificationLevel::Warning),
            };
        }
        KeyCode::Backspace => {
            if let Some(email) = invite.email_mut() {
                email.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(email) = invite.email_mut() {
                email.push(c);
            }
        }
        _ => {}
    }
    StepOutcome::Consumed
}

// ============================================================================
// Rendering
// ============================================================================

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), theme::heading()))
}

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), theme::muted()),
        Span::raw(value.into()),
    ])
}

fn hint(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (key, action) in pairs {
        spans.push(Span::styled(key.to_string(), theme::key_hint()));
        spans.push(Span::raw(format!(":{action}  ")));
    }
    Line::from(spans)
}

fn input(label: &str, value: &str, focused: bool) -> Line<'static> {
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("  {label}: "), theme::muted()),
        Span::styled(format!("{value}{cursor}"), theme::input(focused)),
    ])
}

/// One row per form field, the cursor row marked and the open field showing
/// its buffer. Multi-line values continue on indented rows.
fn field_rows(
    fields: &[FormField],
    view: &StepViewState,
    value: impl Fn(FormField) -> String,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let marker = if i == view.field_cursor { "›" } else { " " };
        let (text, focused) = match &view.editing {
            Some(edit) if edit.field == *field => (format!("{}▏", edit.buffer), true),
            _ => (value(*field), false),
        };
        let mut rows = text.split('\n');
        let first = rows.next().unwrap_or_default().to_string();
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), theme::highlight()),
            Span::styled(format!("{}: ", field.label()), theme::muted()),
            Span::styled(first, theme::input(focused)),
        ]));
        for row in rows {
            lines.push(Line::from(Span::styled(
                format!("      {row}"),
                theme::input(focused),
            )));
        }
    }
    lines
}

fn edit_hint() -> Line<'static> {
    hint(&[("Enter", "apply"), ("Alt+Enter", "new line"), ("Esc", "cancel")])
}

/// Lines rendered for the active step.
pub fn content_lines(active: &ActiveStep<'_>, view: &StepViewState) -> Vec<Line<'static>> {
    match active {
        ActiveStep::Rewards(form) => rewards_lines(form, view),
        ActiveStep::Appearance { picker, customize } => appearance_lines(picker, *customize, view),
        ActiveStep::Journey(builder) => journey_lines(builder, view),
        ActiveStep::Communications(form) => communications_lines(form, view),
        ActiveStep::Summary(summary) => summary_lines(summary),
    }
}

fn rewards_lines(form: &RewardsForm, view: &StepViewState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let stages: Vec<Span<'static>> = RewardsStage::ALL
        .iter()
        .map(|stage| {
            let style = theme::step_status(form.stage_status(*stage));
            Span::styled(format!(" {} ", stage.label()), style)
        })
        .collect();
    lines.push(Line::from(stages));
    lines.push(Line::raw(""));

    lines.push(heading("Trigger"));
    lines.push(field("Event", form.trigger.describe()));
    lines.push(field("Details", form.trigger.kind().description()));
    lines.push(Line::raw(""));

    lines.push(heading("Referrer reward"));
    lines.push(field("Method", form.referrer.method().label()));
    lines.push(field("Payout", form.describe_referrer()));
    let limit = if form.limit.enabled {
        format!("on, max {} per referrer", form.limit.max_per_referrer)
    } else {
        "off".to_string()
    };
    lines.push(field("Reward limit", limit));
    lines.push(Line::raw(""));

    lines.push(heading("Invitee reward"));
    lines.push(field("Method", form.referee.method().label()));
    lines.push(field("Payout", form.referee.describe()));
    lines.push(Line::raw(""));

    let fields = rewards_fields(form);
    if !fields.is_empty() {
        lines.push(heading("Details"));
        lines.extend(field_rows(&fields, view, |f| rewards_value(form, f)));
        lines.push(Line::raw(""));
    }

    if view.editing.is_some() {
        lines.push(edit_hint());
    } else {
        lines.push(hint(&[
            ("t", "trigger"),
            ("r", "referrer method"),
            ("f", "invitee method"),
            ("l", "limit"),
            ("j/k", "field"),
            ("Enter", "edit"),
            ("Tab", "stage"),
        ]));
    }
    lines
}

fn appearance_lines(
    picker: &AppearanceStep,
    customize: Option<&CustomizeState>,
    view: &StepViewState,
) -> Vec<Line<'static>> {
    let mut lines = vec![heading("Templates")];
    for (i, template) in templates().iter().enumerate() {
        let selected = picker.selected().is_some_and(|t| t.id == template.id);
        let style = if selected {
            theme::highlight()
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", i + 1), theme::key_hint()),
            Span::styled(template.name.clone(), style),
            Span::styled(format!("  {}", template.description), theme::muted()),
        ]));
    }

    if let (true, Some(template)) = (picker.is_preview_open(), picker.selected()) {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("  Preview: {}  (Enter: use template, Esc: close)", template.name),
            theme::highlight(),
        )));
    }

    if let Some(customize) = customize {
        lines.push(Line::raw(""));
        let base = customize
            .base()
            .map(|b| b.describe())
            .unwrap_or_else(|| "No template".to_string());
        lines.push(heading(format!("Customize ({base})")));
        let selected = customize.selected().map(|n| n.id.clone());
        for (i, (depth, node)) in customize.visible_rows().into_iter().enumerate() {
            let fold = match (node.has_children(), node.expanded) {
                (true, true) => "▾ ",
                (true, false) => "▸ ",
                _ => "  ",
            };
            let cursor = if i == view.component_cursor { "›" } else { " " };
            let mut style = Style::default();
            if selected.as_deref() == Some(node.id.as_str()) {
                style = style.add_modifier(Modifier::BOLD).fg(theme::PRIMARY_LIGHT);
            }
            lines.push(Line::from(vec![
                Span::styled(format!(" {cursor} "), theme::highlight()),
                Span::raw("  ".repeat(depth)),
                Span::raw(fold),
                Span::styled(node.name.clone(), style),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(hint(&[
        ("1-3", "preview"),
        ("s", "from scratch"),
        ("j/k", "component"),
        ("Space", "expand"),
        ("Enter", "select"),
    ]));
    lines
}

fn journey_lines(builder: &JourneyBuilder, view: &StepViewState) -> Vec<Line<'static>> {
    let kind = builder.kind();
    let mut lines = vec![
        heading(kind.title()),
        Line::from(Span::styled(format!("  {}", kind.description()), theme::muted())),
        Line::raw(""),
    ];

    for (i, trigger) in builder.triggers().iter().enumerate() {
        let cursor = if i == view.trigger_cursor { "›" } else { " " };
        let lock = if trigger.locked { " 🔒" } else { "" };
        let name_style = if trigger.locked {
            theme::dim()
        } else {
            theme::title()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {cursor} "), theme::highlight()),
            Span::styled(trigger.name.clone(), name_style),
            Span::styled(format!("  {}{lock}", trigger.type_label()), theme::muted()),
        ]));
        for (j, comm) in trigger.communications.iter().enumerate() {
            let marker = if i == view.trigger_cursor && j == view.comm_cursor {
                "»"
            } else {
                " "
            };
            lines.push(Line::from(vec![
                Span::styled(format!("   {marker} "), theme::highlight()),
                Span::styled(format!("[{}] ", comm.channel().as_str()), theme::key_hint()),
                Span::raw(comm.title.clone()),
                Span::styled(format!("  {}", comm.description), theme::muted()),
            ]));
        }
    }

    if let Some(draft) = builder.trigger_draft() {
        lines.push(Line::raw(""));
        lines.push(heading("Edit trigger"));
        lines.push(input("Name", &draft.name, view.trigger_field == TriggerField::Name));
        lines.push(field("Type", draft.trigger_type.as_str()));
        if draft.trigger_type == TriggerType::CustomEvent {
            lines.push(input(
                "Event type",
                draft.custom_type.as_deref().unwrap_or_default(),
                view.trigger_field == TriggerField::CustomType,
            ));
        }
        lines.push(hint(&[
            ("Tab", "field"),
            ("F2", "type"),
            ("Enter", "save"),
            ("Esc", "discard"),
        ]));
    } else if let Some(draft) = builder.communication_draft() {
        let comm = &draft.communication;
        lines.push(Line::raw(""));
        lines.push(heading(if comm.is_new() {
            "New communication"
        } else {
            "Edit communication"
        }));
        lines.push(field("Channel", comm.channel().label()));
        lines.push(input("Title", &comm.title, view.comm_field == CommField::Title));
        if let Payload::Email { subject, .. } = &comm.payload {
            lines.push(input("Subject", subject, view.comm_field == CommField::Subject));
        }
        lines.push(input("Body", comm.payload.body(), view.comm_field == CommField::Body));
        lines.push(hint(&[
            ("Tab", "field"),
            ("F2", "channel"),
            ("Enter", "save"),
            ("Esc", "discard"),
        ]));
    } else {
        lines.push(Line::raw(""));
        lines.push(hint(&[
            ("a", "add trigger"),
            ("Enter", "edit"),
            ("d", "delete"),
            ("Tab", "next message"),
            ("c", "add message"),
            ("o", "edit message"),
            ("x", "remove message"),
        ]));
    }
    lines
}

fn communications_lines(form: &CommunicationsForm, view: &StepViewState) -> Vec<Line<'static>> {
    let party = tab_party(form.tab);
    let title = match form.tab {
        CommunicationsTab::Referrer => "Referrer",
        CommunicationsTab::Invitee => "Invitee",
    };
    let email = form.email(party);
    let mut lines = vec![
        heading("Communications"),
        Line::from(Span::styled(
            "  Configure the communication flows for your referral campaign.",
            theme::muted(),
        )),
        Line::raw(""),
        heading(format!("{title} reward email")),
        field("Status", if email.enabled { "enabled" } else { "disabled" }),
    ];
    if !email.enabled {
        lines.push(Line::from(Span::styled(
            "  Email disabled. Webhook will be triggered instead.",
            theme::muted(),
        )));
    }
    let fields = communications_fields(form);
    lines.extend(field_rows(&fields, view, |f| communications_value(form, f)));
    lines.push(Line::raw(""));
    if view.editing.is_some() {
        lines.push(edit_hint());
    } else {
        lines.push(hint(&[
            ("Tab", "party"),
            ("j/k", "field"),
            ("Enter", "edit"),
            ("w", "email on/off"),
            ("t", "test email"),
        ]));
    }
    lines
}

fn summary_lines(summary: &CampaignSummary) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Summary"),
        Line::from(Span::styled(format!("  {}", summary.headline()), theme::muted())),
        Line::raw(""),
    ];
    for section in &summary.sections {
        lines.push(heading(section.title.clone()));
        for item in &section.items {
            lines.push(field(&item.label, item.value.clone()));
        }
        lines.push(Line::raw(""));
    }
    lines.push(hint(&[("u", "publish"), ("i", "invite developers")]));
    lines
}

fn invite_lines(invite: &DeveloperInvite) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(last) = invite.sent().last() {
        lines.push(field("Last invite", last.clone()));
    }
    if let Some(email) = invite.email() {
        lines.push(Line::raw(""));
        lines.push(heading("Invite developers"));
        lines.push(input("Email", email, true));
        lines.push(hint(&[("Enter", "send"), ("Esc", "cancel")]));
    }
    lines
}

/// Render the active step. `extra` lines are appended below the form.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    layout: &CampaignLayout,
    view: &StepViewState,
    extra: Vec<Line<'static>>,
) {
    let step = layout.navigator().current();
    let mut lines = content_lines(&layout.active_step(), view);
    if layout.current_step() == StepId::Summary {
        lines.extend(invite_lines(&layout.forms().invite));
    }
    lines.extend(extra);

    frame.render_widget(
        Paragraph::new(lines)
            .block(theme::block_focused(&step.label))
            .wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;

    use crate::core::appearance::MemoryHandoff;
    use crate::core::campaign::wizard::StepPreset;
    use crate::core::campaign::CampaignNameStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn layout_at(step: &str) -> CampaignLayout {
        layout_in(StepPreset::Journeys, step)
    }

    fn layout_in(preset: StepPreset, step: &str) -> CampaignLayout {
        CampaignLayout::resume(
            preset.steps(),
            step,
            Arc::new(CampaignNameStore::new()),
            Arc::new(MemoryHandoff::new()),
        )
        .unwrap()
    }

    fn press(layout: &mut CampaignLayout, view: &mut StepViewState, code: KeyCode) -> StepOutcome {
        handle_key(layout, view, key(code))
    }

    fn type_text(layout: &mut CampaignLayout, view: &mut StepViewState, text: &str) {
        for c in text.chars() {
            handle_key(layout, view, key(KeyCode::Char(c)));
        }
    }

    fn clear_field(layout: &mut CampaignLayout, view: &mut StepViewState) {
        let len = view.editing.as_ref().map_or(0, |e| e.buffer.chars().count());
        for _ in 0..len {
            handle_key(layout, view, key(KeyCode::Backspace));
        }
    }

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_rewards_keys_cycle_trigger_and_method() {
        let mut layout = layout_at("rewards");
        let mut view = StepViewState::default();

        assert_eq!(
            handle_key(&mut layout, &mut view, key(KeyCode::Char('t'))),
            StepOutcome::Consumed
        );
        assert_eq!(layout.forms().rewards.trigger.kind(), TriggerKind::Subscription);

        handle_key(&mut layout, &mut view, key(KeyCode::Char('r')));
        assert_eq!(layout.forms().rewards.referrer.method(), PayoutMethod::Paypal);

        assert_eq!(
            handle_key(&mut layout, &mut view, key(KeyCode::Char('n'))),
            StepOutcome::Ignored
        );
    }

    #[test]
    fn test_locked_trigger_edit_notifies() {
        let mut layout = layout_at("referrer-journey");
        let mut view = StepViewState::default();

        let outcome = handle_key(&mut layout, &mut view, key(KeyCode::Enter));
        assert!(matches!(outcome, StepOutcome::Notify(_, NotificationLevel::Warning)));
        assert!(!captures_text(&layout, &view));
    }

    #[test]
    fn test_trigger_dialog_captures_typing() {
        let mut layout = layout_at("referrer-journey");
        let mut view = StepViewState::default();

        handle_key(&mut layout, &mut view, key(KeyCode::Char('a')));
        assert!(captures_text(&layout, &view));
        for _ in 0.."New Trigger".len() {
            handle_key(&mut layout, &mut view, key(KeyCode::Backspace));
        }
        for c in "Upgrade".chars() {
            handle_key(&mut layout, &mut view, key(KeyCode::Char(c)));
        }
        handle_key(&mut layout, &mut view, key(KeyCode::Enter));

        assert!(!captures_text(&layout, &view));
        assert_eq!(layout.forms().referrer.triggers().last().unwrap().name, "Upgrade");
        assert_eq!(view.trigger_cursor, 3);
    }

    #[test]
    fn test_communication_dialog_requires_subject() {
        let mut layout = layout_at("referrer-journey");
        let mut view = StepViewState {
            trigger_cursor: 1,
            ..Default::default()
        };

        handle_key(&mut layout, &mut view, key(KeyCode::Char('c')));
        let outcome = handle_key(&mut layout, &mut view, key(KeyCode::Enter));
        assert!(matches!(outcome, StepOutcome::Notify(_, NotificationLevel::Warning)));

        handle_key(&mut layout, &mut view, key(KeyCode::Tab));
        assert_eq!(view.comm_field, CommField::Subject);
        handle_key(&mut layout, &mut view, key(KeyCode::Char('H')));
        let outcome = handle_key(&mut layout, &mut view, key(KeyCode::Enter));
        assert!(matches!(outcome, StepOutcome::Notify(_, NotificationLevel::Success)));
        assert_eq!(layout.forms().referrer.trigger("2").unwrap().communications.len(), 2);
    }

    #[test]
    fn test_appearance_preview_and_customize() {
        let mut layout = layout_at("how-it-looks");
        let mut view = StepViewState::default();

        handle_key(&mut layout, &mut view, key(KeyCode::Char('2')));
        assert!(layout.forms().appearance.is_preview_open());
        handle_key(&mut layout, &mut view, key(KeyCode::Enter));
        assert!(layout.forms().customize.is_some());

        handle_key(&mut layout, &mut view, key(KeyCode::Char(' ')));
        handle_key(&mut layout, &mut view, key(KeyCode::Down));
        handle_key(&mut layout, &mut view, key(KeyCode::Enter));
        let selected = layout.forms().customize.as_ref().and_then(|c| c.selected()).map(|n| n.id.clone());
        assert_eq!(selected.as_deref(), Some("header-text-1"));
    }

    #[test]
    fn test_summary_invite_dialog() {
        let mut layout = layout_at("summary");
        let mut view = StepViewState::default();

        handle_key(&mut layout, &mut view, key(KeyCode::Char('i')));
        assert!(captures_text(&layout, &view));
        for c in "dev@example.com".chars() {
            handle_key(&mut layout, &mut view, key(KeyCode::Char(c)));
        }
        let outcome = handle_key(&mut layout, &mut view, key(KeyCode::Enter));
        assert_eq!(
            outcome,
            StepOutcome::Notify(
                "Invite sent to dev@example.com".to_string(),
                NotificationLevel::Success
            )
        );
    }

    #[test]
    fn test_rewards_custom_event_and_payout_fields() {
        let mut layout = layout_at("rewards");
        let mut view = StepViewState::default();

        press(&mut layout, &mut view, KeyCode::Char('t'));
        press(&mut layout, &mut view, KeyCode::Char('t'));
        assert_eq!(layout.forms().rewards.trigger.kind(), TriggerKind::Custom);

        press(&mut layout, &mut view, KeyCode::Enter);
        assert!(captures_text(&layout, &view));
        // Global keys are typed, not dispatched
        assert_eq!(
            press(&mut layout, &mut view, KeyCode::Char('n')),
            StepOutcome::Consumed
        );
        press(&mut layout, &mut view, KeyCode::Backspace);
        type_text(&mut layout, &mut view, "first_purchase");
        press(&mut layout, &mut view, KeyCode::Enter);
        assert!(!captures_text(&layout, &view));
        assert_eq!(
            layout.forms().rewards.trigger.custom_event_name(),
            Some("first_purchase")
        );

        press(&mut layout, &mut view, KeyCode::Char('j'));
        press(&mut layout, &mut view, KeyCode::Enter);
        assert_eq!(
            view.editing.as_ref().map(|e| e.field),
            Some(FormField::Payout(Party::Referrer, PayoutField::DiscountPercent))
        );
        type_text(&mut layout, &mut view, "150");
        let outcome = press(&mut layout, &mut view, KeyCode::Enter);
        assert!(matches!(outcome, StepOutcome::Notify(_, NotificationLevel::Warning)));
        assert!(view.editing.is_some());

        clear_field(&mut layout, &mut view);
        type_text(&mut layout, &mut view, "25");
        press(&mut layout, &mut view, KeyCode::Enter);
        assert_eq!(
            layout
                .forms()
                .rewards
                .referrer
                .field_value(PayoutField::DiscountPercent)
                .as_deref(),
            Some("25")
        );
    }

    #[test]
    fn test_invitee_cash_fields_and_reward_limit() {
        let mut layout = layout_at("rewards");
        let mut view = StepViewState::default();

        press(&mut layout, &mut view, KeyCode::Char('f'));
        press(&mut layout, &mut view, KeyCode::Char('l'));
        // Referrer discount fields, the limit, then the invitee PayPal fields
        for _ in 0..3 {
            press(&mut layout, &mut view, KeyCode::Char('j'));
        }
        press(&mut layout, &mut view, KeyCode::Enter);
        assert_eq!(
            view.editing,
            Some(FieldEdit {
                field: FormField::RewardLimit,
                buffer: "100".to_string(),
            })
        );
        clear_field(&mut layout, &mut view);
        type_text(&mut layout, &mut view, "5");
        press(&mut layout, &mut view, KeyCode::Enter);
        assert_eq!(layout.forms().rewards.limit.max_per_referrer, 5);

        press(&mut layout, &mut view, KeyCode::Enter);
        type_text(&mut layout, &mut view, "9");
        press(&mut layout, &mut view, KeyCode::Esc);
        assert_eq!(layout.forms().rewards.limit.max_per_referrer, 5);

        press(&mut layout, &mut view, KeyCode::Char('j'));
        press(&mut layout, &mut view, KeyCode::Enter);
        type_text(&mut layout, &mut view, "10");
        press(&mut layout, &mut view, KeyCode::Enter);
        press(&mut layout, &mut view, KeyCode::Char('j'));
        press(&mut layout, &mut view, KeyCode::Enter);
        clear_field(&mut layout, &mut view);
        type_text(&mut layout, &mut view, "eur");
        press(&mut layout, &mut view, KeyCode::Enter);

        let referee = layout.forms().rewards.referee.describe();
        assert_eq!(referee, "10 EUR PayPal Transfer");
    }

    #[test]
    fn test_trigger_dialog_edits_custom_event_type() {
        let mut layout = layout_at("referrer-journey");
        let mut view = StepViewState::default();

        press(&mut layout, &mut view, KeyCode::Char('a'));
        // Only custom events have a second field
        press(&mut layout, &mut view, KeyCode::Tab);
        assert_eq!(view.trigger_field, TriggerField::Name);

        press(&mut layout, &mut view, KeyCode::F(2));
        press(&mut layout, &mut view, KeyCode::Tab);
        assert_eq!(view.trigger_field, TriggerField::CustomType);
        type_text(&mut layout, &mut view, "checkout");
        let rendered = text(&content_lines(&layout.active_step(), &view));
        assert!(rendered.contains("Event type: checkout▏"));
        press(&mut layout, &mut view, KeyCode::Enter);

        let added = layout.forms().referrer.triggers().last().unwrap();
        assert_eq!(added.name, "New Trigger");
        assert_eq!(added.trigger_type, TriggerType::CustomEvent);
        assert_eq!(added.custom_type.as_deref(), Some("checkout"));
        assert_eq!(view.trigger_field, TriggerField::Name);
    }

    #[test]
    fn test_message_cursor_targets_each_message() {
        let mut layout = layout_at("referrer-journey");
        let mut view = StepViewState {
            trigger_cursor: 1,
            ..Default::default()
        };

        press(&mut layout, &mut view, KeyCode::Char('c'));
        press(&mut layout, &mut view, KeyCode::Tab);
        press(&mut layout, &mut view, KeyCode::Char('H'));
        press(&mut layout, &mut view, KeyCode::Enter);
        let messages: Vec<String> = layout
            .forms()
            .referrer
            .trigger("2")
            .unwrap()
            .communications
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(messages.len(), 2);

        press(&mut layout, &mut view, KeyCode::Tab);
        assert_eq!(view.comm_cursor, 1);
        press(&mut layout, &mut view, KeyCode::Tab);
        assert_eq!(view.comm_cursor, 1);

        press(&mut layout, &mut view, KeyCode::Char('o'));
        let editing = layout
            .forms()
            .referrer
            .communication_draft()
            .map(|d| d.communication.id.clone());
        assert_eq!(editing.as_ref(), Some(&messages[1]));
        press(&mut layout, &mut view, KeyCode::Esc);

        press(&mut layout, &mut view, KeyCode::BackTab);
        press(&mut layout, &mut view, KeyCode::Char('x'));
        let remaining: Vec<String> = layout
            .forms()
            .referrer
            .trigger("2")
            .unwrap()
            .communications
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(remaining, vec![messages[1].clone()]);
    }

    #[test]
    fn test_communications_text_fields() {
        let mut layout = layout_in(StepPreset::Communications, "communications");
        let mut view = StepViewState::default();

        press(&mut layout, &mut view, KeyCode::Enter);
        assert!(captures_text(&layout, &view));
        clear_field(&mut layout, &mut view);
        let outcome = press(&mut layout, &mut view, KeyCode::Enter);
        assert!(matches!(outcome, StepOutcome::Notify(_, NotificationLevel::Warning)));
        type_text(&mut layout, &mut view, "Thanks for sharing");
        press(&mut layout, &mut view, KeyCode::Enter);
        assert_eq!(
            layout.forms().communications.referrer_email.subject,
            "Thanks for sharing"
        );

        press(&mut layout, &mut view, KeyCode::Char('j'));
        press(&mut layout, &mut view, KeyCode::Char('j'));
        press(&mut layout, &mut view, KeyCode::Enter);
        handle_key(
            &mut layout,
            &mut view,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT),
        );
        type_text(&mut layout, &mut view, "PS");
        press(&mut layout, &mut view, KeyCode::Enter);
        assert!(layout
            .forms()
            .communications
            .invitation_message
            .ends_with("questions!\nPS"));

        // Invitee tab has no invitation message
        press(&mut layout, &mut view, KeyCode::Tab);
        assert_eq!(view.field_cursor, 0);
        press(&mut layout, &mut view, KeyCode::Char('j'));
        press(&mut layout, &mut view, KeyCode::Enter);
        assert_eq!(
            view.editing.as_ref().map(|e| e.field),
            Some(FormField::EmailBody(Party::Referee))
        );
        type_text(&mut layout, &mut view, "!");
        press(&mut layout, &mut view, KeyCode::Enter);
        assert!(layout.forms().communications.invitee_email.body.ends_with("Co. Team!"));
    }

    #[test]
    fn test_content_lines_per_step() {
        let layout = layout_at("referee-journey");
        let rendered = text(&content_lines(&layout.active_step(), &StepViewState::default()));
        assert!(rendered.contains("Referee Journey"));
        assert!(rendered.contains("Invite Message"));

        let layout = layout_at("summary");
        let rendered = text(&content_lines(&layout.active_step(), &StepViewState::default()));
        assert!(rendered.contains("Payout Trigger"));
        assert!(rendered.contains("Campaign #1"));
    }
}
