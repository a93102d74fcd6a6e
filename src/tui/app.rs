use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::{centered_rect, AppLayout};
use super::theme;
use super::views::step_content::{self, StepOutcome, StepViewState};
use super::views::step_rail;
use crate::core::campaign::wizard::StepId;
use crate::core::campaign::{CampaignLayout, CampaignListStore};
use crate::core::publish::{Environment, PublishBackend, Publisher, SimulatedBackend};

/// Root application state for the builder TUI.
pub struct AppState<B: PublishBackend + 'static = SimulatedBackend> {
    /// Whether the app is running.
    pub running: bool,
    /// The wizard session being edited.
    layout: CampaignLayout,
    /// Campaigns created this session.
    campaigns: Arc<CampaignListStore>,
    /// Publish state shared with background publish tasks.
    publisher: Arc<Publisher<B>>,
    /// Environments the publish action targets.
    environments: Vec<Environment>,
    /// Cursor state of the active step.
    step_view: StepViewState,
    /// Active notifications.
    notifications: Vec<Notification>,
    /// Counter for notification IDs.
    notification_counter: u64,
    /// Help modal visible.
    show_help: bool,
    /// Receiver for background events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender handed to background tasks.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl<B: PublishBackend + 'static> AppState<B> {
    pub fn new(
        layout: CampaignLayout,
        campaigns: Arc<CampaignListStore>,
        publisher: Arc<Publisher<B>>,
        environments: Vec<Environment>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            running: true,
            layout,
            campaigns,
            publisher,
            environments,
            step_view: StepViewState::default(),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            event_tx,
        }
    }

    pub fn layout(&self) -> &CampaignLayout {
        &self.layout
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key);
            }
            AppEvent::Input(_) => {}
            AppEvent::Tick => self.on_tick(),
            AppEvent::PublishFinished(result) => match result {
                Ok(report) => {
                    let targets: Vec<&str> =
                        report.environments.iter().map(|e| e.as_str()).collect();
                    self.push_notification(
                        format!("Published to {}", targets.join(" and ")),
                        NotificationLevel::Success,
                    );
                }
                Err(e) => self.push_notification(e.to_string(), NotificationLevel::Error),
            },
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Priority 1: force quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        // Priority 2: help modal
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        // Priority 3: campaign name editor
        if self.layout.is_editing_name() {
            self.handle_name_key(key);
            return;
        }

        // Priority 4: active step
        match step_content::handle_key(&mut self.layout, &mut self.step_view, key) {
            StepOutcome::Consumed => return,
            StepOutcome::Notify(message, level) => {
                self.push_notification(message, level);
                return;
            }
            StepOutcome::Ignored => {}
        }
        if step_content::captures_text(&self.layout, &self.step_view) {
            return;
        }

        // Priority 5: global keybindings
        if let Some(action) = map_key(key) {
            self.handle_action(action);
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.layout.cancel_name_edit(),
            KeyCode::Enter => {
                if !self.layout.save_name() {
                    self.push_notification(
                        "Campaign name cannot be empty".to_string(),
                        NotificationLevel::Warning,
                    );
                }
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.layout.name_draft_mut() {
                    draft.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = self.layout.name_draft_mut() {
                    draft.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::NextStep => match self.layout.advance() {
                Ok(_) => self.step_view.reset(),
                Err(e) => tracing::debug!(error = %e, "Advance ignored"),
            },
            Action::PrevStep => match self.layout.back() {
                Ok(_) => self.step_view.reset(),
                Err(e) => tracing::debug!(error = %e, "Back ignored"),
            },
            Action::EditName => self.layout.open_name_editor(),
            Action::Publish => self.start_publish(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => self.running = false,
        }
    }

    /// Publish the active campaign in the background; the result comes back
    /// as [`AppEvent::PublishFinished`].
    fn start_publish(&mut self) {
        if self.layout.current_step() != StepId::Summary {
            return;
        }
        if self.publisher.any_in_flight() {
            self.push_notification(
                "Publish already in progress".to_string(),
                NotificationLevel::Warning,
            );
            return;
        }

        let publisher = Arc::clone(&self.publisher);
        let campaign = self.layout.campaign_name();
        let environments = self.environments.clone();
        let tx = self.event_tx.clone();
        self.push_notification(format!("Publishing {campaign}..."), NotificationLevel::Info);

        tokio::spawn(async move {
            let result = publisher.publish(&campaign, &environments).await;
            let _ = tx.send(AppEvent::PublishFinished(result));
        });
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        self.render_header(frame, layout.header);
        if let Some(rail) = layout.rail {
            step_rail::render(frame, rail, self.layout.navigator());
        }
        step_content::render(
            frame,
            layout.main,
            &self.layout,
            &self.step_view,
            self.publish_lines(),
        );
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.layout.is_editing_name() {
            self.render_name_editor(frame, area);
        }
        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let nav = self.layout.navigator();
        let count = self.campaigns.len();
        let line = Line::from(vec![
            Span::styled(self.layout.campaign_name(), theme::title()),
            Span::styled("  (e: rename)", theme::key_hint()),
            Span::raw("  │  "),
            Span::styled(
                format!("Step {} of {}", nav.current_index() + 1, nav.len()),
                theme::highlight(),
            ),
            Span::raw("  │  "),
            Span::styled(
                format!(
                    "{count} campaign{} this session",
                    if count == 1 { "" } else { "s" }
                ),
                theme::muted(),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).block(theme::block_default("Referral Campaign")),
            area,
        );
    }

    fn publish_lines(&self) -> Vec<Line<'static>> {
        if self.layout.current_step() != StepId::Summary {
            return Vec::new();
        }
        let mut lines = vec![Line::from(Span::styled("Publish", theme::heading()))];
        for env in &self.environments {
            let (state, style) = if self.publisher.is_publishing(*env) {
                ("publishing...", Style::default().fg(theme::WARNING))
            } else if self.publisher.is_published(*env) {
                ("published", Style::default().fg(theme::SUCCESS))
            } else {
                ("not published", theme::muted())
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", env.as_str()), theme::muted()),
                Span::styled(state, style),
            ]));
        }
        lines
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode_indicator = if self.layout.is_editing_name()
            || step_content::captures_text(&self.layout, &self.step_view)
        {
            Span::styled(" INSERT ", theme::insert_badge())
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" REFERRALS ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.layout.navigator().current().label.clone(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("→/n", theme::key_hint()),
            Span::raw(":next "),
            Span::styled("←/p", theme::key_hint()),
            Span::raw(":back "),
            Span::styled("e", theme::key_hint()),
            Span::raw(":rename "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, style) = theme::notification(n.level);
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), style),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_name_editor(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(50, 20, area);
        let draft = self.layout.name_draft().unwrap_or_default();
        let lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled("  Name: ", theme::muted()),
                Span::styled(format!("{draft}▏"), theme::highlight()),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("Enter", theme::key_hint()),
                Span::raw(":save  "),
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":cancel"),
            ]),
        ];

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(lines).block(theme::block_focused("Campaign name")),
            modal,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("→ / n", "Next step"),
            ("← / p", "Previous step"),
            ("e", "Rename campaign"),
            ("u", "Publish (summary step)"),
            ("?", "Toggle this help"),
            ("q", "Quit application"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Rewards:", ""),
            ("t", "Cycle payout trigger"),
            ("r / f", "Cycle referrer / invitee payout method"),
            ("l", "Toggle reward limit"),
            ("j/k, Enter", "Choose / edit a field"),
            ("Tab / Shift+Tab", "Next / previous stage"),
            ("", ""),
            ("How it looks:", ""),
            ("1-3", "Preview template"),
            ("Enter", "Use template / select component"),
            ("s", "Start from scratch"),
            ("j/k, Space", "Navigate / expand components"),
            ("", ""),
            ("Journeys:", ""),
            ("j/k", "Navigate triggers"),
            ("a / Enter / d", "Add / edit / delete trigger"),
            ("Tab / Shift+Tab", "Next / previous message"),
            ("c / o / x", "Add / edit / remove message"),
            ("Tab / F2", "Next field / type or channel (in dialog)"),
            ("", ""),
            ("Communications:", ""),
            ("Tab", "Switch referrer / invitee"),
            ("j/k, Enter", "Choose / edit subject, body, message"),
            ("Alt+Enter", "New line while editing"),
            ("w", "Toggle reward email"),
            ("t", "Send test email"),
            ("", ""),
            ("Summary:", ""),
            ("i", "Invite developers"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        theme::highlight(),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Global keybindings, consulted after the active step declines a key.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Right | KeyCode::Char('n') => Some(Action::NextStep),
        KeyCode::Left | KeyCode::Char('p') => Some(Action::PrevStep),
        KeyCode::Char('e') => Some(Action::EditName),
        KeyCode::Char('u') => Some(Action::Publish),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
