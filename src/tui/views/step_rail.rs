//! Step rail: every configured step with its completion state.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::core::campaign::wizard::{StepNavigator, StepStatus};
use crate::tui::theme;

fn marker(status: StepStatus) -> (&'static str, Style) {
    match status {
        StepStatus::Completed => ("✓", Style::default().fg(theme::SUCCESS)),
        StepStatus::Current => (
            "●",
            Style::default()
                .fg(theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        StepStatus::Upcoming => ("○", theme::dim()),
    }
}

/// One line per step: marker, ordinal and label.
pub fn rail_lines(navigator: &StepNavigator) -> Vec<Line<'static>> {
    navigator
        .statuses()
        .into_iter()
        .enumerate()
        .flat_map(|(i, (step, status))| {
            let (symbol, style) = marker(status);
            let label_style = theme::step_status(status);
            [
                Line::from(vec![
                    Span::styled(format!(" {symbol} "), style),
                    Span::styled(format!("{}. {}", i + 1, step.label), label_style),
                ]),
                Line::from(Span::styled(
                    format!("     {}", step.id.description()),
                    theme::muted(),
                )),
            ]
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, navigator: &StepNavigator) {
    let block = theme::block_default("Steps");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gauge_height = 1.min(inner.height);
    let list_area = Rect {
        height: inner.height.saturating_sub(gauge_height + 1),
        ..inner
    };
    frame.render_widget(Paragraph::new(rail_lines(navigator)), list_area);

    if inner.height > 2 {
        let gauge_area = Rect {
            y: inner.bottom() - gauge_height,
            height: gauge_height,
            ..inner
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme::PRIMARY))
            .percent(navigator.progress_percent().into())
            .label(format!("{}% complete", navigator.progress_percent()));
        frame.render_widget(gauge, gauge_area);
    }
}
