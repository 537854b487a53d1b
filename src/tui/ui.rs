//! TUI rendering and layout

use crate::feed::SyncState;
use crate::formatting::{format_count, format_percent};
use crate::stats::Counter;
use crate::tui::app::TuiApp;
use crate::tui::constants::{layout, status, styles, text};
use ratatui::{
    Frame,
    layout::{Alignment, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::time::Instant;

/// Render the main UI
pub fn render_ui(f: &mut Frame, app: &TuiApp, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(layout::main_sections())
        .split(f.area());

    render_title(f, chunks[0], app);

    if app.is_log_fullscreen() {
        let body = chunks[1].union(chunks[3]);
        render_logs(f, body, app);
    } else {
        render_counters(f, chunks[1], app, now);
        render_summary(f, chunks[2], app);
        render_logs(f, chunks[3], app);
    }

    render_footer(f, chunks[4]);
}

fn state_color(state: SyncState) -> Color {
    match state {
        SyncState::Connected => status::CONNECTED,
        SyncState::Connecting => status::CONNECTING,
        SyncState::ReconnectPending => status::RECONNECTING,
        SyncState::Disconnected => status::DISCONNECTED,
    }
}

/// Render the title bar
fn render_title(f: &mut Frame, area: Rect, app: &TuiApp) {
    let state = app.sync_state();
    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            text::TITLE,
            Style::default()
                .fg(styles::VALUE_INFO)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(text::SUBTITLE, Style::default().fg(Color::White)),
        Span::styled("  |  ", Style::default().fg(styles::LABEL)),
        Span::styled(
            app.endpoint().to_string(),
            Style::default().fg(styles::LABEL),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(
            state.as_str(),
            Style::default()
                .fg(state_color(state))
                .add_modifier(Modifier::BOLD),
        ),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(styles::BORDER_ACTIVE)),
    )
    .alignment(Alignment::Center);

    f.render_widget(title, area);
}

/// Render the four animated counters side by side
fn render_counters(f: &mut Frame, area: Rect, app: &TuiApp, now: Instant) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(layout::counter_columns())
        .split(area);

    for (column, counter) in columns.iter().zip(Counter::ALL) {
        let value = match app.counter_value(counter, now) {
            Some(value) => Span::styled(
                format_count(value),
                Style::default()
                    .fg(styles::VALUE_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(text::PLACEHOLDER, Style::default().fg(styles::PLACEHOLDER)),
        };

        let widget = Paragraph::new(vec![
            Line::from(value),
            Line::from(Span::styled(
                counter.label(),
                Style::default().fg(styles::LABEL),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(styles::BORDER_NORMAL)),
        )
        .alignment(Alignment::Center);

        f.render_widget(widget, *column);
    }
}

/// Render indexing progress or the loading notice
fn render_summary(f: &mut Frame, area: Rect, app: &TuiApp) {
    let line = if app.is_loading() {
        Line::from(Span::styled(
            text::LOADING,
            Style::default().fg(styles::PLACEHOLDER),
        ))
    } else {
        let current = app.pair().current;
        Line::from(vec![
            Span::styled("Indexed: ", Style::default().fg(styles::LABEL)),
            Span::styled(
                format_percent(current.indexed_emoji_percent()),
                Style::default()
                    .fg(styles::VALUE_INFO)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" of emoji", Style::default().fg(styles::LABEL)),
        ])
    };

    let summary = Paragraph::new(vec![line])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Summary")
                .border_style(Style::default().fg(styles::BORDER_NORMAL)),
        )
        .alignment(Alignment::Left);

    f.render_widget(summary, area);
}

/// Render the captured log pane
fn render_logs(f: &mut Frame, area: Rect, app: &TuiApp) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .log_buffer()
        .map(|buffer| buffer.recent_lines(visible))
        .unwrap_or_default()
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(styles::LABEL))))
        .collect();

    let logs = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(text::LOGS_TITLE)
                .border_style(Style::default().fg(styles::BORDER_NORMAL)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(logs, area);
}

/// Render the footer with key help
fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        text::HELP,
        Style::default().fg(styles::LABEL),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
