//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module is responsible
//! for drawing the UI based on AppState, but never modifies it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use crate::options;
use crate::plan::{RequestStatus, format_currency};

use super::state::{AppState, FormField, InteractionMode, PLAN_PLACEHOLDER, PickerState};

/// Status colors
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const IN_FLIGHT: Color = Color::Rgb(255, 215, 0); // Gold
    pub const SUCCEEDED: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const FAILED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const FOCUS: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const DIM: Color = Color::DarkGray;
    pub const NOTIFICATION: Color = Color::Rgb(255, 69, 0); // Orange red
}

/// Color for the header status message
fn status_color(status: RequestStatus) -> Color {
    trace!(?status, "status_color: called");
    match status {
        RequestStatus::Idle => colors::DIM,
        RequestStatus::InFlight => colors::IN_FLIGHT,
        RequestStatus::Succeeded => colors::SUCCEEDED,
        RequestStatus::Failed => colors::FAILED,
    }
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!(focus = ?state.focus, "render: called");
    // Create main layout: header, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    // Content: form on the left, plan on the right
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_form(state, frame, panes[0]);
    render_plan(state, frame, panes[1]);

    render_footer(state, frame, chunks[2]);

    // Render overlays
    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        InteractionMode::Picker(picker) => render_picker_overlay(state, picker, frame, frame.area()),
        InteractionMode::Form => {}
    }
}

/// Render header with app name and request status
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            "PlanForge",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(message) = state.status_message() {
        spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
        spans.push(Span::styled(
            message,
            Style::default().fg(status_color(state.request_status)),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the parameter form pane
fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_form: called");
    let mut lines = Vec::new();

    for field in [
        FormField::Brand,
        FormField::Year,
        FormField::Budget,
        FormField::Timeframe,
        FormField::Kpis,
        FormField::Channels,
        FormField::Allocation,
        FormField::Submit,
    ] {
        lines.push(form_line(state, field));
        lines.push(Line::raw(""));
    }

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Parameters "));
    frame.render_widget(form, area);
}

/// Build one form row with the current value and focus highlight
fn form_line(state: &AppState, field: FormField) -> Line<'static> {
    let focused = state.focus == field;
    let marker = if focused { "▸ " } else { "  " };

    let value = match field {
        FormField::Brand => {
            if state.brand_input.is_empty() {
                "<brand name>".to_string()
            } else {
                state.brand_input.clone()
            }
        }
        FormField::Year => state.selected_year().to_string(),
        FormField::Budget => format_currency(state.parsed_budget()),
        FormField::Timeframe => options::TIMEFRAMES[state.timeframe_index].to_string(),
        FormField::Kpis => selection_summary(&state.selected_kpis()),
        FormField::Channels => selection_summary(&state.selected_channels()),
        FormField::Allocation => options::ALLOCATIONS[state.allocation_index].to_string(),
        FormField::Submit => String::new(),
    };

    let label_style = if focused {
        Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(marker.to_string(), label_style),
        Span::styled(field.label().to_string(), label_style),
    ];
    if !value.is_empty() {
        spans.push(Span::raw(": "));
        spans.push(Span::styled(value, Style::default().fg(Color::White)));
    }

    Line::from(spans)
}

/// Summarize a multi-select value for its form row
fn selection_summary(selected: &[String]) -> String {
    trace!(count = selected.len(), "selection_summary: called");
    match selected.len() {
        0 => "<none selected>".to_string(),
        1 => selected[0].clone(),
        n => format!("{} selected", n),
    }
}

/// Render the plan pane (Markdown, or the placeholder)
fn render_plan(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_plan: called");
    let block = Block::default().borders(Borders::ALL).title(" Strategy ");

    match &state.plan_markdown {
        Some(markdown) => {
            let text = tui_markdown::from_str(markdown);
            let plan = Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .scroll((state.plan_scroll, 0))
                .block(block);
            frame.render_widget(plan, area);
        }
        None => {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                PLAN_PLACEHOLDER,
                Style::default().fg(colors::DIM),
            )))
            .block(block);
            frame.render_widget(placeholder, area);
        }
    }
}

/// Render footer: notification if present, otherwise keybinds
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let line = if let Some(notification) = &state.notification {
        Line::from(Span::styled(
            format!(" {}", notification),
            Style::default().fg(colors::NOTIFICATION).add_modifier(Modifier::BOLD),
        ))
    } else {
        keybind_line(state)
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Context-sensitive keybind hints
fn keybind_line(state: &AppState) -> Line<'static> {
    let binds: &[(&str, &str)] = match &state.interaction_mode {
        InteractionMode::Picker(_) => &[("↑/↓", "move"), ("space", "toggle"), ("enter", "done")],
        InteractionMode::Help => &[("any key", "close")],
        InteractionMode::Form => &[
            ("tab/↑↓", "field"),
            ("←/→", "cycle"),
            ("enter", "select/submit"),
            ("pgup/pgdn", "scroll"),
            ("esc", "quit"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in binds.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
        }
        spans.push(Span::styled(
            format!("<{}>", key),
            Style::default().fg(colors::KEYBIND),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    Line::from(spans)
}

/// Render the multi-select picker overlay
fn render_picker_overlay(state: &AppState, picker: &PickerState, frame: &mut Frame, area: Rect) {
    trace!(?picker.target, "render_picker_overlay: called");
    let overlay = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay);

    let flags = match picker.target {
        super::state::PickerTarget::Kpis => &state.kpi_selected,
        super::state::PickerTarget::Channels => &state.channel_selected,
    };

    let lines: Vec<Line> = picker
        .target
        .catalog()
        .iter()
        .zip(flags)
        .enumerate()
        .map(|(i, (label, selected))| {
            let check = if *selected { "[x]" } else { "[ ]" };
            let style = if i == picker.cursor {
                Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {} {}", check, label), style))
        })
        .collect();

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", picker.target.title())),
    );
    frame.render_widget(list, overlay);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let overlay = centered_rect(50, 60, area);
    frame.render_widget(Clear, overlay);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("  Navigation", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw("    tab / ↑ ↓      move between fields"),
        Line::raw("    ← / →          cycle year, duration, philosophy"),
        Line::raw("    enter          open picker / submit"),
        Line::raw(""),
        Line::from(Span::styled("  Pickers", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw("    space          toggle entry"),
        Line::raw("    enter / esc    close picker"),
        Line::raw(""),
        Line::from(Span::styled("  Plan pane", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw("    pgup / pgdn    scroll the generated plan"),
        Line::raw(""),
        Line::raw("    esc / ctrl+c   quit"),
    ];

    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(help, overlay);
}

/// Centered rect helper for overlays
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors_distinct() {
        assert_ne!(status_color(RequestStatus::InFlight), status_color(RequestStatus::Failed));
        assert_ne!(
            status_color(RequestStatus::Succeeded),
            status_color(RequestStatus::Failed)
        );
    }

    #[test]
    fn test_selection_summary() {
        assert_eq!(selection_summary(&[]), "<none selected>");
        assert_eq!(selection_summary(&["App Installs".to_string()]), "App Installs");
        assert_eq!(
            selection_summary(&["a".to_string(), "b".to_string(), "c".to_string()]),
            "3 selected"
        );
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let overlay = centered_rect(60, 80, area);
        assert!(overlay.width <= area.width);
        assert!(overlay.height <= area.height);
        assert!(overlay.x >= area.x);
        assert!(overlay.y >= area.y);
    }
}
