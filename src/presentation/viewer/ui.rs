// Frame layout and widgets for the viewer
use crate::presentation::viewer::input::{FocusField, QueryForm};
use crate::presentation::viewer::state::{CurveView, ViewState, NOT_FOUND_BANNER};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::domain::curve::PowerCurve;

pub fn draw(frame: &mut Frame, form: &QueryForm, view: &CurveView) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_form(frame, layout[0], form);
    draw_status(frame, layout[1], form, view);
    draw_chart(frame, layout[2], view);
    draw_help(frame, layout[3], view);
}

fn draw_form(frame: &mut Frame, area: Rect, form: &QueryForm) {
    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let hint = QueryForm::time_format_hint();
    draw_field(
        frame,
        fields[0],
        "Turbine ID",
        &form.turbine_id,
        form.focus == FocusField::TurbineId,
        form.field_error.is_some(),
    );
    draw_field(
        frame,
        fields[1],
        &format!("Start Time ({hint})"),
        &form.start,
        form.focus == FocusField::Start,
        false,
    );
    draw_field(
        frame,
        fields[2],
        &format!("End Time ({hint})"),
        &form.end,
        form.focus == FocusField::End,
        false,
    );
}

fn draw_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool, error: bool) {
    let border_style = if error {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut text = value.to_string();
    if focused {
        text.push('_');
    }
    let field = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(label.to_string(), border_style)),
    );
    frame.render_widget(field, area);
}

fn draw_status(frame: &mut Frame, area: Rect, form: &QueryForm, view: &CurveView) {
    let (message, style) = if let Some(error) = &form.field_error {
        (
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        match view.state() {
            ViewState::Loading => ("Loading...".to_string(), Style::default().fg(Color::Yellow)),
            ViewState::NotFound => (
                format!("{NOT_FOUND_BANNER} (Esc to dismiss)"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            ViewState::Failed(reason) => (
                format!("Error: {reason} (Esc to dismiss)"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            ViewState::Loaded { curve, skipped } if *skipped > 0 => (
                format!(
                    "{} samples plotted, {skipped} malformed rows skipped",
                    curve.points.len()
                ),
                Style::default().fg(Color::Yellow),
            ),
            ViewState::Loaded { curve, .. } => (
                format!("{} samples plotted", curve.points.len()),
                Style::default().fg(Color::Gray),
            ),
            ViewState::Idle => (String::new(), Style::default()),
        }
    };
    frame.render_widget(Paragraph::new(message).style(style), area);
}

fn draw_chart(frame: &mut Frame, area: Rect, view: &CurveView) {
    // The chart stays suppressed while a banner is up, even if an older
    // query produced a series.
    match view.state() {
        ViewState::Loaded { curve, .. } if !curve.is_empty() => render_curve(frame, area, curve),
        ViewState::Loaded { curve, .. } => render_placeholder(
            frame,
            area,
            curve.title,
            "No plottable samples in the response.",
        ),
        _ => render_placeholder(
            frame,
            area,
            "Power Curve",
            "Enter a turbine ID and time window, then press Enter.",
        ),
    }
}

fn render_curve(frame: &mut Frame, area: Rect, curve: &PowerCurve) {
    let [x_min, x_max] = curve.x_bounds();
    let [y_min, y_max] = curve.y_bounds();

    let dataset = Dataset::default()
        .name(curve.series_name)
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Cyan))
        .data(&curve.points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(curve.title))
        .x_axis(
            Axis::default()
                .title(curve.x_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(vec![format!("{x_min:.1}"), format!("{x_max:.1}")]),
        )
        .y_axis(
            Axis::default()
                .title(curve.y_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![format!("{y_min:.0}"), format!("{y_max:.0}")]),
        );
    frame.render_widget(chart, area);
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let placeholder = Paragraph::new(message)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );
    frame.render_widget(placeholder, area);
}

fn draw_help(frame: &mut Frame, area: Rect, view: &CurveView) {
    let trigger = if view.is_loading() {
        "Loading..."
    } else {
        "Enter: Fetch Data"
    };
    let help = Paragraph::new(format!(
        "{trigger}  Tab: next field  Esc: dismiss  Ctrl+Q: quit"
    ))
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(help, area);
}
