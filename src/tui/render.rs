//! Rendering: a summary header over a top-ordered process table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::fmt::{format_elapsed, format_percent};
use crate::model::{ProcessSnapshot, SystemOverview};

const HEADER_HEIGHT: u16 = 8;

pub fn render(frame: &mut Frame, overview: &SystemOverview, processes: &[ProcessSnapshot]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(frame.area());

    render_overview(frame, chunks[0], overview);
    render_processes(frame, chunks[1], processes);
}

fn render_overview(frame: &mut Frame, area: Rect, overview: &SystemOverview) {
    let label = |text: &str| Span::styled(format!("{:<10}", text), Style::default().fg(Color::Cyan));

    let lines = vec![
        Line::from(vec![label("OS"), Span::raw(overview.os_name.clone())]),
        Line::from(vec![
            label("Kernel"),
            Span::raw(overview.kernel_version.clone()),
        ]),
        Line::from(vec![
            label("CPU"),
            meter(overview.cpu_utilization),
            Span::raw(format!(" {}", format_percent(overview.cpu_utilization))),
        ]),
        Line::from(vec![
            label("Memory"),
            meter(overview.memory_utilization),
            Span::raw(format!(" {}", format_percent(overview.memory_utilization))),
        ]),
        Line::from(vec![
            label("Tasks"),
            Span::raw(format!(
                "{} total, {} running",
                overview.total_processes, overview.running_processes
            )),
        ]),
        Line::from(vec![
            label("Uptime"),
            Span::raw(format_elapsed(overview.uptime_seconds as i64)),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL).title(" proctop ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// A fixed-width text meter: `[|||||·····]`.
fn meter(ratio: f64) -> Span<'static> {
    const WIDTH: usize = 20;
    let filled = ((ratio.clamp(0.0, 1.0)) * WIDTH as f64).round() as usize;
    let bar = format!("[{}{}]", "|".repeat(filled), "·".repeat(WIDTH - filled));
    let color = if ratio > 0.8 {
        Color::Red
    } else if ratio > 0.5 {
        Color::Yellow
    } else {
        Color::Green
    };
    Span::styled(bar, Style::default().fg(color))
}

fn render_processes(frame: &mut Frame, area: Rect, processes: &[ProcessSnapshot]) {
    let header = Row::new(vec!["PID", "USER", "CPU%", "RAM(MB)", "TIME+", "COMMAND"]).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = processes
        .iter()
        .map(|p| {
            Row::new(vec![
                p.pid.to_string(),
                p.user.clone(),
                format!("{:.2}", p.cpu_utilization * 100.0),
                p.ram_mb.clone(),
                format_elapsed(p.uptime_seconds as i64),
                p.command.clone(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" processes "));
    frame.render_widget(table, area);
}
