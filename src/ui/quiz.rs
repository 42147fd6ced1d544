use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::draft::Draft;
use crate::models::Question;
use crate::notify::NoticeLevel;
use crate::session::KeyValueStore;

use super::clock;

const OPTION_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(question) = app.current_question() else {
        let widget = Paragraph::new("This quiz has no questions.")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
        frame.render_widget(widget, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app);
    render_question_text(frame, chunks[1], question);
    render_draft(frame, chunks[2], question, app.draft());
    render_feedback(frame, chunks[3], app.current_feedback());
    render_notice(frame, chunks[4], app);
    render_controls(frame, chunks[5], app.draft());
}

fn render_status<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let timer = app.session().timer();
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let countdown_color = match timer.time_left() {
        0..=5 => Color::Red,
        6..=10 => Color::Yellow,
        _ => Color::Green,
    };
    let mut spans = vec![
        Span::styled(
            format!("{:>3}s", timer.time_left()),
            Style::default().fg(countdown_color).bold(),
        ),
        Span::styled(
            format!("  total {}", clock(timer.time_spent())),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if timer.is_paused() {
        spans.push(Span::styled("  PAUSED", Style::default().fg(Color::Yellow).bold()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), halves[0]);

    let progress = format!(
        "{}/{}  ·  {} answered",
        app.current_question_number(),
        app.total_questions(),
        app.session().ledger().answered_count()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let mut lines = vec![Line::from(Span::styled(
        question.text.as_str(),
        Style::default().fg(Color::White).bold(),
    ))];
    if let Some(url) = &question.media_url {
        lines.push(Line::from(format!("media: {}", url).fg(Color::Blue)));
    }
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn row_style(is_cursor: bool) -> Style {
    if is_cursor {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn marker(is_cursor: bool) -> &'static str {
    if is_cursor { " > " } else { "   " }
}

fn label(index: usize) -> char {
    OPTION_LABELS.get(index).copied().unwrap_or('*')
}

fn render_draft(frame: &mut Frame, area: Rect, question: &Question, draft: &Draft) {
    let lines: Vec<Line> = match draft {
        Draft::Empty => Vec::new(),
        Draft::Choice {
            cursor,
            selected,
            multiple,
        } => question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = row_style(i == *cursor);
                let checked = selected.get(i).copied().unwrap_or(false);
                let check = match (*multiple, checked) {
                    (true, true) => "[x] ",
                    (true, false) => "[ ] ",
                    (false, true) => "(•) ",
                    (false, false) => "( ) ",
                };
                Line::from(vec![
                    Span::styled(marker(i == *cursor), style),
                    Span::styled(check, style),
                    Span::styled(format!("{}. ", label(i)), style),
                    Span::styled(option.text.as_str(), style),
                ])
            })
            .collect(),
        Draft::Order { cursor, order } => question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = row_style(i == *cursor);
                let rank = order
                    .iter()
                    .position(|picked| *picked == i)
                    .map(|p| format!("{:>2}. ", p + 1))
                    .unwrap_or_else(|| "  - ".to_string());
                Line::from(vec![
                    Span::styled(marker(i == *cursor), style),
                    Span::styled(rank, style),
                    Span::styled(option.text.as_str(), style),
                ])
            })
            .collect(),
        Draft::Matching {
            cursor,
            lefts,
            targets,
            picks,
        } => lefts
            .iter()
            .enumerate()
            .map(|(i, left)| {
                let style = row_style(i == *cursor);
                let target = picks
                    .get(i)
                    .copied()
                    .flatten()
                    .and_then(|p| targets.get(p))
                    .map(String::as_str)
                    .unwrap_or("?");
                Line::from(vec![
                    Span::styled(marker(i == *cursor), style),
                    Span::styled(question.option_text(left), style),
                    Span::styled("  →  ", Style::default().fg(Color::DarkGray)),
                    Span::styled(target, style),
                ])
            })
            .collect(),
        Draft::Blanks {
            cursor,
            groups,
            values,
        } => values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let style = row_style(i == *cursor);
                let name = groups
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Blank {}", i + 1));
                let caret = if i == *cursor { "_" } else { "" };
                Line::from(vec![
                    Span::styled(marker(i == *cursor), style),
                    Span::styled(format!("{}: ", name), style),
                    Span::styled(format!("{}{}", value, caret), Style::default().fg(Color::White)),
                ])
            })
            .collect(),
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: Option<bool>) {
    let line = match feedback {
        Some(true) => Line::from("Correct".fg(Color::Green).bold()),
        Some(false) => Line::from("Incorrect".fg(Color::Red).bold()),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_notice<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(notice) = app.latest_notice() else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Info => Color::Blue,
        NoticeLevel::Error => Color::Red,
    };
    frame.render_widget(Paragraph::new(notice.message).fg(color), area);
}

fn render_controls(frame: &mut Frame, area: Rect, draft: &Draft) {
    let hint = match draft {
        Draft::Blanks { .. } => "type answer · ↑/↓ blank · enter confirm · tab skip · ctrl+p pause · esc quit",
        Draft::Matching { .. } => "↑/↓ item · ←/→ match · enter confirm · tab skip · ctrl+p pause · q quit",
        Draft::Order { .. } => "j/k move · space pick in order · enter confirm · tab skip · ctrl+p pause · q quit",
        _ => "j/k navigate · space select · enter confirm · tab skip · ctrl+p pause · q quit",
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
