use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{App, ReviewEntry};
use crate::session::KeyValueStore;

use super::clock;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app);
    render_question_breakdown(frame, chunks[2], &app.review(), app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn calculate_percentage(score: f64, total: u32) -> f64 {
    if total > 0 {
        (score / total as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    match app.outcome() {
        Some(outcome) => {
            let total = outcome.total_points();
            let percentage = calculate_percentage(outcome.result.score, total);
            content.push(Line::from(Span::styled(
                format!("{} / {}  ({:.0}%)", outcome.result.score, total, percentage),
                Style::default().fg(get_grade_color(percentage)).bold(),
            )));

            let mut details = Vec::new();
            if let (Some(correct), Some(count)) =
                (outcome.result.correct_answers, outcome.result.total_questions)
            {
                details.push(format!("{} of {} correct", correct, count));
            }
            let seconds = outcome
                .result
                .time_spent
                .unwrap_or_else(|| app.session().timer().time_spent());
            details.push(format!("time {}", clock(seconds)));
            content.push(Line::from(details.join("  ·  ").fg(Color::DarkGray)));
        }
        None => content.push(Line::from("Not submitted".fg(Color::DarkGray))),
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, review: &[ReviewEntry], scroll: usize) {
    let lines: Vec<Line> = review
        .iter()
        .enumerate()
        .flat_map(|(index, entry)| {
            let (symbol, color) = if entry.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            let header = Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate_question(&entry.prompt), Style::default().fg(Color::Gray)),
            ]);
            let given = Line::from(vec![
                Span::styled("       you: ", Style::default().fg(Color::DarkGray)),
                Span::styled(entry.user_answer.clone(), Style::default().fg(color)),
            ]);
            let expected = Line::from(vec![
                Span::styled("    answer: ", Style::default().fg(Color::DarkGray)),
                Span::styled(entry.correct_answer.clone(), Style::default().fg(Color::Gray)),
            ]);
            [header, given, expected]
        })
        .collect();

    // Three lines per question; scrolling moves one question at a time.
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll(((scroll * 3) as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_points() {
        assert_eq!(calculate_percentage(6.0, 10), 60.0);
        assert_eq!(calculate_percentage(3.0, 0), 0.0);
        assert_eq!(get_grade_color(95.0), Color::Green);
        assert_eq!(get_grade_color(10.0), Color::Red);
    }

    #[test]
    fn test_truncate_question() {
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 5);
        assert!(truncate_question(&long).ends_with("..."));
        assert_eq!(truncate_question("Short"), "Short");
    }
}
