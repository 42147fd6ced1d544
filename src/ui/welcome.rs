use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::session::KeyValueStore;

pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let session = app.session();
    let quiz = session.quiz();
    let title = if quiz.title.is_empty() {
        format!("QUIZ {}", quiz.id)
    } else {
        quiz.title.to_uppercase()
    };

    let summary = format!(
        "{} questions · {}s per question · {}",
        app.total_questions(),
        session.timer().question_seconds(),
        quiz.difficulty.label()
    );

    let attempt = if app.is_resumed() {
        Line::from(
            format!(
                "Resuming: {}/{} answered, question {}",
                session.ledger().answered_count(),
                app.total_questions(),
                app.current_question_number()
            )
            .fg(Color::Yellow),
        )
    } else {
        Line::from("New attempt".fg(Color::DarkGray))
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(summary.fg(Color::DarkGray)),
        attempt,
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  r to start over  ·  q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
