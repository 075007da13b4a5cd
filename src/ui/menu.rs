use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::app::GameOverReport;
use crate::game::EndReason;
use crate::score::HighScores;

const TABLE_ROWS: usize = 5;

/// Draws the name prompt as a centered popup.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    name_input: &str,
    start_error: Option<&str>,
    high_scores: &HighScores,
) {
    let popup = centered_popup(area, 70, 70);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut body = vec![
        Line::from(format!("Name: {name_input}_")),
        Line::from(start_error.unwrap_or_default().to_owned())
            .style(Style::default().fg(Color::LightRed)),
        Line::from("[Enter] Start   [Esc] Quit"),
        Line::from(""),
    ];
    body.extend(table_lines(high_scores));
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD to move, P/Space to pause"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    report: &GameOverReport,
    high_scores: &HighScores,
) {
    let popup = centered_popup(area, 70, 70);
    frame.render_widget(Clear, popup);

    let result = &report.result;
    let headline = match result.reason {
        EndReason::ArenaFilled => "YOU WIN",
        EndReason::WallCollision | EndReason::SelfCollision => "GAME OVER",
    };

    let mut lines = vec![
        Line::from(headline),
        Line::from(""),
        Line::from(format!("{}: {}", result.player_name, result.score)),
        Line::from(cause_text(result.reason)),
        Line::from(if report.submission.new_record {
            "New high score!"
        } else {
            ""
        }),
        Line::from(""),
    ];
    lines.extend(table_lines(high_scores));
    lines.push(Line::from(""));
    lines.push(Line::from("[Enter]/[Space] New Game   [Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn cause_text(reason: EndReason) -> &'static str {
    match reason {
        EndReason::WallCollision => "Cause: hit wall",
        EndReason::SelfCollision => "Cause: hit yourself",
        EndReason::ArenaFilled => "The arena is full",
    }
}

fn table_lines(high_scores: &HighScores) -> Vec<Line<'static>> {
    if high_scores.entries().is_empty() {
        return vec![Line::from("No high scores yet").style(Style::default().fg(Color::DarkGray))];
    }

    high_scores
        .entries()
        .iter()
        .take(TABLE_ROWS)
        .enumerate()
        .map(|(rank, entry)| {
            Line::from(format!(
                "{}. {:<12} {:>6}  {}",
                rank + 1,
                entry.name,
                entry.score,
                entry.date
            ))
        })
        .collect()
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
