use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::{GameState, GameStatus};
use crate::score::HighScores;

const HUD_MARGIN_X: u16 = 1;
const STATUS_WIDTH: u16 = 10;

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    high_scores: &HighScores,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let [status_area, info_area] =
        Layout::horizontal([Constraint::Length(STATUS_WIDTH), Constraint::Min(0)])
            .areas(inset_horizontal(hud_area, HUD_MARGIN_X));

    frame.render_widget(
        Paragraph::new(Line::from(status_label(state.status())))
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    let best = high_scores.entries().first().map_or(0, |entry| entry.score);
    frame.render_widget(
        Paragraph::new(info_line(state, best)).alignment(Alignment::Right),
        info_area,
    );

    play_area
}

fn info_line(state: &GameState, best: u32) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    if let Some(name) = state.player_name() {
        spans.push(Span::styled("Player ", label));
        spans.push(Span::styled(name.to_owned(), value));
        spans.push(Span::raw("  "));
    }
    spans.extend([
        Span::styled("Length ", label),
        Span::styled(state.snake().len().to_string(), value),
        Span::raw("  "),
        Span::styled("Score ", label),
        Span::styled(state.score().to_string(), value.fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled("Hi ", label),
        Span::styled(best.max(state.score()).to_string(), value),
    ]);

    Line::from(spans)
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "enter name",
        GameStatus::Running => "running",
        GameStatus::Paused => "paused",
        GameStatus::Ended => "game over",
    }
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - 2 * margin,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::inset_horizontal;

    #[test]
    fn inset_never_underflows() {
        let narrow = inset_horizontal(Rect::new(0, 0, 1, 1), 3);
        assert_eq!(narrow.width, 1);

        let wide = inset_horizontal(Rect::new(2, 0, 20, 1), 1);
        assert_eq!(wide, Rect::new(3, 0, 18, 1));
    }
}
