use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::app::App;
use crate::config::Arena;
use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
const GLYPH_SNAKE_BODY: &str = "■";
const GLYPH_FOOD: &str = "●";
const GLYPH_WALL: &str = "▒";

const COLOR_SNAKE_HEAD: Color = Color::Cyan;
const COLOR_SNAKE_BODY: Color = Color::LightCyan;
const COLOR_FOOD: Color = Color::LightRed;
const COLOR_WALL: Color = Color::DarkGray;
const COLOR_FRAME: Color = Color::Cyan;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let state = app.state();
    let area = frame.area();
    let play_area = render_hud(frame, area, state, app.high_scores());

    let block = Block::bordered().border_style(Style::new().fg(COLOR_FRAME));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_walls(frame, inner, state.arena());
    render_food(frame, inner, state);
    render_snake(frame, inner, state);

    match state.status() {
        GameStatus::Idle => render_start_menu(
            frame,
            play_area,
            app.name_input(),
            app.start_error(),
            app.high_scores(),
        ),
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::Ended => {
            if let Some(report) = app.report() {
                render_game_over_menu(frame, play_area, report, app.high_scores());
            }
        }
        GameStatus::Running => {}
    }
}

fn render_walls(frame: &mut Frame<'_>, inner: Rect, arena: Arena) {
    if arena.border() == 0 {
        return;
    }

    let size = arena.size();
    let buffer = frame.buffer_mut();
    for y in 0..i32::from(size.height) {
        for x in 0..i32::from(size.width) {
            let position = Position { x, y };
            if !arena.is_wall(position) {
                continue;
            }
            if let Some((column, row)) = logical_to_terminal(inner, arena, position) {
                buffer.set_string(column, row, GLYPH_WALL, Style::new().fg(COLOR_WALL));
            }
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = logical_to_terminal(inner, state.arena(), state.food().position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(COLOR_FOOD));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let head = state.snake().head();
    let arena = state.arena();

    let buffer = frame.buffer_mut();
    for segment in state.snake().segments() {
        let Some((x, y)) = logical_to_terminal(inner, arena, *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(state.direction()),
                Style::new()
                    .fg(COLOR_SNAKE_HEAD)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(COLOR_SNAKE_BODY));
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, arena: Arena, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(arena.size()) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::app::App;
    use crate::config::{Arena, GameConfig, GridSize};
    use crate::game::GameState;
    use crate::score::HighScores;
    use crate::snake::Position;

    use super::{logical_to_terminal, render};

    #[test]
    fn positions_outside_grid_are_not_drawn() {
        let inner = ratatui::layout::Rect::new(1, 1, 10, 5);
        let arena = Arena::new(
            GridSize {
                width: 10,
                height: 5,
            },
            0,
        );

        assert_eq!(
            logical_to_terminal(inner, arena, Position { x: 0, y: 0 }),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, arena, Position { x: -1, y: 0 }),
            None
        );
        assert_eq!(
            logical_to_terminal(inner, arena, Position { x: 10, y: 2 }),
            None
        );
    }

    #[test]
    fn start_screen_renders_without_panicking() {
        let config = GameConfig {
            arena_width: 30,
            arena_height: 15,
            border_thickness: 1,
            ..GameConfig::default()
        };
        let app = App::with_state(GameState::new_with_seed(config, 3), HighScores::in_memory());
        let mut terminal = Terminal::new(TestBackend::new(40, 22)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &app))
            .expect("frame should render");

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("SNAKE"));
    }
}
