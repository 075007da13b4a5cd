use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::events::{FinalResult, GameObserver};
use crate::game::{GameState, GameStatus};
use crate::input::{Direction, GameInput};
use crate::score::{HighScores, Submission};

/// Maximum accepted player name length in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Errors that abort the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Fixed-cadence simulation driver.
///
/// Fires at most once per interval while the game is running and re-arms
/// whenever it is stopped, so a resumed game waits a full interval.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns true when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant, running: bool) -> bool {
        if !running {
            self.last_tick = None;
            return false;
        }

        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

/// Game-over information shown to the player.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameOverReport {
    pub result: FinalResult,
    pub submission: Submission,
}

/// Front-end controller: owns the session, the name being typed and the
/// high-score table, and turns key presses into gate requests.
#[derive(Debug)]
pub struct App {
    config: GameConfig,
    state: GameState,
    high_scores: HighScores,
    name_input: String,
    start_error: Option<String>,
    report: Option<GameOverReport>,
    clock: TickClock,
    seed: Option<u64>,
    should_quit: bool,
}

impl App {
    /// Validates `config` and creates an idle session.
    ///
    /// With a `seed`, every session this app starts, including those after a
    /// new game, places food identically.
    pub fn new(
        config: GameConfig,
        high_scores: HighScores,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut app = Self::with_state(fresh_state(config, seed), high_scores);
        app.seed = seed;
        Ok(app)
    }

    /// Wraps an existing session. New games after it use fresh entropy.
    #[must_use]
    pub fn with_state(state: GameState, high_scores: HighScores) -> Self {
        let config = *state.config();
        Self {
            clock: TickClock::new(config.tick_interval()),
            config,
            state,
            high_scores,
            name_input: String::new(),
            start_error: None,
            report: None,
            seed: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    #[must_use]
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    #[must_use]
    pub fn start_error(&self) -> Option<&str> {
        self.start_error.as_deref()
    }

    #[must_use]
    pub fn report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Runs the simulation driver once; ticks when the clock says so.
    pub fn update<O: GameObserver + ?Sized>(&mut self, now: Instant, observer: &mut O) {
        let running = self.state.status() == GameStatus::Running;
        if self.clock.poll(now, running) {
            self.state.tick_observed(observer);
        }
        self.collect_result();
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state.status() {
            GameStatus::Idle => self.handle_name_entry(key.code),
            GameStatus::Running | GameStatus::Paused => {
                if let Some(input) = map_play_key(key.code) {
                    self.handle_input(input);
                }
            }
            GameStatus::Ended => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.new_game(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
        }
    }

    /// Routes a decoded in-game input.
    pub fn handle_input(&mut self, input: GameInput) {
        match input {
            GameInput::Quit => self.should_quit = true,
            GameInput::Confirm => {}
            other => self.state.apply_input(other),
        }
    }

    /// Discards the session and starts over at the name prompt.
    pub fn new_game(&mut self) {
        info!("new game");
        self.state = fresh_state(self.config, self.seed);
        self.name_input.clear();
        self.start_error = None;
        self.report = None;
    }

    fn handle_name_entry(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => match self.state.request_start(&self.name_input) {
                Ok(()) => self.start_error = None,
                Err(error) => self.start_error = Some(error.to_string()),
            },
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) if !c.is_control() => {
                if self.name_input.chars().count() < MAX_NAME_LEN {
                    self.name_input.push(c);
                }
                self.start_error = None;
            }
            _ => {}
        }
    }

    fn collect_result(&mut self) {
        let Some(result) = self.state.take_final_result() else {
            return;
        };

        // Zero scores are shown but never ranked.
        let submission = if result.score > 0 {
            self.high_scores.submit(&result.player_name, result.score)
        } else {
            Submission::default()
        };
        if submission.new_record {
            info!("new record by {}: {}", result.player_name, result.score);
        } else if result.score > 0 && !submission.ranked {
            warn!("score {} did not reach the table", result.score);
        }

        self.report = Some(GameOverReport { result, submission });
    }
}

fn fresh_state(config: GameConfig, seed: Option<u64>) -> GameState {
    match seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    }
}

/// Maps a key to an in-game input (arrows/WASD steer, P/Space pause).
#[must_use]
pub fn map_play_key(code: KeyCode) -> Option<GameInput> {
    let input = match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char('p' | 'P' | ' ') => GameInput::Pause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        KeyCode::Enter => GameInput::Confirm,
        _ => return None,
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::config::GameConfig;
    use crate::game::{GameState, GameStatus};
    use crate::input::{Direction, GameInput};
    use crate::score::HighScores;

    use super::{App, TickClock, map_play_key};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::with_state(
            GameState::new_with_seed(GameConfig::default(), 21),
            HighScores::in_memory(),
        )
    }

    fn type_name(app: &mut App, name: &str) {
        for c in name.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn clock_waits_full_interval_after_start() {
        let mut clock = TickClock::new(Duration::from_millis(150));
        let t0 = Instant::now();

        assert!(!clock.poll(t0, true));
        assert!(!clock.poll(t0 + Duration::from_millis(100), true));
        assert!(clock.poll(t0 + Duration::from_millis(150), true));
        assert!(!clock.poll(t0 + Duration::from_millis(200), true));
        assert!(clock.poll(t0 + Duration::from_millis(300), true));
    }

    #[test]
    fn clock_rearms_when_stopped() {
        let mut clock = TickClock::new(Duration::from_millis(150));
        let t0 = Instant::now();
        clock.poll(t0, true);

        assert!(!clock.poll(t0 + Duration::from_millis(500), false));
        assert!(!clock.poll(t0 + Duration::from_millis(600), true));
        assert!(clock.poll(t0 + Duration::from_millis(750), true));
    }

    #[test]
    fn enter_with_empty_name_reports_validation_failure() {
        let mut app = app();

        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.state().status(), GameStatus::Idle);
        assert_eq!(
            app.start_error(),
            Some("Please enter your name before starting the game!")
        );
    }

    #[test]
    fn typed_name_starts_the_game() {
        let mut app = app();

        type_name(&mut app, "ann");
        app.handle_key(press(KeyCode::Backspace));
        type_name(&mut app, "a");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.state().status(), GameStatus::Running);
        assert_eq!(app.state().player_name(), Some("ana"));
        assert_eq!(app.start_error(), None);
    }

    #[test]
    fn space_pauses_during_play() {
        let mut app = app();
        type_name(&mut app, "bo");
        app.handle_key(press(KeyCode::Enter));

        app.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(app.state().status(), GameStatus::Paused);

        app.handle_key(press(KeyCode::Char('p')));
        assert_eq!(app.state().status(), GameStatus::Running);
    }

    #[test]
    fn game_over_is_reported_once_and_new_game_resets() {
        let mut app = app();
        type_name(&mut app, "cy");
        app.handle_key(press(KeyCode::Enter));
        app.handle_key(press(KeyCode::Up));

        // Start (10,10) moving up reaches the top wall within 11 ticks.
        let mut now = Instant::now();
        app.update(now, &mut ());
        for _ in 0..20 {
            now += Duration::from_millis(150);
            app.update(now, &mut ());
        }

        assert_eq!(app.state().status(), GameStatus::Ended);
        let report = app.report().expect("ended game produces a report").clone();
        assert_eq!(report.result.player_name, "cy");

        app.update(now + Duration::from_secs(1), &mut ());
        assert_eq!(app.report(), Some(&report));

        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.state().status(), GameStatus::Idle);
        assert_eq!(app.state().score(), 0);
        assert!(app.name_input().is_empty());
        assert!(app.report().is_none());
    }

    #[test]
    fn seeded_app_replays_food_after_new_game() {
        let mut app = App::new(GameConfig::default(), HighScores::in_memory(), Some(33))
            .expect("default config is valid");
        let first_food = app.state().food();
        type_name(&mut app, "di");
        app.handle_key(press(KeyCode::Enter));
        app.handle_key(press(KeyCode::Up));

        let mut now = Instant::now();
        app.update(now, &mut ());
        while app.state().status() == GameStatus::Running {
            now += Duration::from_millis(150);
            app.update(now, &mut ());
        }
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.state().status(), GameStatus::Idle);
        assert_eq!(app.state().food(), first_food);
    }

    #[test]
    fn play_keys_map_to_inputs() {
        assert_eq!(
            map_play_key(KeyCode::Char('w')),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_play_key(KeyCode::Left),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(map_play_key(KeyCode::Char('P')), Some(GameInput::Pause));
        assert_eq!(map_play_key(KeyCode::Esc), Some(GameInput::Quit));
        assert_eq!(map_play_key(KeyCode::Tab), None);
    }
}
