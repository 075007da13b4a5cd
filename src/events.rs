use crate::game::EndReason;
use crate::snake::Position;

/// Receives engine signals synchronously while a tick is applied.
///
/// Implementations must not fail the tick: anything that can go wrong in a
/// collaborator (audio output, logging sinks) is handled inside the callback.
pub trait GameObserver {
    /// Food at `position` was eaten; `score` is the updated total.
    fn food_consumed(&mut self, _position: Position, _score: u32) {}

    /// The head hit a wall or the body.
    fn collision(&mut self, _reason: EndReason) {}

    /// The snake covers every playable cell.
    fn arena_filled(&mut self, _score: u32) {}
}

impl GameObserver for () {}

/// Outcome of an ended session, handed to the high-score collaborator.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FinalResult {
    pub player_name: String,
    pub score: u32,
    pub reason: EndReason,
}

/// Records every signal in order. Useful for driving the engine in tests or
/// replaying a run.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SignalLog {
    pub signals: Vec<Signal>,
}

/// One recorded engine signal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Signal {
    FoodConsumed {
        position: Position,
        score: u32,
    },
    Collision(EndReason),
    ArenaFilled { score: u32 },
}

impl GameObserver for SignalLog {
    fn food_consumed(&mut self, position: Position, score: u32) {
        self.signals.push(Signal::FoodConsumed { position, score });
    }

    fn collision(&mut self, reason: EndReason) {
        self.signals.push(Signal::Collision(reason));
    }

    fn arena_filled(&mut self, score: u32) {
        self.signals.push(Signal::ArenaFilled { score });
    }
}
