use std::io::{self, Write};

use log::debug;

use crate::events::GameObserver;
use crate::game::EndReason;
use crate::snake::Position;

const BELL: &[u8] = b"\x07";

/// Audio collaborator that rings the terminal bell on engine signals.
///
/// Output errors are swallowed; a missing bell never disturbs the game.
#[derive(Debug)]
pub struct TerminalBell<W = io::Stdout> {
    out: W,
    enabled: bool,
}

impl TerminalBell<io::Stdout> {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self::with_writer(io::stdout(), enabled)
    }
}

impl<W: Write> TerminalBell<W> {
    #[must_use]
    pub fn with_writer(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, times: usize) {
        if !self.enabled {
            return;
        }

        let result = (0..times)
            .try_for_each(|_| self.out.write_all(BELL))
            .and_then(|()| self.out.flush());
        if let Err(error) = result {
            debug!("terminal bell unavailable: {error}");
        }
    }
}

impl<W: Write> GameObserver for TerminalBell<W> {
    fn food_consumed(&mut self, _position: Position, _score: u32) {
        self.ring(1);
    }

    fn collision(&mut self, _reason: EndReason) {
        self.ring(2);
    }

    fn arena_filled(&mut self, _score: u32) {
        self.ring(3);
    }
}
