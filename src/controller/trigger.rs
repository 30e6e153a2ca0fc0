//! Decide when a controller advances

use crate::error::ConwayError;
use crate::game_of_life::Universe;
use std::io::BufRead;

/// What the controller should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Advance,
    Stop,
}

/// Source of advance decisions: an operator, a timer, a scripted replay
pub trait AdvanceTrigger {
    fn next_action(&mut self, universe: &Universe) -> Result<Action, ConwayError>;
}

/// Advance a fixed number of times, then stop
#[derive(Debug, Clone, Copy)]
pub struct ScriptedTrigger {
    remaining: u64,
}

impl ScriptedTrigger {
    pub const fn new(steps: u64) -> Self {
        Self { remaining: steps }
    }
}

impl AdvanceTrigger for ScriptedTrigger {
    fn next_action(&mut self, _universe: &Universe) -> Result<Action, ConwayError> {
        if self.remaining == 0 {
            return Ok(Action::Stop);
        }
        self.remaining -= 1;
        Ok(Action::Advance)
    }
}

/// Advance on every input line. `q` or end of input stops.
#[derive(Debug)]
pub struct LineTrigger<R> {
    input: R,
}

impl<R: BufRead> LineTrigger<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> AdvanceTrigger for LineTrigger<R> {
    fn next_action(&mut self, _universe: &Universe) -> Result<Action, ConwayError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Action::Stop);
        }
        match line.trim() {
            "q" | "Q" | "quit" => Ok(Action::Stop),
            _ => Ok(Action::Advance),
        }
    }
}
