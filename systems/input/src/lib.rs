#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input pacing system that throttles held actions into discrete
//! commands.
//!
//! Adapters report raw press/release edges into a [`HeldActions`] registry
//! and tick an [`InputPacer`] with the current time. The pacer emits at most
//! one [`Command`] per tick: immediately when a key goes down, then nothing
//! until the start delay elapses, then once per repeat delay while the key
//! stays held. The system owns no clock; callers pass `now` explicitly,
//! which keeps the cadence fully deterministic under test.

use std::time::Duration;

use word_snake_core::{Command, Direction};

/// Delay between the first emission and the start of auto-repeat.
pub const ACTION_START_DELAY: Duration = Duration::from_millis(150);
/// Delay between consecutive auto-repeat emissions.
pub const ACTION_REPEAT_DELAY: Duration = Duration::from_millis(50);

/// Player intents that share the throttle cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the snake one step in the given direction.
    Move(Direction),
    /// Roll back the most recent accepted transition.
    Undo,
}

impl Action {
    /// Command submitted to the world when the pacer emits this action.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::Move(direction) => Command::Move { direction },
            Self::Undo => Command::Undo,
        }
    }
}

/// Last-pressed-wins registry of currently held actions.
#[derive(Clone, Debug, Default)]
pub struct HeldActions {
    stack: Vec<Action>,
}

impl HeldActions {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key-down edge. Repeated presses of a held action are
    /// ignored, mirroring keyboard auto-repeat events.
    pub fn press(&mut self, action: Action) {
        if !self.stack.contains(&action) {
            self.stack.push(action);
        }
    }

    /// Records a key-up edge.
    pub fn release(&mut self, action: Action) {
        self.stack.retain(|held| *held != action);
    }

    /// The action currently driving the pacer: the most recently pressed
    /// one still held.
    #[must_use]
    pub fn current(&self) -> Option<Action> {
        self.stack.last().copied()
    }
}

/// Configuration parameters required to construct the pacing system.
#[derive(Clone, Copy, Debug)]
pub struct PacerConfig {
    start_delay: Duration,
    repeat_delay: Duration,
}

impl PacerConfig {
    /// Creates a new configuration with explicit delays.
    #[must_use]
    pub const fn new(start_delay: Duration, repeat_delay: Duration) -> Self {
        Self {
            start_delay,
            repeat_delay,
        }
    }
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self::new(ACTION_START_DELAY, ACTION_REPEAT_DELAY)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PacerState {
    Idle,
    Starting { pressed_at: Duration },
    Repeating { last_emit: Duration },
}

/// Pure system that paces a held action into discrete commands.
#[derive(Clone, Debug)]
pub struct InputPacer {
    config: PacerConfig,
    state: PacerState,
}

impl InputPacer {
    /// Creates a new pacer using the supplied configuration.
    #[must_use]
    pub const fn new(config: PacerConfig) -> Self {
        Self {
            config,
            state: PacerState::Idle,
        }
    }

    /// Samples the held action at `now`, pushing at most one command.
    ///
    /// Switching between held actions keeps the running cadence; only a
    /// fully released input returns the pacer to idle.
    pub fn handle(&mut self, now: Duration, held: Option<Action>, out: &mut Vec<Command>) {
        let Some(action) = held else {
            self.state = PacerState::Idle;
            return;
        };

        let emit = match self.state {
            PacerState::Idle => {
                self.state = PacerState::Starting { pressed_at: now };
                true
            }
            PacerState::Starting { pressed_at } => {
                if now.saturating_sub(pressed_at) >= self.config.start_delay {
                    self.state = PacerState::Repeating { last_emit: now };
                    true
                } else {
                    false
                }
            }
            PacerState::Repeating { last_emit } => {
                if now.saturating_sub(last_emit) >= self.config.repeat_delay {
                    self.state = PacerState::Repeating { last_emit: now };
                    true
                } else {
                    false
                }
            }
        };

        if emit {
            out.push(action.command());
        }
    }
}

impl Default for InputPacer {
    fn default() -> Self {
        Self::new(PacerConfig::default())
    }
}
