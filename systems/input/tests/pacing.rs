use std::time::Duration;

use word_snake_core::{Command, Direction};
use word_snake_system_input::{Action, HeldActions, InputPacer, PacerConfig};

const MOVE_RIGHT: Action = Action::Move(Direction::Right);
const MOVE_UP: Action = Action::Move(Direction::Up);

fn tick(pacer: &mut InputPacer, millis: u64, held: Option<Action>) -> Vec<Command> {
    let mut out = Vec::new();
    pacer.handle(Duration::from_millis(millis), held, &mut out);
    out
}

#[test]
fn first_press_emits_immediately() {
    let mut pacer = InputPacer::default();

    let commands = tick(&mut pacer, 1_000, Some(MOVE_RIGHT));
    assert_eq!(
        commands,
        vec![Command::Move {
            direction: Direction::Right,
        }]
    );
}

#[test]
fn repeat_waits_for_the_start_delay_then_uses_the_repeat_delay() {
    let mut pacer = InputPacer::default();

    assert_eq!(tick(&mut pacer, 0, Some(MOVE_RIGHT)).len(), 1);
    assert!(tick(&mut pacer, 50, Some(MOVE_RIGHT)).is_empty());
    assert!(tick(&mut pacer, 149, Some(MOVE_RIGHT)).is_empty());
    assert_eq!(tick(&mut pacer, 150, Some(MOVE_RIGHT)).len(), 1);
    assert!(tick(&mut pacer, 180, Some(MOVE_RIGHT)).is_empty());
    assert_eq!(tick(&mut pacer, 200, Some(MOVE_RIGHT)).len(), 1);
    assert_eq!(tick(&mut pacer, 251, Some(MOVE_RIGHT)).len(), 1);
}

#[test]
fn release_resets_the_cadence() {
    let mut pacer = InputPacer::default();

    assert_eq!(tick(&mut pacer, 0, Some(MOVE_RIGHT)).len(), 1);
    assert!(tick(&mut pacer, 40, None).is_empty());

    // A fresh press fires immediately again.
    assert_eq!(tick(&mut pacer, 60, Some(MOVE_RIGHT)).len(), 1);
}

#[test]
fn switching_held_actions_keeps_the_cadence() {
    let mut pacer = InputPacer::default();

    assert_eq!(tick(&mut pacer, 0, Some(MOVE_RIGHT)).len(), 1);
    // The direction changed mid-hold; the start delay still applies.
    assert!(tick(&mut pacer, 100, Some(MOVE_UP)).is_empty());
    assert_eq!(
        tick(&mut pacer, 150, Some(MOVE_UP)),
        vec![Command::Move {
            direction: Direction::Up,
        }]
    );
}

#[test]
fn undo_shares_the_throttle() {
    let mut pacer = InputPacer::new(PacerConfig::new(
        Duration::from_millis(150),
        Duration::from_millis(50),
    ));

    assert_eq!(tick(&mut pacer, 0, Some(Action::Undo)), vec![Command::Undo]);
    assert!(tick(&mut pacer, 100, Some(Action::Undo)).is_empty());
    assert_eq!(tick(&mut pacer, 150, Some(Action::Undo)), vec![Command::Undo]);
}

#[test]
fn held_actions_favor_the_most_recent_press() {
    let mut held = HeldActions::new();
    assert_eq!(held.current(), None);

    held.press(MOVE_RIGHT);
    held.press(MOVE_UP);
    assert_eq!(held.current(), Some(MOVE_UP));

    // Auto-repeated key-down events do not reorder the stack.
    held.press(MOVE_RIGHT);
    assert_eq!(held.current(), Some(MOVE_UP));

    held.release(MOVE_UP);
    assert_eq!(held.current(), Some(MOVE_RIGHT));

    held.release(MOVE_RIGHT);
    assert_eq!(held.current(), None);
}
