//! Input translation
//!
//! Raw press events become one-shot [`Command`]s. There is no held-key state:
//! every press is queued once and handed to exactly one tick.

use std::collections::VecDeque;

use crate::sim::{Command, GamePhase};

/// A discrete press from the host environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Keyboard press, identified by its `KeyboardEvent.code`
    Key(String),
    Click,
    Touch,
}

/// What a press means before the current phase is taken into account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// One-button action: starts a run when idle, flaps while playing
    Action,
    /// Always a start request
    Start,
}

/// Map a press to its binding (unbound keys yield `None`)
pub fn binding_for(event: &InputEvent) -> Option<Binding> {
    match event {
        InputEvent::Click | InputEvent::Touch => Some(Binding::Action),
        InputEvent::Key(code) => match code.as_str() {
            "Space" | "ArrowUp" | "KeyW" => Some(Binding::Action),
            "Enter" | "NumpadEnter" => Some(Binding::Start),
            _ => None,
        },
    }
}

/// Resolve a binding against the phase the press will be applied in
pub fn command_for(binding: Binding, phase: GamePhase) -> Command {
    match (binding, phase) {
        (Binding::Action, GamePhase::Playing) => Command::Flap,
        (Binding::Action, _) | (Binding::Start, _) => Command::Start,
    }
}

/// Pending presses, delivered one per tick in press order
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Binding>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press; unbound presses are dropped here
    pub fn press(&mut self, event: &InputEvent) {
        if let Some(binding) = binding_for(event) {
            self.pending.push_back(binding);
        }
    }

    /// Command for the next tick, resolved against the current phase
    pub fn pop(&mut self, phase: GamePhase) -> Command {
        self.pending
            .pop_front()
            .map(|binding| command_for(binding, phase))
            .unwrap_or(Command::None)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: &str) -> InputEvent {
        InputEvent::Key(code.to_string())
    }

    #[test]
    fn test_bindings() {
        assert_eq!(binding_for(&key("Space")), Some(Binding::Action));
        assert_eq!(binding_for(&InputEvent::Click), Some(Binding::Action));
        assert_eq!(binding_for(&key("Enter")), Some(Binding::Start));
        assert_eq!(binding_for(&key("KeyQ")), None);
    }

    #[test]
    fn test_action_depends_on_phase() {
        assert_eq!(
            command_for(Binding::Action, GamePhase::AwaitingStart),
            Command::Start
        );
        assert_eq!(command_for(Binding::Action, GamePhase::Playing), Command::Flap);
        assert_eq!(command_for(Binding::Action, GamePhase::GameOver), Command::Start);
        assert_eq!(command_for(Binding::Start, GamePhase::Playing), Command::Start);
    }

    #[test]
    fn test_each_press_delivered_once() {
        let mut queue = InputQueue::new();
        queue.press(&key("Space"));
        queue.press(&key("KeyQ"));
        queue.press(&InputEvent::Click);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop(GamePhase::AwaitingStart), Command::Start);
        assert_eq!(queue.pop(GamePhase::Playing), Command::Flap);
        assert_eq!(queue.pop(GamePhase::Playing), Command::None);
        assert!(queue.is_empty());
    }
}
