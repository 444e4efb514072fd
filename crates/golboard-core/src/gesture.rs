//! Click-versus-drag disambiguation for a single surface.

use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedOffset;

/// Phase of the gesture currently tracked on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No pointer is down.
    Idle,
    /// Pointer is down and has not moved yet.
    Down,
    /// Pointer is down and at least one move was observed.
    DownMoved,
}

/// Normalized input driving the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureInput {
    Down,
    Move,
    Up,
}

/// Outbound event pushed to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    Draw(NormalizedOffset),
    Click(NormalizedOffset),
}

impl SurfaceEvent {
    /// Event name as understood by the server.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draw(_) => "draw",
            Self::Click(_) => "click",
        }
    }

    pub fn offset(&self) -> NormalizedOffset {
        match self {
            Self::Draw(offset) | Self::Click(offset) => *offset,
        }
    }
}

/// What a transition asks the caller to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    Draw,
    Click,
}

impl GestureAction {
    pub fn at(self, offset: NormalizedOffset) -> SurfaceEvent {
        match self {
            Self::Draw => SurfaceEvent::Draw(offset),
            Self::Click => SurfaceEvent::Click(offset),
        }
    }
}

/// Per-surface gesture state.
///
/// Reset to the default at the end of every gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    /// Pointer currently down.
    pub drawing: bool,
    /// At least one move observed since the pointer went down.
    pub moved: bool,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        match (self.drawing, self.moved) {
            (false, _) => GesturePhase::Idle,
            (true, false) => GesturePhase::Down,
            (true, true) => GesturePhase::DownMoved,
        }
    }

    /// Apply one input and return the event to emit, if any.
    ///
    /// The first move after a down is swallowed so that a jittery tap is
    /// still reported as a click. Moves and ups without a preceding down
    /// are ignored.
    pub fn advance(&mut self, input: GestureInput) -> Option<GestureAction> {
        match (self.phase(), input) {
            (_, GestureInput::Down) => {
                self.drawing = true;
                self.moved = false;
                None
            }
            (GesturePhase::Idle, _) => None,
            (GesturePhase::Down, GestureInput::Move) => {
                self.moved = true;
                None
            }
            (GesturePhase::DownMoved, GestureInput::Move) => Some(GestureAction::Draw),
            (GesturePhase::Down, GestureInput::Up) => {
                *self = Self::default();
                Some(GestureAction::Click)
            }
            (GesturePhase::DownMoved, GestureInput::Up) => {
                *self = Self::default();
                Some(GestureAction::Draw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(inputs: &[GestureInput]) -> Vec<GestureAction> {
        let mut state = GestureState::new();
        inputs.iter().filter_map(|input| state.advance(*input)).collect()
    }

    #[test]
    fn test_down_sets_drawing() {
        let mut state = GestureState::new();
        assert_eq!(state.advance(GestureInput::Down), None);
        assert_eq!(state, GestureState { drawing: true, moved: false });
        assert_eq!(state.phase(), GesturePhase::Down);
    }

    #[test]
    fn test_tap_is_click() {
        use GestureInput::*;
        assert_eq!(run(&[Down, Up]), vec![GestureAction::Click]);
    }

    #[test]
    fn test_first_move_is_swallowed() {
        use GestureInput::*;
        let mut state = GestureState::new();
        state.advance(Down);
        assert_eq!(state.advance(Move), None);
        assert_eq!(state.phase(), GesturePhase::DownMoved);
        assert_eq!(state.advance(Move), Some(GestureAction::Draw));
    }

    #[test]
    fn test_single_move_then_up_is_draw() {
        use GestureInput::*;
        assert_eq!(run(&[Down, Move, Up]), vec![GestureAction::Draw]);
    }

    #[test]
    fn test_drag_emits_draw_per_move_and_on_up() {
        use GestureInput::*;
        assert_eq!(
            run(&[Down, Move, Move, Move, Up]),
            vec![GestureAction::Draw, GestureAction::Draw, GestureAction::Draw]
        );
    }

    #[test]
    fn test_up_resets_state() {
        use GestureInput::*;
        let mut state = GestureState::new();
        for input in [Down, Move, Move, Up] {
            state.advance(input);
        }
        assert_eq!(state, GestureState::default());
        assert_eq!(state.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_idle_move_and_up_are_ignored() {
        use GestureInput::*;
        let mut state = GestureState::new();
        assert_eq!(state.advance(Move), None);
        assert_eq!(state.advance(Up), None);
        assert_eq!(state, GestureState::default());
    }

    #[test]
    fn test_click_iff_no_move() {
        use GestureInput::*;
        for moves in 0..5 {
            let mut inputs = vec![Down];
            inputs.extend(std::iter::repeat_n(Move, moves));
            inputs.push(Up);
            let actions = run(&inputs);
            let clicked = actions.contains(&GestureAction::Click);
            assert_eq!(clicked, moves == 0, "{moves} moves");
        }
    }

    #[test]
    fn test_down_mid_gesture_restarts() {
        use GestureInput::*;
        assert_eq!(run(&[Down, Move, Down, Up]), vec![GestureAction::Click]);
    }

    #[test]
    fn test_event_wire_shape() {
        let event = SurfaceEvent::Draw(NormalizedOffset::new(160, 160));
        assert_eq!(event.name(), "draw");
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event": "draw", "offset_x": 160, "offset_y": 160 })
        );
    }
}
