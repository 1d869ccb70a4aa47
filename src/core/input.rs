//! Per-frame input snapshot, independent of any windowing backend.

use crate::core::types::Vec2;
use crate::terrain::sculpt::SculptMode;

/// Held movement keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Everything the simulation reads from the input collaborator for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub movement: MovementKeys,
    /// Jump was pressed this frame
    pub jump: bool,
    /// Pointer movement since the previous frame, in pixels
    pub look_delta: Vec2,
    /// Sculpt mode while a sculpt button is held
    pub sculpt: Option<SculptMode>,
    /// Scroll wheel delta since the previous frame
    pub wheel_delta: f32,
    /// Whether the pointer is captured by the view
    pub pointer_locked: bool,
    /// Regrow grass was pressed this frame
    pub regenerate_grass: bool,
    /// The user interacted with the page this frame (unblocks audio)
    pub interacted: bool,
}

impl FrameInput {
    /// Input with the pointer captured and nothing pressed
    pub fn locked() -> Self {
        Self {
            pointer_locked: true,
            ..Default::default()
        }
    }

    pub fn with_movement(mut self, movement: MovementKeys) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_sculpt(mut self, mode: SculptMode) -> Self {
        self.sculpt = Some(mode);
        self
    }

    pub fn is_sculpting(&self) -> bool {
        self.sculpt.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let input = FrameInput::locked()
            .with_movement(MovementKeys { forward: true, ..Default::default() })
            .with_sculpt(SculptMode::Lower);
        assert!(input.pointer_locked);
        assert!(input.movement.any());
        assert!(input.is_sculpting());
        assert!(!FrameInput::default().movement.any());
    }
}
