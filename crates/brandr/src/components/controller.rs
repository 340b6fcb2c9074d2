//! Character controller data read by the physics pass.

/// Movement intent for a player- or AI-driven object.
///
/// Scripts set [`moving`](Self::moving) each tick; the rigid body reads it to
/// decide whether ground friction applies, and uses
/// [`max_speed`](Self::max_speed) as the horizontal speed the equilibrium
/// force pulls back toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterController {
    pub max_speed: f32,
    pub walk_speed: f32,
    pub moving: bool,
}

impl CharacterController {
    pub fn new(max_speed: f32, walk_speed: f32) -> Self {
        Self {
            max_speed,
            walk_speed,
            moving: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new(1.0, 0.1)
    }
}
