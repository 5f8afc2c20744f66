//! The player-controlled runner

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::physics::PhysicsBody;
use crate::tuning::{Playfield, PlayerTuning};

/// Visual pose exported to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    Standing,
    Ducking,
    Jumping,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub width: f32,
    /// Current height, always one of the two presets
    pub height: f32,
    pub body: PhysicsBody,
    pub is_ducking: bool,
    standing_height: f32,
    ducking_height: f32,
    jump_impulse: f32,
    ground_y: f32,
}

impl Player {
    /// Fresh player standing on the ground line
    pub fn new(tuning: &PlayerTuning, playfield: &Playfield) -> Self {
        let height = tuning.standing_height;
        Self {
            x: tuning.x,
            width: tuning.width,
            height,
            body: PhysicsBody::grounded(playfield.ground_y - height, tuning.gravity),
            is_ducking: false,
            standing_height: tuning.standing_height,
            ducking_height: tuning.ducking_height,
            jump_impulse: tuning.jump_impulse,
            ground_y: playfield.ground_y,
        }
    }

    /// Returns whether a jump actually started
    pub fn jump(&mut self) -> bool {
        self.body.jump(self.jump_impulse)
    }

    /// Crouch to the ducking preset. Ignored mid-air.
    pub fn duck(&mut self) {
        if self.body.is_jumping {
            return;
        }
        self.is_ducking = true;
        self.set_height(self.ducking_height);
    }

    pub fn stand(&mut self) {
        self.is_ducking = false;
        self.set_height(self.standing_height);
    }

    pub fn update(&mut self) {
        self.body.update();
    }

    pub fn is_jumping(&self) -> bool {
        self.body.is_jumping
    }

    pub fn pose(&self) -> PlayerPose {
        if self.body.is_jumping {
            PlayerPose::Jumping
        } else if self.is_ducking {
            PlayerPose::Ducking
        } else {
            PlayerPose::Standing
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.body.y, self.width, self.height)
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
        self.body.set_rest_y(self.ground_y - height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&PlayerTuning::default(), &Playfield::default())
    }

    #[test]
    fn test_new_player_stands_on_ground() {
        let p = player();
        assert_eq!(p.bounds().bottom(), 350.0);
        assert_eq!(p.height, 50.0);
        assert_eq!(p.pose(), PlayerPose::Standing);
    }

    #[test]
    fn test_duck_keeps_feet_on_ground() {
        let mut p = player();
        p.duck();
        assert!(p.is_ducking);
        assert_eq!(p.height, 30.0);
        assert_eq!(p.bounds().bottom(), 350.0);
        assert_eq!(p.pose(), PlayerPose::Ducking);

        p.stand();
        assert_eq!(p.height, 50.0);
        assert_eq!(p.bounds().bottom(), 350.0);
    }

    #[test]
    fn test_duck_ignored_while_jumping() {
        let mut p = player();
        assert!(p.jump());
        p.update();
        p.duck();
        assert!(!p.is_ducking);
        assert_eq!(p.height, 50.0);
        assert_eq!(p.pose(), PlayerPose::Jumping);
    }

    #[test]
    fn test_feet_never_sink_below_ground() {
        let mut p = player();
        p.jump();
        for _ in 0..120 {
            p.update();
            assert!(p.bounds().bottom() <= 350.0);
        }
        assert_eq!(p.bounds().bottom(), 350.0);
        assert!(!p.is_jumping());
    }
}
