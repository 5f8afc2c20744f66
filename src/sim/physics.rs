//! Vertical motion shared by the player and the enemy
//!
//! Screen space: y grows downward, so jumps use a negative impulse and the
//! ground clamp triggers once `y` reaches the body's rest line.

use serde::{Deserialize, Serialize};

/// Vertical integration state for a ground-bound body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Top edge of the body
    pub y: f32,
    pub vel_y: f32,
    pub gravity: f32,
    /// Value of `y` while standing on the ground
    pub rest_y: f32,
    pub is_jumping: bool,
}

impl PhysicsBody {
    /// A body resting on its ground line
    pub fn grounded(rest_y: f32, gravity: f32) -> Self {
        Self {
            y: rest_y,
            vel_y: 0.0,
            gravity,
            rest_y,
            is_jumping: false,
        }
    }

    /// Start a jump. Ignored while already airborne.
    ///
    /// Returns whether the jump actually started.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.is_jumping {
            return false;
        }
        self.vel_y = impulse;
        self.is_jumping = true;
        true
    }

    /// Advance one tick: gravity, integration, ground clamp
    pub fn update(&mut self) {
        self.vel_y += self.gravity;
        self.y += self.vel_y;

        if self.y >= self.rest_y {
            self.land();
        }
    }

    /// Move the rest line (e.g. when the body changes height)
    ///
    /// A grounded body follows the new line; an airborne one keeps its height
    /// unless that would leave it below the ground.
    pub fn set_rest_y(&mut self, rest_y: f32) {
        self.rest_y = rest_y;
        if !self.is_jumping || self.y >= rest_y {
            self.land();
        }
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_jumping && self.y == self.rest_y
    }

    fn land(&mut self) {
        self.y = self.rest_y;
        self.vel_y = 0.0;
        self.is_jumping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_grows_by_gravity_while_airborne() {
        let mut body = PhysicsBody::grounded(300.0, 0.8);
        assert!(body.jump(-20.0));

        let mut last_vel = body.vel_y;
        for _ in 0..20 {
            body.update();
            assert!(body.is_jumping);
            assert!((body.vel_y - (last_vel + 0.8)).abs() < 1e-4);
            last_vel = body.vel_y;
        }
    }

    #[test]
    fn test_ground_clamp_holds() {
        let mut body = PhysicsBody::grounded(300.0, 0.8);
        body.jump(-20.0);

        // Full arc is ~50 ticks; run well past it
        for _ in 0..200 {
            body.update();
            assert!(body.y <= body.rest_y);
        }
        assert_eq!(body.y, 300.0);
        assert_eq!(body.vel_y, 0.0);
        assert!(!body.is_jumping);

        for _ in 0..10 {
            body.update();
            assert_eq!(body.y, 300.0);
            assert_eq!(body.vel_y, 0.0);
        }
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut body = PhysicsBody::grounded(300.0, 0.8);
        assert!(body.jump(-20.0));
        body.update();
        let vel = body.vel_y;

        assert!(!body.jump(-20.0));
        assert_eq!(body.vel_y, vel);
    }

    #[test]
    fn test_rest_line_change_while_grounded() {
        let mut body = PhysicsBody::grounded(300.0, 0.8);
        body.set_rest_y(320.0);
        assert_eq!(body.y, 320.0);
        assert!(body.is_grounded());
    }

    #[test]
    fn test_rest_line_change_while_airborne() {
        let mut body = PhysicsBody::grounded(300.0, 0.8);
        body.jump(-20.0);
        body.update();
        let y = body.y;

        // y is ~280.8 here, still above the new line
        body.set_rest_y(290.0);
        assert_eq!(body.y, y);
        assert!(body.is_jumping);

        body.set_rest_y(250.0);
        assert_eq!(body.y, 250.0);
        assert!(!body.is_jumping);
    }
}
