//! The boss enemy and its escalation cycle
//!
//! Exactly one enemy slot. The enemy stands on the left, hops over tall
//! obstacles, and after enough hits disappears for a while before returning
//! bigger and further left.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacle::Obstacle;
use super::physics::PhysicsBody;
use crate::tuning::{EnemyTuning, Playfield};

/// Behaviour state of the enemy slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Grounded,
    Jumping,
    Hidden,
}

/// Outcome of a hit registration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Enemy was hidden; nothing happened
    Ignored,
    /// Hit counted, enemy still active
    Counted { hits: u32 },
    /// Threshold reached, enemy went into hiding
    Escalated { size_multiplier: f32 },
}

/// Transition reported by [`EnemyController::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyTransition {
    Jumped,
    Respawned { x: f32 },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub body: PhysicsBody,
    /// Ticks before another jump may trigger
    pub jump_cooldown: u32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.body.y, self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct EnemyController {
    /// `None` while hidden
    pub enemy: Option<Enemy>,
    pub hits: u32,
    pub size_multiplier: f32,
    /// Horizontal position for the next spawn
    pub anchor_x: f32,
    hide_ticks: u32,
    tuning: EnemyTuning,
    playfield: Playfield,
}

impl EnemyController {
    pub fn new(tuning: &EnemyTuning, playfield: Playfield) -> Self {
        let mut controller = Self {
            enemy: None,
            hits: 0,
            size_multiplier: 1.0,
            anchor_x: tuning.anchor_x,
            hide_ticks: 0,
            tuning: tuning.clone(),
            playfield,
        };
        controller.spawn();
        controller
    }

    pub fn state(&self) -> EnemyState {
        match &self.enemy {
            None => EnemyState::Hidden,
            Some(e) if e.body.is_jumping => EnemyState::Jumping,
            Some(_) => EnemyState::Grounded,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.enemy.is_none()
    }

    /// Ticks left before a hidden enemy returns (0 while active)
    pub fn hide_ticks_remaining(&self) -> u32 {
        self.hide_ticks
    }

    /// Collision bounds, `None` while hidden
    pub fn bounds(&self) -> Option<Rect> {
        self.enemy.as_ref().map(Enemy::bounds)
    }

    /// Advance one tick, reading the live obstacles
    pub fn update(&mut self, obstacles: &[Obstacle]) -> Option<EnemyTransition> {
        if self.enemy.is_none() {
            return self.update_hidden();
        }
        let enemy = self.enemy.as_mut()?;

        enemy.jump_cooldown = enemy.jump_cooldown.saturating_sub(1);

        let mut jumped = false;
        if !enemy.body.is_jumping && enemy.jump_cooldown == 0 {
            let needs_jump = obstacles.iter().any(|o| {
                let distance = o.pos.x - enemy.x;
                distance > 0.0
                    && distance < self.tuning.jump_trigger_distance
                    && o.height() > self.tuning.jump_height_threshold
            });
            if needs_jump && enemy.body.jump(self.tuning.jump_impulse) {
                enemy.jump_cooldown = self.tuning.jump_cooldown;
                jumped = true;
                log::debug!("Enemy jumps");
            }
        }

        enemy.body.update();

        jumped.then_some(EnemyTransition::Jumped)
    }

    /// Count a hit on the enemy; escalates once the threshold is reached
    pub fn register_hit(&mut self) -> HitOutcome {
        if self.enemy.is_none() {
            return HitOutcome::Ignored;
        }

        self.hits += 1;
        if self.hits < self.tuning.hit_threshold {
            return HitOutcome::Counted { hits: self.hits };
        }

        self.enemy = None;
        self.hits = 0;
        self.size_multiplier =
            (self.size_multiplier + self.tuning.size_step).min(self.tuning.max_size_multiplier);
        self.hide_ticks = self.tuning.hide_duration;
        log::info!(
            "Enemy defeated, hiding for {} ticks (next size x{:.1})",
            self.hide_ticks,
            self.size_multiplier
        );
        HitOutcome::Escalated {
            size_multiplier: self.size_multiplier,
        }
    }

    /// Hidden countdown; the respawn tick runs no physics
    fn update_hidden(&mut self) -> Option<EnemyTransition> {
        self.hide_ticks = self.hide_ticks.saturating_sub(1);
        if self.hide_ticks > 0 {
            return None;
        }

        self.anchor_x = (self.anchor_x - self.tuning.anchor_step).max(self.tuning.min_anchor_x);
        self.spawn();
        log::info!(
            "Enemy returns at x={} (size x{:.1})",
            self.anchor_x,
            self.size_multiplier
        );
        Some(EnemyTransition::Respawned { x: self.anchor_x })
    }

    /// Fresh enemy at the current anchor, standing on the ground
    fn spawn(&mut self) {
        let width = self.tuning.base_width * self.size_multiplier;
        let height = self.tuning.base_height * self.size_multiplier;
        self.enemy = Some(Enemy {
            x: self.anchor_x,
            width,
            height,
            body: PhysicsBody::grounded(self.playfield.ground_y - height, self.tuning.gravity),
            jump_cooldown: 0,
        });
        self.hide_ticks = 0;
    }
}
