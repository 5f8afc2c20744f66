//! Obstacles and the timed obstacle spawner
//!
//! Obstacles only ever move left. The spawner owns the live list, appends new
//! obstacles at the right edge on a countdown that tightens with game speed,
//! and culls anything that has fully scrolled past the left edge.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::{ObstacleTuning, Playfield};

/// Obstacle variant with its render hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Office building sitting on the ground
    Ground { floors: u32 },
    /// Low-flying plane at standing head height; duck to avoid
    Flying,
}

impl ObstacleKind {
    pub fn is_flying(&self) -> bool {
        matches!(self, ObstacleKind::Flying)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2, size: Vec2) -> Self {
        Self { id, kind, pos, size }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn scroll(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Timed obstacle generation, scrolling and culling
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Ticks left until the next spawn
    spawn_timer: u32,
    tuning: ObstacleTuning,
    playfield: Playfield,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleSpawner {
    pub fn new(tuning: &ObstacleTuning, playfield: Playfield, rng: Pcg32) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: tuning.base_interval,
            tuning: tuning.clone(),
            playfield,
            rng,
            next_id: 1,
        }
    }

    /// Advance one tick at the given scroll speed
    ///
    /// Returns the kind of obstacle spawned this tick, if any.
    pub fn update(&mut self, speed: u32) -> Option<ObstacleKind> {
        self.spawn_timer = self.spawn_timer.saturating_sub(1);
        let spawned = if self.spawn_timer == 0 {
            let kind = self.spawn_random();
            self.spawn_timer = self.interval_for_speed(speed);
            Some(kind)
        } else {
            None
        };

        let speed = speed as f32;
        for obstacle in &mut self.obstacles {
            obstacle.scroll(speed);
        }
        self.obstacles.retain(|o| !o.is_off_screen());

        spawned
    }

    /// Spawn interval after a spawn at the given speed (never below the floor)
    pub fn interval_for_speed(&self, speed: u32) -> u32 {
        let tightening = speed / self.tuning.speed_divisor;
        self.tuning
            .base_interval
            .saturating_sub(tightening)
            .max(self.tuning.min_interval)
    }

    pub fn ticks_until_spawn(&self) -> u32 {
        self.spawn_timer
    }

    /// Spawn one obstacle at the right edge using the type-selection policy
    pub fn spawn_random(&mut self) -> ObstacleKind {
        let x = self.playfield.width;
        if self.rng.random_bool(self.tuning.flying_chance) {
            self.spawn_flying(x).kind
        } else {
            let range = if self.rng.random_bool(self.tuning.tall_chance) {
                self.tuning.tall_height
            } else {
                self.tuning.normal_height
            };
            let height = self.rng.random_range(range.min..range.max);
            self.spawn_ground(x, height).kind
        }
    }

    /// Place a building of the given height on the ground at `x`
    pub fn spawn_ground(&mut self, x: f32, height: f32) -> &Obstacle {
        let floors = (height / self.tuning.floor_height).floor() as u32;
        let pos = Vec2::new(x, self.playfield.ground_y - height);
        let size = Vec2::new(self.tuning.ground_width, height);
        self.push(ObstacleKind::Ground { floors }, pos, size)
    }

    /// Place a plane at standing head height at `x`
    pub fn spawn_flying(&mut self, x: f32) -> &Obstacle {
        let pos = Vec2::new(x, self.playfield.ground_y - self.tuning.flying_altitude);
        let size = Vec2::new(self.tuning.flying_width, self.tuning.flying_height);
        self.push(ObstacleKind::Flying, pos, size)
    }

    fn push(&mut self, kind: ObstacleKind, pos: Vec2, size: Vec2) -> &Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawned obstacle #{id} {kind:?} at x={}", pos.x);
        self.obstacles.push(Obstacle::new(id, kind, pos, size));
        &self.obstacles[self.obstacles.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spawner(seed: u64) -> ObstacleSpawner {
        ObstacleSpawner::new(
            &ObstacleTuning::default(),
            Playfield::default(),
            Pcg32::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_first_spawn_after_base_interval() {
        let mut s = spawner(1);
        for _ in 0..119 {
            assert!(s.update(5).is_none());
        }
        assert!(s.obstacles.is_empty());

        assert!(s.update(5).is_some());
        assert_eq!(s.obstacles.len(), 1);
        // Spawned at the right edge, then scrolled with everything else
        assert_eq!(s.obstacles[0].pos.x, 800.0 - 5.0);
        assert_eq!(s.ticks_until_spawn(), 118);
    }

    #[test]
    fn test_interval_tightens_with_speed_and_floors() {
        let s = spawner(1);
        assert_eq!(s.interval_for_speed(5), 118);
        assert_eq!(s.interval_for_speed(20), 110);
        assert_eq!(s.interval_for_speed(119), 61);
        assert_eq!(s.interval_for_speed(500), 60);
        assert_eq!(s.interval_for_speed(u32::MAX), 60);
    }

    #[test]
    fn test_offscreen_obstacles_are_culled() {
        let mut s = spawner(1);
        s.spawn_ground(10.0, 40.0);
        // Right edge at 50: still visible at x = -40 (right edge = 0)
        for _ in 0..10 {
            s.update(5);
        }
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].pos.x, -40.0);

        s.update(5);
        assert!(s.obstacles.is_empty());
    }

    #[test]
    fn test_ground_and_flying_placement() {
        let mut s = spawner(1);
        let building = s.spawn_ground(400.0, 70.0).clone();
        assert_eq!(building.bounds().bottom(), 350.0);
        assert_eq!(building.size, Vec2::new(40.0, 70.0));
        assert_eq!(building.kind, ObstacleKind::Ground { floors: 4 });

        let plane = s.spawn_flying(400.0).clone();
        assert_eq!(plane.pos.y, 290.0);
        assert_eq!(plane.size, Vec2::new(60.0, 20.0));
        assert!(plane.kind.is_flying());
    }

    #[test]
    fn test_random_spawns_follow_policy() {
        let mut s = spawner(42);
        let tuning = ObstacleTuning::default();
        let mut flying = 0;
        let total = 2000;

        for _ in 0..total {
            s.spawn_random();
        }
        for o in &s.obstacles {
            match o.kind {
                ObstacleKind::Flying => {
                    flying += 1;
                    assert_eq!(o.height(), tuning.flying_height);
                }
                ObstacleKind::Ground { .. } => {
                    assert!(o.height() >= tuning.normal_height.min);
                    assert!(o.height() < tuning.tall_height.max);
                    assert!((o.bounds().bottom() - 350.0).abs() < 1e-3);
                }
            }
        }

        // 30% flying, with a generous margin
        let share = flying as f64 / total as f64;
        assert!((0.25..0.35).contains(&share), "flying share {share}");
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = spawner(7);
        let mut b = spawner(7);
        for _ in 0..1000 {
            assert_eq!(a.update(6), b.update(6));
        }
        assert_eq!(a.obstacles, b.obstacles);
    }
}
