//! Session state and top-level phase machine
//!
//! One `Session` holds everything a run needs: player, obstacle spawner, enemy
//! controller, score and speed. Resets are always full re-initialisation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyController;
use super::obstacle::{ObstacleKind, ObstacleSpawner};
use super::player::Player;
use super::snapshot::Snapshot;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionCause {
    Obstacle { id: u32, kind: ObstacleKind },
    Enemy,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    PlayerJumped,
    ObstacleSpawned { kind: ObstacleKind },
    EnemyJumped,
    EnemyHit { hits: u32 },
    EnemyHidden { size_multiplier: f32 },
    EnemyRespawned { x: f32 },
    SpeedUp { speed: u32 },
    GameOver { cause: CollisionCause, score: u64 },
}

#[derive(Debug, Clone)]
pub struct Session {
    /// Session seed; every run draws its spawner seed from it
    pub seed: u64,
    pub phase: GamePhase,
    /// Ticks survived in the current run
    pub score: u64,
    /// Scroll speed in pixels per tick
    pub speed: u32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub player: Player,
    pub spawner: ObstacleSpawner,
    pub enemy: EnemyController,
    /// Events emitted since the last tick began
    pub events: Vec<GameEvent>,
    /// Collision that ended the last run
    pub last_collision: Option<CollisionCause>,
    pub tuning: Tuning,
    rng: Pcg32,
}

impl Session {
    /// New session in the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    /// New session in the menu; rejects tuning the simulation cannot run with
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner_rng = Pcg32::seed_from_u64(rng.random());
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            speed: tuning.scoring.base_speed,
            time_ticks: 0,
            player: Player::new(&tuning.player, &tuning.playfield),
            spawner: ObstacleSpawner::new(&tuning.obstacles, tuning.playfield, spawner_rng),
            enemy: EnemyController::new(&tuning.enemy, tuning.playfield),
            events: Vec::new(),
            last_collision: None,
            tuning,
            rng,
        }
    }

    /// Menu → Playing. Returns false (and does nothing) outside the menu.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("Ignoring start in {:?}", self.phase);
            return false;
        }
        self.begin_run();
        true
    }

    /// GameOver → Playing. Returns false (and does nothing) unless the run ended.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignoring restart in {:?}", self.phase);
            return false;
        }
        self.begin_run();
        true
    }

    /// Playing → GameOver
    pub fn game_over(&mut self, cause: CollisionCause) {
        self.phase = GamePhase::GameOver;
        self.last_collision = Some(cause);
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
        });
        log::info!("Game over after {} ticks ({:?})", self.score, cause);
    }

    /// Speed for a given score: base plus one per completed score step
    pub fn speed_for_score(&self, score: u64) -> u32 {
        let steps = score / self.tuning.scoring.speed_step_score;
        self.tuning
            .scoring
            .base_speed
            .saturating_add(u32::try_from(steps).unwrap_or(u32::MAX))
    }

    /// Read-only view of the current state for rendering/UI
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    fn begin_run(&mut self) {
        let tuning = &self.tuning;
        self.score = 0;
        self.speed = tuning.scoring.base_speed;
        self.time_ticks = 0;
        self.player = Player::new(&tuning.player, &tuning.playfield);
        self.spawner = ObstacleSpawner::new(
            &tuning.obstacles,
            tuning.playfield,
            Pcg32::seed_from_u64(self.rng.random()),
        );
        self.enemy = EnemyController::new(&tuning.enemy, tuning.playfield);
        self.last_collision = None;
        self.events.clear();
        self.events.push(GameEvent::Started);
        self.phase = GamePhase::Playing;
        log::info!("Run started (session seed {})", self.seed);
    }
}
