//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed integer tick only
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod obstacle;
pub mod physics;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use enemy::{Enemy, EnemyController, EnemyState, EnemyTransition, HitOutcome};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleSpawner};
pub use physics::PhysicsBody;
pub use player::{Player, PlayerPose};
pub use snapshot::{EnemyView, ObstacleView, PlayerView, Snapshot};
pub use state::{CollisionCause, GameEvent, GamePhase, Session};
pub use tick::{TickInput, detect_collision, tick};
