//! Read-only per-tick export for rendering and UI
//!
//! Everything a renderer needs to draw a frame, copied out of the session so the
//! consumer never touches live simulation state.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::enemy::EnemyState;
use super::obstacle::ObstacleKind;
use super::player::PlayerPose;
use super::state::{GameEvent, GamePhase, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub bounds: Rect,
    pub pose: PlayerPose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    /// `None` while hidden
    pub bounds: Option<Rect>,
    pub visible: bool,
    pub state: EnemyState,
    pub hits: u32,
    pub size_multiplier: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub speed: u32,
    pub time_ticks: u64,
    pub ground_y: f32,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub enemy: EnemyView,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let enemy = &session.enemy;
        let bounds = enemy.bounds();

        Self {
            phase: session.phase,
            score: session.score,
            speed: session.speed,
            time_ticks: session.time_ticks,
            ground_y: session.tuning.playfield.ground_y,
            player: PlayerView {
                bounds: session.player.bounds(),
                pose: session.player.pose(),
            },
            obstacles: session
                .spawner
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    bounds: o.bounds(),
                })
                .collect(),
            enemy: EnemyView {
                visible: bounds.is_some(),
                bounds,
                state: enemy.state(),
                hits: enemy.hits,
                size_multiplier: enemy.size_multiplier,
            },
            events: session.events.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
