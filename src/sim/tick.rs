//! Fixed-step simulation tick
//!
//! Core game loop that advances a session deterministically, one frame per call.

use super::collision::overlaps;
use super::enemy::{EnemyTransition, HitOutcome};
use super::state::{CollisionCause, GameEvent, GamePhase, Session};

/// How many ticks ahead the autopilot starts a jump over a building
const AUTOPILOT_JUMP_LEAD_TICKS: f32 = 7.0;
/// How many ticks ahead the autopilot ducks under a plane
const AUTOPILOT_DUCK_LEAD_TICKS: f32 = 3.0;

/// Input commands for a single tick (edge-triggered)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Stand up and jump
    pub jump: bool,
    pub duck: bool,
    pub stand: bool,
    /// Land a hit on the enemy
    pub strike: bool,
    /// Idle/demo mode - autopilot plays the runner
    pub idle_mode: bool,
}

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput) {
    session.events.clear();

    // Menu and GameOver are frozen
    if session.phase != GamePhase::Playing {
        return;
    }

    session.time_ticks += 1;

    let input = if input.idle_mode {
        autopilot(session, input)
    } else {
        input.clone()
    };
    apply_input(session, &input);

    session.player.update();

    if let Some(kind) = session.spawner.update(session.speed) {
        session.events.push(GameEvent::ObstacleSpawned { kind });
    }

    match session.enemy.update(&session.spawner.obstacles) {
        Some(EnemyTransition::Jumped) => session.events.push(GameEvent::EnemyJumped),
        Some(EnemyTransition::Respawned { x }) => {
            session.events.push(GameEvent::EnemyRespawned { x })
        }
        None => {}
    }

    if let Some(cause) = detect_collision(session) {
        session.game_over(cause);
        return;
    }

    session.score += session.tuning.scoring.score_per_tick;
    let speed = session.speed_for_score(session.score);
    if speed > session.speed {
        log::info!("Speed up: {} -> {} at score {}", session.speed, speed, session.score);
        session.events.push(GameEvent::SpeedUp { speed });
    }
    session.speed = speed.max(session.speed);
}

/// First collision between the player and the world, if any
///
/// Obstacles are checked before the enemy. Flying obstacles never hit a
/// ducking player, and a hidden enemy is skipped entirely.
pub fn detect_collision(session: &Session) -> Option<CollisionCause> {
    let player = session.player.bounds();
    let ducking = session.player.is_ducking;

    for obstacle in &session.spawner.obstacles {
        if obstacle.kind.is_flying() && ducking {
            continue;
        }
        if overlaps(&player, &obstacle.bounds()) {
            return Some(CollisionCause::Obstacle {
                id: obstacle.id,
                kind: obstacle.kind,
            });
        }
    }

    let enemy = session.enemy.bounds()?;
    overlaps(&player, &enemy).then_some(CollisionCause::Enemy)
}

fn apply_input(session: &mut Session, input: &TickInput) {
    let player = &mut session.player;
    if input.duck {
        player.duck();
    }
    if input.stand {
        player.stand();
    }
    if input.jump {
        player.stand();
        if player.jump() {
            session.events.push(GameEvent::PlayerJumped);
        }
    }

    if input.strike {
        match session.enemy.register_hit() {
            HitOutcome::Ignored => {}
            HitOutcome::Counted { hits } => session.events.push(GameEvent::EnemyHit { hits }),
            HitOutcome::Escalated { size_multiplier } => {
                session.events.push(GameEvent::EnemyHidden { size_multiplier })
            }
        }
    }
}

/// Pick jump/duck/stand from the nearest obstacle still ahead of the player
fn autopilot(session: &Session, input: &TickInput) -> TickInput {
    let mut input = TickInput {
        strike: input.strike,
        ..Default::default()
    };

    let player = &session.player;
    let bounds = player.bounds();
    let speed = session.speed as f32;

    let next = session
        .spawner
        .obstacles
        .iter()
        .filter(|o| o.bounds().right() > bounds.left())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    match next {
        Some(obstacle) => {
            let gap = obstacle.pos.x - bounds.right();
            if obstacle.kind.is_flying() {
                if gap < speed * AUTOPILOT_DUCK_LEAD_TICKS {
                    input.duck = true;
                } else if player.is_ducking {
                    input.stand = true;
                }
            } else if gap > 0.0 && gap < speed * AUTOPILOT_JUMP_LEAD_TICKS {
                input.jump = true;
            } else if player.is_ducking {
                input.stand = true;
            }
        }
        None if player.is_ducking => input.stand = true,
        None => {}
    }

    input
}
