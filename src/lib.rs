//! Office Dash - a side-scrolling office runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, enemy, session)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{Session, Snapshot, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the tick-based timers are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Seed used when the driver is not given one
    pub const DEFAULT_SEED: u64 = 0x0FF1_CE00;
}
