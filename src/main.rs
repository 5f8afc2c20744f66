//! Office Dash headless driver
//!
//! Runs a seeded session on autopilot, restarting after every crash, and prints
//! the final snapshot as JSON.
//!
//! Usage: `office-dash [--ticks N] [--seed S] [--tuning FILE]`

use std::path::PathBuf;

use office_dash::consts::*;
use office_dash::sim::{GamePhase, Session, TickInput, tick};
use office_dash::tuning::Tuning;

struct Options {
    ticks: u64,
    seed: u64,
    tuning: Option<PathBuf>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        ticks: 60 * u64::from(TICKS_PER_SECOND),
        seed: DEFAULT_SEED,
        tuning: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--ticks" => {
                options.ticks = value()?.parse().map_err(|e| format!("bad --ticks: {e}"))?;
            }
            "--seed" => {
                options.seed = value()?.parse().map_err(|e| format!("bad --seed: {e}"))?;
            }
            "--tuning" => options.tuning = Some(PathBuf::from(value()?)),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut session = Session::with_tuning(tuning, options.seed)?;
    session.start();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut runs = 1u32;
    let mut best = 0u64;

    for _ in 0..options.ticks {
        tick(&mut session, &input);
        if session.phase == GamePhase::GameOver {
            best = best.max(session.score);
            runs += 1;
            session.restart();
        }
    }
    best = best.max(session.score);

    log::info!(
        "{} ticks ({:.1}s), {} run(s), best score {}",
        options.ticks,
        options.ticks as f64 / f64::from(TICKS_PER_SECOND),
        runs,
        best
    );
    println!("{}", session.snapshot().to_json()?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Office Dash (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
