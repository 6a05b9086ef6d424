//! Headless driver: one command per stdin line, one JSON snapshot per
//! stdout line. Logs go to stderr.
//!
//! Usage: `phone-mystery [--realtime] [config.json]`
//!
//! With `--realtime`, wall-clock time elapsed between lines also advances
//! the game; otherwise time only moves on `tick N`.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use phone_mystery::input::Command;
use phone_mystery::{GameConfig, Session};

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.target(env_logger::Target::Stderr);
    builder.init();
}

fn main() -> Result<()> {
    init_logging();

    let mut realtime = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            _ => config_path = Some(arg),
        }
    }

    let config = match &config_path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => GameConfig::default(),
    };
    info!(
        "phone-mystery starting: battery {} units, {} ticks/s",
        config.battery.start_charge, config.clock.ticks_per_sec
    );

    let mut session = Session::new(config);
    let started = Instant::now();
    if realtime {
        session.catch_up(0.0);
    }

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        if realtime {
            session.catch_up(started.elapsed().as_secs_f64() * 1000.0);
        }
        let snapshot = match Command::parse(&line) {
            Ok(Command::Intent(intent)) => session.handle(intent),
            Ok(Command::Tick(n)) => {
                session.tick(n);
                session.snapshot()
            }
            Err(e) => {
                warn!("skipping line: {}", e);
                continue;
            }
        };
        writeln!(out, "{}", snapshot.to_json_line()?)?;
        out.flush()?;
    }
    Ok(())
}
