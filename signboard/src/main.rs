/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use signboard::clock::SystemClock;
use signboard::config::SettingsManager;
use signboard::engine::{DisplayEngine, DisplaySnapshot};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Signboard display engine.
///
/// Example:
///   signboard --settings signboard/settings.yaml
#[derive(Debug, Parser)]
#[command(
    name = "signboard",
    about = "School signage board — period countdown and content rotation engine",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML display settings file.
    #[arg(short = 'c', long = "settings")]
    settings: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Signboard starting up...");

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let cli = Cli::parse();

    // ── Load display settings ─────────────────────────────────────────────────
    let mut settings_manager = SettingsManager::new();

    match &cli.settings {
        Some(path) => {
            if let Err(e) = settings_manager.load_from_file(path) {
                error!("Failed to load display settings: {:#}", e);
                process::exit(1);
            }
        }
        None => {
            warn!("No settings file provided, using built-in defaults");
        }
    }

    // ── Print loaded content ──────────────────────────────────────────────────
    let settings = settings_manager.current();
    info!(
        school = %settings.school_name,
        normal_periods = settings.schedule.normal.len(),
        activity_periods = settings.schedule.activity.len(),
        media_items = settings.media.len(),
        goals = settings.goals.len(),
        news_items = settings.news.len(),
        news_seconds = settings.news_seconds,
        logo_seconds = settings.logo_seconds,
        goals_seconds = settings.goals_seconds,
        "Display content loaded"
    );

    // ── Run the display engine ────────────────────────────────────────────────
    let clock = Arc::new(SystemClock::operating());
    let (engine, snapshot_rx) = DisplayEngine::new(clock, settings_manager.subscribe());

    let engine_task = tokio::spawn(engine.run());
    let transitions = tokio::spawn(log_transitions(snapshot_rx));

    tokio::select! {
        _ = engine_task => {
            warn!("display engine stopped unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }

    transitions.abort();
}

/// Operational pulse for the headless daemon: surfaces period transitions
/// from the same snapshot channel the render layer consumes.
async fn log_transitions(mut rx: watch::Receiver<DisplaySnapshot>) {
    let mut last = rx.borrow().period.clone();
    loop {
        if rx.changed().await.is_err() {
            return;
        }
        let snapshot = rx.borrow_and_update().clone();
        if snapshot.period != last {
            match &snapshot.period {
                Some(p) => info!(
                    period = %p.name,
                    day = snapshot.day_type.as_str(),
                    countdown = %snapshot.countdown,
                    "period started"
                ),
                None => match &snapshot.upcoming {
                    Some(n) => info!(upcoming = %n.name, "between periods"),
                    None => info!("outside school hours"),
                },
            }
            last = snapshot.period.clone();
        }
    }
}
