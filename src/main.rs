//! Headless demo: walks a player across a flat floor and logs the outcome.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;
use skulk::{
    init_logging, MovementController, MovementInput, NoiseCue, NoiseSignal, NoiseTrigger, Player,
    SkulkConfig, SkulkPlugin, StaticGround,
};

/// Simulated frame length.
const FRAME: Duration = Duration::from_millis(16);

/// Runs the stealth controller without a window
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 120)]
    ticks: u32,
    /// Hold sprint for the whole run
    #[arg(long)]
    sprint: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => SkulkConfig::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SkulkConfig::default(),
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(config.movement)
        .insert_resource(config.noise)
        .insert_resource(StaticGround::flat(0.0))
        .add_plugins(SkulkPlugin);
    app.finish();
    app.cleanup();

    let player = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_xyz(0.0, 1.0, 0.0),
            MovementInput {
                vertical: 1.0,
                sprint: args.sprint,
                ..MovementInput::default()
            },
        ))
        .id();

    let jump_at = args.ticks / 2;
    for tick in 0..args.ticks {
        if let Some(mut input) = app.world_mut().get_mut::<MovementInput>(player) {
            input.jump = tick == jump_at;
        }
        app.update();
    }
    app.world_mut()
        .resource_mut::<Messages<NoiseCue>>()
        .write(NoiseCue {
            actor: player,
            trigger: NoiseTrigger::Call,
        });
    app.update();

    let world = app.world();
    let position = world
        .get::<Transform>(player)
        .map(|t| t.translation)
        .context("player has no transform")?;
    let controller = world
        .get::<MovementController>(player)
        .context("player has no controller")?;
    let signal = world
        .get::<NoiseSignal>(player)
        .context("player has no noise signal")?;
    info!(
        "after {} frames: position {position:?}, state {:?}, speed {}, grounded {}, alert radius {}",
        args.ticks,
        controller.state(),
        controller.move_speed(),
        controller.is_grounded(),
        signal.alert_radius()
    );
    Ok(())
}
