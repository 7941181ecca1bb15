//! Sheetcycler headless player.
//!
//! Registers sprite-sheet animations, spawns one sprite per animation and
//! runs the animation schedule for a number of ticks, printing the source
//! rectangle each sprite shows on every tick. Nothing is rendered; this is
//! the quickest way to check a definition file or a wrap policy.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --defs assets/animations.json --ticks 12 --policy legacy
//! ```

use std::error::Error;
use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::IVec2;

use sheetcycler::components::sheetanimation::SheetAnimation;
use sheetcycler::components::sprite::Sprite;
use sheetcycler::events::animation::AnimationMissing;
use sheetcycler::resources::animationdefs::{AnimationDefs, load_animation_defs, register_all};
use sheetcycler::resources::animationregistry::{AnimationDef, AnimationRegistry, WrapPolicy};
use sheetcycler::resources::animatorconfig::AnimatorConfig;
use sheetcycler::systems::animation::sheet_animation;
use sheetcycler::systems::animatorconfig::apply_animator_config;

/// Sheetcycler: headless sprite-sheet animation player
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON animation definitions. A small built-in set is used when omitted.
    #[arg(long, value_name = "PATH")]
    defs: Option<PathBuf>,

    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of ticks to run. Overrides the configuration file.
    #[arg(long)]
    ticks: Option<u32>,

    /// Cursor wrap policy (bounded or legacy). Overrides the configuration file.
    #[arg(long)]
    policy: Option<WrapPolicy>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn builtin_defs() -> AnimationDefs {
    let mut defs = AnimationDefs::new();
    defs.insert(
        "walk".to_string(),
        AnimationDef::new("hero_walk", IVec2::new(2, 3), IVec2::new(16, 16)),
    );
    defs.insert(
        "idle".to_string(),
        AnimationDef::new("hero_idle", IVec2::new(1, 4), IVec2::new(16, 16)).with_frequency(2),
    );
    defs
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AnimatorConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("Config file not found or invalid, using defaults: {}", e);
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(policy) = cli.policy {
        config.wrap_policy = policy;
    }

    let defs = match &cli.defs {
        Some(path) => load_animation_defs(path)?,
        None => builtin_defs(),
    };
    let names: Vec<String> = defs.keys().cloned().collect();

    let mut registry = AnimationRegistry::new();
    register_all(&mut registry, defs)?;

    // --------------- ECS world + resources ---------------
    let ticks = config.ticks;
    let mut world = World::new();
    world.insert_resource(registry);
    world.insert_resource(config);
    world.init_resource::<Messages<AnimationMissing>>();

    for name in names {
        world.spawn((SheetAnimation::new(name), Sprite::default()));
    }

    let mut schedule = Schedule::default();
    schedule.add_systems((apply_animator_config, sheet_animation).chain());

    let mut query = world.query::<(&SheetAnimation, &Sprite)>();
    for tick in 0..ticks {
        schedule.run(&mut world);
        world.resource_mut::<Messages<AnimationMissing>>().update();

        let mut frames: Vec<(String, String)> = query
            .iter(&world)
            .map(|(anim, sprite)| (anim.key.clone(), sprite.source.to_string()))
            .collect();
        frames.sort();
        for (key, rect) in frames {
            println!("tick {tick:>3}  {key:<12} {rect}");
        }
    }

    Ok(())
}
