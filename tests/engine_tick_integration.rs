//! Engine tick integration tests for the animation and configuration systems.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::IVec2;

use sheetcycler::components::sheetanimation::SheetAnimation;
use sheetcycler::components::sprite::{FrameRect, Sprite, TextureHandle};
use sheetcycler::events::animation::AnimationMissing;
use sheetcycler::resources::animationregistry::{AnimationDef, AnimationRegistry, WrapPolicy};
use sheetcycler::resources::animatorconfig::AnimatorConfig;
use sheetcycler::systems::animation::sheet_animation;
use sheetcycler::systems::animatorconfig::apply_animator_config;

fn make_world() -> World {
    let mut registry = AnimationRegistry::new();
    registry
        .register(
            "walk",
            AnimationDef::new("hero", IVec2::new(2, 3), IVec2::new(16, 16)),
        )
        .unwrap();
    registry
        .register(
            "idle",
            AnimationDef::new("hero_idle", IVec2::new(1, 2), IVec2::new(8, 8)).with_frequency(2),
        )
        .unwrap();

    let mut world = World::new();
    world.insert_resource(registry);
    world.init_resource::<Messages<AnimationMissing>>();
    world
}

fn tick_animation(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(sheet_animation);
    schedule.run(world);
}

fn tick_config(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(apply_animator_config);
    schedule.run(world);
}

fn read_missing(world: &mut World) -> Vec<AnimationMissing> {
    world.resource_mut::<Messages<AnimationMissing>>().update();
    let mut state = SystemState::<MessageReader<AnimationMissing>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

#[test]
fn sheet_animation_updates_sprite_each_tick() {
    let mut world = make_world();
    let entity = world
        .spawn((SheetAnimation::new("walk"), Sprite::default()))
        .id();

    let mut seen = Vec::new();
    for _ in 0..4 {
        tick_animation(&mut world);
        seen.push(world.get::<Sprite>(entity).unwrap().source);
    }

    assert_eq!(
        seen,
        vec![
            FrameRect::new(0, 0, 16, 16),
            FrameRect::new(0, 16, 16, 16),
            FrameRect::new(0, 32, 16, 16),
            FrameRect::new(16, 0, 16, 16),
        ]
    );
    let sprite = world.get::<Sprite>(entity).unwrap();
    assert_eq!(sprite.texture.as_ref().map(TextureHandle::key), Some("hero"));
}

#[test]
fn sheet_animation_respects_frequency() {
    let mut world = make_world();
    let entity = world
        .spawn((SheetAnimation::new("idle"), Sprite::default()))
        .id();

    let mut rows = Vec::new();
    for _ in 0..5 {
        tick_animation(&mut world);
        rows.push(world.get::<Sprite>(entity).unwrap().source.y);
    }

    assert_eq!(rows, vec![0, 0, 8, 8, 0]);
}

#[test]
fn sheet_animation_skips_paused_entities() {
    let mut world = make_world();
    let entity = world
        .spawn((SheetAnimation::new("walk").paused(), Sprite::default()))
        .id();

    tick_animation(&mut world);

    assert_eq!(world.get::<Sprite>(entity).unwrap(), &Sprite::default());
    let registry = world.resource::<AnimationRegistry>();
    assert_eq!(registry.get("walk").unwrap().cursor, IVec2::ZERO);
}

#[test]
fn sheet_animation_writes_message_for_missing_key() {
    let mut world = make_world();
    let before = Sprite::new("old", FrameRect::new(1, 2, 3, 4));
    let entity = world
        .spawn((SheetAnimation::new("swim"), before.clone()))
        .id();

    tick_animation(&mut world);

    assert_eq!(world.get::<Sprite>(entity).unwrap(), &before);
    assert_eq!(
        read_missing(&mut world),
        vec![AnimationMissing {
            entity,
            key: "swim".to_string(),
        }]
    );
}

#[test]
fn sheet_animation_picks_up_late_registration() {
    let mut world = make_world();
    let entity = world
        .spawn((SheetAnimation::new("swim"), Sprite::default()))
        .id();

    tick_animation(&mut world);
    assert_eq!(read_missing(&mut world).len(), 1);

    world
        .resource_mut::<AnimationRegistry>()
        .register(
            "swim",
            AnimationDef::new("fish", IVec2::new(1, 1), IVec2::new(4, 4)),
        )
        .unwrap();
    tick_animation(&mut world);

    assert!(read_missing(&mut world).is_empty());
    let sprite = world.get::<Sprite>(entity).unwrap();
    assert_eq!(sprite.source, FrameRect::new(0, 0, 4, 4));
}

#[test]
fn entities_sharing_a_key_share_its_cursor() {
    let mut world = make_world();
    world.spawn((SheetAnimation::new("walk"), Sprite::default()));
    world.spawn((SheetAnimation::new("walk"), Sprite::default()));

    tick_animation(&mut world);

    let registry = world.resource::<AnimationRegistry>();
    assert_eq!(registry.get("walk").unwrap().cursor, IVec2::new(0, 2));
}

#[test]
fn config_policy_is_applied_to_registry() {
    let mut world = make_world();
    let mut config = AnimatorConfig::new();
    config.wrap_policy = WrapPolicy::Legacy;
    world.insert_resource(config);

    tick_config(&mut world);
    assert_eq!(
        world.resource::<AnimationRegistry>().policy(),
        WrapPolicy::Legacy
    );

    world.resource_mut::<AnimatorConfig>().wrap_policy = WrapPolicy::Bounded;
    tick_config(&mut world);
    assert_eq!(
        world.resource::<AnimationRegistry>().policy(),
        WrapPolicy::Bounded
    );
}

#[test]
fn config_system_without_config_keeps_registry_defaults() {
    let mut world = make_world();
    tick_config(&mut world);
    assert_eq!(
        world.resource::<AnimationRegistry>().policy(),
        WrapPolicy::Bounded
    );
}
