use bevy::prelude::*;
use skyblock_builder::{BASE_LAYER, BlockHandle, BlockRegistry, Sandbox, cell_to_world_center};

use super::resources::{
    BaseLayer, Catalog, LayerRoot, PlacedTile, RuntimeConfig, SandboxSettings, SessionState,
};
use super::state::AppPhase;
use super::view;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("PrimaryCamera"), Camera2d));
}

/// Lays out the configured island under the base-layer root.
pub fn spawn_world(
    mut commands: Commands,
    catalog: Res<Catalog>,
    settings: Res<SandboxSettings>,
    config: Res<RuntimeConfig>,
) {
    let root = commands
        .spawn((
            Name::new("BaseTilemap"),
            BaseLayer,
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    commands.insert_resource(LayerRoot(root));

    let Some(island) = settings.0.island.as_ref() else {
        return;
    };
    let Some(item) = catalog.0.get(&island.item) else {
        warn!(item = %island.item, "island item is not in the catalog");
        return;
    };
    let Some(block) = item.block.as_ref() else {
        warn!(item = %island.item, "island item has no block descriptor");
        return;
    };

    for cell in island.cells() {
        let position = cell_to_world_center(cell, settings.0.cell_size);
        view::spawn_block_tile(&mut commands, root, &config, position, item, block);
    }
}

/// Seeds the registry from the tiles found under the base layer and starts the session.
pub fn bootstrap_session(
    mut commands: Commands,
    settings: Res<SandboxSettings>,
    catalog: Res<Catalog>,
    config: Res<RuntimeConfig>,
    layers: Query<&Children, With<BaseLayer>>,
    tiles: Query<(&Transform, &PlacedTile)>,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut exit: EventWriter<AppExit>,
) {
    let existing: Vec<_> = layers
        .iter()
        .flat_map(|children| children.iter())
        .filter_map(|&entity| {
            let (transform, tile) = tiles.get(entity).ok()?;
            Some((
                config.to_world(transform.translation.truncate()),
                tile.item.clone(),
                BlockHandle(entity.to_bits()),
            ))
        })
        .collect();

    let (registry, rejected) = BlockRegistry::seeded(BASE_LAYER, settings.0.cell_size, existing);
    for handle in rejected {
        if let Ok(entity) = Entity::try_from_bits(handle.0) {
            commands.entity(entity).despawn_recursive();
        }
    }
    info!(blocks = registry.len(), "base layer seeded");

    let mut sandbox = Sandbox::new(&settings.0, registry);
    if let Err(err) = sandbox.stock_starting_items(&settings.0, &catalog.0) {
        error!("invalid sandbox configuration: {err:#}");
        exit.send(AppExit::error());
        return;
    }

    commands.insert_resource(SessionState { sandbox });
    next_phase.set(AppPhase::InGame);
}
