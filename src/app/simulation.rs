use bevy::prelude::*;
use skyblock_builder::{
    BlockDescriptor, BlockHandle, DropDescriptor, InteractionOutcome, ItemRef, WorldEffects,
};

use super::resources::{
    FrameInput, LayerRoot, RuntimeConfig, SandboxNotice, SessionState, WorldDrop,
};
use super::view;

/// Registry side effects expressed as deferred entity commands.
struct CommandEffects<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    root: Entity,
    config: &'a RuntimeConfig,
}

impl WorldEffects for CommandEffects<'_, '_, '_> {
    fn spawn_block(
        &mut self,
        _layer: &str,
        position: Vec2,
        item: &ItemRef,
        block: &BlockDescriptor,
    ) -> BlockHandle {
        let entity =
            view::spawn_block_tile(self.commands, self.root, self.config, position, item, block);
        BlockHandle(entity.to_bits())
    }

    fn despawn_block(&mut self, handle: BlockHandle) {
        let Ok(entity) = Entity::try_from_bits(handle.0) else {
            warn!(handle = handle.0, "block handle is not an entity");
            return;
        };
        if let Some(mut entity_commands) = self.commands.get_entity(entity) {
            entity_commands.despawn_recursive();
        }
    }

    fn spawn_drop(&mut self, _layer: &str, position: Vec2, item: &ItemRef, drop: &DropDescriptor) {
        view::spawn_drop_sprite(self.commands, self.root, self.config, position, item, drop);
    }
}

pub fn apply_tick_input(
    mut commands: Commands,
    frame: Res<FrameInput>,
    root: Res<LayerRoot>,
    config: Res<RuntimeConfig>,
    mut session: ResMut<SessionState>,
    mut notices: EventWriter<SandboxNotice>,
) {
    let mut effects = CommandEffects {
        commands: &mut commands,
        root: root.0,
        config: &config,
    };
    let report = session.sandbox.update(&frame.0, &mut effects);

    for outcome in report.outcomes {
        if let InteractionOutcome::Rejected { action, reason } = outcome {
            notices.send(SandboxNotice::Rejected { action, reason });
        }
    }
    if report.respawned {
        notices.send(SandboxNotice::Respawned);
    }
    for event in session.sandbox.drain_block_events() {
        notices.send(SandboxNotice::Block(event));
    }
    for event in session.sandbox.drain_inventory_events() {
        notices.send(SandboxNotice::Inventory(event));
    }
}

pub fn integrate_movement(time: Res<Time>, mut session: ResMut<SessionState>) {
    session.sandbox.fixed_update(time.delta_secs());
}

/// Credits drops the player walks over; a drop stays in the world if the inventory refuses it.
pub fn collect_drops(
    mut commands: Commands,
    config: Res<RuntimeConfig>,
    drops: Query<(Entity, &Transform, &WorldDrop)>,
    mut session: ResMut<SessionState>,
    mut notices: EventWriter<SandboxNotice>,
) {
    let player = session.sandbox.player.position;
    for (entity, transform, drop) in &drops {
        let position = config.to_world(transform.translation.truncate());
        if position.distance(player) > config.pickup_radius {
            continue;
        }
        match session.sandbox.collect_drop(&drop.item) {
            Ok(()) => commands.entity(entity).despawn_recursive(),
            Err(reason) => debug!(item = %drop.item.name, %reason, "drop not collected"),
        }
    }
    for event in session.sandbox.drain_inventory_events() {
        notices.send(SandboxNotice::Inventory(event));
    }
}
