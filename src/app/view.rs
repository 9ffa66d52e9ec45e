use bevy::prelude::*;
use skyblock_builder::{
    BlockDescriptor, BlockEvent, DropDescriptor, InventoryEvent, ItemRef, cell_to_world_center,
};

use super::resources::{
    HudText, PlacedTile, PlayerSprite, RuntimeConfig, SandboxNotice, SessionState, StatusLine,
    TargetMarker, WorldDrop,
};

const TILE_Z: f32 = 0.0;
const DROP_Z: f32 = 1.0;
const MARKER_Z: f32 = 2.0;
const PLAYER_Z: f32 = 3.0;

const DROP_SCALE: f32 = 0.4;
const PLAYER_SCALE: f32 = 0.7;
const PLAYER_COLOR: Color = Color::srgb(0.93, 0.86, 0.42);
const TARGET_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);

fn descriptor_color([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

pub fn spawn_block_tile(
    commands: &mut Commands,
    root: Entity,
    config: &RuntimeConfig,
    position: Vec2,
    item: &ItemRef,
    block: &BlockDescriptor,
) -> Entity {
    let tile = commands
        .spawn((
            Name::new(block.prefab.clone()),
            Sprite::from_color(
                descriptor_color(block.color),
                Vec2::splat(config.pixels_per_unit),
            ),
            Transform::from_translation(config.to_screen(position, TILE_Z)),
            PlacedTile { item: item.clone() },
        ))
        .id();
    commands.entity(root).add_child(tile);
    tile
}

pub fn spawn_drop_sprite(
    commands: &mut Commands,
    root: Entity,
    config: &RuntimeConfig,
    position: Vec2,
    item: &ItemRef,
    drop: &DropDescriptor,
) -> Entity {
    let entity = commands
        .spawn((
            Name::new(drop.prefab.clone()),
            Sprite::from_color(
                descriptor_color(drop.color),
                Vec2::splat(config.pixels_per_unit * DROP_SCALE),
            ),
            Transform::from_translation(config.to_screen(position, DROP_Z)),
            WorldDrop { item: item.clone() },
        ))
        .id();
    commands.entity(root).add_child(entity);
    entity
}

pub fn spawn_player(
    mut commands: Commands,
    config: Res<RuntimeConfig>,
    session: Res<SessionState>,
) {
    commands.spawn((
        Name::new("Player"),
        PlayerSprite,
        Sprite::from_color(PLAYER_COLOR, Vec2::splat(config.pixels_per_unit * PLAYER_SCALE)),
        Transform::from_translation(config.to_screen(session.sandbox.player.position, PLAYER_Z)),
    ));
    commands.spawn((
        Name::new("PlayerBlockTarget"),
        TargetMarker,
        Sprite::from_color(TARGET_COLOR, Vec2::splat(config.pixels_per_unit)),
        Transform::from_translation(Vec3::Z * MARKER_Z),
        Visibility::Hidden,
    ));
}

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("HudText"),
        HudText,
        Text::new("Initializing..."),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.94, 0.97, 0.99)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));
}

pub fn sync_player_sprite(
    session: Res<SessionState>,
    config: Res<RuntimeConfig>,
    mut players: Query<&mut Transform, With<PlayerSprite>>,
) {
    for mut transform in &mut players {
        transform.translation = config.to_screen(session.sandbox.player.position, PLAYER_Z);
    }
}

/// Shows the targeted cell only while it is within interaction range.
pub fn sync_target_marker(
    session: Res<SessionState>,
    config: Res<RuntimeConfig>,
    mut markers: Query<(&mut Transform, &mut Visibility), With<TargetMarker>>,
) {
    let aim = &session.sandbox.aim;
    let cell_size = session.sandbox.registry.cell_size();
    for (mut transform, mut visibility) in &mut markers {
        if !aim.in_range {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Visible;
        let center = cell_to_world_center(aim.target_cell, cell_size);
        transform.translation = config.to_screen(center, MARKER_Z);
    }
}

pub fn report_notices(mut notices: EventReader<SandboxNotice>, mut status: ResMut<StatusLine>) {
    for notice in notices.read() {
        match notice {
            SandboxNotice::Block(BlockEvent::Placed { cell, item }) => {
                info!(%cell, item = %item.name, "block placed");
                status.0 = format!("Placed {} at {cell}", item.name);
            }
            SandboxNotice::Block(BlockEvent::Destroyed { cell, item }) => {
                info!(%cell, item = %item.name, "block destroyed");
                status.0 = format!("Broke {} at {cell}", item.name);
            }
            SandboxNotice::Inventory(InventoryEvent::SelectionChanged { index }) => {
                debug!(index, "hotbar selection changed");
            }
            SandboxNotice::Inventory(InventoryEvent::SlotsChanged) => {
                debug!("inventory slots changed");
            }
            SandboxNotice::Rejected { action, reason } => {
                status.0 = format!("{action:?} rejected: {reason}");
            }
            SandboxNotice::Respawned => {
                status.0 = "Fell off the island".to_string();
            }
        }
    }
}

pub fn refresh_hud(
    session: Res<SessionState>,
    status: Res<StatusLine>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut hud) = hud_query.get_single_mut() else {
        return;
    };

    let sandbox = &session.sandbox;
    let hotbar = sandbox
        .inventory
        .hotbar()
        .enumerate()
        .map(|(index, slot)| {
            let marker = if index == sandbox.inventory.selected_index() {
                ">"
            } else {
                " "
            };
            match slot {
                Some(slot) => format!("{marker}{}:{} x{}", index + 1, slot.item.name, slot.count),
                None => format!("{marker}{}:-", index + 1),
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let selected = sandbox
        .inventory
        .selected_item()
        .map(|item| item.name.as_str())
        .unwrap_or("None");

    let aim = &sandbox.aim;
    *hud = Text::new(format!(
        "{hotbar}\nSelected: {} ({})  Slots: {}/{}\nAim: {:.0}° {:?}  Target: {}  In range: {}  Cell: {}\nWASD move, mouse aim, Left place, Right break, 1-8 / wheel select\n{}",
        selected,
        sandbox.inventory.selected_count(),
        sandbox.inventory.len(),
        sandbox.inventory.capacity(),
        aim.angle_deg,
        aim.direction,
        aim.target_cell,
        if aim.in_range { "yes" } else { "no" },
        sandbox.player_cell,
        status.0,
    ));
}
