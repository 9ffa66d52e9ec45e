use bevy::prelude::*;
use skyblock_builder::{
    ActionError, ActionKind, BlockEvent, InventoryEvent, ItemCatalog, ItemRef, Sandbox,
    SandboxConfig, TickInput,
};

#[derive(Resource, Debug, Clone)]
pub struct RuntimeConfig {
    pub window_title: String,
    pub pixels_per_unit: f32,
    pub fixed_update_hz: f64,
    pub pickup_radius: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            window_title: "Skyblock Builder".to_string(),
            pixels_per_unit: 32.0,
            fixed_update_hz: 50.0,
            pickup_radius: 0.6,
        }
    }
}

impl RuntimeConfig {
    pub fn to_screen(&self, world: Vec2, z: f32) -> Vec3 {
        (world * self.pixels_per_unit).extend(z)
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.pixels_per_unit.max(f32::EPSILON)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Catalog(pub ItemCatalog);

#[derive(Resource, Debug, Clone)]
pub struct SandboxSettings(pub SandboxConfig);

#[derive(Resource, Debug)]
pub struct SessionState {
    pub sandbox: Sandbox,
}

/// Device state sampled this frame, consumed by the sandbox tick.
#[derive(Resource, Debug, Default)]
pub struct FrameInput(pub TickInput);

#[derive(Resource, Debug, Clone, Copy)]
pub struct LayerRoot(pub Entity);

#[derive(Resource, Debug, Default)]
pub struct StatusLine(pub String);

#[derive(Event, Debug, Clone)]
pub enum SandboxNotice {
    Block(BlockEvent),
    Inventory(InventoryEvent),
    Rejected {
        action: ActionKind,
        reason: ActionError,
    },
    Respawned,
}

#[derive(Component)]
pub struct BaseLayer;

#[derive(Component, Debug, Clone)]
pub struct PlacedTile {
    pub item: ItemRef,
}

#[derive(Component, Debug, Clone)]
pub struct WorldDrop {
    pub item: ItemRef,
}

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct TargetMarker;

#[derive(Component)]
pub struct HudText;
