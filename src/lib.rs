pub mod core;
pub mod data;
pub mod model;

pub use crate::core::{
    ActionError, ActionInput, ActionKind, AimDirection, AimInput, AimResolver, AimState,
    BASE_LAYER, BlockEvent, BlockHandle, BlockRegistry, ButtonEdge, Facing, InteractionController,
    InteractionOutcome, Inventory, InventoryEvent, InventorySlot, PlacedBlock, PlayerBody,
    SECTOR_BOUNDARIES_DEG, Sandbox, TickInput, TickReport, WorldEffects, aim_angle_from_vector,
    normalize_degrees,
};
pub use data::{
    IslandConfig, ItemCatalog, ItemCatalogFile, ItemDefinition, MovementConfig, SandboxConfig,
    StartingStack, load_item_catalog, load_item_catalog_from_path, load_sandbox_config,
    load_sandbox_config_from_path,
};
pub use model::{
    BlockDescriptor, DropDescriptor, GridCell, ItemCategory, ItemKind, ItemRef,
    cell_to_world_center, world_to_cell,
};
