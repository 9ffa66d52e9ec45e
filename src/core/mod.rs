mod aim;
mod error;
mod interaction;
mod inventory;
mod player;
mod registry;
mod sandbox;

pub use aim::{
    AimDirection, AimInput, AimResolver, AimState, SECTOR_BOUNDARIES_DEG, aim_angle_from_vector,
    normalize_degrees,
};
pub use error::ActionError;
pub use interaction::{
    ActionInput, ActionKind, ButtonEdge, InteractionController, InteractionOutcome,
};
pub use inventory::{Inventory, InventoryEvent, InventorySlot};
pub use player::{Facing, PlayerBody};
pub use registry::{BlockEvent, BlockHandle, BlockRegistry, PlacedBlock, WorldEffects};
pub use sandbox::{BASE_LAYER, Sandbox, TickInput, TickReport};
