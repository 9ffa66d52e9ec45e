mod grid;
mod item;

pub use grid::{GridCell, cell_to_world_center, world_to_cell};
pub use item::{BlockDescriptor, DropDescriptor, ItemCategory, ItemKind, ItemRef};
