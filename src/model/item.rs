use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Block,
    Material,
    Tool,
}

/// What gets instantiated on the tilemap when the item is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    pub prefab: String,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

/// The pick-up-able object left behind when a block of this item is destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropDescriptor {
    pub prefab: String,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

const fn default_color() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

/// Immutable item definition. Built once from the catalog and shared through [`ItemRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKind {
    pub id: u16,
    pub name: String,
    pub category: ItemCategory,
    pub max_stack: u32,
    pub block: Option<BlockDescriptor>,
    pub drop: Option<DropDescriptor>,
}

impl ItemKind {
    pub fn is_placeable(&self) -> bool {
        self.block.is_some()
    }
}

pub type ItemRef = Arc<ItemKind>;
