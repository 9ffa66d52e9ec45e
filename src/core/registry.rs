use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use bevy::math::Vec2;
use tracing::{debug, warn};

use crate::model::{
    BlockDescriptor, DropDescriptor, GridCell, ItemRef, cell_to_world_center, world_to_cell,
};

use super::error::ActionError;

/// Opaque id of the world object backing a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle(pub u64);

/// Instantiation side effects of the registry, implemented by the rendering layer.
pub trait WorldEffects {
    fn spawn_block(
        &mut self,
        layer: &str,
        position: Vec2,
        item: &ItemRef,
        block: &BlockDescriptor,
    ) -> BlockHandle;

    fn despawn_block(&mut self, handle: BlockHandle);

    fn spawn_drop(&mut self, layer: &str, position: Vec2, item: &ItemRef, drop: &DropDescriptor);
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub cell: GridCell,
    pub item: ItemRef,
    pub handle: BlockHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockEvent {
    Placed { cell: GridCell, item: ItemRef },
    Destroyed { cell: GridCell, item: ItemRef },
}

/// Sparse occupancy map for one tilemap layer. At most one block per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRegistry {
    layer: String,
    cell_size: f32,
    blocks: HashMap<GridCell, PlacedBlock>,
    events: Vec<BlockEvent>,
}

impl BlockRegistry {
    pub fn new(layer: impl Into<String>, cell_size: f32) -> Self {
        Self {
            layer: layer.into(),
            cell_size,
            blocks: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Builds the map from objects already present under the layer root. The first object
    /// found in a cell wins; later ones are skipped with a warning and returned.
    pub fn seeded<I>(
        layer: impl Into<String>,
        cell_size: f32,
        existing: I,
    ) -> (Self, Vec<BlockHandle>)
    where
        I: IntoIterator<Item = (Vec2, ItemRef, BlockHandle)>,
    {
        let mut registry = Self::new(layer, cell_size);
        let mut rejected = Vec::new();

        for (position, item, handle) in existing {
            let cell = world_to_cell(position, cell_size);
            if registry.blocks.contains_key(&cell) {
                warn!(
                    layer = %registry.layer,
                    %cell,
                    item = %item.name,
                    "duplicate block in seeded layer, keeping the first"
                );
                rejected.push(handle);
                continue;
            }
            registry.blocks.insert(cell, PlacedBlock { cell, item, handle });
        }

        (registry, rejected)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.blocks.contains_key(&cell)
    }

    pub fn get(&self, cell: GridCell) -> Option<&PlacedBlock> {
        self.blocks.get(&cell)
    }

    pub fn place_block(
        &mut self,
        cell: GridCell,
        item: Option<&ItemRef>,
        effects: &mut impl WorldEffects,
    ) -> Result<(), ActionError> {
        if self.blocks.contains_key(&cell) {
            debug!(layer = %self.layer, %cell, "cell already occupied");
            return Err(ActionError::CellOccupied);
        }
        let Some((item, block)) = item.and_then(|item| Some((item, item.block.as_ref()?))) else {
            debug!(layer = %self.layer, %cell, "no placeable block for selection");
            return Err(ActionError::MissingItem);
        };

        let position = cell_to_world_center(cell, self.cell_size);
        let handle = effects.spawn_block(&self.layer, position, item, block);
        self.blocks.insert(
            cell,
            PlacedBlock {
                cell,
                item: Arc::clone(item),
                handle,
            },
        );
        self.events.push(BlockEvent::Placed {
            cell,
            item: Arc::clone(item),
        });
        Ok(())
    }

    /// Removes the block and leaves its drop at the cell center.
    pub fn destroy_block(
        &mut self,
        cell: GridCell,
        effects: &mut impl WorldEffects,
    ) -> Result<PlacedBlock, ActionError> {
        let Some(removed) = self.blocks.remove(&cell) else {
            debug!(layer = %self.layer, %cell, "no block to destroy");
            return Err(ActionError::NothingToDestroy);
        };

        let position = cell_to_world_center(cell, self.cell_size);
        match removed.item.drop.as_ref() {
            Some(drop) => effects.spawn_drop(&self.layer, position, &removed.item, drop),
            None => debug!(item = %removed.item.name, "destroyed block has no drop"),
        }
        effects.despawn_block(removed.handle);
        self.events.push(BlockEvent::Destroyed {
            cell,
            item: Arc::clone(&removed.item),
        });
        Ok(removed)
    }

    /// True if any corner of the square `position ± probe_range` rests on a block.
    pub fn supports(&self, position: Vec2, probe_range: f32) -> bool {
        [
            Vec2::new(probe_range, probe_range),
            Vec2::new(probe_range, -probe_range),
            Vec2::new(-probe_range, -probe_range),
            Vec2::new(-probe_range, probe_range),
        ]
        .into_iter()
        .any(|corner| self.is_occupied(world_to_cell(position + corner, self.cell_size)))
    }

    /// Owned, ordered copy of the occupancy map for readers outside the tick.
    pub fn snapshot(&self) -> BTreeMap<GridCell, String> {
        self.blocks
            .iter()
            .map(|(cell, placed)| (*cell, placed.item.name.clone()))
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<BlockEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemCategory, ItemKind};

    #[derive(Default)]
    struct RecordingEffects {
        next_handle: u64,
        spawned: Vec<(Vec2, String)>,
        despawned: Vec<BlockHandle>,
        drops: Vec<(Vec2, String)>,
    }

    impl WorldEffects for RecordingEffects {
        fn spawn_block(
            &mut self,
            _layer: &str,
            position: Vec2,
            _item: &ItemRef,
            block: &BlockDescriptor,
        ) -> BlockHandle {
            self.next_handle += 1;
            self.spawned.push((position, block.prefab.clone()));
            BlockHandle(self.next_handle)
        }

        fn despawn_block(&mut self, handle: BlockHandle) {
            self.despawned.push(handle);
        }

        fn spawn_drop(
            &mut self,
            _layer: &str,
            position: Vec2,
            _item: &ItemRef,
            drop: &DropDescriptor,
        ) {
            self.drops.push((position, drop.prefab.clone()));
        }
    }

    fn dirt() -> ItemRef {
        Arc::new(ItemKind {
            id: 0,
            name: "dirt".to_string(),
            category: ItemCategory::Block,
            max_stack: 64,
            block: Some(BlockDescriptor {
                prefab: "DirtBlock".to_string(),
                color: [0.5, 0.4, 0.2],
            }),
            drop: Some(DropDescriptor {
                prefab: "DirtItem".to_string(),
                color: [0.6, 0.4, 0.2],
            }),
        })
    }

    #[test]
    fn place_spawns_at_cell_center() {
        let mut registry = BlockRegistry::new("base", 1.0);
        let mut effects = RecordingEffects::default();
        registry
            .place_block(GridCell::new(3, 4), Some(&dirt()), &mut effects)
            .expect("empty cell");

        assert_eq!(effects.spawned, vec![(Vec2::new(3.5, 4.5), "DirtBlock".to_string())]);
        assert_eq!(
            registry.get(GridCell::new(3, 4)).map(|b| b.handle),
            Some(BlockHandle(1))
        );
    }

    #[test]
    fn occupied_cell_is_rejected_without_side_effects() {
        let mut registry = BlockRegistry::new("base", 1.0);
        let mut effects = RecordingEffects::default();
        let cell = GridCell::new(0, 0);
        registry.place_block(cell, Some(&dirt()), &mut effects).expect("first");
        registry.drain_events();

        assert_eq!(
            registry.place_block(cell, Some(&dirt()), &mut effects),
            Err(ActionError::CellOccupied)
        );
        assert_eq!(effects.spawned.len(), 1);
        assert!(registry.drain_events().is_empty());
    }

    #[test]
    fn missing_item_or_descriptor_is_rejected() {
        let mut registry = BlockRegistry::new("base", 1.0);
        let mut effects = RecordingEffects::default();
        let stick = Arc::new(ItemKind {
            block: None,
            ..(*dirt()).clone()
        });

        assert_eq!(
            registry.place_block(GridCell::new(1, 1), None, &mut effects),
            Err(ActionError::MissingItem)
        );
        assert_eq!(
            registry.place_block(GridCell::new(1, 1), Some(&stick), &mut effects),
            Err(ActionError::MissingItem)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn destroy_drops_item_and_frees_cell() {
        let mut registry = BlockRegistry::new("base", 2.0);
        let mut effects = RecordingEffects::default();
        let cell = GridCell::new(-1, 2);
        registry.place_block(cell, Some(&dirt()), &mut effects).expect("place");

        let removed = registry.destroy_block(cell, &mut effects).expect("destroy");
        assert_eq!(removed.item.name, "dirt");
        assert_eq!(effects.despawned, vec![BlockHandle(1)]);
        assert_eq!(effects.drops, vec![(Vec2::new(-1.0, 5.0), "DirtItem".to_string())]);
        assert!(!registry.is_occupied(cell));

        assert_eq!(
            registry.destroy_block(cell, &mut effects),
            Err(ActionError::NothingToDestroy)
        );
        assert_eq!(effects.drops.len(), 1);
    }

    #[test]
    fn seeding_keeps_first_block_per_cell() {
        let (registry, rejected) = BlockRegistry::seeded(
            "base",
            1.0,
            vec![
                (Vec2::new(0.5, 0.5), dirt(), BlockHandle(10)),
                (Vec2::new(0.9, 0.1), dirt(), BlockHandle(11)),
                (Vec2::new(1.5, 0.5), dirt(), BlockHandle(12)),
            ],
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(GridCell::new(0, 0)).map(|b| b.handle),
            Some(BlockHandle(10))
        );
        assert_eq!(rejected, vec![BlockHandle(11)]);
    }

    #[test]
    fn supports_checks_all_four_probe_corners() {
        let (registry, _) = BlockRegistry::seeded(
            "base",
            1.0,
            vec![(Vec2::new(0.5, 0.5), dirt(), BlockHandle(1))],
        );
        assert!(registry.supports(Vec2::new(0.5, 0.5), 0.35));
        assert!(registry.supports(Vec2::new(1.2, 1.2), 0.35));
        assert!(!registry.supports(Vec2::new(1.5, 1.5), 0.35));
    }

    #[test]
    fn snapshot_is_ordered_by_cell() {
        let mut registry = BlockRegistry::new("base", 1.0);
        let mut effects = RecordingEffects::default();
        for cell in [GridCell::new(2, 0), GridCell::new(0, 0), GridCell::new(1, 0)] {
            registry.place_block(cell, Some(&dirt()), &mut effects).expect("place");
        }
        let cells: Vec<_> = registry.snapshot().into_keys().collect();
        assert_eq!(
            cells,
            vec![GridCell::new(0, 0), GridCell::new(1, 0), GridCell::new(2, 0)]
        );
    }
}
