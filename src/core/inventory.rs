use std::sync::Arc;

use crate::model::ItemRef;

use super::error::ActionError;

#[derive(Debug, Clone, PartialEq)]
pub struct InventorySlot {
    pub item: ItemRef,
    pub count: u32,
}

/// Change notifications for whatever renders the hotbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEvent {
    SlotsChanged,
    SelectionChanged { index: usize },
}

/// Ordered item slots, at most one per item kind, with a hotbar selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
    selected_index: usize,
    selection_cleared: bool,
    hotbar_capacity: usize,
    overflow_capacity: usize,
    events: Vec<InventoryEvent>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(8, 32)
    }
}

impl Inventory {
    pub fn new(hotbar_capacity: usize, overflow_capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            selected_index: 0,
            selection_cleared: false,
            hotbar_capacity: hotbar_capacity.max(1),
            overflow_capacity,
            events: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.hotbar_capacity + self.overflow_capacity
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn hotbar(&self) -> impl Iterator<Item = Option<&InventorySlot>> + '_ {
        (0..self.hotbar_capacity).map(|index| self.slots.get(index))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_slot(&self) -> Option<&InventorySlot> {
        if self.selection_cleared {
            return None;
        }
        self.slots.get(self.selected_index)
    }

    pub fn selected_item(&self) -> Option<&ItemRef> {
        self.selected_slot().map(|slot| &slot.item)
    }

    pub fn selected_count(&self) -> u32 {
        self.selected_slot().map_or(0, |slot| slot.count)
    }

    pub fn count_of(&self, item: &ItemRef) -> u32 {
        self.position_of(item)
            .map_or(0, |index| self.slots[index].count)
    }

    /// Clamps into the hotbar; never fails.
    pub fn select_slot(&mut self, index: usize) {
        self.selected_index = index.min(self.hotbar_capacity - 1);
        self.selection_cleared = false;
        self.events.push(InventoryEvent::SelectionChanged {
            index: self.selected_index,
        });
    }

    /// Steps the selection by `delta`, wrapping over the occupied slots.
    pub fn cycle_selection(&mut self, delta: i32) {
        if self.slots.is_empty() || delta == 0 {
            return;
        }
        let count = self.slots.len() as i64;
        let next = (self.selected_index as i64 + i64::from(delta)).rem_euclid(count);
        self.select_slot(next as usize);
    }

    pub fn add_item(&mut self, item: &ItemRef) -> Result<(), ActionError> {
        if let Some(index) = self.position_of(item) {
            let slot = &mut self.slots[index];
            if slot.count >= slot.item.max_stack {
                return Err(ActionError::StackFull);
            }
            slot.count += 1;
            self.events.push(InventoryEvent::SlotsChanged);
            return Ok(());
        }

        if self.slots.len() >= self.capacity() {
            return Err(ActionError::InventoryFull);
        }

        self.slots.push(InventorySlot {
            item: Arc::clone(item),
            count: 1,
        });
        if self.selection_cleared && self.slots.len() - 1 == self.selected_index {
            self.selection_cleared = false;
        }
        self.events.push(InventoryEvent::SlotsChanged);
        Ok(())
    }

    /// Adds up to `count` units, stopping at the first rejection. Returns how many were added.
    pub fn add_items(&mut self, item: &ItemRef, count: u32) -> (u32, Option<ActionError>) {
        for added in 0..count {
            if let Err(reason) = self.add_item(item) {
                return (added, Some(reason));
            }
        }
        (count, None)
    }

    /// Takes one unit from the selected slot. An emptied slot is removed and the selection
    /// stays cleared until the next explicit selection.
    pub fn consume_selected(&mut self) -> Result<ItemRef, ActionError> {
        if self.selection_cleared {
            return Err(ActionError::InvalidSelection);
        }
        let index = self.selected_index;
        let Some(slot) = self.slots.get_mut(index) else {
            return Err(ActionError::InvalidSelection);
        };
        if slot.count == 0 {
            return Err(ActionError::InvalidSelection);
        }

        slot.count -= 1;
        let item = Arc::clone(&slot.item);
        if slot.count == 0 {
            self.slots.remove(index);
            self.selection_cleared = true;
            self.clamp_selection();
        }
        self.events.push(InventoryEvent::SlotsChanged);
        Ok(item)
    }

    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }

    fn position_of(&self, item: &ItemRef) -> Option<usize> {
        self.slots.iter().position(|slot| slot.item.id == item.id)
    }

    fn clamp_selection(&mut self) {
        let upper = self.hotbar_capacity.min(self.slots.len()).saturating_sub(1);
        if self.selected_index > upper {
            self.selected_index = upper;
            self.events.push(InventoryEvent::SelectionChanged {
                index: self.selected_index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemCategory, ItemKind};

    fn kind(id: u16, name: &str, max_stack: u32) -> ItemRef {
        Arc::new(ItemKind {
            id,
            name: name.to_string(),
            category: ItemCategory::Block,
            max_stack,
            block: None,
            drop: None,
        })
    }

    #[test]
    fn add_item_merges_into_existing_slot() {
        let dirt = kind(0, "dirt", 64);
        let mut inv = Inventory::new(8, 32);
        inv.add_item(&dirt).expect("first");
        inv.add_item(&dirt).expect("second");
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.count_of(&dirt), 2);
    }

    #[test]
    fn full_stack_rejects_instead_of_opening_a_second_slot() {
        let stone = kind(1, "stone", 3);
        let mut inv = Inventory::new(8, 32);
        for _ in 0..3 {
            inv.add_item(&stone).expect("below cap");
        }
        assert_eq!(inv.add_item(&stone), Err(ActionError::StackFull));
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.count_of(&stone), 3);
    }

    #[test]
    fn add_items_reports_partial_progress() {
        let stone = kind(1, "stone", 5);
        let mut inv = Inventory::new(8, 32);
        assert_eq!(inv.add_items(&stone, 7), (5, Some(ActionError::StackFull)));
        assert_eq!(inv.add_items(&kind(2, "sand", 5), 2), (2, None));
    }

    #[test]
    fn select_slot_clamps_into_hotbar() {
        let mut inv = Inventory::new(4, 4);
        inv.select_slot(99);
        assert_eq!(inv.selected_index(), 3);
        assert!(inv.selected_item().is_none());
        assert_eq!(inv.selected_count(), 0);
        assert_eq!(
            inv.drain_events(),
            vec![InventoryEvent::SelectionChanged { index: 3 }]
        );
    }

    #[test]
    fn consume_decrements_then_removes_slot() {
        let dirt = kind(0, "dirt", 64);
        let mut inv = Inventory::new(8, 32);
        inv.add_items(&dirt, 2);

        let taken = inv.consume_selected().expect("first unit");
        assert_eq!(taken.name, "dirt");
        assert_eq!(inv.selected_count(), 1);

        inv.consume_selected().expect("last unit");
        assert!(inv.is_empty());
        assert!(inv.selected_item().is_none());
        assert_eq!(inv.consume_selected(), Err(ActionError::InvalidSelection));
    }

    #[test]
    fn emptied_slot_clears_selection_until_reselected() {
        let dirt = kind(0, "dirt", 64);
        let stone = kind(1, "stone", 64);
        let mut inv = Inventory::new(8, 32);
        inv.add_item(&dirt).expect("dirt");
        inv.add_item(&stone).expect("stone");

        inv.consume_selected().expect("dirt consumed");
        assert_eq!(inv.len(), 1);
        assert!(inv.selected_item().is_none());

        inv.select_slot(0);
        assert_eq!(inv.selected_item().map(|item| item.name.as_str()), Some("stone"));
    }

    #[test]
    fn removing_last_slot_pulls_selection_back() {
        let dirt = kind(0, "dirt", 64);
        let stone = kind(1, "stone", 64);
        let mut inv = Inventory::new(8, 32);
        inv.add_item(&dirt).expect("dirt");
        inv.add_item(&stone).expect("stone");
        inv.select_slot(1);

        inv.consume_selected().expect("stone consumed");
        assert_eq!(inv.selected_index(), 0);
    }

    #[test]
    fn cycle_selection_wraps_over_occupied_slots() {
        let mut inv = Inventory::new(8, 32);
        inv.cycle_selection(1);
        assert_eq!(inv.selected_index(), 0);

        for (id, name) in [(0, "a"), (1, "b"), (2, "c")] {
            inv.add_item(&kind(id, name, 4)).expect("add");
        }
        inv.cycle_selection(-1);
        assert_eq!(inv.selected_index(), 2);
        inv.cycle_selection(1);
        assert_eq!(inv.selected_index(), 0);
        inv.cycle_selection(4);
        assert_eq!(inv.selected_index(), 1);
    }
}
