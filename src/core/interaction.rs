use tracing::debug;

use crate::model::{GridCell, ItemRef};

use super::aim::AimState;
use super::error::ActionError;
use super::inventory::Inventory;
use super::registry::{BlockRegistry, WorldEffects};

/// Rising-edge detector over a raw held/released signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdge {
    held: bool,
}

impl ButtonEdge {
    /// Records this tick's raw state and reports whether it just went down.
    pub fn update(&mut self, held_now: bool) -> bool {
        let pressed = held_now && !self.held;
        self.held = held_now;
        pressed
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Raw action buttons for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionInput {
    pub primary: bool,
    pub secondary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Place,
    Destroy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    Placed { cell: GridCell, item: ItemRef },
    Destroyed { cell: GridCell, item: ItemRef },
    Rejected { action: ActionKind, reason: ActionError },
}

/// Turns button edges plus the resolved aim into registry and inventory mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionController {
    place: ButtonEdge,
    destroy: ButtonEdge,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges are tracked every tick, including ticks where the aim is out of range, so a
    /// button held while walking into range does not fire.
    pub fn tick(
        &mut self,
        input: ActionInput,
        aim: &AimState,
        inventory: &mut Inventory,
        registry: &mut BlockRegistry,
        effects: &mut impl WorldEffects,
    ) -> Vec<InteractionOutcome> {
        let place_pressed = self.place.update(input.primary);
        let destroy_pressed = self.destroy.update(input.secondary);
        let mut outcomes = Vec::new();

        if place_pressed {
            outcomes.push(
                match place_selected(aim, inventory, registry, effects) {
                    Ok((cell, item)) => InteractionOutcome::Placed { cell, item },
                    Err(reason) => reject(ActionKind::Place, reason),
                },
            );
        }

        if destroy_pressed {
            outcomes.push(match destroy_target(aim, registry, effects) {
                Ok((cell, item)) => InteractionOutcome::Destroyed { cell, item },
                Err(reason) => reject(ActionKind::Destroy, reason),
            });
        }

        outcomes
    }
}

fn place_selected(
    aim: &AimState,
    inventory: &mut Inventory,
    registry: &mut BlockRegistry,
    effects: &mut impl WorldEffects,
) -> Result<(GridCell, ItemRef), ActionError> {
    let cell = aim.actionable_cell().ok_or(ActionError::OutOfRange)?;
    let item = inventory
        .selected_item()
        .cloned()
        .ok_or(ActionError::InvalidSelection)?;
    registry.place_block(cell, Some(&item), effects)?;
    inventory.consume_selected()?;
    Ok((cell, item))
}

fn destroy_target(
    aim: &AimState,
    registry: &mut BlockRegistry,
    effects: &mut impl WorldEffects,
) -> Result<(GridCell, ItemRef), ActionError> {
    let cell = aim.actionable_cell().ok_or(ActionError::OutOfRange)?;
    let removed = registry.destroy_block(cell, effects)?;
    Ok((cell, removed.item))
}

fn reject(action: ActionKind, reason: ActionError) -> InteractionOutcome {
    debug!(?action, %reason, "interaction rejected");
    InteractionOutcome::Rejected { action, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_edge_fires_once_per_press() {
        let mut edge = ButtonEdge::default();
        assert!(!edge.update(false));
        assert!(edge.update(true));
        assert!(!edge.update(true));
        assert!(edge.is_held());
        assert!(!edge.update(false));
        assert!(edge.update(true));
    }
}
