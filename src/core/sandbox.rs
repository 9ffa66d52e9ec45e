use anyhow::{Context, Result};
use bevy::math::Vec2;
use tracing::info;

use crate::data::{ItemCatalog, SandboxConfig};
use crate::model::{GridCell, ItemRef, world_to_cell};

use super::aim::{AimInput, AimResolver, AimState};
use super::error::ActionError;
use super::interaction::{ActionInput, InteractionController, InteractionOutcome};
use super::inventory::{Inventory, InventoryEvent};
use super::player::PlayerBody;
use super::registry::{BlockEvent, BlockRegistry, WorldEffects};

pub const BASE_LAYER: &str = "base";

/// Everything the outside world feeds into one variable-rate tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub movement: Vec2,
    pub aim: AimInput,
    pub actions: ActionInput,
    pub select_slot: Option<usize>,
    pub scroll_steps: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub outcomes: Vec<InteractionOutcome>,
    pub respawned: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sandbox {
    pub player: PlayerBody,
    pub inventory: Inventory,
    pub registry: BlockRegistry,
    pub controller: InteractionController,
    pub resolver: AimResolver,
    pub aim: AimState,
    pub player_cell: GridCell,
    pub spawn_point: Vec2,
    pub ground_probe_range: f32,
}

impl Sandbox {
    pub fn new(config: &SandboxConfig, registry: BlockRegistry) -> Self {
        let spawn_point = Vec2::from(config.spawn_point);
        Self {
            player: PlayerBody::new(spawn_point, config.movement),
            inventory: Inventory::new(config.hotbar_capacity, config.overflow_capacity),
            registry,
            controller: InteractionController::new(),
            resolver: AimResolver::new(config.max_interaction_range),
            aim: AimState::default(),
            player_cell: world_to_cell(spawn_point, config.cell_size),
            spawn_point,
            ground_probe_range: config.ground_probe_range,
        }
    }

    /// Stocks the configured starting items. Unknown item names are configuration errors.
    pub fn stock_starting_items(
        &mut self,
        config: &SandboxConfig,
        catalog: &ItemCatalog,
    ) -> Result<()> {
        for stack in &config.starting_items {
            let item = catalog
                .get(&stack.item)
                .with_context(|| format!("starting item {} is not in the catalog", stack.item))?;
            let (added, rejected) = self.inventory.add_items(item, stack.count);
            if let Some(reason) = rejected {
                info!(
                    item = %item.name,
                    added,
                    requested = stack.count,
                    %reason,
                    "starting stack truncated"
                );
            }
        }
        Ok(())
    }

    /// Variable-rate step: input, support check, selection, aim, then interaction.
    pub fn update(&mut self, input: &TickInput, effects: &mut impl WorldEffects) -> TickReport {
        self.player.set_input(input.movement);

        let respawned = self.check_support();
        self.player_cell = world_to_cell(self.player.position, self.registry.cell_size());

        if let Some(index) = input.select_slot {
            self.inventory.select_slot(index);
        }
        if input.scroll_steps != 0 {
            self.inventory.cycle_selection(input.scroll_steps.signum());
        }

        self.aim = self.resolver.resolve(self.player_cell, input.aim);
        let outcomes = self.controller.tick(
            input.actions,
            &self.aim,
            &mut self.inventory,
            &mut self.registry,
            effects,
        );

        TickReport {
            outcomes,
            respawned,
        }
    }

    /// Fixed-rate movement integration.
    pub fn fixed_update(&mut self, dt: f32) {
        self.player.integrate(dt);
    }

    /// Credits a picked-up world drop. The caller removes the drop only on success.
    pub fn collect_drop(&mut self, item: &ItemRef) -> Result<(), ActionError> {
        self.inventory.add_item(item)
    }

    pub fn drain_inventory_events(&mut self) -> Vec<InventoryEvent> {
        self.inventory.drain_events()
    }

    pub fn drain_block_events(&mut self) -> Vec<BlockEvent> {
        self.registry.drain_events()
    }

    fn check_support(&mut self) -> bool {
        self.player.grounded = self
            .registry
            .supports(self.player.position, self.ground_probe_range);
        if self.player.grounded {
            return false;
        }
        info!(
            from = ?self.player.position,
            to = ?self.spawn_point,
            "player left the island, respawning"
        );
        self.player.respawn_at(self.spawn_point);
        true
    }
}
