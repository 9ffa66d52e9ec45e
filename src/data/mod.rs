mod item_catalog;
mod loader;
mod sandbox_config;

pub use item_catalog::{ItemCatalog, ItemCatalogFile, ItemDefinition};
pub use loader::{
    item_catalog_path, load_item_catalog, load_item_catalog_from_path, load_sandbox_config,
    load_sandbox_config_from_path, sandbox_config_path,
};
pub use sandbox_config::{IslandConfig, MovementConfig, SandboxConfig, StartingStack};

#[cfg(test)]
mod tests {
    use super::{load_item_catalog, load_sandbox_config};

    #[test]
    fn bundled_data_files_load_and_agree() {
        let catalog = load_item_catalog().expect("item catalog should load");
        let config = load_sandbox_config().expect("sandbox config should load");

        assert!(
            !catalog.is_empty(),
            "items.json should include at least one item"
        );
        for stack in &config.starting_items {
            assert!(
                catalog.get(&stack.item).is_some(),
                "starting item {} is missing from items.json",
                stack.item
            );
        }
        if let Some(island) = &config.island {
            let item = catalog.get(&island.item).expect("island item in catalog");
            assert!(item.is_placeable(), "island item must be placeable");
        }
    }
}
