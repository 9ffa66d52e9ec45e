use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::model::{BlockDescriptor, DropDescriptor, ItemCategory, ItemKind, ItemRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    pub category: ItemCategory,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub block: Option<BlockDescriptor>,
    #[serde(default)]
    pub drop: Option<DropDescriptor>,
}

const fn default_max_stack() -> u32 {
    64
}

/// Read-only set of item kinds, indexed by load order.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<ItemRef>,
}

impl ItemCatalog {
    pub fn from_file(file: ItemCatalogFile) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(file.items.len());

        for (index, definition) in file.items.into_iter().enumerate() {
            if definition.name.trim().is_empty() {
                bail!("item #{index} has an empty name");
            }
            if !seen.insert(definition.name.clone()) {
                bail!("duplicate item name in catalog: {}", definition.name);
            }
            if definition.max_stack == 0 {
                bail!("item {} has a max_stack of 0", definition.name);
            }
            let Ok(id) = u16::try_from(index) else {
                bail!("item catalog holds more than {} entries", u16::MAX);
            };

            items.push(Arc::new(ItemKind {
                id,
                name: definition.name,
                category: definition.category,
                max_stack: definition.max_stack,
                block: definition.block,
                drop: definition.drop,
            }));
        }

        Ok(Self { items })
    }

    pub fn get(&self, name: &str) -> Option<&ItemRef> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn by_id(&self, id: u16) -> Option<&ItemRef> {
        self.items.get(usize::from(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str, max_stack: u32) -> ItemDefinition {
        ItemDefinition {
            name: name.to_string(),
            category: ItemCategory::Block,
            max_stack,
            block: None,
            drop: None,
        }
    }

    #[test]
    fn ids_follow_file_order() {
        let catalog = ItemCatalog::from_file(ItemCatalogFile {
            items: vec![definition("dirt", 64), definition("stone", 32)],
        })
        .expect("valid catalog");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("stone").map(|item| item.id), Some(1));
        assert_eq!(catalog.by_id(0).map(|item| item.name.as_str()), Some("dirt"));
        assert!(catalog.get("sand").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = ItemCatalog::from_file(ItemCatalogFile {
            items: vec![definition("dirt", 64), definition("dirt", 8)],
        });
        assert!(result.is_err());
    }

    #[test]
    fn zero_stack_cap_is_rejected() {
        let result = ItemCatalog::from_file(ItemCatalogFile {
            items: vec![definition("dirt", 0)],
        });
        assert!(result.is_err());
    }

    #[test]
    fn json_records_default_optional_fields() {
        let file: ItemCatalogFile = serde_json::from_str(
            r#"{ "items": [ { "name": "stick", "category": "material" } ] }"#,
        )
        .expect("parse");
        let stick = &file.items[0];
        assert_eq!(stick.max_stack, 64);
        assert_eq!(stick.category, ItemCategory::Material);
        assert!(stick.block.is_none());
        assert!(stick.drop.is_none());
    }
}
