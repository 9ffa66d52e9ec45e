use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::{ItemCatalog, ItemCatalogFile, SandboxConfig};

const ITEM_CATALOG_RELATIVE_PATH: &str = "assets/data/items.json";
const SANDBOX_CONFIG_RELATIVE_PATH: &str = "assets/data/sandbox.json";

pub fn item_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(ITEM_CATALOG_RELATIVE_PATH)
}

pub fn sandbox_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(SANDBOX_CONFIG_RELATIVE_PATH)
}

pub fn load_item_catalog() -> Result<ItemCatalog> {
    load_item_catalog_from_path(item_catalog_path())
}

pub fn load_item_catalog_from_path(path: impl AsRef<Path>) -> Result<ItemCatalog> {
    let path = path.as_ref();
    let file: ItemCatalogFile = read_json(path, "item catalog")?;
    ItemCatalog::from_file(file)
        .with_context(|| format!("invalid item catalog: {}", path.display()))
}

pub fn load_sandbox_config() -> Result<SandboxConfig> {
    load_sandbox_config_from_path(sandbox_config_path())
}

pub fn load_sandbox_config_from_path(path: impl AsRef<Path>) -> Result<SandboxConfig> {
    read_json(path.as_ref(), "sandbox config")
}

fn read_json<T>(path: &Path, label: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {label} file: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("failed parsing {label} file as JSON: {}", path.display()))
}
