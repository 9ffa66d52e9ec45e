mod app;

use anyhow::Result;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window};
use skyblock_builder::{load_item_catalog, load_sandbox_config};

fn main() -> Result<()> {
    let catalog = load_item_catalog()?;
    let settings = load_sandbox_config()?;
    let runtime = app::RuntimeConfig::default();

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.35, 0.55, 0.78)))
        .insert_resource(Time::<Fixed>::from_hz(runtime.fixed_update_hz))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: runtime.window_title.clone(),
                resolution: (1280.0, 720.0).into(),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(app::Catalog(catalog))
        .insert_resource(app::SandboxSettings(settings))
        .insert_resource(runtime)
        .add_plugins(app::SandboxAppPlugin)
        .run();

    Ok(())
}
