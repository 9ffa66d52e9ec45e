mod input;
mod resources;
mod setup;
mod simulation;
mod state;
mod view;

use bevy::prelude::*;

pub use resources::{Catalog, RuntimeConfig, SandboxSettings};
use resources::{FrameInput, SandboxNotice, StatusLine};
use state::AppPhase;

pub struct SandboxAppPlugin;

impl Plugin for SandboxAppPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppPhase>()
            .init_resource::<FrameInput>()
            .init_resource::<StatusLine>()
            .add_event::<SandboxNotice>()
            .add_systems(Startup, setup::spawn_camera)
            .add_systems(OnEnter(AppPhase::Boot), setup::spawn_world)
            .add_systems(
                Update,
                setup::bootstrap_session.run_if(in_state(AppPhase::Boot)),
            )
            .add_systems(
                OnEnter(AppPhase::InGame),
                (view::spawn_player, view::spawn_hud),
            )
            .add_systems(
                FixedUpdate,
                simulation::integrate_movement.run_if(in_state(AppPhase::InGame)),
            )
            .add_systems(
                Update,
                (
                    input::gather_tick_input,
                    simulation::apply_tick_input,
                    simulation::collect_drops,
                    view::report_notices,
                    view::sync_player_sprite,
                    view::sync_target_marker,
                    view::refresh_hud,
                )
                    .chain()
                    .run_if(in_state(AppPhase::InGame)),
            );
    }
}
