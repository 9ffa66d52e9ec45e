use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use skyblock_builder::{ActionInput, AimInput, TickInput};

use super::resources::{FrameInput, RuntimeConfig, SessionState};

const SLOT_KEYS: [KeyCode; 8] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
];

pub fn gather_tick_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    session: Res<SessionState>,
    config: Res<RuntimeConfig>,
    mut frame: ResMut<FrameInput>,
) {
    let scroll: f32 = wheel.read().map(|event| event.y).sum();
    let scroll_steps = if scroll.abs() > 0.01 {
        scroll.signum() as i32
    } else {
        0
    };

    let aim = cursor_world_position(&windows, &camera_query)
        .map(|screen| config.to_world(screen) - session.sandbox.player.position)
        .map(AimInput::from_vector)
        .unwrap_or_default();

    frame.0 = TickInput {
        movement: movement_axis(&keys),
        aim,
        actions: ActionInput {
            primary: buttons.pressed(MouseButton::Left),
            secondary: buttons.pressed(MouseButton::Right),
        },
        select_slot: SLOT_KEYS.iter().position(|key| keys.just_pressed(*key)),
        scroll_steps,
    };
}

fn movement_axis(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    axis
}

fn cursor_world_position(
    windows: &Query<&Window>,
    camera_query: &Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) -> Option<Vec2> {
    let window = windows.get_single().ok()?;
    let cursor_position = window.cursor_position()?;
    let (camera, camera_transform) = camera_query.get_single().ok()?;
    camera
        .viewport_to_world_2d(camera_transform, cursor_position)
        .ok()
}
