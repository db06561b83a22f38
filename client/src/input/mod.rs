//! Keyboard and mouse to [`InputSnapshot`] translation.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused};
use locomotion::{InputAction, InputSnapshot};

use crate::character::LocomotionSet;
use crate::settings::SettingsResource;

/// Edge-triggered action from the player, one per press.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputActionPressed(pub InputAction);

/// Continuous input sampled this frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub snapshot: InputSnapshot,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub sprint: KeyCode,
    pub defend: KeyCode,
    pub jump: KeyCode,
    pub dodge: KeyCode,
    pub scope: MouseButton,
    pub attack: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            sprint: KeyCode::ShiftLeft,
            defend: KeyCode::KeyQ,
            jump: KeyCode::Space,
            dodge: KeyCode::ControlLeft,
            scope: MouseButton::Right,
            attack: MouseButton::Left,
        }
    }
}

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<KeyBindings>()
            .add_message::<InputActionPressed>()
            .add_systems(
                Update,
                (gather_player_input, lock_cursor_on_focus).in_set(LocomotionSet::Input),
            );
    }
}

/// Builds the continuous part of the input from held buttons and this
/// frame's mouse motion.
pub fn read_snapshot(
    keys: &ButtonInput<KeyCode>,
    mouse_buttons: &ButtonInput<MouseButton>,
    bindings: &KeyBindings,
    look: Vec2,
    analog_movement: bool,
) -> InputSnapshot {
    let axis = |negative: KeyCode, positive: KeyCode| {
        let mut value = 0.0;
        if keys.pressed(positive) {
            value += 1.0;
        }
        if keys.pressed(negative) {
            value -= 1.0;
        }
        value
    };

    let raw = Vec2::new(
        axis(bindings.left, bindings.right),
        axis(bindings.back, bindings.forward),
    );

    InputSnapshot {
        move_axis: raw.normalize_or_zero(),
        look,
        sprint: keys.pressed(bindings.sprint),
        scope: mouse_buttons.pressed(bindings.scope),
        defend: keys.pressed(bindings.defend),
        analog_movement,
    }
}

/// Actions whose button went down this frame, in a fixed order.
pub fn pressed_actions(
    keys: &ButtonInput<KeyCode>,
    mouse_buttons: &ButtonInput<MouseButton>,
    bindings: &KeyBindings,
) -> Vec<InputAction> {
    let mut actions = Vec::new();
    if keys.just_pressed(bindings.jump) {
        actions.push(InputAction::Jump);
    }
    if mouse_buttons.just_pressed(bindings.attack) {
        actions.push(InputAction::Attack);
    }
    if keys.just_pressed(bindings.dodge) {
        actions.push(InputAction::Dodge);
    }
    actions
}

fn gather_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    settings: Res<SettingsResource>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut player_input: ResMut<PlayerInput>,
    mut pressed: MessageWriter<InputActionPressed>,
) {
    let controls = settings.current.controls;
    let mut look = Vec2::ZERO;
    for motion in mouse_motion.read() {
        look += motion.delta;
    }
    if !controls.cursor_input_for_look {
        look = Vec2::ZERO;
    }

    player_input.snapshot = read_snapshot(
        &keys,
        &mouse_buttons,
        &bindings,
        look,
        controls.analog_movement,
    );

    for action in pressed_actions(&keys, &mouse_buttons, &bindings) {
        pressed.write(InputActionPressed(action));
    }
}

fn lock_cursor_on_focus(
    settings: Res<SettingsResource>,
    mut focus_events: MessageReader<WindowFocused>,
    mut cursor_options: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Some(focused) = focus_events.read().last().map(|event| event.focused) else {
        return;
    };
    let Ok(mut cursor) = cursor_options.single_mut() else {
        return;
    };

    if focused && settings.current.controls.cursor_locked {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}
