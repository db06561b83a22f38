use bevy::prelude::*;
use locomotion::{CharacterMotor, LocomotionEvent, PlayerRig};

use super::controller::{
    CharacterAnimState, CharacterLocomotion, DodgeClip, LocomotionMessage, Player,
    heading_rotation,
};
use crate::camera::CameraHeading;
use crate::input::{InputActionPressed, PlayerInput};
use crate::physics::{CollisionWorld, KinematicBody, KinematicMotor, StaticCollider};

/// Press handling, ground check, movement and state update for every player.
pub fn simulate_locomotion(
    time: Res<Time>,
    input: Res<PlayerInput>,
    heading: Res<CameraHeading>,
    mut pressed: MessageReader<InputActionPressed>,
    colliders: Query<(&Transform, &StaticCollider), Without<Player>>,
    mut characters: Query<
        (
            Entity,
            &mut Transform,
            &mut KinematicBody,
            &mut CharacterLocomotion,
            &mut DodgeClip,
            &mut CharacterAnimState,
        ),
        With<Player>,
    >,
    mut messages: MessageWriter<LocomotionMessage>,
) {
    let dt = time.delta_secs();
    let actions: Vec<_> = pressed.read().map(|InputActionPressed(action)| *action).collect();

    // Presses are routed on every frame; only the tick needs elapsed time.
    let world = (dt > 0.0).then(|| {
        let mut world = CollisionWorld::new();
        for (transform, collider) in &colliders {
            world.insert(transform.translation, collider);
        }
        world
    });

    let snapshot = input.snapshot;
    let camera_yaw = heading.yaw_degrees;

    for (entity, mut transform, mut body, mut locomotion, mut clip, mut anim) in &mut characters {
        let rig = &mut locomotion.rig;
        for action in &actions {
            rig.press(*action, &snapshot, camera_yaw);
        }

        if let Some(world) = &world {
            let mut motor = KinematicMotor::new(world, *body, transform.translation);
            rig.tick(dt, &snapshot, camera_yaw, world, &mut motor);

            transform.translation = motor.position();
            transform.rotation = heading_rotation(rig.movement().facing_degrees());
            *body = motor.body();
        }

        dispatch_events(entity, rig, &mut clip, &mut anim, &mut messages);
    }
}

/// Forwards drained rig events to the animator, the dodge clip and other systems.
pub(super) fn dispatch_events(
    entity: Entity,
    rig: &mut PlayerRig,
    clip: &mut DodgeClip,
    anim: &mut CharacterAnimState,
    messages: &mut MessageWriter<LocomotionMessage>,
) {
    for event in rig.take_events() {
        if event == LocomotionEvent::DodgeStarted {
            clip.tracker.start();
        }
        anim.animator.handle_event(event);
        messages.write(LocomotionMessage { entity, event });
    }
}
