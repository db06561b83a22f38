use bevy::prelude::*;

use super::controller::{CharacterAnimState, CharacterLocomotion, DodgeClip, LocomotionMessage};
use super::movement::dispatch_events;
use crate::input::PlayerInput;

/// Advances the dodge clip, routes its window transitions into the rig and
/// refreshes animator parameters.
pub fn animate_characters(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut characters: Query<(
        Entity,
        &mut CharacterLocomotion,
        &mut DodgeClip,
        &mut CharacterAnimState,
    )>,
    mut messages: MessageWriter<LocomotionMessage>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (entity, mut locomotion, mut clip, mut anim) in &mut characters {
        let rig = &mut locomotion.rig;
        for transition in clip.tracker.advance(dt) {
            trace!("{:?} {} window {:?}", entity, clip.tracker.window().clip, transition);
            rig.on_dodge_window(transition);
        }
        dispatch_events(entity, rig, &mut clip, &mut anim, &mut messages);

        let animator_input = rig.animator_input(dt, &input.snapshot);
        let anim = &mut *anim;
        anim.parameters = anim.animator.update(animator_input);
        anim.triggers = anim.animator.take_triggers();
    }
}
