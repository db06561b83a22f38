use bevy::prelude::*;
use locomotion::{
    AnimatorParameters, AnimatorTriggers, GroundDetector, LocomotionAnimator, LocomotionEvent,
    MovementController, PlayerRig, StateManager, WindowTracker,
};

use crate::physics::KinematicBody;
use crate::settings::ControllerSettings;

/// Marks the entity driven by local input.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

#[derive(Component, Debug)]
pub struct CharacterLocomotion {
    pub rig: PlayerRig,
}

/// Timeline of the dodge clip, bounding the dodge displacement.
#[derive(Component, Debug)]
pub struct DodgeClip {
    pub tracker: WindowTracker,
}

#[derive(Component, Debug, Default)]
pub struct CharacterAnimState {
    pub animator: LocomotionAnimator,
    pub parameters: AnimatorParameters,
    /// Triggers consumed on the most recent frame.
    pub triggers: AnimatorTriggers,
}

/// Locomotion event raised by a character this frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocomotionMessage {
    pub entity: Entity,
    pub event: LocomotionEvent,
}

/// Gameplay components of a character, without any rendering.
pub fn character_components(settings: &ControllerSettings) -> impl Bundle {
    let rig = PlayerRig::new(
        GroundDetector::new(settings.ground),
        StateManager::default(),
        MovementController::new(settings.movement),
    );
    let body = KinematicBody {
        radius: settings.ground.grounded_radius,
        ..Default::default()
    };

    (
        Player,
        body,
        CharacterLocomotion { rig },
        DodgeClip {
            tracker: WindowTracker::new(settings.animation.dodge_window.clone()),
        },
        CharacterAnimState {
            animator: LocomotionAnimator::new(settings.animation.animator),
            ..Default::default()
        },
    )
}

/// Bevy rotation for a locomotion heading in degrees.
pub fn heading_rotation(heading_degrees: f32) -> Quat {
    Quat::from_rotation_y(-heading_degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use locomotion::heading_direction;

    #[test]
    fn rotation_faces_heading_direction() {
        for heading in [0.0, 45.0, 90.0, 180.0, 270.0] {
            let forward = heading_rotation(heading) * Vec3::NEG_Z;
            assert!(
                (forward - heading_direction(heading)).length() < 1e-5,
                "heading {heading}"
            );
        }
    }
}
