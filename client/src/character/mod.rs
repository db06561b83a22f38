pub mod animation;
pub mod controller;
pub mod movement;

use bevy::prelude::*;

use crate::camera::CameraHeading;
use crate::input::{InputActionPressed, PlayerInput};

pub use animation::animate_characters;
pub use controller::{
    CharacterAnimState, CharacterLocomotion, DodgeClip, LocomotionMessage, Player,
    character_components, heading_rotation,
};
pub use movement::simulate_locomotion;

/// Frame phases, chained in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum LocomotionSet {
    Input,
    Simulate,
    Animation,
    Camera,
    Debug,
}

/// Locomotion simulation and animation for characters. Input devices and
/// the camera are separate plugins that feed [`PlayerInput`] and
/// [`CameraHeading`].
pub struct CharacterControllerPlugin;

impl Plugin for CharacterControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<CameraHeading>()
            .add_message::<InputActionPressed>()
            .add_message::<LocomotionMessage>()
            .configure_sets(
                Update,
                (
                    LocomotionSet::Input,
                    LocomotionSet::Simulate,
                    LocomotionSet::Animation,
                    LocomotionSet::Camera,
                    LocomotionSet::Debug,
                )
                    .chain(),
            )
            .add_systems(Update, simulate_locomotion.in_set(LocomotionSet::Simulate))
            .add_systems(Update, animate_characters.in_set(LocomotionSet::Animation));
    }
}
