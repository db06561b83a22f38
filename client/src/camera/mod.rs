//! Third-person orbit camera following the player.

use bevy::prelude::*;
use common::clamp_angle;

use crate::character::{LocomotionSet, Player};
use crate::input::PlayerInput;
use crate::settings::{CameraSettings, SettingsResource};

/// Look input below this squared length is ignored.
const LOOK_THRESHOLD: f32 = 0.01;

/// Camera yaw in degrees, read by locomotion on the following frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraHeading {
    pub yaw_degrees: f32,
}

/// Orbit angles in degrees. Positive pitch looks down.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraRig {
    pub fn apply_look(&mut self, look: Vec2, dt: f32, settings: &CameraSettings) {
        if look.length_squared() >= LOOK_THRESHOLD && !settings.lock_position {
            self.yaw += look.x * dt * settings.sensitivity;
            self.pitch += look.y * dt * settings.sensitivity;
        }

        self.yaw = clamp_angle(self.yaw, f32::MIN, f32::MAX);
        self.pitch = clamp_angle(self.pitch, settings.bottom_clamp, settings.top_clamp);
    }

    pub fn rotation(&self, settings: &CameraSettings) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -(self.pitch + settings.angle_override).to_radians(),
            0.0,
        )
    }

    /// Camera transform orbiting the pivot above `target`.
    pub fn follow_transform(&self, target: Vec3, settings: &CameraSettings) -> Transform {
        let rotation = self.rotation(settings);
        let pivot = target + Vec3::Y * settings.pivot_height;
        let position = pivot - rotation * Vec3::NEG_Z * settings.distance;
        Transform::from_translation(position).with_rotation(rotation)
    }
}

pub struct ThirdPersonCameraPlugin;

impl Plugin for ThirdPersonCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraHeading>().add_systems(
            Update,
            (orbit_camera, follow_player)
                .chain()
                .in_set(LocomotionSet::Camera),
        );
    }
}

fn orbit_camera(
    time: Res<Time>,
    input: Res<PlayerInput>,
    settings: Res<SettingsResource>,
    mut heading: ResMut<CameraHeading>,
    mut rigs: Query<&mut CameraRig>,
) {
    let dt = time.delta_secs();
    for mut rig in &mut rigs {
        rig.apply_look(input.snapshot.look, dt, &settings.current.camera);
        heading.yaw_degrees = rig.yaw;
    }
}

fn follow_player(
    settings: Res<SettingsResource>,
    players: Query<&Transform, (With<Player>, Without<CameraRig>)>,
    mut cameras: Query<(&CameraRig, &mut Transform), Without<Player>>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for (rig, mut transform) in &mut cameras {
        *transform = rig.follow_transform(player.translation, &settings.current.camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_look_input_is_ignored() {
        let mut rig = CameraRig::default();
        rig.apply_look(Vec2::new(0.05, 0.05), 1.0, &CameraSettings::default());
        assert_eq!(rig.yaw, 0.0);
        assert_eq!(rig.pitch, 0.0);
    }

    #[test]
    fn locked_camera_ignores_look() {
        let settings = CameraSettings {
            lock_position: true,
            ..Default::default()
        };
        let mut rig = CameraRig::default();
        rig.apply_look(Vec2::new(10.0, 10.0), 1.0, &settings);
        assert_eq!(rig.yaw, 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let settings = CameraSettings::default();
        let mut rig = CameraRig::default();

        rig.apply_look(Vec2::new(0.0, 100.0), 1.0, &settings);
        assert_eq!(rig.pitch, settings.top_clamp);

        rig.apply_look(Vec2::new(0.0, -1000.0), 1.0, &settings);
        assert_eq!(rig.pitch, settings.bottom_clamp);
    }

    #[test]
    fn yaw_scales_with_time_and_sensitivity() {
        let settings = CameraSettings {
            sensitivity: 2.0,
            ..Default::default()
        };
        let mut rig = CameraRig::default();
        rig.apply_look(Vec2::new(30.0, 0.0), 0.5, &settings);
        assert!((rig.yaw - 30.0).abs() < 1e-5);
    }

    #[test]
    fn camera_sits_behind_pivot_along_yaw() {
        let settings = CameraSettings::default();
        let rig = CameraRig {
            yaw: 90.0,
            pitch: 0.0,
        };

        let transform = rig.follow_transform(Vec3::ZERO, &settings);
        let forward = transform.rotation * Vec3::NEG_Z;

        // Yaw 90 looks down +X, so the camera sits on -X.
        assert!((forward - Vec3::X).length() < 1e-5);
        assert!((transform.translation.x + settings.distance).abs() < 1e-4);
        assert!((transform.translation.y - settings.pivot_height).abs() < 1e-4);
    }

    #[test]
    fn positive_pitch_looks_down() {
        let settings = CameraSettings::default();
        let rig = CameraRig {
            yaw: 0.0,
            pitch: 30.0,
        };
        let forward = rig.rotation(&settings) * Vec3::NEG_Z;
        assert!(forward.y < 0.0);
        assert!(rig.follow_transform(Vec3::ZERO, &settings).translation.y > settings.pivot_height);
    }
}
