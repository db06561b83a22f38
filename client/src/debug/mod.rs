use bevy::gizmos::config::{DefaultGizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::character::{CharacterLocomotion, LocomotionSet, Player};
use crate::physics::StaticCollider;
use crate::settings::SettingsResource;

const GROUNDED_COLOR: Color = Color::srgba(0.0, 1.0, 0.0, 0.35);
const AIRBORNE_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 0.35);
const SOLID_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);
const TRIGGER_COLOR: Color = Color::srgba(1.0, 0.85, 0.2, 0.6);

pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_debug_gizmos).add_systems(
            Update,
            (draw_ground_probe, draw_colliders)
                .run_if(ground_probe_enabled)
                .in_set(LocomotionSet::Debug),
        );
    }
}

fn ground_probe_enabled(settings: Res<SettingsResource>) -> bool {
    settings.current.debug.show_ground_probe
}

fn configure_debug_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.enabled = true;
    config.depth_bias = -0.5;
    config.line.width = 2.0;
}

/// Green while grounded, red while airborne, drawn where the overlap query runs.
fn draw_ground_probe(
    mut gizmos: Gizmos,
    players: Query<(&Transform, &CharacterLocomotion), With<Player>>,
) {
    for (transform, locomotion) in &players {
        let ground = locomotion.rig.ground();
        let color = if ground.sample().is_grounded {
            GROUNDED_COLOR
        } else {
            AIRBORNE_COLOR
        };
        gizmos.sphere(
            Isometry3d::from_translation(ground.probe_center(transform.translation)),
            ground.settings().grounded_radius,
            color,
        );
    }
}

fn draw_colliders(mut gizmos: Gizmos, colliders: Query<(&Transform, &StaticCollider)>) {
    for (transform, collider) in &colliders {
        let color = if collider.is_trigger {
            TRIGGER_COLOR
        } else {
            SOLID_COLOR
        };
        gizmos.cube(
            Transform::from_translation(transform.translation)
                .with_scale(collider.half_extents * 2.0),
            color,
        );
    }
}
