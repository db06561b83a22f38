use bevy::camera::{ClearColorConfig, PerspectiveProjection, Projection};
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::character::character_components;
use crate::physics::StaticCollider;
use crate::settings::SettingsResource;

const SKY_COLOR: Color = Color::srgb(0.45, 0.6, 0.75);
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.5, 4.0);

/// Static box in the test course.
#[derive(Debug, Clone, Copy)]
pub struct CourseBlock {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub is_trigger: bool,
}

impl CourseBlock {
    const fn solid(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
            is_trigger: false,
        }
    }
}

/// Ground slab, a staircase of platforms, a ledge and a trigger volume.
pub const COURSE: [CourseBlock; 7] = [
    CourseBlock::solid(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0)),
    CourseBlock::solid(Vec3::new(-4.0, 0.25, -4.0), Vec3::new(1.5, 0.25, 1.5)),
    CourseBlock::solid(Vec3::new(-4.0, 0.75, -8.0), Vec3::new(1.5, 0.75, 1.5)),
    CourseBlock::solid(Vec3::new(0.0, 1.25, -10.0), Vec3::new(2.0, 1.25, 1.5)),
    CourseBlock::solid(Vec3::new(5.0, 2.0, -6.0), Vec3::new(2.0, 0.15, 2.0)),
    CourseBlock::solid(Vec3::new(9.0, 1.0, 2.0), Vec3::new(0.5, 1.0, 6.0)),
    CourseBlock {
        center: Vec3::new(4.0, 1.0, 4.0),
        half_extents: Vec3::new(1.0, 1.0, 1.0),
        is_trigger: true,
    },
];

#[derive(Component)]
struct WorldRoot;

#[derive(Component)]
struct WorldCamera;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GlobalAmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
            affects_lightmapped_meshes: true,
        })
        .add_systems(Startup, (spawn_course, spawn_player, setup_world_camera));
    }
}

fn spawn_course(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let solid = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.57, 0.6),
        perceptual_roughness: 0.9,
        ..default()
    });
    let trigger = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 0.85, 0.2, 0.25),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    commands.spawn((
        WorldRoot,
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    for block in COURSE {
        let collider = if block.is_trigger {
            StaticCollider::trigger(block.half_extents)
        } else {
            StaticCollider::solid(block.half_extents)
        };
        let material = if block.is_trigger {
            trigger.clone()
        } else {
            solid.clone()
        };
        let size = block.half_extents * 2.0;

        commands.spawn((
            WorldRoot,
            collider,
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(material),
            Transform::from_translation(block.center),
        ));
    }

    info!("Spawned test course with {} blocks", COURSE.len());
}

fn spawn_player(
    mut commands: Commands,
    settings: Res<SettingsResource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let components = character_components(&settings.current);
    let radius = settings.current.ground.grounded_radius;
    let height = 1.8;

    let body = meshes.add(Capsule3d::new(radius, height - radius * 2.0));
    let nose = meshes.add(Cuboid::new(0.12, 0.12, 0.3));
    let body_material = materials.add(Color::srgb(0.2, 0.45, 0.85));
    let nose_material = materials.add(Color::srgb(0.95, 0.95, 0.95));

    commands
        .spawn((
            WorldRoot,
            components,
            Transform::from_translation(PLAYER_SPAWN),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(body),
                MeshMaterial3d(body_material),
                Transform::from_xyz(0.0, height * 0.5, 0.0),
            ));
            parent.spawn((
                Mesh3d(nose),
                MeshMaterial3d(nose_material),
                Transform::from_xyz(0.0, height * 0.8, -radius),
            ));
        });
}

fn setup_world_camera(mut commands: Commands) {
    commands.spawn((
        WorldCamera,
        CameraRig::default(),
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(SKY_COLOR),
            ..Default::default()
        },
        Projection::Perspective(PerspectiveProjection {
            near: 0.05,
            far: 500.0,
            ..default()
        }),
        Transform::from_translation(PLAYER_SPAWN + Vec3::new(0.0, 2.0, 4.0))
            .looking_at(PLAYER_SPAWN, Vec3::Y),
    ));
}
