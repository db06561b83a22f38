use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::camera::CameraRig;
use crate::character::{
    CharacterAnimState, CharacterLocomotion, DodgeClip, LocomotionMessage, LocomotionSet, Player,
};
use crate::settings::SettingsResource;

const RECENT_EVENT_LIMIT: usize = 8;

pub struct DebugPanelPlugin;

impl Plugin for DebugPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RecentLocomotionEvents>()
            .add_systems(
                Update,
                (record_locomotion_events, toggle_debug_panel).in_set(LocomotionSet::Debug),
            )
            .add_systems(EguiPrimaryContextPass, draw_debug_panel.run_if(panel_visible));
    }
}

/// Newest first, bounded.
#[derive(Resource, Debug, Default)]
pub struct RecentLocomotionEvents {
    entries: VecDeque<String>,
}

impl RecentLocomotionEvents {
    pub fn push(&mut self, entry: String) {
        self.entries.push_front(entry);
        self.entries.truncate(RECENT_EVENT_LIMIT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn panel_visible(settings: Res<SettingsResource>) -> bool {
    settings.current.debug.show_panel
}

fn record_locomotion_events(
    time: Res<Time>,
    mut messages: MessageReader<LocomotionMessage>,
    mut recent: ResMut<RecentLocomotionEvents>,
) {
    for message in messages.read() {
        recent.push(format!(
            "{:>7.2}s  {}",
            time.elapsed_secs(),
            message.event.name()
        ));
    }
}

fn toggle_debug_panel(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<SettingsResource>) {
    if keys.just_pressed(KeyCode::F1) {
        settings.current.debug.show_panel = !settings.current.debug.show_panel;
    }
    if keys.just_pressed(KeyCode::F2) {
        settings.current.debug.show_ground_probe = !settings.current.debug.show_ground_probe;
    }
}

fn draw_debug_panel(
    mut contexts: EguiContexts,
    mut settings: ResMut<SettingsResource>,
    recent: Res<RecentLocomotionEvents>,
    players: Query<(&CharacterLocomotion, &DodgeClip, &CharacterAnimState), With<Player>>,
    cameras: Query<&CameraRig>,
    mut theme_initialized: Local<bool>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if !*theme_initialized {
        apply_panel_theme(ctx);
        *theme_initialized = true;
    }

    egui::Window::new("Locomotion")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .resizable(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            for (locomotion, clip, anim) in &players {
                draw_character_section(ui, locomotion, clip, anim);
            }

            if let Ok(rig) = cameras.single() {
                ui.separator();
                ui.label(format!("Camera yaw {:.1}  pitch {:.1}", rig.yaw, rig.pitch));
            }

            ui.separator();
            ui.label("Recent events");
            if recent.is_empty() {
                ui.weak("none yet");
            }
            for entry in recent.iter() {
                ui.monospace(entry);
            }

            ui.separator();
            let current = &mut settings.current;
            ui.checkbox(&mut current.debug.show_ground_probe, "Ground probe gizmo (F2)");
            ui.checkbox(&mut current.camera.lock_position, "Lock camera");
            if ui.button("Save settings").clicked() {
                match settings.save_to_disk() {
                    Ok(()) => info!("Saved settings to '{}'", settings.path().display()),
                    Err(error) => warn!("Failed to save settings: {error}"),
                }
            }
        });
}

fn draw_character_section(
    ui: &mut egui::Ui,
    locomotion: &CharacterLocomotion,
    clip: &DodgeClip,
    anim: &CharacterAnimState,
) {
    let rig = &locomotion.rig;
    let ground = rig.ground_sample();
    let runtime = rig.movement().runtime();

    ui.heading(rig.state().label());
    egui::Grid::new("locomotion_grid").striped(true).show(ui, |ui| {
        let mut row = |name: &str, value: String| {
            ui.label(name);
            ui.monospace(value);
            ui.end_row();
        };
        row("grounded", ground.is_grounded.to_string());
        row("coyote", format!("{:.3}", ground.coyote_time_remaining));
        row("speed", format!("{:.3} / {:.3}", runtime.speed, runtime.target_speed));
        row("vertical", format!("{:.3}", runtime.vertical_velocity));
        row(
            "heading",
            format!("{:.1} -> {:.1}", runtime.facing, runtime.target_heading),
        );
        row("jump buffer", format!("{:.3}", runtime.jump_buffer_remaining.max(0.0)));
        row("double jump", (!runtime.double_jump_consumed).to_string());
        row(
            "dodge window",
            if clip.tracker.is_open() {
                "open".to_string()
            } else if clip.tracker.is_running() {
                format!("{:.2}s", clip.tracker.elapsed())
            } else {
                "closed".to_string()
            },
        );
        row("free fall", anim.parameters.free_fall.to_string());
        row("anim speed", format!("{:.2}", anim.parameters.speed));
    });
}

fn apply_panel_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);
    ctx.set_style(style);
}
