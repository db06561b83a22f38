use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::app::plugins::build_bevy_plugins;
use crate::camera::ThirdPersonCameraPlugin;
use crate::character::CharacterControllerPlugin;
use crate::debug::DebugOverlayPlugin;
use crate::input::PlayerInputPlugin;
use crate::settings::{self, ControllerSettings, SettingsResource};
use crate::ui::DebugPanelPlugin;
use crate::world::WorldPlugin;

pub fn run_client_app() {
    let startup_settings = load_startup_settings();
    let mut app = App::new();
    configure_client_app(&mut app, &startup_settings);
    app.run();
}

pub fn configure_client_app(app: &mut App, startup_settings: &ControllerSettings) {
    app.add_plugins(build_bevy_plugins())
        .insert_resource(SettingsResource::new(startup_settings.clone().sanitized()))
        .add_plugins(EguiPlugin::default())
        .add_plugins(CharacterControllerPlugin)
        .add_plugins(PlayerInputPlugin)
        .add_plugins(ThirdPersonCameraPlugin)
        .add_plugins(WorldPlugin)
        .add_plugins(DebugOverlayPlugin)
        .add_plugins(DebugPanelPlugin);
}

fn load_startup_settings() -> ControllerSettings {
    let startup_settings = settings::load_settings_or_default();
    if let Err(error) = settings::ensure_settings_file_exists(&startup_settings) {
        eprintln!(
            "Failed to ensure startup settings file '{}': {}",
            settings::SETTINGS_FILE_PATH,
            error
        );
    }
    startup_settings
}
