use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;
use bevy::window::WindowResolution;

const WINDOW_TITLE: &str = "Platformer Controller";

pub fn build_bevy_plugins() -> PluginGroupBuilder {
    DefaultPlugins.set(WindowPlugin {
        primary_window: Some(create_window_settings()),
        ..Default::default()
    })
}

fn create_window_settings() -> Window {
    Window {
        title: WINDOW_TITLE.into(),
        resolution: WindowResolution::new(1280, 720),
        resizable: true,
        ..Default::default()
    }
}
