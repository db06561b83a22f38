use bevy::prelude::*;
use locomotion::{
    AnimatorSettings, ClipWindow, GroundCheckSettings, MovementParameters, ParameterError,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SETTINGS_FILE_PATH: &str = "./controller.yaml";

pub const DODGE_CLIP_NAME: &str = "Dodge";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Degrees of rotation per unit of look input per second.
    pub sensitivity: f32,
    /// Highest pitch in degrees (looking down).
    pub top_clamp: f32,
    /// Lowest pitch in degrees (looking up).
    pub bottom_clamp: f32,
    /// Added to the pitch when building the rotation.
    pub angle_override: f32,
    pub lock_position: bool,
    /// Distance from the follow pivot in metres.
    pub distance: f32,
    /// Height of the follow pivot above the character origin.
    pub pivot_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensitivity: 12.0,
            top_clamp: 70.0,
            bottom_clamp: -30.0,
            angle_override: 0.0,
            lock_position: false,
            distance: 4.0,
            pivot_height: 1.375,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub animator: AnimatorSettings,
    /// Part of the dodge clip during which the character is displaced.
    pub dodge_window: ClipWindow,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            animator: AnimatorSettings::default(),
            dodge_window: ClipWindow {
                clip: DODGE_CLIP_NAME.to_string(),
                enter_at: 0.1,
                exit_at: 0.45,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Scale movement speed by stick magnitude instead of treating input as digital.
    pub analog_movement: bool,
    /// Grab and hide the cursor whenever the window has focus.
    pub cursor_locked: bool,
    /// Feed mouse motion into the look axis.
    pub cursor_input_for_look: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            analog_movement: false,
            cursor_locked: true,
            cursor_input_for_look: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    pub show_ground_probe: bool,
    pub show_panel: bool,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            show_ground_probe: true,
            show_panel: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Resource)]
#[serde(default)]
pub struct ControllerSettings {
    pub movement: MovementParameters,
    pub ground: GroundCheckSettings,
    pub camera: CameraSettings,
    pub animation: AnimationSettings,
    pub controls: ControlSettings,
    pub debug: DebugSettings,
}

impl ControllerSettings {
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.movement.validate()?;
        self.ground.validate()?;
        self.animation.dodge_window.validate()
    }

    /// Keeps the loaded values when they validate, otherwise falls back to
    /// defaults section by section.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if let Err(error) = self.movement.validate() {
            warn!("Invalid movement settings ({error}). Using defaults.");
            self.movement = defaults.movement;
        }
        if let Err(error) = self.ground.validate() {
            warn!("Invalid ground settings ({error}). Using defaults.");
            self.ground = defaults.ground;
        }
        if let Err(error) = self.animation.dodge_window.validate() {
            warn!("Invalid dodge window ({error}). Using defaults.");
            self.animation.dodge_window = defaults.animation.dodge_window;
        }
        if self.camera.bottom_clamp > self.camera.top_clamp {
            warn!(
                "Camera bottom clamp {} is above top clamp {}. Using defaults.",
                self.camera.bottom_clamp, self.camera.top_clamp
            );
            self.camera.bottom_clamp = defaults.camera.bottom_clamp;
            self.camera.top_clamp = defaults.camera.top_clamp;
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum SettingsIoError {
    #[error("failed to read settings file: {0}")]
    Read(std::io::Error),
    #[error("failed to write settings file: {0}")]
    Write(std::io::Error),
    #[error("failed to decode YAML settings: {0}")]
    Deserialize(serde_yaml::Error),
    #[error("failed to encode YAML settings: {0}")]
    Serialize(serde_yaml::Error),
}

#[derive(Resource, Clone)]
pub struct SettingsResource {
    pub current: ControllerSettings,
    path: PathBuf,
}

impl SettingsResource {
    pub fn new(current: ControllerSettings) -> Self {
        Self::with_path(current, SETTINGS_FILE_PATH)
    }

    pub fn with_path(current: ControllerSettings, path: impl Into<PathBuf>) -> Self {
        Self {
            current,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save_to_disk(&self) -> Result<(), SettingsIoError> {
        write_settings_to_path(&self.current, &self.path)
    }
}

pub fn load_settings_or_default() -> ControllerSettings {
    let path = Path::new(SETTINGS_FILE_PATH);

    if !path.exists() {
        return ControllerSettings::default();
    }

    match load_settings_from_path(path) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!(
                "Failed to load settings from '{}': {}. Falling back to defaults.",
                SETTINGS_FILE_PATH, error
            );
            ControllerSettings::default()
        }
    }
}

pub fn ensure_settings_file_exists(settings: &ControllerSettings) -> Result<(), SettingsIoError> {
    let path = Path::new(SETTINGS_FILE_PATH);
    if path.exists() {
        return Ok(());
    }

    write_settings_to_path(settings, path)
}

pub fn load_settings_from_path(path: &Path) -> Result<ControllerSettings, SettingsIoError> {
    let raw = fs::read_to_string(path).map_err(SettingsIoError::Read)?;
    parse_settings(&raw)
}

pub fn parse_settings(raw: &str) -> Result<ControllerSettings, SettingsIoError> {
    serde_yaml::from_str::<ControllerSettings>(raw).map_err(SettingsIoError::Deserialize)
}

pub fn write_settings_to_path(
    settings: &ControllerSettings,
    path: &Path,
) -> Result<(), SettingsIoError> {
    let encoded = serde_yaml::to_string(settings).map_err(SettingsIoError::Serialize)?;
    fs::write(path, encoded).map_err(SettingsIoError::Write)
}
