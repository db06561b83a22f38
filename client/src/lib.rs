//! Bevy host for the `locomotion` crate: input devices, an orbit camera,
//! box collision, a small test course and debug overlays.

pub mod app;
pub mod camera;
pub mod character;
pub mod debug;
pub mod input;
pub mod physics;
pub mod settings;
pub mod ui;
pub mod world;
