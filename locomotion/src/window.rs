//! Timed windows inside a named animation clip.
//!
//! Gameplay that is bounded by an animation (the dodge movement window) is
//! driven from the clip timeline: the tracker is started alongside the clip,
//! advanced with the frame time, and reports entering and leaving the window.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, ensure_non_negative};
use crate::events::Signal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub clip: String,
    /// Seconds from clip start.
    pub enter_at: f32,
    /// Seconds from clip start.
    pub exit_at: f32,
}

impl ClipWindow {
    pub fn new(clip: impl Into<String>, enter_at: f32, exit_at: f32) -> Result<Self, ParameterError> {
        let window = Self {
            clip: clip.into(),
            enter_at,
            exit_at,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        ensure_non_negative("enter_at", self.enter_at)?;
        ensure_non_negative("exit_at", self.exit_at)?;
        if self.exit_at < self.enter_at {
            return Err(ParameterError::InvertedWindow {
                clip: self.clip.clone(),
                enter_at: self.enter_at,
                exit_at: self.exit_at,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> f32 {
        self.exit_at - self.enter_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTransition {
    Entered,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Stopped,
    Pending,
    Open,
}

#[derive(Debug)]
pub struct WindowTracker {
    window: ClipWindow,
    elapsed: f32,
    phase: Phase,
    pub on_window_enter: Signal,
    pub on_window_exit: Signal,
}

impl WindowTracker {
    pub fn new(window: ClipWindow) -> Self {
        Self {
            window,
            elapsed: 0.0,
            phase: Phase::Stopped,
            on_window_enter: Signal::new(),
            on_window_exit: Signal::new(),
        }
    }

    pub fn window(&self) -> &ClipWindow {
        &self.window
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Stopped
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Starts (or restarts) the clip from its first frame.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.phase = Phase::Pending;
    }

    /// Stops without reporting an exit.
    pub fn cancel(&mut self) {
        self.phase = Phase::Stopped;
    }

    /// Advances the clip. A large step can enter and exit in the same call,
    /// in which case both transitions are returned in order.
    pub fn advance(&mut self, dt: f32) -> Vec<WindowTransition> {
        let mut transitions = Vec::new();
        if self.phase == Phase::Stopped {
            return transitions;
        }

        self.elapsed += dt.max(0.0);

        if self.phase == Phase::Pending && self.elapsed >= self.window.enter_at {
            self.phase = Phase::Open;
            self.on_window_enter.invoke();
            transitions.push(WindowTransition::Entered);
        }

        if self.phase == Phase::Open && self.elapsed >= self.window.exit_at {
            self.phase = Phase::Stopped;
            self.on_window_exit.invoke();
            transitions.push(WindowTransition::Exited);
        }

        transitions
    }
}
