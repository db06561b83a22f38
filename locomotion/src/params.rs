use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, ensure_non_negative};

/// Tuning values for a character. Read-only once the character is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementParameters {
    /// Walking speed in m/s.
    pub move_speed: f32,
    /// Sprinting speed in m/s, grounded only.
    pub sprint_speed: f32,
    /// Speed in m/s while airborne with sprint held.
    pub air_speed: f32,
    /// Speed in m/s during the dodge movement window.
    pub dodge_speed: f32,
    /// Seconds the facing takes to settle on the target heading.
    pub rotation_smooth_time: f32,
    /// Acceleration and deceleration rate.
    pub speed_change_rate: f32,
    /// Apex height of a jump in metres.
    pub jump_height: f32,
    /// Vertical acceleration in m/s². Negative.
    pub gravity: f32,
    /// Seconds an early jump press stays valid.
    pub jump_buffer_duration: f32,
    /// Gravity stops accumulating once vertical velocity reaches this value.
    pub terminal_velocity: f32,
}

impl Default for MovementParameters {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            sprint_speed: 5.335,
            air_speed: 7.5,
            dodge_speed: 8.0,
            rotation_smooth_time: 0.12,
            speed_change_rate: 10.0,
            jump_height: 1.2,
            gravity: -15.0,
            jump_buffer_duration: 0.15,
            terminal_velocity: 53.0,
        }
    }
}

impl MovementParameters {
    /// Vertical velocity needed to reach `jump_height` under `gravity`.
    pub fn jump_impulse(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.gravity >= 0.0 || self.gravity.is_nan() {
            return Err(ParameterError::NonNegativeGravity(self.gravity));
        }
        if self.jump_height <= 0.0 || self.jump_height.is_nan() {
            return Err(ParameterError::NonPositiveJumpHeight(self.jump_height));
        }
        if self.terminal_velocity <= 0.0 || self.terminal_velocity.is_nan() {
            return Err(ParameterError::NonPositiveTerminalVelocity(
                self.terminal_velocity,
            ));
        }
        if self.speed_change_rate <= 0.0 || self.speed_change_rate.is_nan() {
            return Err(ParameterError::NonPositiveSpeedChangeRate(
                self.speed_change_rate,
            ));
        }

        ensure_non_negative("move_speed", self.move_speed)?;
        ensure_non_negative("sprint_speed", self.sprint_speed)?;
        ensure_non_negative("air_speed", self.air_speed)?;
        ensure_non_negative("dodge_speed", self.dodge_speed)?;
        ensure_non_negative("rotation_smooth_time", self.rotation_smooth_time)?;
        ensure_non_negative("jump_buffer_duration", self.jump_buffer_duration)?;
        Ok(())
    }
}
