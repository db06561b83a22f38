use common::lerp;
use serde::{Deserialize, Serialize};

use crate::events::LocomotionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorSettings {
    /// Seconds airborne before the free-fall pose kicks in. Skips it on stairs.
    pub fall_timeout: f32,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self { fall_timeout: 0.15 }
    }
}

/// One-shot animation triggers raised by locomotion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimatorTriggers {
    pub jump: bool,
    pub double_jump: bool,
    pub dodge: bool,
}

impl AnimatorTriggers {
    pub fn any(&self) -> bool {
        self.jump || self.double_jump || self.dodge
    }
}

/// Values the animation graph reads each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimatorParameters {
    pub grounded: bool,
    pub free_fall: bool,
    /// Smoothed locomotion speed used for blending.
    pub speed: f32,
    pub motion_speed: f32,
}

/// Per-frame inputs for [`LocomotionAnimator::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorInput {
    pub dt: f32,
    pub grounded: bool,
    pub target_speed: f32,
    pub speed_change_rate: f32,
    pub input_magnitude: f32,
}

#[derive(Debug, Clone, Default)]
pub struct LocomotionAnimator {
    settings: AnimatorSettings,
    fall_timeout_remaining: f32,
    parameters: AnimatorParameters,
    triggers: AnimatorTriggers,
}

impl LocomotionAnimator {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            settings,
            fall_timeout_remaining: settings.fall_timeout,
            parameters: AnimatorParameters::default(),
            triggers: AnimatorTriggers::default(),
        }
    }

    pub fn parameters(&self) -> AnimatorParameters {
        self.parameters
    }

    pub fn update(&mut self, input: AnimatorInput) -> AnimatorParameters {
        if input.grounded {
            self.fall_timeout_remaining = self.settings.fall_timeout;
            self.parameters.free_fall = false;
        } else {
            if self.fall_timeout_remaining >= 0.0 {
                self.fall_timeout_remaining -= input.dt;
            }
            if self.fall_timeout_remaining < 0.0 {
                self.parameters.free_fall = true;
            }
        }

        self.parameters.grounded = input.grounded;
        self.parameters.speed = lerp(
            self.parameters.speed,
            input.target_speed,
            input.dt * input.speed_change_rate,
        );
        self.parameters.motion_speed = input.input_magnitude;
        self.parameters
    }

    pub fn handle_event(&mut self, event: LocomotionEvent) {
        match event {
            LocomotionEvent::Jumped => self.triggers.jump = true,
            LocomotionEvent::DoubleJumped => self.triggers.double_jump = true,
            LocomotionEvent::DodgeStarted => self.triggers.dodge = true,
            LocomotionEvent::DodgeFinished => {}
        }
    }

    /// Returns and clears pending triggers.
    pub fn take_triggers(&mut self) -> AnimatorTriggers {
        std::mem::take(&mut self.triggers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(grounded: bool, dt: f32) -> AnimatorInput {
        AnimatorInput {
            dt,
            grounded,
            target_speed: 2.0,
            speed_change_rate: 10.0,
            input_magnitude: 1.0,
        }
    }

    #[test]
    fn free_fall_waits_for_timeout() {
        let mut animator = LocomotionAnimator::new(AnimatorSettings::default());
        animator.update(frame(true, 0.05));

        assert!(!animator.update(frame(false, 0.1)).free_fall);
        assert!(animator.update(frame(false, 0.1)).free_fall);
        assert!(!animator.update(frame(true, 0.1)).free_fall);
    }

    #[test]
    fn speed_blends_towards_target() {
        let mut animator = LocomotionAnimator::default();
        let first = animator.update(frame(true, 0.05)).speed;
        assert!((first - 1.0).abs() < 1e-6);
        let second = animator.update(frame(true, 0.05)).speed;
        assert!(second > first && second < 2.0);
    }

    #[test]
    fn triggers_are_one_shot() {
        let mut animator = LocomotionAnimator::default();
        animator.handle_event(LocomotionEvent::Jumped);
        animator.handle_event(LocomotionEvent::DodgeStarted);
        animator.handle_event(LocomotionEvent::DodgeFinished);

        let triggers = animator.take_triggers();
        assert!(triggers.jump && triggers.dodge && !triggers.double_jump);
        assert!(!animator.take_triggers().any());
    }
}
