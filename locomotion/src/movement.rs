//! Per-frame movement for one character: target speed, facing, gravity,
//! jump arbitration and dodge sequencing.
//!
//! Headings are degrees around +Y. Heading 0 looks down -Z and positive
//! headings turn clockwise seen from above, so heading 90 faces +X.

use bevy_math::{Vec2, Vec3};
use common::{lerp, normalize_degrees, round3, smooth_damp_angle};

use crate::events::{LocomotionEvent, LocomotionSignals};
use crate::ground::GroundSample;
use crate::input::InputSnapshot;
use crate::params::MovementParameters;
use crate::state::{LocomotionState, StateManager};

/// Speeds closer than this to the target snap instead of interpolating.
const SPEED_OFFSET: f32 = 0.1;

/// Vertical velocity held while grounded so the volume stays pressed onto slopes.
pub const GROUNDED_STICK_VELOCITY: f32 = -4.0;

/// Host collision sweep for the character volume.
pub trait CharacterMotor {
    fn position(&self) -> Vec3;

    /// Velocity produced by the most recent [`CharacterMotor::move_by`], after collision.
    fn velocity(&self) -> Vec3;

    /// Moves the volume by `displacement`, stopping at colliders. Returns the
    /// displacement actually applied.
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> Vec3;
}

/// Unit direction on the ground plane for a heading in degrees.
pub fn heading_direction(heading_degrees: f32) -> Vec3 {
    let radians = heading_degrees.to_radians();
    Vec3::new(radians.sin(), 0.0, -radians.cos())
}

/// Everything the controller reads or writes during one frame.
pub struct MovementFrame<'a, M: CharacterMotor + ?Sized> {
    pub dt: f32,
    /// Camera heading in degrees.
    pub camera_yaw: f32,
    pub input: &'a InputSnapshot,
    pub ground: GroundSample,
    pub state: &'a mut StateManager,
    pub motor: &'a mut M,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementRuntimeState {
    /// Horizontal speed requested from the motor this frame.
    pub speed: f32,
    /// Speed selected from input and state, before analog scaling.
    pub target_speed: f32,
    pub target_heading: f32,
    /// Smoothed visual yaw in `[0, 360)`.
    pub facing: f32,
    pub rotation_velocity: f32,
    pub vertical_velocity: f32,
    pub double_jump_consumed: bool,
    pub jump_buffer_remaining: f32,
    pub dodge_movement_active: bool,
}

#[derive(Debug, Default)]
pub struct MovementController {
    params: MovementParameters,
    runtime: MovementRuntimeState,
    signals: LocomotionSignals,
}

impl MovementController {
    pub fn new(params: MovementParameters) -> Self {
        Self {
            params,
            runtime: MovementRuntimeState::default(),
            signals: LocomotionSignals::default(),
        }
    }

    pub fn params(&self) -> &MovementParameters {
        &self.params
    }

    pub fn runtime(&self) -> &MovementRuntimeState {
        &self.runtime
    }

    pub fn signals(&self) -> &LocomotionSignals {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut LocomotionSignals {
        &mut self.signals
    }

    pub fn facing_degrees(&self) -> f32 {
        self.runtime.facing
    }

    /// Starts facing `heading` without smoothing, e.g. at spawn.
    pub fn face(&mut self, heading: f32) {
        self.runtime.facing = normalize_degrees(heading);
        self.runtime.target_heading = heading;
        self.runtime.rotation_velocity = 0.0;
    }

    /// Records a jump press. Always restarts the buffer.
    pub fn request_jump(&mut self) {
        self.runtime.jump_buffer_remaining = self.params.jump_buffer_duration;
    }

    /// Starts a dodge along the current input direction. Only honored while idle.
    pub fn request_dodge(
        &mut self,
        state: &mut StateManager,
        input: &InputSnapshot,
        camera_yaw: f32,
    ) -> bool {
        if !state.is(LocomotionState::Idle) {
            log::trace!("dodge ignored in state {}", state.current_state().label());
            return false;
        }

        self.runtime.target_heading = input.heading_degrees(camera_yaw);
        state.change_state(LocomotionState::Dodging);
        self.signals.emit(LocomotionEvent::DodgeStarted);
        true
    }

    /// Opens the dodge movement window.
    pub fn start_dodge_movement(&mut self, state: &StateManager) -> bool {
        if !state.is(LocomotionState::Dodging) {
            log::trace!("dodge movement window opened outside a dodge");
            return false;
        }
        self.runtime.dodge_movement_active = true;
        true
    }

    /// Closes the dodge movement window and returns to idle.
    pub fn finish_dodge(&mut self, state: &mut StateManager) -> bool {
        if !state.is(LocomotionState::Dodging) {
            log::trace!("dodge movement window closed outside a dodge");
            return false;
        }
        state.change_state(LocomotionState::Idle);
        self.runtime.dodge_movement_active = false;
        self.signals.emit(LocomotionEvent::DodgeFinished);
        true
    }

    /// Runs one frame of movement. Gravity integrates in every state.
    pub fn update<M: CharacterMotor + ?Sized>(&mut self, frame: &mut MovementFrame<'_, M>) {
        match frame.state.current_state() {
            LocomotionState::Idle | LocomotionState::InAir => {
                self.try_to_move(frame);
                self.try_to_jump(frame);
                self.apply_airborne_transitions(frame);
            }
            LocomotionState::Dodging => {
                if self.runtime.dodge_movement_active {
                    self.move_character(self.params.dodge_speed, frame);
                }
            }
        }

        self.apply_gravity(frame.ground, frame.dt);
    }

    /// Speed for the given state and input, before analog scaling.
    pub fn select_target_speed(&self, state: LocomotionState, input: &InputSnapshot) -> f32 {
        if !input.has_move_input() {
            return 0.0;
        }

        match state {
            LocomotionState::Idle if input.sprint => self.params.sprint_speed,
            LocomotionState::InAir if input.sprint => self.params.air_speed,
            _ => self.params.move_speed,
        }
    }

    fn try_to_move<M: CharacterMotor + ?Sized>(&mut self, frame: &mut MovementFrame<'_, M>) {
        let target_speed = self.select_target_speed(frame.state.current_state(), frame.input);
        self.runtime.target_speed = target_speed;

        // Heading holds its last value while there is no input.
        if frame.input.has_move_input() {
            self.runtime.target_heading = frame.input.heading_degrees(frame.camera_yaw);
        }

        self.move_character(target_speed * frame.input.input_magnitude(), frame);
    }

    fn try_to_jump<M: CharacterMotor + ?Sized>(&mut self, frame: &mut MovementFrame<'_, M>) {
        self.runtime.jump_buffer_remaining -= frame.dt;

        let buffered = self.runtime.jump_buffer_remaining > 0.0;
        let coyote = frame.ground.has_coyote_time();

        if coyote && buffered && self.runtime.vertical_velocity <= 0.0 {
            self.runtime.vertical_velocity = self.params.jump_impulse();
            self.runtime.jump_buffer_remaining = 0.0;
            frame.state.change_state(LocomotionState::InAir);
            self.signals.emit(LocomotionEvent::Jumped);
        } else if !self.runtime.double_jump_consumed && buffered && !coyote {
            self.runtime.vertical_velocity = self.params.jump_impulse();
            self.runtime.double_jump_consumed = true;
            self.signals.emit(LocomotionEvent::DoubleJumped);
        }
    }

    fn apply_airborne_transitions<M: CharacterMotor + ?Sized>(
        &mut self,
        frame: &mut MovementFrame<'_, M>,
    ) {
        let grounded = frame.ground.is_grounded;
        let rising = self.runtime.vertical_velocity > 0.0;

        match frame.state.current_state() {
            LocomotionState::Idle if !grounded || rising => {
                frame.state.change_state(LocomotionState::InAir);
            }
            // Landing waits for the ascent to end so the jump frame does not
            // bounce straight back to Idle while the probe still touches ground.
            // A plain grounded check would land on the jump frame itself.
            LocomotionState::InAir if grounded && !rising => {
                frame.state.change_state(LocomotionState::Idle);
            }
            _ => {}
        }
    }

    fn apply_gravity(&mut self, ground: GroundSample, dt: f32) {
        if ground.is_grounded {
            self.runtime.double_jump_consumed = false;
            if self.runtime.vertical_velocity < 0.0 {
                self.runtime.vertical_velocity = GROUNDED_STICK_VELOCITY;
            }
        }

        if self.runtime.vertical_velocity < self.params.terminal_velocity {
            self.runtime.vertical_velocity += self.params.gravity * dt;
        }
    }

    fn move_character<M: CharacterMotor + ?Sized>(
        &mut self,
        target_speed: f32,
        frame: &mut MovementFrame<'_, M>,
    ) {
        let dt = frame.dt;
        let velocity = frame.motor.velocity();
        let current_speed = Vec2::new(velocity.x, velocity.z).length();

        self.runtime.speed = if current_speed < target_speed - SPEED_OFFSET
            || current_speed > target_speed + SPEED_OFFSET
        {
            round3(lerp(
                current_speed,
                target_speed,
                dt * self.params.speed_change_rate,
            ))
        } else {
            target_speed
        };

        let facing = smooth_damp_angle(
            self.runtime.facing,
            self.runtime.target_heading,
            &mut self.runtime.rotation_velocity,
            self.params.rotation_smooth_time,
            dt,
        );
        self.runtime.facing = normalize_degrees(facing);

        // Movement follows the target heading, not the smoothed facing.
        let direction = heading_direction(self.runtime.target_heading);
        let displacement = direction * (self.runtime.speed * dt)
            + Vec3::Y * (self.runtime.vertical_velocity * dt);
        frame.motor.move_by(displacement, dt);
    }
}
