use crate::animation::AnimatorInput;
use crate::events::LocomotionEvent;
use crate::ground::{GroundDetector, GroundProbe, GroundSample};
use crate::input::{InputAction, InputSnapshot};
use crate::movement::{CharacterMotor, MovementController, MovementFrame};
use crate::state::{LocomotionState, StateManager};
use crate::window::WindowTransition;

/// Per-entity driver. Runs ground detection, movement and state updates in a
/// fixed order once per frame.
#[derive(Debug, Default)]
pub struct PlayerRig {
    ground: GroundDetector,
    state: StateManager,
    movement: MovementController,
}

impl PlayerRig {
    pub fn new(ground: GroundDetector, state: StateManager, movement: MovementController) -> Self {
        Self {
            ground,
            state,
            movement,
        }
    }

    pub fn state(&self) -> LocomotionState {
        self.state.current_state()
    }

    pub fn ground_sample(&self) -> GroundSample {
        self.ground.sample()
    }

    pub fn ground(&self) -> &GroundDetector {
        &self.ground
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut MovementController {
        &mut self.movement
    }

    /// Routes an edge-triggered input action.
    pub fn press(&mut self, action: InputAction, input: &InputSnapshot, camera_yaw: f32) {
        match action {
            InputAction::Jump => self.movement.request_jump(),
            InputAction::Dodge => {
                self.movement
                    .request_dodge(&mut self.state, input, camera_yaw);
            }
            InputAction::Attack => log::trace!("attack pressed; no locomotion response"),
        }
    }

    /// Routes a dodge clip window transition from the animation timeline.
    pub fn on_dodge_window(&mut self, transition: WindowTransition) {
        match transition {
            WindowTransition::Entered => {
                self.movement.start_dodge_movement(&self.state);
            }
            WindowTransition::Exited => {
                self.movement.finish_dodge(&mut self.state);
            }
        }
    }

    pub fn tick<P, M>(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        camera_yaw: f32,
        probe: &P,
        motor: &mut M,
    ) -> GroundSample
    where
        P: GroundProbe + ?Sized,
        M: CharacterMotor + ?Sized,
    {
        let ground = self.ground.update(motor.position(), probe, dt);

        let mut frame = MovementFrame {
            dt,
            camera_yaw,
            input,
            ground,
            state: &mut self.state,
            motor,
        };
        self.movement.update(&mut frame);

        ground
    }

    /// Inputs for the animator after this frame's tick.
    pub fn animator_input(&self, dt: f32, input: &InputSnapshot) -> AnimatorInput {
        AnimatorInput {
            dt,
            grounded: self.ground.sample().is_grounded,
            target_speed: self.movement.runtime().target_speed,
            speed_change_rate: self.movement.params().speed_change_rate,
            input_magnitude: input.input_magnitude(),
        }
    }

    /// Drains the events emitted since the previous call.
    pub fn take_events(&mut self) -> Vec<LocomotionEvent> {
        self.movement.signals_mut().take_emitted()
    }
}
