//! Engine-independent locomotion for a third-person character.
//!
//! A [`PlayerRig`] ticks once per frame: the [`GroundDetector`] samples the
//! host's overlap query, the [`MovementController`] integrates speed, facing
//! and gravity, arbitrates jumps and dodges, moves the volume through the
//! host's [`CharacterMotor`], and writes the [`StateManager`]. Events raised on
//! the way are delivered through [`LocomotionSignals`].
//!
//! The dodge is bounded by its animation: the host advances a
//! [`WindowTracker`] for the dodge clip and feeds the resulting
//! [`WindowTransition`]s back with [`PlayerRig::on_dodge_window`].

pub mod animation;
pub mod error;
pub mod events;
pub mod ground;
pub mod input;
pub mod movement;
pub mod params;
pub mod rig;
pub mod state;
pub mod window;

pub use animation::{
    AnimatorInput, AnimatorParameters, AnimatorSettings, AnimatorTriggers, LocomotionAnimator,
};
pub use error::ParameterError;
pub use events::{ListenerId, LocomotionEvent, LocomotionSignals, Signal};
pub use ground::{GroundCheckSettings, GroundDetector, GroundProbe, GroundSample, LayerMask};
pub use input::{InputAction, InputSnapshot};
pub use movement::{
    CharacterMotor, GROUNDED_STICK_VELOCITY, MovementController, MovementFrame,
    MovementRuntimeState, heading_direction,
};
pub use params::MovementParameters;
pub use rig::PlayerRig;
pub use state::{LocomotionState, StateManager};
pub use window::{ClipWindow, WindowTracker, WindowTransition};
