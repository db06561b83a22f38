use bevy_math::{Vec2, Vec3};
use locomotion::{
    CharacterMotor, GroundProbe, InputAction, InputSnapshot, LayerMask, LocomotionEvent,
    LocomotionState, PlayerRig,
};

const DT: f32 = 1.0 / 60.0;

/// Infinite floor at `height`, or nothing at all.
struct Floor {
    height: Option<f32>,
}

impl GroundProbe for Floor {
    fn check_sphere(&self, center: Vec3, radius: f32, _layers: LayerMask) -> bool {
        self.height.is_some_and(|height| center.y - radius <= height)
    }
}

#[derive(Default)]
struct FloorMotor {
    position: Vec3,
    velocity: Vec3,
    floor: Option<f32>,
}

impl CharacterMotor for FloorMotor {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn move_by(&mut self, displacement: Vec3, dt: f32) -> Vec3 {
        let start = self.position;
        let mut next = start + displacement;
        if let Some(floor) = self.floor {
            next.y = next.y.max(floor);
        }
        self.position = next;
        let actual = next - start;
        self.velocity = actual / dt;
        actual
    }
}

struct Sandbox {
    rig: PlayerRig,
    floor: Floor,
    motor: FloorMotor,
    input: InputSnapshot,
    events: Vec<LocomotionEvent>,
}

impl Sandbox {
    fn on_ground() -> Self {
        Self {
            rig: PlayerRig::default(),
            floor: Floor { height: Some(0.0) },
            motor: FloorMotor {
                floor: Some(0.0),
                ..Default::default()
            },
            input: InputSnapshot::default(),
            events: Vec::new(),
        }
    }

    fn tick(&mut self) {
        self.rig.tick(DT, &self.input, 0.0, &self.floor, &mut self.motor);
        self.events.extend(self.rig.take_events());
    }

    fn press(&mut self, action: InputAction) {
        self.rig.press(action, &self.input, 0.0);
        self.events.extend(self.rig.take_events());
    }

    fn count(&self, event: LocomotionEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    /// Ticks until the coyote counter has run out.
    fn fall_until_coyote_expires(&mut self) {
        for _ in 0..60 {
            self.tick();
            if !self.rig.ground_sample().has_coyote_time() {
                return;
            }
        }
        panic!("coyote time never expired");
    }
}

#[test]
fn grounded_jump_enters_air_and_emits_jumped() {
    let mut sandbox = Sandbox::on_ground();
    sandbox.tick();
    assert_eq!(sandbox.rig.state(), LocomotionState::Idle);
    assert_eq!(sandbox.rig.ground_sample().coyote_time_remaining, 0.15);

    sandbox.press(InputAction::Jump);
    assert_eq!(sandbox.rig.movement().runtime().jump_buffer_remaining, 0.15);

    sandbox.tick();

    // Still touching the floor on the jump frame, but rising keeps it airborne.
    assert!(sandbox.rig.ground_sample().is_grounded);
    assert_eq!(sandbox.rig.state(), LocomotionState::InAir);
    assert_eq!(sandbox.count(LocomotionEvent::Jumped), 1);
    let params = *sandbox.rig.movement().params();
    let expected = params.jump_impulse() + params.gravity * DT;
    assert!((sandbox.rig.movement().runtime().vertical_velocity - expected).abs() < 1e-5);
}

#[test]
fn jump_impulse_matches_formula_for_many_tunings() {
    for (height, gravity) in [(0.5, -9.81), (1.2, -15.0), (3.0, -30.0)] {
        let params = locomotion::MovementParameters {
            jump_height: height,
            gravity,
            ..Default::default()
        };
        let mut sandbox = Sandbox::on_ground();
        sandbox.rig = PlayerRig::new(
            Default::default(),
            Default::default(),
            locomotion::MovementController::new(params),
        );
        sandbox.tick();
        sandbox.press(InputAction::Jump);
        sandbox.tick();

        let runtime = sandbox.rig.movement().runtime();
        let before_gravity = runtime.vertical_velocity - gravity * DT;
        assert!((before_gravity - (height * -2.0 * gravity).sqrt()).abs() < 1e-4);
    }
}

#[test]
fn character_lands_back_in_idle() {
    let mut sandbox = Sandbox::on_ground();
    sandbox.tick();
    sandbox.press(InputAction::Jump);

    let mut saw_air = false;
    for _ in 0..240 {
        sandbox.tick();
        saw_air |= sandbox.rig.state() == LocomotionState::InAir;
        if saw_air && sandbox.rig.state() == LocomotionState::Idle {
            break;
        }
    }

    assert!(saw_air);
    for _ in 0..5 {
        sandbox.tick();
    }
    assert_eq!(sandbox.rig.state(), LocomotionState::Idle);
    assert!(sandbox.motor.position.y.abs() < 1e-4);
}

#[test]
fn double_jump_is_consumed_once_per_airborne_episode() {
    let mut sandbox = Sandbox::on_ground();
    sandbox.tick();
    sandbox.press(InputAction::Jump);
    sandbox.tick();
    sandbox.fall_until_coyote_expires();
    assert_eq!(sandbox.rig.state(), LocomotionState::InAir);

    sandbox.press(InputAction::Jump);
    sandbox.tick();
    assert_eq!(sandbox.count(LocomotionEvent::DoubleJumped), 1);
    assert!(sandbox.rig.movement().runtime().double_jump_consumed);
    assert_eq!(sandbox.rig.state(), LocomotionState::InAir);

    sandbox.press(InputAction::Jump);
    sandbox.tick();
    sandbox.tick();
    assert_eq!(sandbox.count(LocomotionEvent::DoubleJumped), 1);
}

#[test]
fn double_jump_becomes_available_after_landing() {
    let mut sandbox = Sandbox::on_ground();
    sandbox.tick();
    sandbox.press(InputAction::Jump);
    sandbox.tick();
    sandbox.fall_until_coyote_expires();
    sandbox.press(InputAction::Jump);
    sandbox.tick();
    assert!(sandbox.rig.movement().runtime().double_jump_consumed);

    for _ in 0..240 {
        sandbox.tick();
        if sandbox.rig.ground_sample().is_grounded {
            break;
        }
    }
    sandbox.tick();
    assert!(!sandbox.rig.movement().runtime().double_jump_consumed);
}

#[test]
fn walking_off_a_ledge_keeps_coyote_jump() {
    let mut sandbox = Sandbox::on_ground();
    sandbox.tick();

    // The floor disappears under the character.
    sandbox.floor.height = None;
    sandbox.motor.floor = None;
    sandbox.tick();
    assert_eq!(sandbox.rig.state(), LocomotionState::InAir);
    assert!(sandbox.rig.ground_sample().has_coyote_time());

    sandbox.press(InputAction::Jump);
    sandbox.tick();

    assert_eq!(sandbox.count(LocomotionEvent::Jumped), 1);
    assert_eq!(sandbox.count(LocomotionEvent::DoubleJumped), 0);
}

#[test]
fn early_press_is_buffered_until_landing() {
    let mut sandbox = Sandbox::on_ground();
    sandbox.tick();
    sandbox.press(InputAction::Jump);
    sandbox.tick();
    sandbox.fall_until_coyote_expires();
    sandbox.press(InputAction::Jump);
    sandbox.tick();
    assert_eq!(sandbox.count(LocomotionEvent::DoubleJumped), 1);

    // Fall until just above the floor, then press: only the buffer can honor it.
    let mut pressed = false;
    for _ in 0..240 {
        let runtime = *sandbox.rig.movement().runtime();
        let next_y = sandbox.motor.position.y + runtime.vertical_velocity * DT;
        if !pressed && runtime.vertical_velocity < 0.0 && next_y < 0.3 {
            sandbox.press(InputAction::Jump);
            pressed = true;
        }
        sandbox.tick();
        if sandbox.count(LocomotionEvent::Jumped) == 2 {
            break;
        }
    }

    assert!(pressed);
    assert_eq!(sandbox.count(LocomotionEvent::Jumped), 2);
}

#[test]
fn sprint_speed_applies_only_on_ground() {
    let mut sandbox = Sandbox::on_ground();
    sandbox.input = InputSnapshot {
        move_axis: Vec2::Y,
        sprint: true,
        ..Default::default()
    };
    sandbox.tick();
    let params = *sandbox.rig.movement().params();
    assert_eq!(sandbox.rig.movement().runtime().target_speed, params.sprint_speed);

    sandbox.press(InputAction::Jump);
    sandbox.tick();
    sandbox.tick();
    assert_eq!(sandbox.rig.state(), LocomotionState::InAir);
    assert_eq!(sandbox.rig.movement().runtime().target_speed, params.air_speed);
}
