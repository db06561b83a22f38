use bevy_math::{Vec2, Vec3};

/// Below this squared length an axis counts as released.
const ZERO_INPUT_EPSILON_SQ: f32 = 1e-10;

/// Latest input values for one character. Last value wins; nothing queues.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// `x` strafes right, `y` moves forward.
    pub move_axis: Vec2,
    pub look: Vec2,
    pub sprint: bool,
    pub scope: bool,
    pub defend: bool,
    /// When set, stick deflection scales the requested speed.
    pub analog_movement: bool,
}

impl InputSnapshot {
    pub fn has_move_input(&self) -> bool {
        self.move_axis.length_squared() >= ZERO_INPUT_EPSILON_SQ
    }

    pub fn input_magnitude(&self) -> f32 {
        if self.analog_movement {
            self.move_axis.length()
        } else {
            1.0
        }
    }

    /// Move axis on the ground plane (`x` right, `z` forward), normalized.
    pub fn planar_direction(&self) -> Vec3 {
        Vec3::new(self.move_axis.x, 0.0, self.move_axis.y).normalize_or_zero()
    }

    /// Camera-relative heading in degrees for the current move axis.
    ///
    /// With no input this is the camera yaw itself.
    pub fn heading_degrees(&self, camera_yaw: f32) -> f32 {
        let direction = self.planar_direction();
        direction.x.atan2(direction.z).to_degrees() + camera_yaw
    }
}

/// Edge-triggered input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Jump,
    Attack,
    Dodge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_axis_is_not_movement() {
        let input = InputSnapshot::default();
        assert!(!input.has_move_input());
    }

    #[test]
    fn digital_input_has_unit_magnitude() {
        let input = InputSnapshot {
            move_axis: Vec2::new(0.3, 0.0),
            ..Default::default()
        };
        assert_eq!(input.input_magnitude(), 1.0);
    }

    #[test]
    fn analog_input_scales_with_deflection() {
        let input = InputSnapshot {
            move_axis: Vec2::new(0.3, 0.4),
            analog_movement: true,
            ..Default::default()
        };
        assert!((input.input_magnitude() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn heading_is_camera_relative() {
        let right = InputSnapshot {
            move_axis: Vec2::X,
            ..Default::default()
        };
        assert!((right.heading_degrees(0.0) - 90.0).abs() < 1e-4);
        assert!((right.heading_degrees(45.0) - 135.0).abs() < 1e-4);

        let back = InputSnapshot {
            move_axis: Vec2::NEG_Y,
            ..Default::default()
        };
        assert!((back.heading_degrees(0.0).abs() - 180.0).abs() < 1e-4);
    }
}
