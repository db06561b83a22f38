use bevy_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, ensure_positive};

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);
    pub const DEFAULT: Self = Self(1);

    pub const fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Host overlap query used for ground detection.
pub trait GroundProbe {
    /// Whether any non-trigger collider on `layers` overlaps the sphere.
    fn check_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundCheckSettings {
    /// Subtracted from the character's height to place the probe. Useful for rough ground.
    pub grounded_offset: f32,
    /// Should match the radius of the character volume.
    pub grounded_radius: f32,
    /// Seconds after leaving the ground during which a jump still counts as grounded.
    pub coyote_time: f32,
    pub ground_layers: LayerMask,
}

impl Default for GroundCheckSettings {
    fn default() -> Self {
        Self {
            grounded_offset: -0.14,
            grounded_radius: 0.28,
            coyote_time: 0.15,
            ground_layers: LayerMask::DEFAULT,
        }
    }
}

impl GroundCheckSettings {
    pub fn validate(&self) -> Result<(), ParameterError> {
        ensure_positive("grounded_radius", self.grounded_radius)?;
        ensure_positive("coyote_time", self.coyote_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundSample {
    pub is_grounded: bool,
    /// Only the sign matters; keeps decreasing while airborne.
    pub coyote_time_remaining: f32,
}

impl GroundSample {
    pub fn has_coyote_time(&self) -> bool {
        self.coyote_time_remaining > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroundDetector {
    settings: GroundCheckSettings,
    sample: GroundSample,
}

impl GroundDetector {
    pub fn new(settings: GroundCheckSettings) -> Self {
        Self {
            settings,
            sample: GroundSample::default(),
        }
    }

    pub fn settings(&self) -> &GroundCheckSettings {
        &self.settings
    }

    /// Most recent sample.
    pub fn sample(&self) -> GroundSample {
        self.sample
    }

    pub fn probe_center(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x,
            position.y - self.settings.grounded_offset,
            position.z,
        )
    }

    /// Runs the overlap query for this frame and updates the coyote counter.
    pub fn update<P: GroundProbe + ?Sized>(
        &mut self,
        position: Vec3,
        probe: &P,
        dt: f32,
    ) -> GroundSample {
        let grounded = probe.check_sphere(
            self.probe_center(position),
            self.settings.grounded_radius,
            self.settings.ground_layers,
        );

        self.sample.is_grounded = grounded;
        if grounded {
            self.sample.coyote_time_remaining = self.settings.coyote_time;
        } else {
            self.sample.coyote_time_remaining -= dt;
        }

        self.sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FlatGround {
        height: f32,
        last_center: Cell<Vec3>,
    }

    impl GroundProbe for FlatGround {
        fn check_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> bool {
            self.last_center.set(center);
            layers.intersects(LayerMask::DEFAULT) && center.y - radius <= self.height
        }
    }

    fn flat() -> FlatGround {
        FlatGround {
            height: 0.0,
            last_center: Cell::new(Vec3::ZERO),
        }
    }

    #[test]
    fn probe_sits_above_feet_by_offset() {
        let ground = flat();
        let mut detector = GroundDetector::default();
        detector.update(Vec3::new(1.0, 2.0, 3.0), &ground, 0.016);
        assert!((ground.last_center.get() - Vec3::new(1.0, 2.14, 3.0)).length() < 1e-5);
    }

    #[test]
    fn grounded_sample_resets_coyote_fully() {
        let ground = flat();
        let mut detector = GroundDetector::default();
        detector.update(Vec3::new(0.0, 5.0, 0.0), &ground, 0.1);
        detector.update(Vec3::new(0.0, 5.0, 0.0), &ground, 0.1);

        let sample = detector.update(Vec3::ZERO, &ground, 0.1);
        assert!(sample.is_grounded);
        assert_eq!(sample.coyote_time_remaining, 0.15);
    }

    #[test]
    fn airborne_coyote_decays_below_zero() {
        let ground = flat();
        let mut detector = GroundDetector::default();
        detector.update(Vec3::ZERO, &ground, 0.1);

        let mut sample = GroundSample::default();
        for _ in 0..4 {
            sample = detector.update(Vec3::new(0.0, 3.0, 0.0), &ground, 0.1);
        }
        assert!(!sample.is_grounded);
        assert!((sample.coyote_time_remaining - (0.15 - 0.4)).abs() < 1e-5);
        assert!(!sample.has_coyote_time());
    }

    #[test]
    fn layer_filter_is_forwarded() {
        let ground = flat();
        let mut detector = GroundDetector::new(GroundCheckSettings {
            ground_layers: LayerMask::layer(4),
            ..Default::default()
        });
        assert!(!detector.update(Vec3::ZERO, &ground, 0.016).is_grounded);
    }

    #[test]
    fn validate_rejects_zero_radius() {
        let settings = GroundCheckSettings {
            grounded_radius: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_coyote_time() {
        let settings = GroundCheckSettings {
            coyote_time: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
        assert!(GroundCheckSettings::default().validate().is_ok());
    }
}
