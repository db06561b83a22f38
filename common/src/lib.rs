//! Frame-rate independent numeric helpers shared by the locomotion core and
//! the client.
//!
//! Angles are in degrees unless a function says otherwise. The smoothing
//! functions reproduce the critically damped spring approximation commonly
//! used by game engines, so tuning values carry over unchanged.

/// Clamps `value` into `[0, 1]`.
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * clamp01(t)
}

/// Rounds `value` to `places` decimal places.
pub fn round_to_places(value: f32, places: i32) -> f32 {
    let scale = 10f32.powi(places);
    (value * scale).round() / scale
}

/// Rounds `value` to three decimal places.
pub fn round3(value: f32) -> f32 {
    round_to_places(value, 3)
}

/// Wraps `t` into `[0, length]`.
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Wraps an angle into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = repeat(angle, 360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed difference from `current` to `target`, in `(-180, 180]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = repeat(target - current, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Wraps an angle once by a full turn and clamps it into `[min, max]`.
///
/// Only a single wrap is applied, matching the behaviour camera rigs expect
/// when accumulating small per-frame deltas.
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

/// Smoothly moves `current` towards `target` over roughly `smooth_time`
/// seconds, updating `velocity` in place.
///
/// A zero or negative `dt` leaves both value and velocity untouched.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let goal = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = goal + (change + temp) * decay;

    // Never overshoot the requested target.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}

/// Angle-aware [`smooth_damp`]: takes the shortest way around the circle.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, f32::INFINITY, dt)
}
