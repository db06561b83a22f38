/// Rejected tuning values. Raised while wiring a character, never per frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("gravity must be negative, got {0}")]
    NonNegativeGravity(f32),

    #[error("jump height must be positive, got {0}")]
    NonPositiveJumpHeight(f32),

    #[error("terminal velocity must be positive, got {0}")]
    NonPositiveTerminalVelocity(f32),

    #[error("speed change rate must be positive, got {0}")]
    NonPositiveSpeedChangeRate(f32),

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("window for clip '{clip}' exits at {exit_at} before it enters at {enter_at}")]
    InvertedWindow {
        clip: String,
        enter_at: f32,
        exit_at: f32,
    },
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<(), ParameterError> {
    if value < 0.0 || value.is_nan() {
        return Err(ParameterError::Negative { name, value });
    }
    Ok(())
}

pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), ParameterError> {
    if value <= 0.0 || value.is_nan() {
        return Err(ParameterError::NonPositive { name, value });
    }
    Ok(())
}
