// MotionCue — Motion State Derivation
//
// Turns the latest acceleration sample into its magnitude and the "in
// vehicle" flag.  Stateless: the flag follows each sample with no hysteresis,
// so readings hovering around the threshold flicker on and off.

use crate::events::AccelerationSample;

/// Euclidean norm of the acceleration vector.
pub fn magnitude(sample: &AccelerationSample) -> f32 {
    (sample.x * sample.x + sample.y * sample.y + sample.z * sample.z).sqrt()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub magnitude: f32,
    pub active: bool,
}

impl MotionState {
    /// The state before any sample arrives (zero magnitude, inactive).
    pub const IDLE: Self = Self { magnitude: 0.0, active: false };

    /// `active` is strictly `magnitude > threshold`.
    pub fn derive(sample: &AccelerationSample, threshold: f32) -> Self {
        let magnitude = magnitude(sample);
        Self {
            magnitude,
            active: magnitude > threshold,
        }
    }
}
