// MotionCue — Offset Mapper
//
// Maps the x/y acceleration of the latest sample to the undamped dot targets.
// The horizontal cue moves against lateral acceleration (the body "leans"
// the other way); the vertical cue follows y as-is.

use crate::events::AccelerationSample;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetOffset {
    pub x: f32,
    pub y: f32,
}

impl TargetOffset {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };
}

/// Target offsets for the two dots; both are centred while inactive.
pub fn target_offset(sample: &AccelerationSample, active: bool, sensitivity: f32) -> TargetOffset {
    if !active {
        return TargetOffset::CENTER;
    }
    TargetOffset {
        x: -sample.x * sensitivity,
        y: sample.y * sensitivity,
    }
}
