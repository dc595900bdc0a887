// MotionCue — System Events & Data Types

// ---------------------------------------------------------------------------
// Sensor Data (gravity-free 3-axis acceleration, units of g)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccelerationSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelerationSample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Sensor Events — delivered by a sensor subscription
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorEvent {
    /// `None` when the source fired without an acceleration payload.
    pub acceleration: Option<AccelerationSample>,
}

impl SensorEvent {
    pub fn motion(sample: AccelerationSample) -> Self {
        Self { acceleration: Some(sample) }
    }

    /// The carried sample, or the zero vector for an empty event or one
    /// with a NaN / infinite component.
    pub fn sample(&self) -> AccelerationSample {
        self.acceleration.filter(AccelerationSample::is_finite).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// UI Events — produced by the button, consumed by the shell
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Short click: flip the cue enable flag.
    ToggleCues,
    /// Long press (≥ 3 s): stop the sensor and power down.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_event_yields_zero_vector() {
        let event = SensorEvent::default();
        assert_eq!(event.sample(), AccelerationSample::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn non_finite_event_yields_zero_vector() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let event = SensorEvent::motion(AccelerationSample::new(0.4, bad, 0.1));
            assert_eq!(event.sample(), AccelerationSample::default());
        }
    }

    #[test]
    fn motion_event_carries_sample() {
        let sample = AccelerationSample::new(0.1, -0.2, 0.3);
        assert_eq!(SensorEvent::motion(sample).sample(), sample);
    }
}
