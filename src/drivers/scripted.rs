// MotionCue — Scripted Accelerometer
//
// Replays a fixed list of readings, wrapping around at the end.  Drives the
// host simulator and the sensor-task tests.

use std::f32::consts::PI;

use crate::events::AccelerationSample;
use crate::sensor::Accelerometer;

pub struct ScriptedAccelerometer {
    samples: Vec<AccelerationSample>,
    cursor: usize,
}

impl ScriptedAccelerometer {
    pub fn new(samples: Vec<AccelerationSample>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// A short synthetic drive at 10 Hz: parked, pull away, cruise over a
    /// rough road, a left bend, a firm stop, parked again.
    pub fn drive() -> Self {
        let mut samples = Vec::new();

        // Parked: sensor noise only.
        samples.extend((0..20).map(|i| AccelerationSample::new(0.01 * wobble(i, 3), 0.01 * wobble(i, 5), 0.02)));
        // Pulling away: forward push ramps up then fades.
        samples.extend((0..15).map(|i| {
            let push = (i as f32 / 15.0 * PI).sin();
            AccelerationSample::new(0.05 * wobble(i, 4), 0.7 * push, 0.1)
        }));
        // Cruising on a rough road: vertical chatter hovering near the threshold.
        samples.extend((0..30).map(|i| AccelerationSample::new(0.05 * wobble(i, 3), 0.1 * wobble(i, 7), 0.45 + 0.15 * wobble(i, 2))));
        // Left bend: sustained lateral pull.
        samples.extend((0..20).map(|i| {
            let pull = (i as f32 / 20.0 * PI).sin();
            AccelerationSample::new(0.6 * pull, 0.05 * wobble(i, 5), 0.1)
        }));
        // Braking hard.
        samples.extend((0..10).map(|i| AccelerationSample::new(0.0, -0.9 + 0.05 * i as f32, 0.05)));
        // Parked again.
        samples.extend((0..20).map(|_| AccelerationSample::default()));

        Self::new(samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Deterministic ±1 jitter with the given period.
fn wobble(i: usize, period: usize) -> f32 {
    (2.0 * PI * i as f32 / period as f32).sin()
}

impl Accelerometer for ScriptedAccelerometer {
    fn read_acceleration(&mut self) -> anyhow::Result<AccelerationSample> {
        if self.samples.is_empty() {
            anyhow::bail!("accelerometer script is empty");
        }
        let sample = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MOTION_THRESHOLD;
    use crate::motion::MotionState;

    #[test]
    fn replays_and_wraps() {
        let a = AccelerationSample::new(1.0, 0.0, 0.0);
        let b = AccelerationSample::new(0.0, 1.0, 0.0);
        let mut accel = ScriptedAccelerometer::new(vec![a, b]);
        let read: Vec<_> = (0..5).map(|_| accel.read_acceleration().unwrap()).collect();
        assert_eq!(read, vec![a, b, a, b, a]);
    }

    #[test]
    fn empty_script_is_an_error() {
        let mut accel = ScriptedAccelerometer::new(Vec::new());
        assert!(accel.is_empty());
        assert!(accel.read_acceleration().is_err());
    }

    #[test]
    fn drive_starts_and_ends_parked_with_activity_between() {
        let mut accel = ScriptedAccelerometer::drive();
        let states: Vec<bool> = (0..accel.len())
            .map(|_| MotionState::derive(&accel.read_acceleration().unwrap(), MOTION_THRESHOLD).active)
            .collect();

        assert!(!states[0]);
        assert!(!states[states.len() - 1]);
        assert!(states.iter().any(|&active| active));
    }
}
