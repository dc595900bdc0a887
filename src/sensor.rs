// MotionCue — Sensor Source Boundary
//
// The core never talks to hardware directly.  It subscribes to a
// `SensorSource`, which pushes `SensorEvent`s into the channel it is given
// until unsubscribed.

use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::events::{AccelerationSample, SensorEvent};

/// Identifies one live subscription on a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

pub trait SensorSource {
    /// Period between deliveries for subsequent subscriptions.
    fn set_sampling_interval(&mut self, interval: Duration);

    /// Start delivering events into `sink`.  An error means the sensor is
    /// unavailable; callers treat that as "no input", not as a failure.
    fn subscribe(&mut self, sink: Sender<SensorEvent>) -> anyhow::Result<SubscriptionHandle>;

    /// Stop a subscription.  Unknown or already-stopped handles are ignored.
    fn unsubscribe(&mut self, handle: SubscriptionHandle);
}

/// Something that can be polled for a gravity-free acceleration reading.
pub trait Accelerometer {
    fn read_acceleration(&mut self) -> anyhow::Result<AccelerationSample>;
}
