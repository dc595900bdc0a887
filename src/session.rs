// MotionCue — Cue Session
//
// The explicit state object behind the screen: enable flag, sensor
// subscription, latest sample, derived motion state and the two axis springs.
// The shell calls `toggle()` on user input, `pump()` + `advance()` once per
// frame, and renders the returned `DotFrame`.
//
// Sensor samples arrive at sensor cadence (through `pump`); springs move at
// frame cadence (through `advance`).  The two clocks never wait on each other.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::config::{CueConfig, DisablePolicy};
use crate::events::{AccelerationSample, SensorEvent};
use crate::mapper::{target_offset, TargetOffset};
use crate::motion::MotionState;
use crate::sensor::{SensorSource, SubscriptionHandle};
use crate::spring::Spring;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorLifecycle {
    #[default]
    Disabled,
    Enabled,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DotFrame {
    pub dot_left_offset_x: f32,
    pub dot_left_visible: bool,
    pub dot_top_offset_y: f32,
    pub dot_top_visible: bool,
}

impl DotFrame {
    pub fn left_opacity(&self) -> f32 {
        if self.dot_left_visible { 1.0 } else { 0.0 }
    }

    pub fn top_opacity(&self) -> f32 {
        if self.dot_top_visible { 1.0 } else { 0.0 }
    }
}

pub struct CueSession<S: SensorSource> {
    config: CueConfig,
    source: S,
    lifecycle: SensorLifecycle,
    subscription: Option<SubscriptionHandle>,
    samples: Option<Receiver<SensorEvent>>,

    sample: AccelerationSample,
    state: MotionState,
    target: TargetOffset,
    spring_x: Spring,
    spring_y: Spring,
}

impl<S: SensorSource> CueSession<S> {
    pub fn new(source: S, config: CueConfig) -> Self {
        Self {
            config,
            source,
            lifecycle: SensorLifecycle::Disabled,
            subscription: None,
            samples: None,
            sample: AccelerationSample::default(),
            state: MotionState::IDLE,
            target: TargetOffset::CENTER,
            spring_x: Spring::new(config.spring),
            spring_y: Spring::new(config.spring),
        }
    }

    pub fn config(&self) -> &CueConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn lifecycle(&self) -> SensorLifecycle {
        self.lifecycle
    }

    pub fn is_enabled(&self) -> bool {
        self.lifecycle == SensorLifecycle::Enabled
    }

    /// Most recent sample (retained across disable).
    pub fn sample(&self) -> AccelerationSample {
        self.sample
    }

    pub fn motion_state(&self) -> MotionState {
        self.state
    }

    pub fn target(&self) -> TargetOffset {
        self.target
    }

    pub fn animated_offset(&self) -> (f32, f32) {
        (self.spring_x.position(), self.spring_y.position())
    }

    pub fn toggle(&mut self) -> SensorLifecycle {
        match self.lifecycle {
            SensorLifecycle::Disabled => self.enable(),
            SensorLifecycle::Enabled => self.disable(),
        }
        self.lifecycle
    }

    /// Subscribe to the sensor.  No-op when already enabled.
    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }
        self.lifecycle = SensorLifecycle::Enabled;

        self.source.set_sampling_interval(self.config.sampling_interval);
        let (tx, rx) = mpsc::channel();
        match self.source.subscribe(tx) {
            Ok(handle) => {
                log::info!(
                    "Cues enabled — sensor subscription #{} at {} ms",
                    handle.id(),
                    self.config.sampling_interval.as_millis()
                );
                self.subscription = Some(handle);
                self.samples = Some(rx);
            }
            Err(e) => {
                // No input is not fatal: the dots simply never activate.
                log::warn!("Cues enabled without sensor input: {:#}", e);
            }
        }
    }

    /// Drop the sensor subscription.  No-op when already disabled.
    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.lifecycle = SensorLifecycle::Disabled;

        if let Some(handle) = self.subscription.take() {
            self.source.unsubscribe(handle);
        }
        // Anything still queued belongs to the old subscription.
        self.samples = None;

        if self.config.disable_policy == DisablePolicy::ResetToInactive && self.state.active {
            self.state.active = false;
            self.retarget();
            log::debug!("Motion state forced inactive on disable");
        }
        log::info!("Cues disabled");
    }

    /// Feed one sensor event through derivation and mapping.
    pub fn ingest(&mut self, event: SensorEvent) {
        self.sample = event.sample();
        let next = MotionState::derive(&self.sample, self.config.motion_threshold);
        if next.active != self.state.active {
            let label = if next.active { "active" } else { "inactive" };
            log::debug!("Motion state -> {} (|a| = {:.3})", label, next.magnitude);
        }
        self.state = next;
        self.retarget();
    }

    /// Apply the newest pending sensor event, discarding older ones.
    /// Returns `true` if an event was applied.
    pub fn pump(&mut self) -> bool {
        let latest = match &self.samples {
            Some(rx) => rx.try_iter().last(),
            None => None,
        };
        match latest {
            Some(event) => {
                self.ingest(event);
                true
            }
            None => false,
        }
    }

    /// Move both springs forward by one frame and report what to draw.
    pub fn advance(&mut self, dt: Duration) -> DotFrame {
        self.spring_x.step(dt);
        self.spring_y.step(dt);
        self.frame()
    }

    pub fn frame(&self) -> DotFrame {
        DotFrame {
            dot_left_offset_x: self.spring_x.position(),
            dot_left_visible: self.state.active,
            dot_top_offset_y: self.spring_y.position(),
            dot_top_visible: self.state.active,
        }
    }

    fn retarget(&mut self) {
        let target = target_offset(&self.sample, self.state.active, self.config.offset_sensitivity);
        self.target = if target.x.is_finite() && target.y.is_finite() {
            target
        } else {
            log::warn!("Cue offset overflowed for {:?} — holding centre", self.sample);
            TargetOffset::CENTER
        };
        self.spring_x.set_target(self.target.x);
        self.spring_y.set_target(self.target.y);
    }
}

impl<S: SensorSource> Drop for CueSession<S> {
    fn drop(&mut self) {
        self.disable();
    }
}
