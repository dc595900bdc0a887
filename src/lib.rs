//! MotionCue — in-vehicle motion cues.
//!
//! Reads a tri-axis accelerometer, decides from the acceleration magnitude
//! whether the device is "in a vehicle", and drives two indicator dots whose
//! spring-animated offsets follow lateral (x) and vertical (y) acceleration
//! while that state holds.
//!
//! Pipeline, leaf first:
//!
//! ```text
//! SensorSource ─► AccelerationSample ─► motion::MotionState ─► mapper::TargetOffset
//!                                                               │
//!                      render::draw_cues ◄─ DotFrame ◄─ spring::Spring (x, y)
//! ```
//!
//! [`session::CueSession`] owns the whole chain plus the enable flag;
//! [`tasks::ui::CueShell`] wraps it with a screen and button events.

pub mod config;
pub mod drivers;
pub mod events;
pub mod input;
pub mod mapper;
pub mod motion;
pub mod render;
pub mod sensor;
pub mod session;
pub mod spring;
pub mod tasks;

pub use config::{CueConfig, DisablePolicy, SpringConfig};
pub use events::{AccelerationSample, SensorEvent, UiEvent};
pub use motion::MotionState;
pub use sensor::{Accelerometer, SensorSource, SubscriptionHandle};
pub use session::{CueSession, DotFrame, SensorLifecycle};
