// MotionCue — Hardware, Timing & Tuning Configuration
// Firmware target: Seeed Studio Xiao ESP32-C3 (RISC-V). Host builds reuse the
// display geometry and tuning values for the simulator.

use std::time::Duration;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 3;      // D1/A1 — Cue toggle button (INPUT_PULLUP, active LOW)
pub const PIN_I2C_SDA: i32 = 6;     // D4    — I2C data line
pub const PIN_I2C_SCL: i32 = 7;     // D5    — I2C clock line

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024

pub const DOT_DIAMETER: u32 = 7;
pub const DOT_EDGE_MARGIN: i32 = 2; // gap between a resting dot and its screen edge

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SENSOR: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const SENSOR_SAMPLE_INTERVAL_MS: u64 = 100;        // 10 Hz
pub const UI_FRAME_INTERVAL_MS: u64 = 16;              // ~60 Hz render + input poll
pub const DEBOUNCE_MS: u64 = 50;
pub const LONG_PRESS_MS: u64 = 3000;                   // 3-second hold → shutdown

// ---------------------------------------------------------------------------
// Cue Tuning
// ---------------------------------------------------------------------------
pub const MOTION_THRESHOLD: f32 = 0.5;     // g, magnitude above which cues show
pub const OFFSET_SENSITIVITY: f32 = 25.0;  // pixels per g

// ---------------------------------------------------------------------------
// Spring Tuning
// ---------------------------------------------------------------------------
pub const SPRING_STIFFNESS: f32 = 100.0;
pub const SPRING_DAMPING: f32 = 10.0;
pub const SPRING_MASS: f32 = 1.0;
pub const SPRING_REST_DISPLACEMENT: f32 = 0.01;
pub const SPRING_REST_SPEED: f32 = 2.0;
pub const SPRING_MAX_SUBSTEP_MS: f32 = 4.0;

// ---------------------------------------------------------------------------
// Gravity separation (raw accelerometers only)
// ---------------------------------------------------------------------------
pub const GRAVITY_FILTER_ALPHA: f32 = 0.1;

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_8G: f32 = 4096.0;   // LSB/g  at ±8 g

/// What happens to the derived motion state when the sensor is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisablePolicy {
    /// Force the state inactive: dots hide and spring back to centre.
    #[default]
    ResetToInactive,
    /// Keep whatever the last sample produced until a new one arrives.
    HoldLast,
}

/// Spring constants shared by both cue axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from target under which the spring may come to rest.
    pub rest_displacement: f32,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f32,
    /// Longest integration step; larger frame deltas are subdivided.
    pub max_substep: Duration,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
            mass: SPRING_MASS,
            rest_displacement: SPRING_REST_DISPLACEMENT,
            rest_speed: SPRING_REST_SPEED,
            max_substep: Duration::from_secs_f32(SPRING_MAX_SUBSTEP_MS / 1000.0),
        }
    }
}

impl SpringConfig {
    /// Replace values the integrator cannot run with: a mass that is not
    /// strictly positive and finite, or a zero sub-step.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut config = self;
        if !(config.mass.is_finite() && config.mass > 0.0) {
            log::warn!("Spring mass {} unusable — using {}", config.mass, defaults.mass);
            config.mass = defaults.mass;
        }
        if config.max_substep.is_zero() {
            log::warn!("Spring sub-step is zero — using {:?}", defaults.max_substep);
            config.max_substep = defaults.max_substep;
        }
        config
    }
}

/// Runtime tuning for a cue session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueConfig {
    pub motion_threshold: f32,
    pub offset_sensitivity: f32,
    pub sampling_interval: Duration,
    pub spring: SpringConfig,
    pub disable_policy: DisablePolicy,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            motion_threshold: MOTION_THRESHOLD,
            offset_sensitivity: OFFSET_SENSITIVITY,
            sampling_interval: Duration::from_millis(SENSOR_SAMPLE_INTERVAL_MS),
            spring: SpringConfig::default(),
            disable_policy: DisablePolicy::default(),
        }
    }
}
