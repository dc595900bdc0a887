// MotionCue — MPU6050 Accelerometer Driver
//
// Custom register-level driver over shared I2C bus.
// Avoids external crate version conflicts with esp-idf-hal.
// Only the accelerometer is used; readings pass through gravity separation
// before they reach the cue pipeline.

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

use crate::config::*;
use crate::drivers::gravity::GravityFilter;
use crate::events::AccelerationSample;
use crate::sensor::Accelerometer;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// MPU6050 register addresses
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_CONFIG: u8 = 0x1A;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 6-byte accel burst
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

pub struct Mpu6050 {
    bus: SharedBus,
    gravity: GravityFilter,
}

impl Mpu6050 {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            gravity: GravityFilter::new(GRAVITY_FILTER_ALPHA),
        }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_MPU6050, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Wake the sensor and configure accel (±8 g), DLPF 21 Hz.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        // Wake up (clear SLEEP bit)
        bus.write(I2C_ADDR_MPU6050, &[REG_PWR_MGMT_1, 0x00], I2C_TIMEOUT_TICKS)?;

        // DLPF bandwidth 21 Hz
        bus.write(I2C_ADDR_MPU6050, &[REG_CONFIG, 0x04], I2C_TIMEOUT_TICKS)?;

        // Accelerometer: ±8 g
        bus.write(I2C_ADDR_MPU6050, &[REG_ACCEL_CONFIG, 0x10], I2C_TIMEOUT_TICKS)?;

        log::info!("MPU6050 initialised (±8g, DLPF 21Hz)");
        Ok(())
    }

    /// Burst-read the three accel axes in g, gravity included.
    pub fn read_raw(&self) -> anyhow::Result<[f32; 3]> {
        let mut bus = self.bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut raw = [0u8; 6];
        bus.write_read(I2C_ADDR_MPU6050, &[REG_ACCEL_XOUT_H], &mut raw, I2C_TIMEOUT_TICKS)?;

        Ok([
            i16::from_be_bytes([raw[0], raw[1]]) as f32 / ACCEL_SCALE_8G,
            i16::from_be_bytes([raw[2], raw[3]]) as f32 / ACCEL_SCALE_8G,
            i16::from_be_bytes([raw[4], raw[5]]) as f32 / ACCEL_SCALE_8G,
        ])
    }
}

impl Accelerometer for Mpu6050 {
    fn read_acceleration(&mut self) -> anyhow::Result<AccelerationSample> {
        let raw = self.read_raw()?;
        Ok(self.gravity.update(raw))
    }
}
