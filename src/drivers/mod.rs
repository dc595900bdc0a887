pub mod display;
pub mod gravity;
pub mod scripted;

#[cfg(target_os = "espidf")]
pub mod imu;
