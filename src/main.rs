// MotionCue — Entry Point
//
// Firmware (target_os = "espidf"):
//   1. Bring up logging, the shared I2C bus, the OLED and the MPU6050.
//   2. Show the cue screen with cues disabled.
//   3. Poll the button and render at ~60 Hz; a click toggles the cues,
//      a 3-second hold releases the sensor and enters deep sleep.
//
// Host: replays a scripted drive through the same session, sensor thread and
// renderer, printing a trace of the dot offsets.  No `log` backend is
// installed on the host, so library log lines are dropped; the simulator
// prints its own lifecycle lines to stdout.

use std::time::Instant;

fn main() -> anyhow::Result<()> {
    app::run(Instant::now())
}

// ---------------------------------------------------------------------------
// Firmware
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
mod app {
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};

    use esp_idf_hal::gpio::{AnyInputPin, Input, InputPin, PinDriver};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use motioncue::config::*;
    use motioncue::drivers::display::OledDisplay;
    use motioncue::drivers::imu::Mpu6050;
    use motioncue::input::ButtonInput;
    use motioncue::tasks::sensor::ThreadedSensor;
    use motioncue::tasks::ui::CueShell;
    use motioncue::{CueConfig, CueSession};

    pub fn run(_boot: Instant) -> anyhow::Result<()> {
        // Link esp-idf-sys runtime patches and initialise logging.
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
        log::info!("MotionCue firmware starting…");

        // ---- Peripherals ------------------------------------------------------
        let peripherals = Peripherals::take()?;

        let button = PinDriver::input(peripherals.pins.gpio3.downgrade_input())?;
        configure_pullup(&button);

        // ---- I2C bus (shared between OLED and MPU6050) ------------------------
        let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
        let i2c = I2cDriver::new(
            peripherals.i2c0,
            peripherals.pins.gpio6, // SDA
            peripherals.pins.gpio7, // SCL
            &i2c_config,
        )?;
        // The bus lives for the whole programme (firmware never exits).
        let i2c_bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));

        // ---- Self-test --------------------------------------------------------
        let mut display = OledDisplay::new(i2c_bus);
        display.init()?;

        let imu = Mpu6050::new(i2c_bus);
        let oled_ok = display.is_connected();
        let imu_ok = imu.is_connected();
        if imu_ok {
            imu.init()?;
        } else {
            // Keep running: the cues just never activate without input.
            log::error!("Boot check FAILED — OLED:{} IMU:{}", oled_ok, imu_ok);
        }

        // ---- Cue shell --------------------------------------------------------
        let session = CueSession::new(ThreadedSensor::new(imu), CueConfig::default());
        let mut shell = CueShell::new(session, display);
        let mut input = ButtonInput::new(button);
        log::info!("Boot complete — entering normal operation");

        let frame_interval = Duration::from_millis(UI_FRAME_INTERVAL_MS);
        while shell.is_running() {
            let tick_start = Instant::now();

            if let Some(event) = input.poll() {
                shell.handle(event);
            }
            if let Err(e) = shell.frame(tick_start) {
                log::error!("Display error: {}", e);
            }

            let elapsed = tick_start.elapsed();
            if elapsed < frame_interval {
                thread::sleep(frame_interval - elapsed);
            }
        }

        let _ = shell.screen_mut().turn_off();
        drop(shell);
        enter_deep_sleep();
    }

    /// Configure internal pull-up on the button.  `PinDriver::set_pull` is not
    /// available for input-only downgraded pins, so go through the raw API.
    fn configure_pullup(_pin: &PinDriver<'_, AnyInputPin, Input>) {
        unsafe {
            esp_idf_sys::gpio_set_pull_mode(PIN_BUTTON, esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY);
        }
    }

    /// Enter deep sleep with button-press wakeup.  Does not return.
    fn enter_deep_sleep() -> ! {
        log::info!("Entering deep sleep — wake on button press (GPIO{})", PIN_BUTTON);
        unsafe {
            esp_idf_sys::esp_deep_sleep_enable_gpio_wakeup(
                1u64 << PIN_BUTTON,
                esp_idf_sys::esp_deepsleep_gpio_wake_up_mode_t_ESP_GPIO_WAKEUP_GPIO_LOW,
            );
            esp_idf_sys::esp_deep_sleep_start();
        }
    }
}

// ---------------------------------------------------------------------------
// Host simulator
// ---------------------------------------------------------------------------
#[cfg(not(target_os = "espidf"))]
mod app {
    use std::thread;
    use std::time::{Duration, Instant};

    use motioncue::config::*;
    use motioncue::drivers::display::FrameBuffer;
    use motioncue::drivers::scripted::ScriptedAccelerometer;
    use motioncue::tasks::sensor::ThreadedSensor;
    use motioncue::tasks::ui::CueShell;
    use motioncue::{CueConfig, CueSession, UiEvent};

    const REPORT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn run(boot: Instant) -> anyhow::Result<()> {
        println!("MotionCue host simulator");

        let accelerometer = ScriptedAccelerometer::drive();
        let config = CueConfig::default();
        let run_for = config.sampling_interval * accelerometer.len() as u32;

        let session = CueSession::new(ThreadedSensor::new(accelerometer), config);
        let mut shell = CueShell::new(session, FrameBuffer::new());
        shell.handle(UiEvent::ToggleCues);
        println!("Cues {:?}", shell.session().lifecycle());

        let frame_interval = Duration::from_millis(UI_FRAME_INTERVAL_MS);
        let start = Instant::now();
        let mut last_report = start;
        let mut widest: Option<(f32, String)> = None;

        while start.elapsed() < run_for {
            let tick_start = Instant::now();
            let frame = shell.frame(tick_start)?;
            let state = shell.session().motion_state();

            let spread = frame.dot_left_offset_x.abs().max(frame.dot_top_offset_y.abs());
            if frame.dot_left_visible && widest.as_ref().map_or(true, |(w, _)| spread > *w) {
                widest = Some((spread, shell.screen().to_ascii()));
            }

            if tick_start - last_report >= REPORT_INTERVAL {
                println!(
                    "{:>6} ms  |a| = {:.2}  {:<8}  x = {:+6.1}  y = {:+6.1}",
                    (tick_start - start).as_millis(),
                    state.magnitude,
                    if state.active { "active" } else { "idle" },
                    frame.dot_left_offset_x,
                    frame.dot_top_offset_y,
                );
                last_report = tick_start;
            }

            let elapsed = tick_start.elapsed();
            if elapsed < frame_interval {
                thread::sleep(frame_interval - elapsed);
            }
        }

        shell.handle(UiEvent::ToggleCues);
        shell.frame(Instant::now())?;
        println!("Cues {:?}", shell.session().lifecycle());

        if let Some((spread, snapshot)) = widest {
            println!("\nWidest cue ({:.1} px):\n{}", spread, snapshot);
        }
        println!("Done in {:.1} s", boot.elapsed().as_secs_f32());
        Ok(())
    }
}
