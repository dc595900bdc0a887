// MotionCue — Button Input
//
// Debounced single-button handler: a short click toggles the cues, a hold of
// at least `LONG_PRESS_MS` requests shutdown.  Both fire on release.  The
// state machine takes the pin level and a timestamp so it can be driven by
// real GPIO on the firmware or by hand in tests.

use std::time::{Duration, Instant};

use crate::config::*;
use crate::events::UiEvent;

pub struct ButtonDebouncer {
    debounce: Duration,
    long_press: Duration,

    // Debounce state
    last_raw: bool,
    last_change: Instant,

    // Press tracking
    press_start: Option<Instant>,
    button_down: bool,
}

impl ButtonDebouncer {
    pub fn new(now: Instant) -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            long_press: Duration::from_millis(LONG_PRESS_MS),
            last_raw: false,
            last_change: now,
            press_start: None,
            button_down: false,
        }
    }

    /// Feed the current level (`true` = pressed).  Call every frame.
    pub fn update(&mut self, pressed: bool, now: Instant) -> Option<UiEvent> {
        // ---- debounce filter ----
        if pressed != self.last_raw {
            self.last_change = now;
        }
        self.last_raw = pressed;

        if now.duration_since(self.last_change) < self.debounce {
            // Signal still bouncing — wait.
            return None;
        }

        // ---- pressed edge ----
        if pressed && !self.button_down {
            self.button_down = true;
            self.press_start = Some(now);
            return None;
        }

        // ---- released edge ----
        if !pressed && self.button_down {
            self.button_down = false;
            let held = self
                .press_start
                .take()
                .map(|t| now.duration_since(t))
                .unwrap_or_default();

            return Some(if held >= self.long_press {
                UiEvent::Shutdown
            } else {
                UiEvent::ToggleCues
            });
        }

        None
    }
}

// ---------------------------------------------------------------------------
// GPIO binding (firmware only)
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
pub use gpio::ButtonInput;

#[cfg(target_os = "espidf")]
mod gpio {
    use std::time::Instant;

    use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

    use super::ButtonDebouncer;
    use crate::events::UiEvent;

    pub struct ButtonInput<'d> {
        pin: PinDriver<'d, AnyInputPin, Input>,
        debouncer: ButtonDebouncer,
    }

    impl<'d> ButtonInput<'d> {
        pub fn new(pin: PinDriver<'d, AnyInputPin, Input>) -> Self {
            Self {
                pin,
                debouncer: ButtonDebouncer::new(Instant::now()),
            }
        }

        pub fn poll(&mut self) -> Option<UiEvent> {
            let pressed = self.pin.is_low(); // active LOW with pull-up
            self.debouncer.update(pressed, Instant::now())
        }
    }
}
