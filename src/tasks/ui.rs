// MotionCue — UI Task
//
// Owns the cue session and the screen.  Each frame it applies the newest
// sensor sample, advances the springs by the wall-clock time since the last
// frame, redraws, and pushes the result to the screen.  Button events arrive
// through `handle`.

use std::time::{Duration, Instant};

use crate::drivers::display::Screen;
use crate::events::UiEvent;
use crate::render::draw_cues;
use crate::sensor::SensorSource;
use crate::session::{CueSession, DotFrame, SensorLifecycle};

pub struct CueShell<S: SensorSource, D: Screen> {
    session: CueSession<S>,
    screen: D,
    last_frame: Option<Instant>,
    running: bool,
}

impl<S: SensorSource, D: Screen> CueShell<S, D> {
    pub fn new(session: CueSession<S>, screen: D) -> Self {
        log::info!("UI task started");
        Self {
            session,
            screen,
            last_frame: None,
            running: true,
        }
    }

    pub fn session(&self) -> &CueSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CueSession<S> {
        &mut self.session
    }

    pub fn screen(&self) -> &D {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut D {
        &mut self.screen
    }

    /// `false` once a shutdown has been requested.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::ToggleCues => {
                let state = self.session.toggle();
                log::info!(
                    "Toggle pressed — cues {}",
                    if state == SensorLifecycle::Enabled { "on" } else { "off" }
                );
            }
            UiEvent::Shutdown => {
                log::info!("Shutdown requested — releasing sensor");
                self.session.disable();
                self.running = false;
            }
        }
    }

    /// Render one frame stamped `now`.
    pub fn frame(&mut self, now: Instant) -> anyhow::Result<DotFrame> {
        let dt = self
            .last_frame
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);

        self.session.pump();
        let frame = self.session.advance(dt);

        draw_cues(self.screen.canvas(), &frame, self.session.is_enabled())?;
        self.screen.present()?;
        Ok(frame)
    }
}
