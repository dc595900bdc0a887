// MotionCue — Spring Animation
//
// One-dimensional mass/spring/damper driven toward a movable target.  Each
// cue axis owns one `Spring`; they never share state.
//
//   m·x'' + c·x' + k·(x − target) = 0
//
// Integration is semi-implicit Euler.  Frame deltas longer than
// `max_substep` are split so a stalled frame cannot blow the system up.

use std::time::Duration;

use crate::config::SpringConfig;

#[derive(Debug, Clone, Copy)]
pub struct Spring {
    position: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
}

impl Spring {
    pub fn new(config: SpringConfig) -> Self {
        Self::starting_at(0.0, config)
    }

    /// A spring resting at `position`.  Unusable config values (zero mass,
    /// zero sub-step) fall back to the defaults.
    pub fn starting_at(position: f32, config: SpringConfig) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            config: config.sanitized(),
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Re-aim the spring.  Position and velocity carry over untouched, so the
    /// motion bends toward the new target instead of jumping.  A NaN or
    /// infinite target is ignored.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity == 0.0 && self.position == self.target
    }

    /// Advance by `dt`.  Returns `true` while the spring is still moving.
    pub fn step(&mut self, dt: Duration) -> bool {
        if self.is_at_rest() {
            return false;
        }

        let total = dt.as_secs_f32();
        if total <= 0.0 {
            return true;
        }

        let max = self.config.max_substep.as_secs_f32();
        let steps = (total / max).ceil().max(1.0) as u32;
        let h = total / steps as f32;

        let SpringConfig { stiffness, damping, mass, .. } = self.config;
        for _ in 0..steps {
            let displacement = self.position - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
        }

        // Overflowed somewhere (huge target distance): settle on the target.
        if !(self.position.is_finite() && self.velocity.is_finite()) {
            log::warn!("Spring diverged toward {} — snapping to target", self.target);
            self.position = self.target;
            self.velocity = 0.0;
            return false;
        }

        if (self.position - self.target).abs() < self.config.rest_displacement
            && self.velocity.abs() < self.config.rest_speed
        {
            self.position = self.target;
            self.velocity = 0.0;
            return false;
        }
        true
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.step(FRAME);
        }
    }

    #[test]
    fn resting_spring_stays_put() {
        let mut spring = Spring::default();
        assert!(!spring.step(FRAME));
        assert_eq!(spring.position(), 0.0);
    }

    #[test]
    fn converges_to_constant_target_and_stays() {
        let mut spring = Spring::default();
        spring.set_target(-7.5);

        // 5 s of simulated frames
        run(&mut spring, 313);
        assert!((spring.position() - -7.5).abs() < 0.01);

        for _ in 0..200 {
            spring.step(FRAME);
            assert!((spring.position() - -7.5).abs() < 0.01);
        }
        assert!(spring.is_at_rest());
    }

    #[test]
    fn motion_is_continuous_when_retargeted() {
        let mut spring = Spring::default();
        spring.set_target(25.0);
        run(&mut spring, 10);

        let position = spring.position();
        let velocity = spring.velocity();
        assert!(position > 0.0 && velocity > 0.0);

        spring.set_target(-25.0);
        assert_eq!(spring.position(), position);
        assert_eq!(spring.velocity(), velocity);

        // A single frame moves only a bounded distance.
        spring.step(FRAME);
        assert!((spring.position() - position).abs() < 3.0);
    }

    #[test]
    fn no_sustained_oscillation() {
        let mut spring = Spring::default();
        spring.set_target(25.0);

        let mut peak_after_two_seconds = 0.0f32;
        for frame in 0..400 {
            spring.step(FRAME);
            if frame > 125 {
                peak_after_two_seconds =
                    peak_after_two_seconds.max((spring.position() - 25.0).abs());
            }
        }
        assert!(peak_after_two_seconds < 0.5);
    }

    #[test]
    fn long_frame_is_subdivided() {
        let mut spring = Spring::default();
        spring.set_target(10.0);
        // One enormous delta must not diverge.
        spring.step(Duration::from_secs(10));
        assert!((spring.position() - 10.0).abs() < 0.01);
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut spring = Spring::default();
        spring.set_target(4.0);
        spring.set_target(f32::NAN);
        spring.set_target(f32::NEG_INFINITY);
        assert_eq!(spring.target(), 4.0);
    }

    #[test]
    fn huge_target_stays_finite() {
        let mut spring = Spring::default();
        spring.set_target(3e38);
        for _ in 0..10 {
            spring.step(FRAME);
            assert!(spring.position().is_finite());
            assert!(spring.velocity().is_finite());
        }

        spring.set_target(0.0);
        run(&mut spring, 400);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 0.0);
    }

    #[test]
    fn unusable_config_falls_back_to_defaults() {
        let config = SpringConfig {
            mass: 0.0,
            max_substep: Duration::ZERO,
            ..SpringConfig::default()
        };
        let mut spring = Spring::new(config);
        spring.set_target(10.0);
        run(&mut spring, 400);
        assert!(spring.position().is_finite());
        assert_eq!(spring.position(), 10.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn sanitized_keeps_usable_values() {
        let config = SpringConfig {
            mass: 2.0,
            max_substep: Duration::from_millis(1),
            ..SpringConfig::default()
        };
        assert_eq!(config.sanitized(), config);

        let broken = SpringConfig { mass: -1.0, ..config }.sanitized();
        assert_eq!(broken.mass, SpringConfig::default().mass);
    }

    #[test]
    fn zero_delta_leaves_state_alone() {
        let mut spring = Spring::default();
        spring.set_target(3.0);
        assert!(spring.step(Duration::ZERO));
        assert_eq!(spring.position(), 0.0);
    }
}
