// MotionCue — Gravity Separation
//
// Raw accelerometers report gravity plus motion.  The cue pipeline wants
// motion only, so raw readings pass through a first-order low-pass gravity
// estimate which is then subtracted.  The first reading seeds the estimate so
// the output starts at rest instead of with a 1 g spike.

use crate::events::AccelerationSample;

#[derive(Debug, Clone, Copy)]
pub struct GravityFilter {
    alpha: f32,
    gravity: Option<[f32; 3]>,
}

impl GravityFilter {
    /// `alpha` in (0, 1]: how much each reading moves the gravity estimate.
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(f32::EPSILON, 1.0),
            gravity: None,
        }
    }

    pub fn gravity(&self) -> Option<[f32; 3]> {
        self.gravity
    }

    /// Feed one raw reading (g), get the gravity-free acceleration back.
    pub fn update(&mut self, raw: [f32; 3]) -> AccelerationSample {
        let g = match self.gravity {
            None => raw,
            Some(prev) => {
                let a = self.alpha;
                [
                    a * raw[0] + (1.0 - a) * prev[0],
                    a * raw[1] + (1.0 - a) * prev[1],
                    a * raw[2] + (1.0 - a) * prev[2],
                ]
            }
        };
        self.gravity = Some(g);
        AccelerationSample::new(raw[0] - g[0], raw[1] - g[1], raw[2] - g[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRAVITY_FILTER_ALPHA;
    use crate::motion::magnitude;

    #[test]
    fn first_reading_is_at_rest() {
        let mut filter = GravityFilter::new(GRAVITY_FILTER_ALPHA);
        let out = filter.update([0.0, 0.0, 1.0]);
        assert_eq!(out, AccelerationSample::default());
        assert_eq!(filter.gravity(), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn steady_gravity_is_removed() {
        let mut filter = GravityFilter::new(GRAVITY_FILTER_ALPHA);
        let mut out = AccelerationSample::default();
        for _ in 0..50 {
            out = filter.update([0.0, 0.0, 1.0]);
        }
        assert!(magnitude(&out) < 1e-4);
    }

    #[test]
    fn sudden_push_passes_through() {
        let mut filter = GravityFilter::new(GRAVITY_FILTER_ALPHA);
        for _ in 0..50 {
            filter.update([0.0, 0.0, 1.0]);
        }
        let out = filter.update([0.8, 0.0, 1.0]);
        assert!(out.x > 0.6, "x = {}", out.x);
        assert!(out.z.abs() < 1e-4);
    }

    #[test]
    fn tilt_is_absorbed_over_time() {
        let mut filter = GravityFilter::new(GRAVITY_FILTER_ALPHA);
        filter.update([0.0, 0.0, 1.0]);
        let mut out = AccelerationSample::default();
        for _ in 0..200 {
            out = filter.update([0.0, 0.5, 0.866]);
        }
        assert!(magnitude(&out) < 0.01);
    }
}
