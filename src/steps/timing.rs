#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    #[default]
    Linear,
    /// Quadratic ease-in-out (GSAP `power2.inOut`).
    Power2InOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Interpolates `from` to `to` over `duration` seconds of explicitly fed time.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: f64,
    elapsed: f64,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn value(&self) -> f64 {
        self.from + (self.to - self.from) * self.ease.apply(self.progress())
    }

    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.value()
    }

    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delay {
    remaining: f64,
}

impl Delay {
    pub fn new(seconds: f64) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    /// Returns true once the delay has fully elapsed.
    pub fn advance(&mut self, dt: f64) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
        self.remaining <= 0.0
    }
}
