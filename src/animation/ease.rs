use std::f64::consts::FRAC_PI_2;

/// Easing curves applied to normalized tween progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out. Piston reveal and conceal.
    OutSine,
    /// Exponential ease-in (slow start, sharp finish). Wipe slide-out.
    InExpo,
    /// Exponential ease-out (sharp start, long settle). Wipe slide-in.
    OutExpo,
}

impl Ease {
    /// Map progress `t` (clamped to `[0, 1]`) through the curve. Both endpoints are exact.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::OutSine => (t * FRAC_PI_2).sin(),
            Self::InExpo => 2f64.powf(10.0 * (t - 1.0)),
            Self::OutExpo => 1.0 - 2f64.powf(-10.0 * t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
