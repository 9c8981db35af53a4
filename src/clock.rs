//! Per-tick time source.

/// Supplies the time elapsed since the previous tick.
///
/// Hosts implement this for whatever drives their update loop; a bare `f32`
/// is a clock that always reports itself.
pub trait FrameClock {
    fn delta_time(&self) -> f32;
}

impl FrameClock for f32 {
    fn delta_time(&self) -> f32 {
        *self
    }
}

/// Clock with a fixed step and an optional time scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock {
    pub step: f32,
    pub scale: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step, scale: 1.0 }
    }
}

impl FrameClock for FixedClock {
    fn delta_time(&self) -> f32 {
        self.step * self.scale
    }
}
