//! Normalized easing curves and their derivatives.
//!
//! Every curve maps progress in `[0, 1]` to a weight with `f(0) == 0` and
//! `f(1) == 1` exactly. Back and elastic curves overshoot in between.
//!
//! Each family defines its `ease_in` curve; `ease_out` mirrors it
//! (`1 - in(1 - x)`) and `ease_in_out` runs `in` over the first half and `out`
//! over the second. Bounce is the exception: its `out` curve is the natural
//! one and `in` mirrors it.

use std::f32::consts::{FRAC_PI_2, LN_2, PI};

#[inline]
fn mirror(f: fn(f32) -> f32, x: f32) -> f32 {
    1.0 - f(1.0 - x)
}

#[inline]
fn mirror_derivative(d: fn(f32) -> f32, x: f32) -> f32 {
    d(1.0 - x)
}

#[inline]
fn split(ease_in: fn(f32) -> f32, ease_out: fn(f32) -> f32, x: f32) -> f32 {
    if x <= 0.5 {
        ease_in(2.0 * x) * 0.5
    } else {
        ease_out(2.0 * x - 1.0) * 0.5 + 0.5
    }
}

#[inline]
fn split_derivative(in_derivative: fn(f32) -> f32, out_derivative: fn(f32) -> f32, x: f32) -> f32 {
    if x <= 0.5 {
        in_derivative(2.0 * x)
    } else {
        out_derivative(2.0 * x - 1.0)
    }
}

/// Generates the `ease_out`/`ease_in_out` pair (and derivatives) of a family
/// from its `ease_in` curve.
macro_rules! mirrored_family {
    () => {
        #[inline]
        pub fn ease_out(x: f32) -> f32 {
            super::mirror(ease_in, x)
        }

        #[inline]
        pub fn ease_in_out(x: f32) -> f32 {
            super::split(ease_in, ease_out, x)
        }

        #[inline]
        pub fn out_derivative(x: f32) -> f32 {
            super::mirror_derivative(in_derivative, x)
        }

        #[inline]
        pub fn in_out_derivative(x: f32) -> f32 {
            super::split_derivative(in_derivative, out_derivative, x)
        }
    };
}

/// `x`.
pub mod linear {
    #[inline]
    pub fn ease(x: f32) -> f32 {
        x
    }

    #[inline]
    pub fn derivative(_x: f32) -> f32 {
        1.0
    }
}

/// `x²`.
pub mod quadratic {
    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        x * x
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        2.0 * x
    }

    mirrored_family!();
}

/// `x³`.
pub mod cubic {
    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        x * x * x
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        3.0 * x * x
    }

    mirrored_family!();
}

/// `x⁴`.
pub mod quartic {
    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        x * x * x * x
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        4.0 * x * x * x
    }

    mirrored_family!();
}

/// `x⁵`.
pub mod quintic {
    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        x * x * x * x * x
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        5.0 * x * x * x * x
    }

    mirrored_family!();
}

/// Quarter sine wave.
pub mod sine {
    use super::FRAC_PI_2;

    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        1.0 - (x * FRAC_PI_2).cos()
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        FRAC_PI_2 * (x * FRAC_PI_2).sin()
    }

    mirrored_family!();
}

/// `2^(10x - 10)`, pinned to 0 at the start.
pub mod exponential {
    use super::LN_2;

    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        if x == 0.0 {
            0.0
        } else {
            2f32.powf(10.0 * x - 10.0)
        }
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        10.0 * LN_2 * 2f32.powf(10.0 * x - 10.0)
    }

    mirrored_family!();
}

/// Quarter circle. The derivative is unbounded at the steep end.
pub mod circular {
    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        1.0 - (1.0 - x * x).sqrt()
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        x / (1.0 - x * x).sqrt()
    }

    mirrored_family!();
}

/// Pulls back below 0 before accelerating.
pub mod back {
    /// Overshoot amount giving a 10% dip.
    pub const OVERSHOOT: f32 = 1.70158;

    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        // (c + 1)x³ - cx², factored so f(1) is exactly 1.
        x * x * (x + OVERSHOOT * (x - 1.0))
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        3.0 * (OVERSHOOT + 1.0) * x * x - 2.0 * OVERSHOOT * x
    }

    mirrored_family!();
}

/// Decaying bounces against the end value.
pub mod bounce {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    #[inline]
    pub fn ease_out(x: f32) -> f32 {
        if x >= 1.0 {
            1.0
        } else if x < 1.0 / D {
            N * x * x
        } else if x < 2.0 / D {
            let x = x - 1.5 / D;
            N * x * x + 0.75
        } else if x < 2.5 / D {
            let x = x - 2.25 / D;
            N * x * x + 0.9375
        } else {
            let x = x - 2.625 / D;
            N * x * x + 0.984375
        }
    }

    #[inline]
    pub fn out_derivative(x: f32) -> f32 {
        if x < 1.0 / D {
            2.0 * N * x
        } else if x < 2.0 / D {
            2.0 * N * (x - 1.5 / D)
        } else if x < 2.5 / D {
            2.0 * N * (x - 2.25 / D)
        } else {
            2.0 * N * (x - 2.625 / D)
        }
    }

    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        super::mirror(ease_out, x)
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        super::mirror_derivative(out_derivative, x)
    }

    #[inline]
    pub fn ease_in_out(x: f32) -> f32 {
        super::split(ease_in, ease_out, x)
    }

    #[inline]
    pub fn in_out_derivative(x: f32) -> f32 {
        super::split_derivative(in_derivative, out_derivative, x)
    }
}

/// Exponentially growing oscillation.
pub mod elastic {
    use super::{LN_2, PI};

    const FREQUENCY: f32 = 2.0 * PI / 3.0;

    #[inline]
    pub fn ease_in(x: f32) -> f32 {
        if x == 0.0 {
            0.0
        } else if x == 1.0 {
            1.0
        } else {
            -2f32.powf(10.0 * x - 10.0) * ((10.0 * x - 10.75) * FREQUENCY).sin()
        }
    }

    #[inline]
    pub fn in_derivative(x: f32) -> f32 {
        let amplitude = 2f32.powf(10.0 * x - 10.0);
        let phase = (10.0 * x - 10.75) * FREQUENCY;
        -amplitude * (10.0 * LN_2 * phase.sin() + 10.0 * FREQUENCY * phase.cos())
    }

    mirrored_family!();
}
