//! Easing curves: progress in `[0, 1]` to weight.
//!
//! [`Easing`] names every curve so hosts can persist the choice as a plain
//! enum value. Each variant exposes its normalized curve, its derivative and
//! ranged variants via [`Easing::apply`], [`Easing::derivative_at`] and
//! [`Easing::rescale`]. The per-family modules in [`functions`] can also be
//! called directly.
//!
//! All curves satisfy `f(0) == 0` and `f(1) == 1` exactly; [`validate`] checks
//! this for any function, including custom ones.

pub mod functions;
mod validation;

pub use validation::{validate, validate_all, validate_function, EasingViolation};

use functions::{
    back, bounce, circular, cubic, elastic, exponential, linear, quadratic, quartic, quintic, sine,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized easing function: progress in `[0, 1]` to weight.
pub type EaseFn = fn(f32) -> f32;

/// Linear interpolation from `start` to `end`.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Applies a normalized `function` to `value` in the range `[start, end]`.
///
/// `value` is normalized into `[0, 1]`, eased, and scaled back, so the result
/// is `start` at `start` and `end` at `end`. An empty range returns `start`.
pub fn rescale(start: f32, end: f32, value: f32, function: EaseFn) -> f32 {
    let range = end - start;
    if range == 0.0 {
        return start;
    }
    function((value - start) / range) * range + start
}

/// Derivative of [`rescale`] with respect to `value`.
///
/// The range scale cancels out, leaving the normalized derivative.
pub fn rescale_derivative(start: f32, end: f32, value: f32, derivative: EaseFn) -> f32 {
    let range = end - start;
    if range == 0.0 {
        return 0.0;
    }
    derivative((value - start) / range)
}

/// Every named easing curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
}

impl Easing {
    /// All variants in declaration order.
    pub const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::QuadraticIn,
        Easing::QuadraticOut,
        Easing::QuadraticInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuarticIn,
        Easing::QuarticOut,
        Easing::QuarticInOut,
        Easing::QuinticIn,
        Easing::QuinticOut,
        Easing::QuinticInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ExponentialIn,
        Easing::ExponentialOut,
        Easing::ExponentialInOut,
        Easing::CircularIn,
        Easing::CircularOut,
        Easing::CircularInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
    ];

    /// The normalized curve as a function pointer.
    pub const fn function(self) -> EaseFn {
        match self {
            Self::Linear => linear::ease,
            Self::QuadraticIn => quadratic::ease_in,
            Self::QuadraticOut => quadratic::ease_out,
            Self::QuadraticInOut => quadratic::ease_in_out,
            Self::CubicIn => cubic::ease_in,
            Self::CubicOut => cubic::ease_out,
            Self::CubicInOut => cubic::ease_in_out,
            Self::QuarticIn => quartic::ease_in,
            Self::QuarticOut => quartic::ease_out,
            Self::QuarticInOut => quartic::ease_in_out,
            Self::QuinticIn => quintic::ease_in,
            Self::QuinticOut => quintic::ease_out,
            Self::QuinticInOut => quintic::ease_in_out,
            Self::SineIn => sine::ease_in,
            Self::SineOut => sine::ease_out,
            Self::SineInOut => sine::ease_in_out,
            Self::ExponentialIn => exponential::ease_in,
            Self::ExponentialOut => exponential::ease_out,
            Self::ExponentialInOut => exponential::ease_in_out,
            Self::CircularIn => circular::ease_in,
            Self::CircularOut => circular::ease_out,
            Self::CircularInOut => circular::ease_in_out,
            Self::BackIn => back::ease_in,
            Self::BackOut => back::ease_out,
            Self::BackInOut => back::ease_in_out,
            Self::BounceIn => bounce::ease_in,
            Self::BounceOut => bounce::ease_out,
            Self::BounceInOut => bounce::ease_in_out,
            Self::ElasticIn => elastic::ease_in,
            Self::ElasticOut => elastic::ease_out,
            Self::ElasticInOut => elastic::ease_in_out,
        }
    }

    /// The analytic derivative of [`function`](Self::function).
    pub const fn derivative(self) -> EaseFn {
        match self {
            Self::Linear => linear::derivative,
            Self::QuadraticIn => quadratic::in_derivative,
            Self::QuadraticOut => quadratic::out_derivative,
            Self::QuadraticInOut => quadratic::in_out_derivative,
            Self::CubicIn => cubic::in_derivative,
            Self::CubicOut => cubic::out_derivative,
            Self::CubicInOut => cubic::in_out_derivative,
            Self::QuarticIn => quartic::in_derivative,
            Self::QuarticOut => quartic::out_derivative,
            Self::QuarticInOut => quartic::in_out_derivative,
            Self::QuinticIn => quintic::in_derivative,
            Self::QuinticOut => quintic::out_derivative,
            Self::QuinticInOut => quintic::in_out_derivative,
            Self::SineIn => sine::in_derivative,
            Self::SineOut => sine::out_derivative,
            Self::SineInOut => sine::in_out_derivative,
            Self::ExponentialIn => exponential::in_derivative,
            Self::ExponentialOut => exponential::out_derivative,
            Self::ExponentialInOut => exponential::in_out_derivative,
            Self::CircularIn => circular::in_derivative,
            Self::CircularOut => circular::out_derivative,
            Self::CircularInOut => circular::in_out_derivative,
            Self::BackIn => back::in_derivative,
            Self::BackOut => back::out_derivative,
            Self::BackInOut => back::in_out_derivative,
            Self::BounceIn => bounce::in_derivative,
            Self::BounceOut => bounce::out_derivative,
            Self::BounceInOut => bounce::in_out_derivative,
            Self::ElasticIn => elastic::in_derivative,
            Self::ElasticOut => elastic::out_derivative,
            Self::ElasticInOut => elastic::in_out_derivative,
        }
    }

    #[inline]
    pub fn apply(self, progress: f32) -> f32 {
        (self.function())(progress)
    }

    #[inline]
    pub fn derivative_at(self, progress: f32) -> f32 {
        (self.derivative())(progress)
    }

    /// Eases `value` within `[start, end]`. See [`rescale`].
    pub fn rescale(self, start: f32, end: f32, value: f32) -> f32 {
        rescale(start, end, value, self.function())
    }

    /// Derivative of [`Easing::rescale`] with respect to `value`.
    pub fn rescale_derivative(self, start: f32, end: f32, value: f32) -> f32 {
        rescale_derivative(start, end, value, self.derivative())
    }

    /// Interpolates from `start` to `end` using the eased `progress`.
    pub fn interpolate(self, start: f32, end: f32, progress: f32) -> f32 {
        lerp(start, end, self.apply(progress))
    }

    /// Variant name for display and logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::QuadraticIn => "QuadraticIn",
            Self::QuadraticOut => "QuadraticOut",
            Self::QuadraticInOut => "QuadraticInOut",
            Self::CubicIn => "CubicIn",
            Self::CubicOut => "CubicOut",
            Self::CubicInOut => "CubicInOut",
            Self::QuarticIn => "QuarticIn",
            Self::QuarticOut => "QuarticOut",
            Self::QuarticInOut => "QuarticInOut",
            Self::QuinticIn => "QuinticIn",
            Self::QuinticOut => "QuinticOut",
            Self::QuinticInOut => "QuinticInOut",
            Self::SineIn => "SineIn",
            Self::SineOut => "SineOut",
            Self::SineInOut => "SineInOut",
            Self::ExponentialIn => "ExponentialIn",
            Self::ExponentialOut => "ExponentialOut",
            Self::ExponentialInOut => "ExponentialInOut",
            Self::CircularIn => "CircularIn",
            Self::CircularOut => "CircularOut",
            Self::CircularInOut => "CircularInOut",
            Self::BackIn => "BackIn",
            Self::BackOut => "BackOut",
            Self::BackInOut => "BackInOut",
            Self::BounceIn => "BounceIn",
            Self::BounceOut => "BounceOut",
            Self::BounceInOut => "BounceInOut",
            Self::ElasticIn => "ElasticIn",
            Self::ElasticOut => "ElasticOut",
            Self::ElasticInOut => "ElasticInOut",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
