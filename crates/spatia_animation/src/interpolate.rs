//! Interpolation between two values

/// Interpolation function: `(from, to, fraction) -> value`
pub type Interpolator<T> = fn(&T, &T, f32) -> T;

/// Types with a built-in linear interpolation
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b`. `t` is clamped to `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f32) -> Self;
}

pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

pub fn lerp_f64(a: f64, b: f64, t: f32) -> f64 {
    a + (b - a) * f64::from(t.clamp(0.0, 1.0))
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        lerp_f32(*a, *b, t)
    }
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        lerp_f64(*a, *b, t)
    }
}

impl<const N: usize> Lerp for [f32; N] {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        std::array::from_fn(|i| lerp_f32(a[i], b[i], t))
    }
}
