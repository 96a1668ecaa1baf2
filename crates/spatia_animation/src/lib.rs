//! Spatia Animation System
//!
//! Time-based transitions sampled on demand.
//!
//! # Features
//!
//! - **Pull-based**: no per-frame ticking, consumers read the value at `now`
//! - **Generic**: any value type with an interpolation function
//! - **Interruptible**: retargeting starts from the value currently shown

pub mod animated;
pub mod interpolate;

pub use animated::{AnimatedFloat, AnimatedValue};
pub use interpolate::{lerp_f32, lerp_f64, Interpolator, Lerp};
