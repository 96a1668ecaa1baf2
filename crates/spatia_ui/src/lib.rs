//! Spatia spatial UI
//!
//! Head-locked panels of buttons driven by a handheld controller:
//!
//! - [`PanelButton`]: highlight, animated depth, click action
//! - [`Canvas`]: a panel owning buttons, selection, depth and fade
//! - [`UiNavigator`]: main / home / bumper panel switching
//! - [`Haptics`]: host-provided controller vibration
//! - [`UiConfig`]: layout and timing constants loaded from TOML
//!
//! Nothing here reads a clock. Every call that can start or sample an
//! animation takes `now` in seconds from the host's monotonic clock.

pub mod button;
pub mod canvas;
pub mod config;
pub mod error;
pub mod haptics;
pub mod navigator;

pub use button::{ClickAction, PanelButton};
pub use canvas::{ButtonId, Canvas, CanvasBuilder, CanvasFrame, HeadTracking, Reaction};
pub use config::UiConfig;
pub use error::ConfigError;
pub use haptics::{FeedbackIntensity, FeedbackPattern, Haptics, NoHaptics, RecordingHaptics};
pub use navigator::{PanelState, UiNavigator};
