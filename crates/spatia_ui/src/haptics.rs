//! Haptic feedback sinks
//!
//! The controller's vibration motor belongs to the host. Canvases only ever
//! ask for a pattern at an intensity through [`Haptics`].

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Vibration patterns a controller can play
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackPattern {
    Click,
    Bump,
    DoubleClick,
    Buzz,
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackIntensity {
    Low,
    Medium,
    High,
}

/// Host-provided haptic output
pub trait Haptics {
    fn vibrate(&mut self, pattern: FeedbackPattern, intensity: FeedbackIntensity);
}

/// Discards all feedback
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&mut self, _pattern: FeedbackPattern, _intensity: FeedbackIntensity) {}
}

/// Records every pulse. Clones share the same log, so a copy can be kept
/// after handing the sink to a canvas.
#[derive(Clone, Debug, Default)]
pub struct RecordingHaptics {
    log: Rc<RefCell<Vec<(FeedbackPattern, FeedbackIntensity)>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulses(&self) -> Vec<(FeedbackPattern, FeedbackIntensity)> {
        self.log.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.log.borrow().len()
    }

    /// Drain the recorded pulses
    pub fn take(&self) -> Vec<(FeedbackPattern, FeedbackIntensity)> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&mut self, pattern: FeedbackPattern, intensity: FeedbackIntensity) {
        self.log.borrow_mut().push((pattern, intensity));
    }
}
