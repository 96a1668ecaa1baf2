//! Controller input
//!
//! Platform-agnostic controller events. The host translates its SDK callbacks
//! into [`InputEvent`]s and feeds them to the panel that owns the selection.

use serde::{Deserialize, Serialize};

/// Direction reported by a touchpad gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureDirection {
    None,
    Up,
    Down,
    Left,
    Right,
    In,
    Out,
    Clockwise,
    CounterClockwise,
}

/// Direction of travel through an ordered item set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigate {
    Previous,
    Next,
}

impl GestureDirection {
    /// Map a gesture onto selection travel.
    ///
    /// Left, up and counter-clockwise go back; right, down and clockwise go
    /// forward. Every other direction is ignored.
    pub fn navigation(self) -> Option<Navigate> {
        match self {
            GestureDirection::Left | GestureDirection::Up | GestureDirection::CounterClockwise => {
                Some(Navigate::Previous)
            }
            GestureDirection::Right | GestureDirection::Down | GestureDirection::Clockwise => {
                Some(Navigate::Next)
            }
            GestureDirection::None | GestureDirection::In | GestureDirection::Out => None,
        }
    }
}

/// Physical controller buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerButton {
    Move,
    App,
    Bumper,
    HomeTap,
}

/// An input event delivered to a panel.
///
/// `K` is the identity of whatever the controller ray can hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent<K> {
    /// A touchpad gesture began
    GestureStart(GestureDirection),
    /// A touchpad gesture is still in progress
    GestureContinue(GestureDirection),
    /// The trigger was released
    TriggerUp { value: f32 },
    /// A controller button went down
    ButtonDown(ControllerButton),
    /// The controller ray hit an item this frame
    PointerHit(K),
}

impl<K> InputEvent<K> {
    /// Gesture direction carried by this event, if any
    pub fn gesture(&self) -> Option<GestureDirection> {
        match self {
            InputEvent::GestureStart(direction) | InputEvent::GestureContinue(direction) => {
                Some(*direction)
            }
            _ => None,
        }
    }
}
