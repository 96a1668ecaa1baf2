//! Canvases
//!
//! A canvas is a head-locked panel of buttons. It owns:
//! - the buttons, keyed by [`ButtonId`] and kept in insertion order
//! - a [`SelectionController`] over those keys
//! - animated depth plane and opacity, pushed back and dimmed while
//!   interaction is disabled
//!
//! Input arrives as [`InputEvent`]s; visual changes leave through
//! [`Canvas::update`], which the host calls once per frame.
//!
//! # Example
//!
//! ```rust
//! use spatia_core::input::{GestureDirection, InputEvent};
//! use spatia_ui::{Canvas, PanelButton, UiConfig};
//!
//! let config = UiConfig::default();
//! let mut builder = Canvas::builder(config.clone());
//! let scan = builder.button(PanelButton::new("Scan", &config, 0.0));
//! let help = builder.button(PanelButton::new("Help", &config, 0.0));
//! let mut canvas = builder.build(0.0);
//!
//! canvas.handle_input(InputEvent::GestureStart(GestureDirection::Right), 0.0);
//! assert_eq!(canvas.selected(), Some(scan));
//!
//! canvas.handle_input(InputEvent::GestureContinue(GestureDirection::Right), 0.1);
//! assert_eq!(canvas.selected(), Some(help));
//! ```

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::debug;

use spatia_animation::AnimatedFloat;
use spatia_core::input::{InputEvent, Navigate};
use spatia_core::selection::{SelectionController, SelectionHost, SelectionState};

use crate::button::PanelButton;
use crate::config::UiConfig;
use crate::haptics::{FeedbackIntensity, FeedbackPattern, Haptics, NoHaptics};

new_key_type! {
    /// Identity of a button within its canvas
    pub struct ButtonId;
}

/// How a canvas follows the viewer's head
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadTracking {
    /// Stays where it was placed
    #[default]
    None,
    /// Locked to the head every frame
    Fixed,
    /// Eases toward the head pose
    Smooth,
}

/// What a canvas reacted to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    Ignored,
    SelectionChanged(Option<ButtonId>),
    Activated(ButtonId),
}

/// Visual changes produced by one [`Canvas::update`]
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasFrame {
    /// New opacity, while a fade is running
    pub alpha: Option<f32>,
    /// New local depth offsets for buttons whose depth is moving
    pub button_offsets: SmallVec<[(ButtonId, f32); 4]>,
    /// Distance from the viewer the panel should sit at
    pub head_distance: f32,
    /// Fraction of the way to move toward the head pose this frame
    pub head_follow: f32,
}

/// Builder for [`Canvas`]
pub struct CanvasBuilder {
    config: UiConfig,
    plane: i32,
    head_tracking: HeadTracking,
    buttons: SlotMap<ButtonId, PanelButton>,
    order: Vec<ButtonId>,
    haptics: Option<Box<dyn Haptics>>,
}

impl CanvasBuilder {
    pub fn new(config: UiConfig) -> Self {
        Self {
            config,
            plane: 0,
            head_tracking: HeadTracking::None,
            buttons: SlotMap::with_key(),
            order: Vec::new(),
            haptics: None,
        }
    }

    /// Depth plane the canvas rests on while interactive
    pub fn plane(mut self, plane: i32) -> Self {
        self.plane = plane;
        self
    }

    pub fn head_tracking(mut self, mode: HeadTracking) -> Self {
        self.head_tracking = mode;
        self
    }

    pub fn haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Some(Box::new(haptics));
        self
    }

    /// Add a button. Traversal order is insertion order.
    pub fn button(&mut self, button: PanelButton) -> ButtonId {
        let id = self.buttons.insert(button);
        self.order.push(id);
        id
    }

    pub fn build(self, now: f64) -> Canvas {
        Canvas {
            depth_plane: AnimatedFloat::new(self.plane as f32, now),
            alpha: AnimatedFloat::new(1.0, now),
            selection: SelectionController::new(self.order),
            buttons: self.buttons,
            haptics: self.haptics.unwrap_or_else(|| Box::new(NoHaptics)),
            config: self.config,
            plane: self.plane,
            head_tracking: self.head_tracking,
            visible: true,
        }
    }
}

/// A panel of selectable buttons
pub struct Canvas {
    config: UiConfig,
    plane: i32,
    head_tracking: HeadTracking,
    buttons: SlotMap<ButtonId, PanelButton>,
    selection: SelectionController<ButtonId>,
    haptics: Box<dyn Haptics>,
    depth_plane: AnimatedFloat,
    alpha: AnimatedFloat,
    visible: bool,
}

/// Routes selection side effects onto the canvas's buttons and haptics.
struct ButtonHost<'a> {
    buttons: &'a mut SlotMap<ButtonId, PanelButton>,
    haptics: &'a mut Box<dyn Haptics>,
    now: f64,
}

impl SelectionHost<ButtonId> for ButtonHost<'_> {
    fn on_select(&mut self, item: ButtonId) {
        if let Some(button) = self.buttons.get_mut(item) {
            button.set_selected(true, self.now);
        }
    }

    fn on_deselect(&mut self, item: ButtonId) {
        if let Some(button) = self.buttons.get_mut(item) {
            button.set_selected(false, self.now);
        }
    }

    fn on_activate(&mut self, item: ButtonId) {
        if let Some(button) = self.buttons.get_mut(item) {
            if !button.click() {
                debug!(label = button.label(), "activated button has no action");
            }
        }
    }

    fn feedback_pulse(&mut self) {
        self.haptics
            .vibrate(FeedbackPattern::Click, FeedbackIntensity::Medium);
    }
}

impl Canvas {
    pub fn builder(config: UiConfig) -> CanvasBuilder {
        CanvasBuilder::new(config)
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn plane(&self) -> i32 {
        self.plane
    }

    pub fn head_tracking(&self) -> HeadTracking {
        self.head_tracking
    }

    pub fn button(&self, id: ButtonId) -> Option<&PanelButton> {
        self.buttons.get(id)
    }

    /// Buttons in traversal order
    pub fn button_ids(&self) -> &[ButtonId] {
        self.selection.items()
    }

    /// Find a button by label
    pub fn find(&self, label: &str) -> Option<ButtonId> {
        self.button_ids()
            .iter()
            .copied()
            .find(|id| self.buttons.get(*id).is_some_and(|b| b.label() == label))
    }

    pub fn selected(&self) -> Option<ButtonId> {
        self.selection.selected()
    }

    pub fn selection_state(&self) -> SelectionState<ButtonId> {
        self.selection.state()
    }

    pub fn is_interaction_enabled(&self) -> bool {
        self.selection.is_interaction_enabled()
    }

    /// Whether pointer rays can hit this canvas's buttons
    pub fn colliders_enabled(&self) -> bool {
        self.is_interaction_enabled()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Select a button directly, or clear with `None`.
    pub fn select(&mut self, id: Option<ButtonId>, now: f64) -> bool {
        let mut host = ButtonHost {
            buttons: &mut self.buttons,
            haptics: &mut self.haptics,
            now,
        };
        self.selection.select(id, &mut host)
    }

    pub fn advance(&mut self, direction: Navigate, now: f64) {
        let mut host = ButtonHost {
            buttons: &mut self.buttons,
            haptics: &mut self.haptics,
            now,
        };
        self.selection.advance(direction, &mut host);
    }

    /// Activate the selected button. Returns it if one was selected.
    pub fn activate(&mut self, now: f64) -> Option<ButtonId> {
        let mut host = ButtonHost {
            buttons: &mut self.buttons,
            haptics: &mut self.haptics,
            now,
        };
        self.selection.activate(&mut host)
    }

    /// Feed one input event. Hidden canvases ignore input.
    pub fn handle_input(&mut self, event: InputEvent<ButtonId>, now: f64) -> Reaction {
        if !self.visible {
            return Reaction::Ignored;
        }

        match event {
            InputEvent::GestureStart(direction) | InputEvent::GestureContinue(direction) => {
                let before = self.selected();
                let mut host = ButtonHost {
                    buttons: &mut self.buttons,
                    haptics: &mut self.haptics,
                    now,
                };
                self.selection.handle_gesture(direction, &mut host);
                self.selection_reaction(before)
            }
            InputEvent::TriggerUp { .. } => match self.activate(now) {
                Some(id) => Reaction::Activated(id),
                None => Reaction::Ignored,
            },
            InputEvent::PointerHit(id) => {
                if !self.colliders_enabled() {
                    return Reaction::Ignored;
                }
                let before = self.selected();
                self.select(Some(id), now);
                self.selection_reaction(before)
            }
            InputEvent::ButtonDown(_) => Reaction::Ignored,
        }
    }

    fn selection_reaction(&self, before: Option<ButtonId>) -> Reaction {
        let after = self.selected();
        if after == before {
            Reaction::Ignored
        } else {
            Reaction::SelectionChanged(after)
        }
    }

    /// Enable or disable interaction.
    ///
    /// Disabled canvases move back one depth plane, dim, drop their selection
    /// and stop accepting gestures and pointer hits.
    pub fn set_interaction_enabled(&mut self, enabled: bool, now: f64) {
        let duration = self.config.animation_time;
        if enabled {
            self.depth_plane.animate_to(self.plane as f32, duration, now);
            self.alpha.animate_to(1.0, duration, now);
        } else {
            self.depth_plane
                .animate_to((self.plane - 1) as f32, duration, now);
            self.alpha.animate_to(self.config.dimmed_alpha, duration, now);
        }

        let mut host = ButtonHost {
            buttons: &mut self.buttons,
            haptics: &mut self.haptics,
            now,
        };
        self.selection.set_interaction_enabled(enabled, &mut host);
        debug!(enabled, plane = self.plane, "canvas interaction");
    }

    /// Make the canvas visible and responsive to input again
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the canvas. Input is ignored and the selection is cleared.
    pub fn hide(&mut self, now: f64) {
        self.visible = false;
        self.select(None, now);
    }

    /// Current distance from the viewer, from the animated depth plane
    pub fn head_distance(&mut self, now: f64) -> f32 {
        self.config.canvas_depth - self.depth_plane.value(now) * self.config.depth_plane_step
    }

    /// How far to move toward the head pose for a frame of `dt` seconds
    pub fn head_follow(&self, dt: f64) -> f32 {
        match self.head_tracking {
            HeadTracking::None => 0.0,
            HeadTracking::Fixed => 1.0,
            HeadTracking::Smooth => (dt as f32 * self.config.head_tracking_speed).clamp(0.0, 1.0),
        }
    }

    /// Per-frame poll
    pub fn update(&mut self, now: f64, dt: f64) -> CanvasFrame {
        let alpha = if self.alpha.is_animating() {
            Some(self.alpha.value(now))
        } else {
            None
        };

        let mut button_offsets = SmallVec::new();
        for id in self.selection.items() {
            if let Some(button) = self.buttons.get_mut(*id) {
                if let Some(offset) = button.update(now) {
                    button_offsets.push((*id, offset));
                }
            }
        }

        CanvasFrame {
            alpha,
            button_offsets,
            head_distance: self.head_distance(now),
            head_follow: self.head_follow(dt),
        }
    }
}
