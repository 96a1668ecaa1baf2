//! Panel buttons
//!
//! A selected button moves one depth plane toward the viewer and shows its
//! highlight. The depth move is animated; the host reads the new offset from
//! [`PanelButton::update`] each frame.

use std::fmt;

use spatia_animation::AnimatedFloat;

use crate::config::UiConfig;

/// Action run when a selected button is activated
pub type ClickAction = Box<dyn FnMut()>;

pub struct PanelButton {
    label: String,
    selected: bool,
    /// `None` when the button has no highlight visual
    highlight: Option<bool>,
    depth_plane: AnimatedFloat,
    on_click: Option<ClickAction>,
    animation_time: f64,
    depth_plane_step: f32,
}

impl PanelButton {
    pub fn new(label: impl Into<String>, config: &UiConfig, now: f64) -> Self {
        Self {
            label: label.into(),
            selected: false,
            highlight: None,
            depth_plane: AnimatedFloat::new(0.0, now),
            on_click: None,
            animation_time: config.animation_time,
            depth_plane_step: config.depth_plane_step,
        }
    }

    /// Attach a highlight visual, hidden until the button is selected
    pub fn with_highlight(mut self) -> Self {
        self.highlight = Some(self.selected);
        self
    }

    /// Bind the click action
    pub fn on_click<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.on_click = Some(Box::new(action));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn has_highlight(&self) -> bool {
        self.highlight.is_some()
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.unwrap_or(false)
    }

    pub fn is_animating(&self) -> bool {
        self.depth_plane.is_animating()
    }

    /// Move to the selected or resting plane and toggle the highlight.
    pub fn set_selected(&mut self, selected: bool, now: f64) {
        self.selected = selected;

        let plane = if selected { 1.0 } else { 0.0 };
        self.depth_plane.animate_to(plane, self.animation_time, now);

        if let Some(highlight) = self.highlight.as_mut() {
            *highlight = selected;
        }
    }

    /// Local depth offset at `now`. Negative values are toward the viewer.
    pub fn depth_offset(&mut self, now: f64) -> f32 {
        -self.depth_plane.value(now) * self.depth_plane_step
    }

    /// Per-frame poll. Returns the new depth offset while the depth plane is
    /// moving, including the frame on which it lands.
    pub fn update(&mut self, now: f64) -> Option<f32> {
        if self.depth_plane.is_animating() {
            Some(self.depth_offset(now))
        } else {
            None
        }
    }

    /// Run the click action. Returns `false` if none is bound.
    pub fn click(&mut self) -> bool {
        match self.on_click.as_mut() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for PanelButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelButton")
            .field("label", &self.label)
            .field("selected", &self.selected)
            .field("highlight", &self.highlight)
            .field("depth_plane", &self.depth_plane)
            .field("has_action", &self.on_click.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn config() -> UiConfig {
        UiConfig {
            animation_time: 1.0,
            depth_plane_step: 0.5,
            ..UiConfig::default()
        }
    }

    #[test]
    fn test_selection_moves_toward_viewer() {
        let mut button = PanelButton::new("scan", &config(), 0.0).with_highlight();
        assert!(!button.is_highlighted());
        assert_eq!(button.update(0.0), None);

        button.set_selected(true, 0.0);
        assert!(button.is_selected());
        assert!(button.is_highlighted());

        assert_eq!(button.update(0.5), Some(-0.25));
        // Landing frame still reports the final offset.
        assert_eq!(button.update(1.0), Some(-0.5));
        assert_eq!(button.update(1.1), None);
        assert_eq!(button.depth_offset(2.0), -0.5);
    }

    #[test]
    fn test_deselect_mid_flight_reverses() {
        let mut button = PanelButton::new("scan", &config(), 0.0);
        button.set_selected(true, 0.0);
        button.set_selected(false, 0.5);

        assert!(!button.is_highlighted());
        assert_eq!(button.update(0.5), Some(-0.25));
        assert_eq!(button.update(1.5), Some(0.0));
        assert!(!button.is_animating());
    }

    #[test]
    fn test_no_highlight_visual() {
        let mut button = PanelButton::new("plain", &config(), 0.0);
        button.set_selected(true, 0.0);
        assert!(!button.has_highlight());
        assert!(!button.is_highlighted());
    }

    #[test]
    fn test_click_runs_action() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();

        let mut button =
            PanelButton::new("go", &config(), 0.0).on_click(move || counter.set(counter.get() + 1));
        assert!(button.click());
        assert!(button.click());
        assert_eq!(clicks.get(), 2);

        let mut bare = PanelButton::new("bare", &config(), 0.0);
        assert!(!bare.click());
    }
}
