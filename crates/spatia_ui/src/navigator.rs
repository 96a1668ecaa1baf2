//! Main / home / bumper panel navigation
//!
//! The main canvas is always present. The home and bumper canvases are
//! optional overlays, each toggled by its controller button:
//!
//! | state  | home tap | bumper |
//! |--------|----------|--------|
//! | Main   | Home     | Bumper |
//! | Home   | Main     | Bumper |
//! | Bumper | Home     | Main   |
//!
//! Transitions into a missing overlay are guarded out. While an overlay is
//! up the main canvas stays visible but loses interaction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use spatia_core::fsm::{StateMachine, Transition};
use spatia_core::input::{ControllerButton, InputEvent};

use crate::canvas::{ButtonId, Canvas, CanvasFrame, Reaction};

/// Which panel is in front
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Main,
    Home,
    Bumper,
}

pub struct UiNavigator {
    main: Canvas,
    home: Option<Canvas>,
    bumper: Option<Canvas>,
    fsm: StateMachine<PanelState, ControllerButton>,
}

impl UiNavigator {
    /// Start on the main panel with both overlays hidden.
    pub fn new(main: Canvas, home: Option<Canvas>, bumper: Option<Canvas>, now: f64) -> Self {
        let has_home = home.is_some();
        let has_bumper = bumper.is_some();

        let fsm = StateMachine::builder(PanelState::Main)
            .on(PanelState::Home, ControllerButton::HomeTap, PanelState::Main)
            .transition(
                Transition::new(PanelState::Main, ControllerButton::HomeTap, PanelState::Home)
                    .with_guard(move || has_home),
            )
            .transition(
                Transition::new(
                    PanelState::Bumper,
                    ControllerButton::HomeTap,
                    PanelState::Home,
                )
                .with_guard(move || has_home),
            )
            .on(PanelState::Bumper, ControllerButton::Bumper, PanelState::Main)
            .transition(
                Transition::new(PanelState::Main, ControllerButton::Bumper, PanelState::Bumper)
                    .with_guard(move || has_bumper),
            )
            .transition(
                Transition::new(PanelState::Home, ControllerButton::Bumper, PanelState::Bumper)
                    .with_guard(move || has_bumper),
            )
            .build();

        let mut navigator = Self {
            main,
            home,
            bumper,
            fsm,
        };
        if let Some(home) = navigator.home.as_mut() {
            home.hide(now);
        }
        if let Some(bumper) = navigator.bumper.as_mut() {
            bumper.hide(now);
        }
        navigator
    }

    pub fn state(&self) -> PanelState {
        self.fsm.current_state()
    }

    pub fn main(&self) -> &Canvas {
        &self.main
    }

    pub fn home(&self) -> Option<&Canvas> {
        self.home.as_ref()
    }

    pub fn bumper(&self) -> Option<&Canvas> {
        self.bumper.as_ref()
    }

    pub fn canvas(&self, panel: PanelState) -> Option<&Canvas> {
        match panel {
            PanelState::Main => Some(&self.main),
            PanelState::Home => self.home.as_ref(),
            PanelState::Bumper => self.bumper.as_ref(),
        }
    }

    pub fn canvas_mut(&mut self, panel: PanelState) -> Option<&mut Canvas> {
        match panel {
            PanelState::Main => Some(&mut self.main),
            PanelState::Home => self.home.as_mut(),
            PanelState::Bumper => self.bumper.as_mut(),
        }
    }

    /// Handle a controller button. Returns the panel now in front.
    pub fn handle_button(&mut self, button: ControllerButton, now: f64) -> PanelState {
        let before = self.fsm.current_state();
        let after = self.fsm.send(button);
        if after != before {
            debug!(from = ?before, to = ?after, ?button, "panel change");
            self.enter(after, now);
        }
        after
    }

    /// Jump straight to `panel`, as a click action on a panel would.
    pub fn go_to(&mut self, panel: PanelState, now: f64) -> PanelState {
        let current = self.state();
        if current == panel {
            return current;
        }
        let button = match (panel, current) {
            (PanelState::Home, _) => ControllerButton::HomeTap,
            (PanelState::Bumper, _) => ControllerButton::Bumper,
            (PanelState::Main, PanelState::Home) => ControllerButton::HomeTap,
            (PanelState::Main, _) => ControllerButton::Bumper,
        };
        self.handle_button(button, now)
    }

    fn enter(&mut self, panel: PanelState, now: f64) {
        match panel {
            PanelState::Main => {
                self.main.set_interaction_enabled(true, now);
                if let Some(home) = self.home.as_mut() {
                    home.hide(now);
                }
                if let Some(bumper) = self.bumper.as_mut() {
                    bumper.hide(now);
                }
            }
            PanelState::Home => {
                if let Some(bumper) = self.bumper.as_mut() {
                    bumper.hide(now);
                }
                if let Some(home) = self.home.as_mut() {
                    home.show();
                }
                self.main.set_interaction_enabled(false, now);
            }
            PanelState::Bumper => {
                if let Some(home) = self.home.as_mut() {
                    home.hide(now);
                }
                if let Some(bumper) = self.bumper.as_mut() {
                    bumper.show();
                }
                self.main.set_interaction_enabled(false, now);
            }
        }
    }

    /// Route an input event.
    ///
    /// Controller buttons drive navigation. Pointer hits go to the front
    /// panel only, since button ids are scoped to their canvas. Gestures and
    /// triggers go to every visible canvas, which filter them by their own
    /// interaction state.
    pub fn handle_input(
        &mut self,
        event: InputEvent<ButtonId>,
        now: f64,
    ) -> Vec<(PanelState, Reaction)> {
        let mut reactions = Vec::new();

        match event {
            InputEvent::ButtonDown(button) => {
                self.handle_button(button, now);
            }
            InputEvent::PointerHit(_) => {
                let front = self.state();
                if let Some(canvas) = self.canvas_mut(front) {
                    let reaction = canvas.handle_input(event, now);
                    if reaction != Reaction::Ignored {
                        reactions.push((front, reaction));
                    }
                }
            }
            _ => {
                for panel in [PanelState::Main, PanelState::Home, PanelState::Bumper] {
                    if let Some(canvas) = self.canvas_mut(panel) {
                        let reaction = canvas.handle_input(event, now);
                        if reaction != Reaction::Ignored {
                            reactions.push((panel, reaction));
                        }
                    }
                }
            }
        }

        reactions
    }

    /// Per-frame poll of every visible canvas
    pub fn update(&mut self, now: f64, dt: f64) -> Vec<(PanelState, CanvasFrame)> {
        let mut frames = Vec::with_capacity(3);
        for panel in [PanelState::Main, PanelState::Home, PanelState::Bumper] {
            if let Some(canvas) = self.canvas_mut(panel) {
                if canvas.is_visible() {
                    frames.push((panel, canvas.update(now, dt)));
                }
            }
        }
        frames
    }
}
