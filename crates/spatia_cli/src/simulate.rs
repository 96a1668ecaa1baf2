//! Scripted session replay
//!
//! Builds the panels described by a [`Script`], then steps a manual clock at a
//! fixed frame rate, feeding each event on the first frame at or after its
//! time and polling every visible canvas once per frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, warn};

use spatia_core::clock::{Clock, ManualClock};
use spatia_core::input::InputEvent;
use spatia_ui::{
    ButtonId, Canvas, PanelButton, PanelState, Reaction, RecordingHaptics, UiConfig, UiNavigator,
};

use crate::script::{CanvasSpec, Script, ScriptAction};

/// One line of simulation output
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceEntry {
    pub at: f64,
    pub panel: PanelState,
    #[serde(flatten)]
    pub kind: TraceKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceKind {
    Selected { button: Option<String> },
    Activated { button: String },
    Clicked { button: String },
    Haptic { pulses: usize },
    PanelChanged { from: PanelState },
    Alpha { value: f32 },
    Depth { button: String, offset: f32 },
    Distance { meters: f32 },
}

#[derive(Clone, Debug)]
pub struct SimulationOptions {
    pub fps: u32,
    /// Also record per-frame visual changes
    pub frames: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            frames: false,
        }
    }
}

/// Click actions queue their effects here; the loop applies them after the
/// input that caused them.
#[derive(Default)]
struct ClickQueue {
    clicked: VecDeque<(PanelState, String)>,
    go_to: VecDeque<PanelState>,
}

pub struct Simulation {
    config: UiConfig,
    options: SimulationOptions,
    navigator: UiNavigator,
    clicks: Rc<RefCell<ClickQueue>>,
    haptics: RecordingHaptics,
    clock: ManualClock,
    trace: Vec<TraceEntry>,
}

impl Simulation {
    pub fn new(script: &Script, config: UiConfig, options: SimulationOptions) -> Self {
        let clock = ManualClock::new(0.0);
        let clicks = Rc::new(RefCell::new(ClickQueue::default()));
        let haptics = RecordingHaptics::new();

        let build = |panel: PanelState, spec: &CanvasSpec| {
            build_canvas(panel, spec, &config, &clicks, &haptics, clock.now())
        };
        let main = build(PanelState::Main, &script.main);
        let home = script.home.as_ref().map(|spec| build(PanelState::Home, spec));
        let bumper = script
            .bumper
            .as_ref()
            .map(|spec| build(PanelState::Bumper, spec));

        let navigator = UiNavigator::new(main, home, bumper, clock.now());

        Self {
            config,
            options,
            navigator,
            clicks,
            haptics,
            clock,
            trace: Vec::new(),
        }
    }

    /// Replay every event, then run until animations settle.
    pub fn run(mut self, script: &Script) -> Vec<TraceEntry> {
        let fps = self.options.fps.max(1);
        let dt = 1.0 / f64::from(fps);
        let end = script.end_time() + self.config.animation_time + dt;
        let total_frames = (end / dt).ceil() as u64;

        info!(events = script.events.len(), fps, "replaying session");

        let mut pending = script.events.iter().peekable();
        for frame in 0..=total_frames {
            let now = frame as f64 * dt;
            self.clock.set(now);

            while let Some(event) = pending.next_if(|event| event.at <= now) {
                debug!(at = event.at, action = ?event.action, "script event");
                self.apply(&event.action);
            }

            self.poll_frame(dt);
        }

        self.trace
    }

    fn apply(&mut self, action: &ScriptAction) {
        let now = self.clock.now();
        let before = self.navigator.state();

        match action {
            ScriptAction::Gesture {
                direction,
                continued,
            } => {
                let event = if *continued {
                    InputEvent::GestureContinue(*direction)
                } else {
                    InputEvent::GestureStart(*direction)
                };
                self.dispatch(event);
            }
            ScriptAction::Trigger { value } => {
                self.dispatch(InputEvent::TriggerUp { value: *value });
            }
            ScriptAction::Hit { button } => {
                let found = self
                    .navigator
                    .canvas(before)
                    .and_then(|canvas| canvas.find(button));
                match found {
                    Some(id) => self.dispatch(InputEvent::PointerHit(id)),
                    None => warn!(button = %button, panel = ?before, "hit on unknown button"),
                }
            }
            ScriptAction::Press { button } => {
                self.dispatch(InputEvent::ButtonDown(*button));
            }
            ScriptAction::Interaction { panel, enabled } => {
                match self.navigator.canvas_mut(*panel) {
                    Some(canvas) => canvas.set_interaction_enabled(*enabled, now),
                    None => warn!(panel = ?panel, "interaction toggle on missing panel"),
                }
            }
        }

        self.record_panel_change(before);
        self.drain_clicks();
        self.record_haptics(before);
    }

    fn dispatch(&mut self, event: InputEvent<ButtonId>) {
        let now = self.clock.now();
        for (panel, reaction) in self.navigator.handle_input(event, now) {
            let kind = match reaction {
                Reaction::Ignored => continue,
                Reaction::SelectionChanged(id) => TraceKind::Selected {
                    button: id.map(|id| self.label(panel, id)),
                },
                Reaction::Activated(id) => TraceKind::Activated {
                    button: self.label(panel, id),
                },
            };
            self.push(panel, kind);
        }
    }

    fn drain_clicks(&mut self) {
        let now = self.clock.now();
        let (clicked, targets) = {
            let mut queue = self.clicks.borrow_mut();
            (
                queue.clicked.drain(..).collect::<Vec<_>>(),
                queue.go_to.drain(..).collect::<Vec<_>>(),
            )
        };

        for (panel, button) in clicked {
            self.push(panel, TraceKind::Clicked { button });
        }
        for target in targets {
            let before = self.navigator.state();
            self.navigator.go_to(target, now);
            self.record_panel_change(before);
        }
    }

    fn record_panel_change(&mut self, before: PanelState) {
        let after = self.navigator.state();
        if after != before {
            self.push(after, TraceKind::PanelChanged { from: before });
        }
    }

    /// Pulses belong to the panel that was in front when the input arrived,
    /// even if a click action has since switched panels.
    fn record_haptics(&mut self, panel: PanelState) {
        let pulses = self.haptics.take().len();
        if pulses > 0 {
            self.push(panel, TraceKind::Haptic { pulses });
        }
    }

    fn poll_frame(&mut self, dt: f64) {
        let now = self.clock.now();
        let frames = self.navigator.update(now, dt);
        if !self.options.frames {
            return;
        }

        for (panel, frame) in frames {
            if let Some(value) = frame.alpha {
                self.push(panel, TraceKind::Alpha { value });
            }
            for (id, offset) in frame.button_offsets {
                let button = self.label(panel, id);
                self.push(panel, TraceKind::Depth { button, offset });
            }
            if frame.head_follow > 0.0 {
                self.push(
                    panel,
                    TraceKind::Distance {
                        meters: frame.head_distance,
                    },
                );
            }
        }
    }

    fn label(&self, panel: PanelState, id: ButtonId) -> String {
        self.navigator
            .canvas(panel)
            .and_then(|canvas| canvas.button(id))
            .map(|button| button.label().to_string())
            .unwrap_or_else(|| format!("{id:?}"))
    }

    fn push(&mut self, panel: PanelState, kind: TraceKind) {
        self.trace.push(TraceEntry {
            at: self.clock.now(),
            panel,
            kind,
        });
    }
}

fn build_canvas(
    panel: PanelState,
    spec: &CanvasSpec,
    config: &UiConfig,
    clicks: &Rc<RefCell<ClickQueue>>,
    haptics: &RecordingHaptics,
    now: f64,
) -> Canvas {
    let mut builder = Canvas::builder(config.clone())
        .plane(spec.plane)
        .head_tracking(spec.head_tracking)
        .haptics(haptics.clone());

    for button_spec in &spec.buttons {
        let label = button_spec.label().to_string();
        let go_to = button_spec.go_to();
        let queue = Rc::clone(clicks);

        let mut button = PanelButton::new(label.clone(), config, now).on_click(move || {
            let mut queue = queue.borrow_mut();
            queue.clicked.push_back((panel, label.clone()));
            if let Some(target) = go_to {
                queue.go_to.push_back(target);
            }
        });
        if button_spec.highlight() {
            button = button.with_highlight();
        }
        builder.button(button);
    }

    builder.build(now)
}
