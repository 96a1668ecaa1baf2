//! Session scripts
//!
//! A script describes the panels and a timed list of controller events:
//!
//! ```toml
//! [main]
//! buttons = ["Scan", { label = "Help", go_to = "bumper" }]
//!
//! [bumper]
//! plane = 1
//! buttons = [{ label = "Back", go_to = "main" }]
//!
//! [[events]]
//! at = 0.0
//! kind = "gesture"
//! direction = "right"
//!
//! [[events]]
//! at = 0.4
//! kind = "trigger"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use spatia_core::input::{ControllerButton, GestureDirection};
use spatia_ui::{HeadTracking, PanelState};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub main: CanvasSpec,
    #[serde(default)]
    pub home: Option<CanvasSpec>,
    #[serde(default)]
    pub bumper: Option<CanvasSpec>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasSpec {
    #[serde(default)]
    pub plane: i32,
    #[serde(default)]
    pub head_tracking: HeadTracking,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
}

/// A button, either just its label or a table with options
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ButtonSpec {
    Label(String),
    Full(ButtonOptions),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonOptions {
    pub label: String,
    #[serde(default)]
    pub go_to: Option<PanelState>,
    #[serde(default = "default_true")]
    pub highlight: bool,
}

fn default_true() -> bool {
    true
}

impl ButtonSpec {
    pub fn label(&self) -> &str {
        match self {
            ButtonSpec::Label(label) => label,
            ButtonSpec::Full(options) => &options.label,
        }
    }

    pub fn go_to(&self) -> Option<PanelState> {
        match self {
            ButtonSpec::Label(_) => None,
            ButtonSpec::Full(options) => options.go_to,
        }
    }

    pub fn highlight(&self) -> bool {
        match self {
            ButtonSpec::Label(_) => true,
            ButtonSpec::Full(options) => options.highlight,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScriptEvent {
    /// Seconds from the start of the session
    pub at: f64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Touchpad gesture
    Gesture {
        direction: GestureDirection,
        #[serde(default)]
        continued: bool,
    },
    /// Trigger released
    Trigger {
        #[serde(default = "default_trigger")]
        value: f32,
    },
    /// Controller ray hits a button on the front panel
    Hit { button: String },
    /// Controller button pressed
    Press { button: ControllerButton },
    /// Toggle interaction on a panel
    Interaction {
        #[serde(default = "default_panel")]
        panel: PanelState,
        enabled: bool,
    },
}

fn default_trigger() -> f32 {
    1.0
}

fn default_panel() -> PanelState {
    PanelState::Main
}

/// Keys an event of the given kind may carry besides `at` and `kind`.
/// Unknown kinds are left to the typed parse to reject.
fn event_keys(kind: &str) -> Option<&'static [&'static str]> {
    let keys: &'static [&'static str] = match kind {
        "gesture" => &["direction", "continued"],
        "trigger" => &["value"],
        "hit" | "press" => &["button"],
        "interaction" => &["panel", "enabled"],
        _ => return None,
    };
    Some(keys)
}

/// Flattened event tables can't deny unknown fields through serde, so the
/// raw tables are checked key by key.
fn check_event_keys(document: &toml::Table) -> Result<()> {
    let Some(events) = document.get("events").and_then(toml::Value::as_array) else {
        return Ok(());
    };

    for (index, event) in events.iter().enumerate() {
        let Some(table) = event.as_table() else {
            continue;
        };
        let Some(kind) = table.get("kind").and_then(toml::Value::as_str) else {
            continue;
        };
        let Some(allowed) = event_keys(kind) else {
            continue;
        };
        for key in table.keys() {
            if key != "at" && key != "kind" && !allowed.contains(&key.as_str()) {
                bail!("event {index} ({kind}): unknown key `{key}`");
            }
        }
    }
    Ok(())
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Parse a script and order its events by time
    pub fn parse(content: &str) -> Result<Self> {
        let mut script: Script = toml::from_str(content)?;
        check_event_keys(&content.parse::<toml::Table>()?)?;

        for event in &script.events {
            if !event.at.is_finite() || event.at < 0.0 {
                bail!("event time {} must be a non-negative number", event.at);
            }
        }
        script.events.sort_by(|a, b| a.at.total_cmp(&b.at));

        Ok(script)
    }

    /// Time of the last event (zero for an empty script)
    pub fn end_time(&self) -> f64 {
        self.events.last().map_or(0.0, |event| event.at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCRIPT: &str = r#"
        [main]
        buttons = ["Scan", { label = "Help", go_to = "bumper", highlight = false }]

        [bumper]
        plane = 1
        head_tracking = "smooth"
        buttons = [{ label = "Back", go_to = "main" }]

        [[events]]
        at = 0.5
        kind = "trigger"

        [[events]]
        at = 0.0
        kind = "gesture"
        direction = "right"

        [[events]]
        at = 0.2
        kind = "press"
        button = "home_tap"
    "#;

    #[test]
    fn test_parse_orders_events() {
        let script = Script::parse(SCRIPT).unwrap();

        let actions: Vec<ScriptAction> = script.events.iter().map(|e| e.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                ScriptAction::Gesture {
                    direction: GestureDirection::Right,
                    continued: false,
                },
                ScriptAction::Press {
                    button: ControllerButton::HomeTap,
                },
                ScriptAction::Trigger { value: 1.0 },
            ]
        );
        assert_eq!(script.end_time(), 0.5);
    }

    #[test]
    fn test_button_specs() {
        let script = Script::parse(SCRIPT).unwrap();
        let buttons = &script.main.buttons;

        assert_eq!(buttons[0].label(), "Scan");
        assert_eq!(buttons[0].go_to(), None);
        assert!(buttons[0].highlight());

        assert_eq!(buttons[1].label(), "Help");
        assert_eq!(buttons[1].go_to(), Some(PanelState::Bumper));
        assert!(!buttons[1].highlight());

        let bumper = script.bumper.as_ref().unwrap();
        assert_eq!(bumper.plane, 1);
        assert_eq!(bumper.head_tracking, HeadTracking::Smooth);
        assert!(script.home.is_none());
    }

    #[test]
    fn test_rejects_misspelled_button_option() {
        let result = Script::parse(
            r#"
            [main]
            buttons = [{ label = "Help", goto = "bumper" }]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_misspelled_event_key() {
        let err = Script::parse(
            r#"
            [main]
            [[events]]
            at = 0.0
            kind = "gesture"
            direction = "right"
            contineud = true
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown key `contineud`"));
    }

    #[test]
    fn test_rejects_key_from_another_event_kind() {
        let result = Script::parse(
            r#"
            [main]
            [[events]]
            at = 0.0
            kind = "trigger"
            button = "Help"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_time() {
        let err = Script::parse(
            r#"
            [main]
            [[events]]
            at = -1.0
            kind = "trigger"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }
}
