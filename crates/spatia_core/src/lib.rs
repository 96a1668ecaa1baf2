//! Spatia Core
//!
//! Foundational primitives for spatial panel interaction:
//!
//! - **Clock**: a monotonic time source supplied by the host
//! - **Input**: controller gestures, triggers, buttons and pointer hits
//! - **State Machines**: guarded transition tables
//! - **Selection**: a single "current selection" over an ordered item set
//!
//! # Example
//!
//! ```rust
//! use spatia_core::selection::{SelectionController, SelectionHost};
//! use spatia_core::input::Navigate;
//!
//! struct Log(Vec<String>);
//!
//! impl SelectionHost<char> for Log {
//!     fn on_select(&mut self, item: char) {
//!         self.0.push(format!("select {item}"));
//!     }
//!     fn on_deselect(&mut self, item: char) {
//!         self.0.push(format!("deselect {item}"));
//!     }
//!     fn on_activate(&mut self, item: char) {
//!         self.0.push(format!("activate {item}"));
//!     }
//! }
//!
//! let mut log = Log(Vec::new());
//! let mut selection = SelectionController::new(['a', 'b', 'c']);
//!
//! selection.advance(Navigate::Previous, &mut log);
//! assert_eq!(selection.selected(), Some('a'));
//!
//! selection.advance(Navigate::Previous, &mut log);
//! assert_eq!(selection.selected(), Some('c'));
//! ```

pub mod clock;
pub mod fsm;
pub mod input;
pub mod selection;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fsm::{StateMachine, StateMachineBuilder, Transition};
pub use input::{ControllerButton, GestureDirection, InputEvent, Navigate};
pub use selection::{SelectionController, SelectionHost, SelectionState};
