//! Guarded transition tables
//!
//! A flat state machine keyed by `(state, event)`. Each key holds its
//! candidate targets in declaration order; the first candidate whose guard
//! passes is taken. Events with no passing candidate leave the state alone.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

/// Condition checked when a transition's event arrives
pub type Guard = Box<dyn Fn() -> bool>;

/// One `from --event--> to` edge, optionally guarded
pub struct Transition<S, E> {
    from: S,
    event: E,
    to: S,
    guard: Option<Guard>,
}

impl<S, E> Transition<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from,
            event,
            to,
            guard: None,
        }
    }

    /// Only take this edge while `guard` returns true
    pub fn with_guard<F: Fn() -> bool + 'static>(mut self, guard: F) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }
}

struct Target<S> {
    to: S,
    guard: Option<Guard>,
}

impl<S> Target<S> {
    fn allowed(&self) -> bool {
        self.guard.as_ref().map_or(true, |guard| guard())
    }
}

type Table<S, E> = FxHashMap<(S, E), SmallVec<[Target<S>; 2]>>;

pub struct StateMachineBuilder<S, E> {
    initial: S,
    table: Table<S, E>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            table: FxHashMap::default(),
        }
    }

    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.table
            .entry((transition.from, transition.event))
            .or_default()
            .push(Target {
                to: transition.to,
                guard: transition.guard,
            });
        self
    }

    /// Unguarded shorthand for [`transition`](Self::transition)
    pub fn on(self, from: S, event: E, to: S) -> Self {
        self.transition(Transition::new(from, event, to))
    }

    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current: self.initial,
            table: self.table,
        }
    }
}

pub struct StateMachine<S, E> {
    current: S,
    table: Table<S, E>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    pub fn builder(initial: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial)
    }

    pub fn current_state(&self) -> S {
        self.current
    }

    /// Feed `event` and return the resulting state.
    pub fn send(&mut self, event: E) -> S {
        let from = self.current;
        let target = self
            .table
            .get(&(from, event))
            .and_then(|targets| targets.iter().find(|target| target.allowed()));

        match target {
            Some(target) => {
                self.current = target.to;
                trace!(?from, ?event, to = ?target.to, "transition");
            }
            None => trace!(state = ?from, ?event, "no transition"),
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Panel {
        Main,
        Home,
        Bumper,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Press {
        HomeTap,
        Bumper,
    }

    #[test]
    fn test_toggle_table() {
        let mut fsm = StateMachine::builder(Panel::Main)
            .on(Panel::Main, Press::HomeTap, Panel::Home)
            .on(Panel::Home, Press::HomeTap, Panel::Main)
            .on(Panel::Main, Press::Bumper, Panel::Bumper)
            .on(Panel::Bumper, Press::Bumper, Panel::Main)
            .build();

        assert_eq!(fsm.current_state(), Panel::Main);
        assert_eq!(fsm.send(Press::HomeTap), Panel::Home);
        assert_eq!(fsm.send(Press::HomeTap), Panel::Main);
        assert_eq!(fsm.send(Press::Bumper), Panel::Bumper);
    }

    #[test]
    fn test_unmatched_event_keeps_state() {
        let mut fsm = StateMachine::builder(Panel::Home)
            .on(Panel::Main, Press::HomeTap, Panel::Home)
            .build();

        assert_eq!(fsm.send(Press::HomeTap), Panel::Home);
        assert_eq!(fsm.send(Press::Bumper), Panel::Home);
    }

    #[test]
    fn test_guard_is_checked_on_each_send() {
        let open = Rc::new(Cell::new(false));
        let gate = open.clone();

        let mut fsm = StateMachine::builder(Panel::Main)
            .transition(
                Transition::new(Panel::Main, Press::HomeTap, Panel::Home)
                    .with_guard(move || gate.get()),
            )
            .build();

        assert_eq!(fsm.send(Press::HomeTap), Panel::Main);
        open.set(true);
        assert_eq!(fsm.send(Press::HomeTap), Panel::Home);
    }

    #[test]
    fn test_first_allowed_target_wins() {
        let mut fsm = StateMachine::builder(Panel::Main)
            .transition(
                Transition::new(Panel::Main, Press::HomeTap, Panel::Bumper).with_guard(|| false),
            )
            .on(Panel::Main, Press::HomeTap, Panel::Home)
            .on(Panel::Main, Press::HomeTap, Panel::Bumper)
            .build();

        assert_eq!(fsm.send(Press::HomeTap), Panel::Home);
    }
}
