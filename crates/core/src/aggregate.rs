//! Aggregate and event traits for the storefront's stateful pieces.

/// A fact produced by an aggregate.
pub trait Event: Clone + core::fmt::Debug {
    /// Stable event name/type identifier (e.g. "cart.item_added").
    fn event_type(&self) -> &'static str;
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` returns events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// Aggregates must not perform IO or side effects. Persistence is done by an
/// adapter that writes the state value returned from [`Aggregate::execute`].
pub trait Aggregate: Clone {
    type Command: Clone + core::fmt::Debug;
    type Event: Event;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    ///
    /// Implementations should update `version()` consistently (+1 per applied event).
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. An empty vector means the command was a no-op.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Number of events applied to this in-memory value.
    fn version(&self) -> u64;

    /// Decide and apply in one step, returning the new state value and the
    /// events that produced it. `self` is left untouched.
    fn execute(&self, command: &Self::Command) -> Result<Executed<Self>, Self::Error> {
        let events = self.handle(command)?;
        let mut state = self.clone();
        for event in &events {
            state.apply(event);
        }
        Ok(Executed { state, events })
    }
}

/// Outcome of [`Aggregate::execute`].
#[derive(Debug, Clone)]
pub struct Executed<A: Aggregate> {
    pub state: A,
    pub events: Vec<A::Event>,
}

impl<A: Aggregate> Executed<A> {
    /// True when the command changed nothing.
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        value: i64,
        version: u64,
    }

    #[derive(Debug, Clone)]
    struct Bumped(i64);

    impl Event for Bumped {
        fn event_type(&self) -> &'static str {
            "test.counter.bumped"
        }
    }

    impl Aggregate for Counter {
        type Command = i64;
        type Event = Bumped;
        type Error = ();

        fn apply(&mut self, event: &Bumped) {
            self.value += event.0;
            self.version += 1;
        }

        fn handle(&self, command: &i64) -> Result<Vec<Bumped>, ()> {
            match *command {
                0 => Ok(vec![]),
                n if n < 0 => Err(()),
                n => Ok(vec![Bumped(n)]),
            }
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    #[test]
    fn execute_returns_new_state_and_leaves_original() {
        let counter = Counter { value: 1, version: 0 };
        let executed = counter.execute(&5).unwrap();

        assert_eq!(executed.state.value, 6);
        assert_eq!(executed.state.version(), 1);
        assert_eq!(executed.events.len(), 1);
        assert_eq!(counter, Counter { value: 1, version: 0 });
    }

    #[test]
    fn empty_event_list_is_noop() {
        let counter = Counter { value: 1, version: 0 };
        let executed = counter.execute(&0).unwrap();
        assert!(executed.is_noop());
        assert_eq!(executed.state, counter);
        assert!(counter.execute(&-1).is_err());
    }
}
