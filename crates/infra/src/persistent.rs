//! Adapter that keeps an aggregate in sync with a key-value store.
//!
//! The aggregate itself stays pure: it decides and returns a new state value,
//! and this wrapper writes that value under a fixed key.

use plantpal_core::{Aggregate, Event};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::{KeyValueStore, load_or_default, save};

#[derive(Debug)]
pub struct Persistent<A, S> {
    key: &'static str,
    store: S,
    state: A,
}

impl<A, S> Persistent<A, S>
where
    A: Aggregate + Serialize + DeserializeOwned + Default,
    S: KeyValueStore,
{
    /// Restore state from `key`; absent or unparsable data yields the default.
    pub fn load(store: S, key: &'static str) -> Self {
        let state = load_or_default(&store, key);
        Self { key, store, state }
    }

    pub fn state(&self) -> &A {
        &self.state
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Run a command. When it changes anything, the new state replaces the
    /// current one and is written through synchronously.
    ///
    /// A failed write is logged; the in-memory state still advances.
    pub fn execute(&mut self, command: &A::Command) -> Result<Vec<A::Event>, A::Error> {
        let executed = self.state.execute(command)?;
        if executed.is_noop() {
            tracing::debug!(key = self.key, ?command, "command changed nothing");
            return Ok(executed.events);
        }

        for event in &executed.events {
            tracing::debug!(key = self.key, event_type = event.event_type(), "applied");
        }
        self.state = executed.state;
        self.persist();
        Ok(executed.events)
    }

    fn persist(&self) {
        if let Err(err) = save(&self.store, self.key, &self.state) {
            tracing::error!(key = self.key, error = %err, "failed to persist state");
        }
    }
}
