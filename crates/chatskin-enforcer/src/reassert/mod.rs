//! The reassertion loop.
//!
//! One task owns the document and runs every pass, so passes never
//! overlap. It reacts to a control channel, a mutation channel, a
//! fixed-period timer and a one-shot deferred retry. Whatever the trigger,
//! the pass is the same.

mod handle;
mod runner;


use std::time::Duration;

use chatskin_config::schema::EnforcerConfig;
use serde::Serialize;

use crate::pass::Enforcer;

pub use handle::{spawn, EnforcerHandle};

/// Control messages for the loop.
#[derive(Debug)]
pub enum Trigger {
    /// The document finished loading. Starts watching on the first one;
    /// later ones (navigation) re-run the initial pass.
    DomReady,
    /// Swap in a rebuilt enforcer and run a pass.
    Reload(Box<Enforcer>),
    /// Run a pass now.
    PassNow,
    /// Remove the style node, disconnect the observer and stop.
    Teardown,
}

/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopState {
    /// Waiting for the document to become ready.
    Idle,
    /// Initial pass done; observer and timers running.
    Watching,
    TornDown,
}

/// Why a pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Initial,
    Mutation,
    Tick,
    Deferred,
    Reload,
    Manual,
}

/// Running totals, published after every pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub total: u64,
    pub initial: u64,
    pub mutation: u64,
    pub tick: u64,
    pub deferred: u64,
    pub reload: u64,
    pub manual: u64,
    /// Passes that returned an error. Also counted under their kind.
    pub failed: u64,
}

impl PassStats {
    fn record(&mut self, kind: PassKind, ok: bool) {
        self.total += 1;
        let counter = match kind {
            PassKind::Initial => &mut self.initial,
            PassKind::Mutation => &mut self.mutation,
            PassKind::Tick => &mut self.tick,
            PassKind::Deferred => &mut self.deferred,
            PassKind::Reload => &mut self.reload,
            PassKind::Manual => &mut self.manual,
        };
        *counter += 1;
        if !ok {
            self.failed += 1;
        }
    }
}

/// Loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    pub tick_interval: Duration,
    pub deferred_retry: Duration,
    pub mutation_debounce: Duration,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self::from(&EnforcerConfig::default())
    }
}

impl From<&EnforcerConfig> for LoopTiming {
    fn from(config: &EnforcerConfig) -> Self {
        Self {
            // A zero period would make the interval panic.
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
            deferred_retry: Duration::from_millis(config.deferred_retry_ms),
            mutation_debounce: Duration::from_millis(config.mutation_debounce_ms),
        }
    }
}
