//! Spawning the loop and talking to it.

use chatskin_common::DomError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::runner::Reasserter;
use super::{LoopState, LoopTiming, PassStats, Trigger};
use crate::document::{Document, MutationSink};
use crate::pass::Enforcer;

/// Owner-side handle of a running loop.
///
/// Dropping the handle and every control sender also tears the loop down.
pub struct EnforcerHandle {
    control: mpsc::UnboundedSender<Trigger>,
    mutations: MutationSink,
    stats: watch::Receiver<PassStats>,
    state: watch::Receiver<LoopState>,
    task: JoinHandle<()>,
}

/// Start the loop on the current tokio runtime. It takes ownership of `doc`.
pub fn spawn<D>(enforcer: Enforcer, doc: D, timing: LoopTiming) -> EnforcerHandle
where
    D: Document + 'static,
{
    let (control, control_rx) = mpsc::unbounded_channel();
    let (mutations, mutation_rx) = mpsc::unbounded_channel();
    let (stats_tx, stats) = watch::channel(PassStats::default());
    let (state_tx, state) = watch::channel(LoopState::Idle);

    let reasserter = Reasserter {
        enforcer,
        doc,
        timing,
        state: LoopState::Idle,
        stats: PassStats::default(),
        mutation_tx: mutations.clone(),
        stats_tx,
        state_tx,
    };
    let task = tokio::spawn(reasserter.run(control_rx, mutation_rx));

    EnforcerHandle {
        control,
        mutations,
        stats,
        state,
        task,
    }
}

impl EnforcerHandle {
    pub fn send(&self, trigger: Trigger) -> Result<(), DomError> {
        self.control
            .send(trigger)
            .map_err(|_| DomError::ChannelClosed)
    }

    /// A control sender for another task or thread.
    pub fn control(&self) -> mpsc::UnboundedSender<Trigger> {
        self.control.clone()
    }

    /// Sink for mutations observed outside the document, such as records
    /// forwarded from a page script.
    pub fn mutation_sink(&self) -> MutationSink {
        self.mutations.clone()
    }

    pub fn stats(&self) -> PassStats {
        *self.stats.borrow()
    }

    pub fn subscribe_stats(&self) -> watch::Receiver<PassStats> {
        self.stats.clone()
    }

    pub fn state(&self) -> LoopState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<LoopState> {
        self.state.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Remove the style node, disconnect the observer, stop the timers and
    /// wait for the task to end. Returns the final totals.
    pub async fn teardown(self) -> Result<PassStats, DomError> {
        // The loop may already be gone; the join below still succeeds.
        let _ = self.control.send(Trigger::Teardown);
        self.task
            .await
            .map_err(|e| DomError::Script(format!("enforcer task failed: {e}")))?;
        Ok(*self.stats.borrow())
    }
}
