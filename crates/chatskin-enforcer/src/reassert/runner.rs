//! The task body: one owner of the document, driven by `select!`.

use std::future::pending;
use std::pin::Pin;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, error, info, warn};

use super::{LoopState, LoopTiming, PassKind, PassStats, Trigger};
use crate::document::{Document, MutationRecord, MutationSink};
use crate::pass::Enforcer;

type Timer = Option<Pin<Box<Sleep>>>;

pub(super) struct Reasserter<D> {
    pub(super) enforcer: Enforcer,
    pub(super) doc: D,
    pub(super) timing: LoopTiming,
    pub(super) state: LoopState,
    pub(super) stats: PassStats,
    pub(super) mutation_tx: MutationSink,
    pub(super) stats_tx: watch::Sender<PassStats>,
    pub(super) state_tx: watch::Sender<LoopState>,
}

impl<D: Document> Reasserter<D> {
    pub(super) async fn run(
        mut self,
        mut control_rx: mpsc::UnboundedReceiver<Trigger>,
        mut mutation_rx: mpsc::UnboundedReceiver<MutationRecord>,
    ) {
        let period = self.timing.tick_interval;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut deferred: Timer = None;
        let mut debounce: Timer = None;

        if self.doc.is_ready() {
            self.start(&mut mutation_rx, &mut deferred, &mut ticker);
        } else {
            debug!("Document not ready, waiting for DomReady");
        }

        loop {
            let watching = self.state == LoopState::Watching;

            tokio::select! {
                trigger = control_rx.recv() => match trigger {
                    Some(Trigger::DomReady) => {
                        self.start(&mut mutation_rx, &mut deferred, &mut ticker);
                    }
                    Some(Trigger::Reload(enforcer)) => self.reload(*enforcer),
                    Some(Trigger::PassNow) => self.pass(PassKind::Manual),
                    Some(Trigger::Teardown) | None => {
                        self.teardown();
                        break;
                    }
                },
                Some(record) = mutation_rx.recv(), if watching => {
                    if record.added > 0 && debounce.is_none() {
                        debounce = Some(Box::pin(time::sleep(self.timing.mutation_debounce)));
                    }
                }
                () = expire(&mut debounce), if debounce.is_some() => {
                    debounce = None;
                    self.pass(PassKind::Mutation);
                }
                () = expire(&mut deferred), if deferred.is_some() => {
                    deferred = None;
                    self.pass(PassKind::Deferred);
                }
                _ = ticker.tick(), if watching => self.pass(PassKind::Tick),
            }
        }
    }

    /// Initial pass for a freshly loaded document.
    fn start(
        &mut self,
        mutation_rx: &mut mpsc::UnboundedReceiver<MutationRecord>,
        deferred: &mut Timer,
        ticker: &mut Interval,
    ) {
        if let Err(e) = self.doc.observe_mutations(self.mutation_tx.clone()) {
            warn!(error = %e, "Could not observe mutations");
        }

        self.pass(PassKind::Initial);

        // Records from before the initial pass are already covered by it.
        while mutation_rx.try_recv().is_ok() {}

        *deferred = Some(Box::pin(time::sleep(self.timing.deferred_retry)));
        ticker.reset();

        if self.state == LoopState::Idle {
            self.set_state(LoopState::Watching);
            info!(
                tick_ms = self.timing.tick_interval.as_millis() as u64,
                "Enforcer watching"
            );
        }
    }

    fn pass(&mut self, kind: PassKind) {
        let result = self.enforcer.run_pass(&mut self.doc);
        match &result {
            Ok(report) => debug!(?kind, ?report, "Pass applied"),
            Err(e) => error!(?kind, error = %e, "Pass failed"),
        }
        self.stats.record(kind, result.is_ok());
        self.stats_tx.send_replace(self.stats);
    }

    fn reload(&mut self, enforcer: Enforcer) {
        let old_id = self.enforcer.injector().style_id();
        if enforcer.injector().style_id() != old_id {
            if let Err(e) = self.enforcer.injector().remove(&mut self.doc) {
                warn!(style_id = old_id, error = %e, "Could not remove previous style node");
            }
        }

        self.enforcer = enforcer;
        info!("Theme reloaded");

        if self.state == LoopState::Watching {
            self.pass(PassKind::Reload);
        }
    }

    fn teardown(&mut self) {
        match self.enforcer.injector().remove(&mut self.doc) {
            Ok(removed) => debug!(removed, "Style node removed"),
            Err(e) => warn!(error = %e, "Could not remove style node"),
        }
        self.doc.disconnect();
        if let Err(e) = self.doc.flush() {
            warn!(error = %e, "Could not flush teardown");
        }
        self.set_state(LoopState::TornDown);
        info!(total_passes = self.stats.total, "Enforcer torn down");
    }

    fn set_state(&mut self, state: LoopState) {
        self.state = state;
        self.state_tx.send_replace(state);
    }
}

/// Resolve when the timer fires; never resolve when there is none.
async fn expire(timer: &mut Timer) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => pending().await,
    }
}
