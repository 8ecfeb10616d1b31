//! The ledger actor: sole owner and writer of the ledger state.

use std::sync::Arc;

use gestor_core::{CommandOutcome, LedgerCommand, LedgerContext, LedgerState};
use tokio::sync::{mpsc, oneshot, watch};

use crate::clock::Clock;
use crate::error::StoreError;

/// A queued command and where to send its result.
pub(crate) struct Envelope {
    pub(crate) command: LedgerCommand,
    pub(crate) reply: oneshot::Sender<Result<CommandOutcome, StoreError>>,
}

/// Applies queued commands one at a time.
pub(crate) struct LedgerActor<C: Clock> {
    state: Arc<LedgerState>,
    clock: C,
    snapshots: watch::Sender<Arc<LedgerState>>,
}

impl<C: Clock> LedgerActor<C> {
    pub(crate) fn new(
        state: Arc<LedgerState>,
        clock: C,
        snapshots: watch::Sender<Arc<LedgerState>>,
    ) -> Self {
        Self {
            state,
            clock,
            snapshots,
        }
    }

    /// Runs until every handle is dropped.
    pub(crate) async fn run(mut self, mut rx: mpsc::Receiver<Envelope>) {
        tracing::info!("Ledger store started");

        while let Some(Envelope { command, reply }) = rx.recv().await {
            let result = self.handle(command);
            if reply.send(result).is_err() {
                tracing::debug!("Caller went away before the reply was sent");
            }
        }

        tracing::info!("Ledger command channel closed, store stopping");
    }

    fn handle(&mut self, command: LedgerCommand) -> Result<CommandOutcome, StoreError> {
        let name = command.name();
        let ctx = LedgerContext::new(self.clock.today());

        match self.state.apply(&ctx, command) {
            Ok((next, outcome)) => {
                self.state = Arc::new(next);
                self.snapshots.send_replace(Arc::clone(&self.state));
                tracing::debug!(command = name, today = %ctx.today, "Command applied");
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(
                    command = name,
                    code = e.error_code(),
                    error = %e,
                    "Command rejected"
                );
                Err(e.into())
            }
        }
    }
}
