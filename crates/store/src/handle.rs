//! Cloneable handle to the ledger actor.

use std::sync::Arc;

use gestor_core::{CommandOutcome, LedgerCommand, LedgerState};
use gestor_shared::{AppError, AppResult, LedgerConfig};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::actor::{Envelope, LedgerActor};
use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;

/// Sends commands to the ledger and reads its snapshots.
///
/// Dropping every handle stops the actor.
#[derive(Clone)]
pub struct LedgerHandle {
    tx: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<Arc<LedgerState>>,
}

impl LedgerHandle {
    /// Spawns the actor on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or if called outside a tokio runtime.
    pub fn spawn<C: Clock>(
        initial: LedgerState,
        clock: C,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let initial = Arc::new(initial);
        let (tx, rx) = mpsc::channel(capacity);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::clone(&initial));

        let actor = LedgerActor::new(initial, clock, snapshot_tx);
        let task = tokio::spawn(actor.run(rx));

        (
            Self {
                tx,
                snapshots: snapshot_rx,
            },
            task,
        )
    }

    /// Spawns the actor with the configured time zone and queue size.
    pub fn from_config(
        config: &LedgerConfig,
        initial: LedgerState,
    ) -> AppResult<(Self, JoinHandle<()>)> {
        if config.command_capacity == 0 {
            return Err(AppError::Config("ledger.command_capacity must be positive".into()));
        }
        let clock = SystemClock::from_config(config)?;
        Ok(Self::spawn(initial, clock, config.command_capacity))
    }

    /// Applies one command and waits for its outcome.
    pub async fn dispatch(&self, command: LedgerCommand) -> Result<CommandOutcome, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope { command, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)?
    }

    /// Applies commands in order, stopping at the first rejection.
    ///
    /// Commands before the rejected one stay applied.
    pub async fn dispatch_all(
        &self,
        commands: impl IntoIterator<Item = LedgerCommand>,
    ) -> Result<Vec<CommandOutcome>, StoreError> {
        let mut outcomes = Vec::new();
        for command in commands {
            outcomes.push(self.dispatch(command).await?);
        }
        Ok(outcomes)
    }

    /// Latest committed state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LedgerState> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Receiver notified after every committed command.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<LedgerState>> {
        self.snapshots.clone()
    }
}
