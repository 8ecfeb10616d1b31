//! Single-writer ledger store.
//!
//! One actor task owns the [`LedgerState`](gestor_core::LedgerState).
//! Commands arrive over an mpsc queue and are applied one at a time; each
//! caller gets its outcome over a oneshot reply, and every committed state
//! is published as an immutable snapshot on a watch channel.
//!
//! ```ignore
//! let (store, _task) = LedgerHandle::spawn(LedgerState::new(), SystemClock::utc(), 64);
//! store.dispatch(LedgerCommand::AddClient(client)).await?;
//! let snapshot = store.snapshot();
//! ```

mod actor;
pub mod clock;
pub mod error;
pub mod handle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use handle::LedgerHandle;
