//! The ledger: every entity collection plus the reducer that moves it from
//! one consistent state to the next.
//!
//! [`LedgerState::apply`] is a total function from `(state, command)` to
//! either a new state or an error. A failed command leaves the input state
//! untouched, so callers can hold on to the previous snapshot.

pub mod command;
pub mod error;
pub mod reducer;
pub mod state;

#[cfg(test)]
mod reducer_props;

pub use command::{CommandOutcome, LedgerCommand, LedgerContext};
pub use error::{ErrorKind, LedgerError};
pub use state::LedgerState;
