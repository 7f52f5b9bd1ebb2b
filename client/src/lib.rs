//! Off-chain side of the SPL payment program.
//!
//! - [`network`] resolves a cluster name to RPC and websocket endpoints
//! - [`program`] derives the program's addresses and builds its instructions
//! - [`events`] decodes `DepositEvent`/`WithdrawEvent` from transaction logs
//! - [`waiter`] waits for a single event with a deadline
//! - [`steps`] orders the harness steps over any [`steps::PaymentSteps`]
//! - `harness` (feature `rpc`) drives the program on a live cluster

pub mod config;
pub mod error;
pub mod events;
#[cfg(feature = "rpc")]
pub mod harness;
pub mod network;
pub mod pda;
pub mod program;
pub mod steps;
pub mod telemetry;
pub mod waiter;

pub use error::{ClientError, Result};
pub use network::{Endpoint, Network};
pub use program::PaymentProgram;
pub use steps::{run_steps, PaymentSteps, RunReport};
pub use waiter::{one_shot, EventSlot, EventWaiter};
