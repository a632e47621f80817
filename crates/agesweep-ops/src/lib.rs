//! Purge, scan cycle and scheduling loop for agesweep.
//!
//! A [`ScanCycle`] performs one enumerate-stat-delete pass over the
//! monitored directory and returns a [`CycleReport`]. Per-file failures
//! ([`FileError`]) are absorbed inside the cycle; anything else surfaces
//! as a [`SweepError`].
//!
//! The [`Scheduler`] repeats cycles on the configured interval until its
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires, or
//! runs exactly one cycle when the interval is zero.
//!
//! ```rust,no_run
//! use agesweep_core::SweepConfig;
//! use agesweep_ops::Scheduler;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), agesweep_core::SweepError> {
//! let config = SweepConfig::new("/var/index");
//! let token = CancellationToken::new();
//! let mut scheduler = Scheduler::new(&config, token.clone())?;
//!
//! let outcome = scheduler.run().await?;
//! println!("{} cycles, {:?}", outcome.cycles, outcome.termination);
//! # Ok(())
//! # }
//! ```

mod cycle;
mod purge;
mod report;
mod scheduler;

pub use cycle::{CandidateSet, ScanCycle};
pub use purge::purge_file;
pub use report::CycleReport;
pub use scheduler::{CycleRunner, Scheduler, SchedulerOutcome, SchedulerState, Termination};

// Re-export core types for convenience
pub use agesweep_core::{FileError, SweepConfig, SweepError};
