//! Interval-driven repetition of scan cycles.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use agesweep_core::{SweepConfig, SweepError, format_age};

use crate::cycle::ScanCycle;
use crate::report::CycleReport;

/// One unit of scheduled work.
pub trait CycleRunner: Send + Sync + 'static {
    /// Perform a full pass and report on it.
    fn run_cycle(&self) -> CycleReport;
}

impl CycleRunner for ScanCycle {
    fn run_cycle(&self) -> CycleReport {
        self.run()
    }
}

/// Where the scheduler currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Scanning,
    Sleeping,
    Terminated,
}

/// Why the scheduler stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The single pass requested by a zero interval finished.
    Completed,
    /// The cancellation token fired.
    Interrupted,
}

/// Result of a scheduler run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOutcome {
    pub termination: Termination,
    /// Number of scan cycles that ran to completion.
    pub cycles: u64,
}

/// Runs scan cycles until cancelled, or once for a zero interval.
#[derive(Debug)]
pub struct Scheduler<C = ScanCycle> {
    cycle: Arc<C>,
    interval: Duration,
    cancel: CancellationToken,
    state: SchedulerState,
    last_report: Option<CycleReport>,
}

impl Scheduler<ScanCycle> {
    /// Create a scheduler from the sweep configuration.
    pub fn new(config: &SweepConfig, cancel: CancellationToken) -> Result<Self, SweepError> {
        Ok(Self::with_cycle(ScanCycle::new(config)?, config.interval, cancel))
    }
}

impl<C: CycleRunner> Scheduler<C> {
    /// Create a scheduler around an existing cycle.
    pub fn with_cycle(cycle: C, interval: Duration, cancel: CancellationToken) -> Self {
        Self {
            cycle: Arc::new(cycle),
            interval,
            cancel,
            state: SchedulerState::Idle,
            last_report: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Report of the most recent completed cycle.
    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    /// Run until completion, cancellation or a fatal error.
    ///
    /// "Exiting..." is logged on every path out.
    pub async fn run(&mut self) -> Result<SchedulerOutcome, SweepError> {
        if !self.interval.is_zero() {
            tracing::info!(
                "Scanning every {}. Press Ctrl-C to exit",
                format_age(self.interval)
            );
        }

        let result = self.run_loop().await;
        match &result {
            Ok(outcome) if outcome.termination == Termination::Interrupted => {
                tracing::info!("Interrupted after {} cycle(s)", outcome.cycles);
            }
            Ok(_) => {}
            Err(err) => tracing::error!("Sweep aborted: {err}"),
        }

        self.transition(SchedulerState::Terminated);
        tracing::info!("Exiting...");
        result
    }

    async fn run_loop(&mut self) -> Result<SchedulerOutcome, SweepError> {
        let mut cycles = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Ok(SchedulerOutcome {
                    termination: Termination::Interrupted,
                    cycles,
                });
            }

            self.transition(SchedulerState::Scanning);
            self.last_report = Some(self.scan().await?);
            cycles += 1;

            if self.interval.is_zero() {
                return Ok(SchedulerOutcome {
                    termination: Termination::Completed,
                    cycles,
                });
            }

            self.transition(SchedulerState::Sleeping);
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    return Ok(SchedulerOutcome {
                        termination: Termination::Interrupted,
                        cycles,
                    });
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// Run one cycle on the blocking pool and wait for it.
    ///
    /// A cycle that panics becomes [`SweepError::Fatal`].
    async fn scan(&self) -> Result<CycleReport, SweepError> {
        let cycle = Arc::clone(&self.cycle);
        tokio::task::spawn_blocking(move || cycle.run_cycle())
            .await
            .map_err(|err| SweepError::fatal(format!("Scan cycle aborted: {err}")))
    }

    fn transition(&mut self, next: SchedulerState) {
        tracing::debug!(from = ?self.state, to = ?next, "Scheduler state change");
        self.state = next;
    }
}
