//! Poll driver and scenario host

use std::rc::Rc;

use lifecycle_core::Hook;
use serde::Serialize;

use crate::error::{ScriptError, ScriptResult};
use crate::observer::LogCollector;
use crate::record::{LogEntry, RecordedProps, RecordedState};
use crate::runner::ScriptRunner;
use crate::scenario::Scenario;

/// Poll ceiling for a scenario that never completes
pub const DEFAULT_MAX_POLLS: usize = 100;

/// Outcome of one driven scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub scenario: Scenario,
    pub polls: usize,
    pub completions: usize,
    pub log: Vec<LogEntry>,
    pub trace: Vec<Hook>,
    pub external: RecordedProps,
    pub internal: RecordedState,
}

/// Mount `runner`, then poll until it completes or `max_polls` is spent
pub fn drive_runner(runner: &mut ScriptRunner, max_polls: usize) -> ScriptResult<usize> {
    runner.mount()?;
    while !runner.is_completed() {
        if runner.polls() >= max_polls {
            return Err(ScriptError::PollLimit {
                scenario: runner.scenario(),
                polls: max_polls,
            });
        }
        runner.poll()?;
    }
    Ok(runner.polls())
}

/// Run one scenario on a fresh runner, collecting its log
pub fn drive(scenario: Scenario, max_polls: usize) -> ScriptResult<RunReport> {
    let collector = Rc::new(LogCollector::new());
    let mut runner = ScriptRunner::new(scenario, collector.clone());
    let polls = drive_runner(&mut runner, max_polls)?;

    Ok(RunReport {
        scenario,
        polls,
        completions: collector.completions(),
        log: collector.entries(),
        trace: runner.trace(),
        external: runner.external(),
        internal: runner.internal(),
    })
}

/// Runs scenarios back to back, one fresh runner each
#[derive(Debug, Clone)]
pub struct ScenarioHost {
    max_polls: usize,
}

impl Default for ScenarioHost {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POLLS)
    }
}

impl ScenarioHost {
    pub fn new(max_polls: usize) -> Self {
        Self { max_polls }
    }

    pub fn max_polls(&self) -> usize {
        self.max_polls
    }

    /// Run the whole catalogue, following host order from `OnMount`
    pub fn run_all(&self) -> ScriptResult<Vec<RunReport>> {
        let mut order = Vec::with_capacity(Scenario::ALL.len());
        let mut next = Some(Scenario::OnMount);
        while let Some(scenario) = next {
            order.push(scenario);
            next = scenario.next();
        }
        self.run(&order)
    }

    /// Run `scenarios` in the given order, stopping at the first failure
    pub fn run(&self, scenarios: &[Scenario]) -> ScriptResult<Vec<RunReport>> {
        let mut reports = Vec::with_capacity(scenarios.len());
        for &scenario in scenarios {
            log::info!("begin {}", scenario);
            let report = drive(scenario, self.max_polls)?;
            log::info!(
                "end {} ({} entries, {} polls)",
                scenario,
                report.log.len(),
                report.polls
            );
            reports.push(report);
        }
        Ok(reports)
    }
}
